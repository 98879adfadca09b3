mod clock;
mod logging;

use std::time::Duration;

use color_eyre::eyre::WrapErr;
use comet_config::Config;
use comet_field::{FieldView, ParticleAnimator};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Style, Stylize},
    text::Line,
    widgets::Paragraph,
};
use tracing::{info, warn};

use crate::clock::AnimationClock;

/// How long to wait for input before drawing the next frame.
const FRAME_TIMEOUT: Duration = Duration::from_millis(50);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let log_path = match logging::init() {
        Ok(path) => Some(path),
        Err(err) => {
            eprintln!("comet: logging disabled: {err:#}");
            None
        }
    };

    let config = Config::load_or_default();
    info!(log = ?log_path, policy = config.policy().name(), "starting comet");
    let app = App::new(config)?;

    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Current settings.
    config: Config,
    /// Comet background.
    animator: ParticleAnimator,
    /// Animation time source.
    clock: AnimationClock,
    /// One-line message shown under the title, e.g. after saving.
    status: Option<String>,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> color_eyre::Result<Self> {
        Ok(Self {
            running: false,
            animator: build_animator(&config)?,
            config,
            clock: AnimationClock::new(),
            status: None,
        })
    }

    /// Run the application's main loop.
    ///
    /// The animator is owned by the app, so returning early through `?`
    /// drops it and cancels its schedule.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.animator.initialize(self.clock.now_ms());
        while self.running {
            let now = self.clock.update(self.config.animation_speed);
            self.animator.advance(now);
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        self.animator.shutdown();
        Ok(())
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let color = self.config.color_theme.color();

        let field = FieldView::new(
            self.animator.comets(),
            self.animator.stars(),
            self.clock.now_ms(),
        )
        .theme(self.config.color_theme);
        frame.render_widget(field, area);

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Top padding
            Constraint::Length(1), // Badge
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Headline
            Constraint::Length(1), // Subtitle
            Constraint::Length(2), // Spacing
            Constraint::Length(1), // Status
            Constraint::Fill(1),   // Bottom padding
            Constraint::Length(1), // Help text
        ])
        .split(area);

        let badge = Line::from("✦ AI-Powered Video Ad Creation ✦")
            .style(Style::new().fg(color))
            .centered();
        frame.render_widget(badge, chunks[1]);

        let headline = Paragraph::new(Line::from(vec![
            "Create Viral ".bold().white(),
            "Video Ads".bold().fg(color),
            " in Minutes, Not Hours".bold().white(),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(headline, chunks[3]);

        let subtitle = Paragraph::new("Clone any ad layout, customize it, export it.")
            .style(Style::new().gray())
            .alignment(Alignment::Center);
        frame.render_widget(subtitle, chunks[4]);

        frame.render_widget(self.status_line().centered(), chunks[6]);

        let help = Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "space".bold().fg(color),
            " pause  ".dark_gray(),
            "s".bold().fg(color),
            " speed  ".dark_gray(),
            "c".bold().fg(color),
            " color  ".dark_gray(),
            "p".bold().fg(color),
            " policy  ".dark_gray(),
            "r".bold().fg(color),
            " refresh  ".dark_gray(),
            "w".bold().fg(color),
            " save".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[8]);
    }

    /// Particle count, policy and speed, or the latest status message.
    fn status_line(&self) -> Line<'static> {
        if let Some(message) = &self.status {
            return Line::from(message.clone()).dark_gray();
        }
        let field = self.animator.field();
        let paused = if self.clock.is_paused() { " · paused" } else { "" };
        Line::from(format!(
            "{} comets · {} stars · {} · {}{}",
            field.comets().len(),
            field.stars().len(),
            self.config.policy().name(),
            self.config.animation_speed.name(),
            paused,
        ))
        .dark_gray()
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Uses polling with timeout so the background keeps animating.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(FRAME_TIMEOUT)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(_) => {}
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        self.status = None;
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char(' ')) => self.clock.toggle_pause(),
            (_, KeyCode::Char('s')) => {
                self.config.animation_speed = self.config.animation_speed.next();
            }
            (_, KeyCode::Char('c')) => {
                self.config.color_theme = self.config.color_theme.next();
            }
            (_, KeyCode::Char('p')) => self.switch_policy(),
            (_, KeyCode::Char('r')) => {
                self.animator.tick(self.clock.now_ms());
            }
            (_, KeyCode::Char('w')) => self.save_config(),
            _ => {}
        }
    }

    /// Swap tick policy and start a fresh animator with its preset.
    fn switch_policy(&mut self) {
        let mut config = self.config.clone();
        config.toggle_policy();
        match build_animator(&config) {
            Ok(animator) => {
                self.config = config;
                self.animator = animator;
                self.animator.initialize(self.clock.now_ms());
                info!(policy = self.config.policy().name(), "switched tick policy");
            }
            Err(err) => {
                warn!("{err:#}");
                self.status = Some(format!("policy switch failed: {err}"));
            }
        }
    }

    /// Write current settings to the config file.
    fn save_config(&mut self) {
        self.status = Some(match self.config.save() {
            Ok(path) => format!("saved {}", path.display()),
            Err(err) => {
                warn!("{err:#}");
                format!("save failed: {err}")
            }
        });
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Seeded animator when the config pins a seed, otherwise OS entropy.
fn build_animator(config: &Config) -> color_eyre::Result<ParticleAnimator> {
    let animator = match config.seed {
        Some(seed) => ParticleAnimator::seeded(config.field.clone(), seed),
        None => ParticleAnimator::from_entropy(config.field.clone()),
    };
    animator.wrap_err("invalid [field] settings")
}

#[cfg(test)]
mod tests {
    use super::*;
    use comet_core::TickPolicy;

    fn app() -> App {
        App::new(Config {
            seed: Some(99),
            ..Default::default()
        })
        .unwrap()
    }

    fn press(app: &mut App, ch: char) {
        app.on_key_event(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        app.running = true;
        press(&mut app, 'q');
        assert!(!app.running);

        let mut app = self::app();
        app.running = true;
        app.on_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn test_policy_switch_restarts_animator() {
        let mut app = app();
        app.animator.initialize(0);
        press(&mut app, 'p');
        assert_eq!(app.config.policy(), TickPolicy::SpawnAndPrune);
        assert_eq!(app.animator.config().policy, TickPolicy::SpawnAndPrune);
        assert!(app.animator.is_active());
        assert_eq!(app.animator.comets().len(), 8);
    }

    #[test]
    fn test_pause_speed_and_theme_keys() {
        let mut app = app();
        press(&mut app, ' ');
        assert!(app.clock.is_paused());
        press(&mut app, 's');
        assert_eq!(app.config.animation_speed, comet_core::AnimationSpeed::Fast);
        press(&mut app, 'c');
        assert_eq!(app.config.color_theme, comet_core::ColorTheme::Cyan);
        assert!(app.status_line().to_string().contains("paused"));
    }

    #[test]
    fn test_refresh_key_regenerates() {
        let mut app = app();
        app.animator.initialize(0);
        let before: Vec<u64> = app.animator.comets().iter().map(|c| c.id).collect();
        press(&mut app, 'r');
        assert!(app.animator.comets().iter().all(|c| !before.contains(&c.id)));
    }

    #[test]
    fn test_invalid_field_config_fails_app_construction() {
        let mut config = Config::default();
        config.field.star_count = usize::MAX;
        let err = App::new(config).unwrap_err();
        assert!(format!("{err:?}").contains("star_count"));
    }
}
