use std::io;
use std::time::Instant;

use cosmic_config::{Config, ConfigError};
use cosmic_starfield::{AnimationLoop, CellSize, Starfield, StopHandle, Surface, TerminalSurface};
use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Clear, Paragraph},
};
use tracing::{info, warn};

use crate::clipboard::{
    ClipboardBackend, CopyOutcome, Osc52Clipboard, SystemClipboard, copy_with_fallback,
};
use crate::feedback::CopyFeedback;

mod clipboard;
mod feedback;
mod logging;

/// Accent color for the panel and help text.
const ACCENT: Color = Color::Rgb(120, 150, 255);

/// Panel background, matching the darkest backdrop stop.
const PANEL_BG: Color = Color::Rgb(3, 6, 20);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Some(path) = logging::init() {
        info!(path = %path.display(), "logging started");
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(ConfigError::NoConfigDir) => {
            warn!("no config directory, using defaults");
            Config::default()
        }
        Err(e) => return Err(e.into()),
    };

    let terminal = ratatui::init();
    let result = execute!(io::stdout(), EnableMouseCapture, EnableFocusChange)
        .map_err(color_eyre::Report::from)
        .and_then(|()| {
            let size = terminal.size()?;
            App::new(config, size.width, size.height).run(terminal)
        });
    if let Err(e) = execute!(io::stdout(), DisableMouseCapture, DisableFocusChange) {
        warn!(error = %e, "failed to disable mouse capture and focus reporting");
    }
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Configuration as loaded; runtime changes are saved back on quit.
    config: Config,
    /// Star simulation.
    starfield: Starfield,
    /// Raster the starfield is drawn into.
    surface: TerminalSurface,
    /// Frame pacing.
    animation: AnimationLoop,
    /// Stops the animation loop, ending the app.
    stop: StopHandle,
    /// Copy button label.
    feedback: CopyFeedback,
    /// Tried first on copy.
    primary_clipboard: Box<dyn ClipboardBackend>,
    /// Tried when the primary clipboard fails.
    fallback_clipboard: Box<dyn ClipboardBackend>,
    /// Where the copy button was last drawn, for click hit-testing.
    copy_button: Rect,
    /// Force, drift or speed changed since startup.
    settings_changed: bool,
}

impl App {
    /// Construct a new instance of [`App`] for a terminal of the given size,
    /// copying through the system clipboard with OSC 52 as the fallback.
    pub fn new(config: Config, cols: u16, rows: u16) -> Self {
        Self::with_clipboards(
            config,
            cols,
            rows,
            Box::new(SystemClipboard::new()),
            Box::new(Osc52Clipboard::new(io::stdout())),
        )
    }

    /// Construct an [`App`] with explicit clipboard backends.
    pub fn with_clipboards(
        config: Config,
        cols: u16,
        rows: u16,
        primary_clipboard: Box<dyn ClipboardBackend>,
        fallback_clipboard: Box<dyn ClipboardBackend>,
    ) -> Self {
        let surface = TerminalSurface::new(cols, rows, CellSize::default());
        let starfield = Starfield::new(config.starfield, surface.bounds());
        let animation = AnimationLoop::new(config.speed);
        let stop = animation.stop_handle();
        Self {
            feedback: CopyFeedback::new(config.feedback_duration()),
            config,
            starfield,
            surface,
            animation,
            stop,
            primary_clipboard,
            fallback_clipboard,
            copy_button: Rect::default(),
            settings_changed: false,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.animation.start(Instant::now());
        info!(
            force = self.starfield.force_kind().label(),
            speed = self.config.speed.label(),
            stars = self.starfield.stars().len(),
            "animation started"
        );
        while self.animation.is_running() {
            let now = Instant::now();
            self.feedback.tick(now);
            if self.animation.frame_due(now) {
                terminal.draw(|frame| self.render(frame))?;
            }
            self.handle_crossterm_events()?;
        }
        self.save_settings();
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.surface.resize(area.width, area.height);
        self.starfield.frame(&mut self.surface);
        frame.render_widget(&self.surface, area);

        let rows = Layout::vertical([
            Constraint::Fill(1),   // Top padding
            Constraint::Length(7), // Panel
            Constraint::Fill(1),   // Bottom padding
            Constraint::Length(1), // Help text
        ])
        .split(area);
        let panel = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(34),
            Constraint::Fill(1),
        ])
        .split(rows[1])[1];
        self.render_panel(frame, panel);

        let help = Line::from(vec![
            " q".bold().fg(ACCENT),
            " quit  ".gray(),
            "y".bold().fg(ACCENT),
            " copy  ".gray(),
            "f".bold().fg(ACCENT),
            " force  ".gray(),
            "d".bold().fg(ACCENT),
            " drift  ".gray(),
            "r".bold().fg(ACCENT),
            " reset  ".gray(),
            "s".bold().fg(ACCENT),
            " speed ".gray(),
        ])
        .centered()
        .bg(PANEL_BG);
        let help_width = (help.width() as u16).min(rows[3].width);
        let help_area = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(help_width),
            Constraint::Fill(1),
        ])
        .split(rows[3])[1];
        frame.render_widget(help, help_area);
    }

    /// Renders the centered address panel with its copy button.
    fn render_panel(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_style(Style::new().fg(ACCENT))
            .style(Style::new().bg(PANEL_BG));
        let inner = block.inner(area);
        frame.render_widget(Clear, area);
        frame.render_widget(block, area);

        let lines = Layout::vertical([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Address
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Copy button
            Constraint::Length(1), // Status
        ])
        .split(inner);

        let title = Paragraph::new("✦ C O S M I C ✦".bold().fg(Color::White)).centered();
        frame.render_widget(title, lines[0]);

        let address = Paragraph::new(self.config.copy_text.as_str().fg(ACCENT)).centered();
        frame.render_widget(address, lines[1]);

        let now = Instant::now();
        let label = format!("[ {} ]", self.feedback.label(now));
        let button_style = if self.feedback.is_confirmed(now) {
            Style::new().fg(PANEL_BG).bg(Color::Rgb(120, 220, 160)).bold()
        } else {
            Style::new().fg(PANEL_BG).bg(ACCENT).bold()
        };
        let width = (label.chars().count() as u16).min(lines[3].width);
        self.copy_button = Rect::new(
            lines[3].x + (lines[3].width - width) / 2,
            lines[3].y,
            width,
            lines[3].height,
        );
        frame.render_widget(Paragraph::new(label).style(button_style), self.copy_button);

        let status = format!(
            "{} · {} · {}",
            self.starfield.force_kind().label(),
            self.starfield.settings().drift.label(),
            self.config.speed.label(),
        );
        frame.render_widget(Paragraph::new(status.dark_gray()).centered(), lines[4]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits no longer than the time left until the next frame.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = self.animation.time_until_next_frame(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(cols, rows) => self.on_resize(cols, rows),
                Event::FocusLost => self.starfield.clear_pointer(),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('y') | KeyCode::Char('c')) => {
                self.copy();
            }
            (_, KeyCode::Char('f')) => self.cycle_force(),
            (_, KeyCode::Char('d')) => self.toggle_drift(),
            (_, KeyCode::Char('r')) => self.starfield.regenerate(),
            (_, KeyCode::Char('s')) => self.cycle_speed(),
            _ => {}
        }
    }

    /// Tracks the pointer and handles clicks on the copy button.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        let pointer = self.surface.cell_center(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => self.starfield.set_pointer(pointer),
            MouseEventKind::Down(MouseButton::Left) => {
                self.starfield.set_pointer(pointer);
                if self
                    .copy_button
                    .contains(Position::new(mouse.column, mouse.row))
                {
                    self.copy();
                }
            }
            _ => {}
        }
    }

    /// Resizes the raster and regenerates the stars for the new bounds.
    fn on_resize(&mut self, cols: u16, rows: u16) {
        self.surface.resize(cols, rows);
        self.starfield.sync_bounds(self.surface.bounds());
    }

    /// Copy the address and confirm on the button, whatever the outcome.
    fn copy(&mut self) -> CopyOutcome {
        let outcome = copy_with_fallback(
            self.primary_clipboard.as_mut(),
            self.fallback_clipboard.as_mut(),
            &self.config.copy_text,
        );
        if outcome == CopyOutcome::Failed {
            warn!("no clipboard accepted the text; showing confirmation anyway");
        }
        self.feedback.confirm(Instant::now());
        outcome
    }

    /// Cycle through the force models.
    fn cycle_force(&mut self) {
        self.starfield.cycle_force();
        self.settings_changed = true;
    }

    /// Switch between jitter and stream drift.
    fn toggle_drift(&mut self) {
        let drift = self.starfield.settings().drift.toggle();
        self.starfield.set_drift_pattern(drift);
        self.settings_changed = true;
    }

    /// Cycle through frame rates.
    fn cycle_speed(&mut self) {
        self.config.speed = self.config.speed.next();
        self.animation.set_speed(self.config.speed);
        self.settings_changed = true;
    }

    /// Persist force, drift and speed if they changed this session.
    fn save_settings(&mut self) {
        if !self.settings_changed {
            return;
        }
        let settings = *self.starfield.settings();
        self.config.starfield.force = settings.force;
        self.config.starfield.drift = settings.drift;
        if let Err(e) = self.config.save() {
            warn!(error = %e, "failed to save config");
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.stop.stop();
    }
}
