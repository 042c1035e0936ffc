mod logging;

use std::io::{self, Write, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
};
use paintfield_background::{CellCanvas, FieldEvent, PaintField, cell_center, viewport_for};
use paintfield_config::Config;
use paintfield_core::{PaletteStore, Rgb};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::Block,
};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;
    if let Some(path) = &config.log_file {
        logging::init(path)?;
    }

    let terminal = ratatui::init();
    install_panic_hook();
    let result = enable_input_modes(&mut stdout())
        .map_err(color_eyre::Report::from)
        .and_then(|()| App::new(&config).run(terminal));
    let released = disable_input_modes(&mut stdout());
    ratatui::restore();
    result.and(released.map_err(color_eyre::Report::from))
}

/// Turn on mouse and focus reporting.
fn enable_input_modes(out: &mut impl Write) -> io::Result<()> {
    execute!(out, EnableMouseCapture, EnableFocusChange)
}

/// Turn off mouse and focus reporting.
fn disable_input_modes(out: &mut impl Write) -> io::Result<()> {
    execute!(out, DisableMouseCapture, DisableFocusChange)
}

/// Release mouse and focus reporting before the terminal is restored on panic.
fn install_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_input_modes(&mut stdout());
        hook(info);
    }));
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Active palette, shared with the paint field.
    palette: PaletteStore,
    /// Palette version the chrome was last styled for.
    seen_palette_version: u64,
    /// The paint drop background.
    field: PaintField<CellCanvas>,
    /// Time between animation frames.
    frame_interval: Duration,
    /// Origin of the millisecond clock handed to the field.
    started: Instant,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: &Config) -> Self {
        let palette = PaletteStore::new(config.palette);
        let canvas = CellCanvas::new(palette.background());
        let field = match config.seed {
            Some(seed) => PaintField::with_seed(canvas, palette.clone(), config.field, seed),
            None => PaintField::new(canvas, palette.clone(), config.field),
        };

        Self {
            running: false,
            seen_palette_version: palette.version(),
            palette,
            field,
            frame_interval: Duration::from_millis(config.frame_interval_ms),
            started: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.field
            .mount(self.now_ms(), viewport_for(size.width, size.height), true);
        self.running = true;

        let mut next_frame = Instant::now();
        while self.running {
            if Instant::now() >= next_frame {
                next_frame = Instant::now() + self.frame_interval;
                self.advance();
                terminal.draw(|frame| self.render(frame))?;
            }
            let timeout = next_frame.saturating_duration_since(Instant::now());
            self.handle_crossterm_events(timeout)?;
        }

        self.field.unmount();
        Ok(())
    }

    /// Milliseconds since the app started.
    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Fire due timers, pick up palette changes and step the field.
    fn advance(&mut self) {
        let version = self.palette.version();
        if version != self.seen_palette_version {
            self.seen_palette_version = version;
            self.field
                .surface_mut()
                .set_backdrop(self.palette.background());
        }

        let now = self.now_ms();
        self.field.tick(now);
        self.field.frame();
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let accent = color(self.palette.accent());
        let text = color(self.palette.text());
        let area = frame.area();

        frame.render_widget(
            Block::new().style(Style::new().bg(color(self.palette.background()))),
            area,
        );
        frame.render_widget(self.field.surface(), area);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Palette name
            Constraint::Fill(1),   // Paint
            Constraint::Length(1), // Help text
        ])
        .split(area);

        let title = Line::from(vec![
            " paintfield ".bold().fg(accent),
            self.palette.palette_name().to_string().fg(text),
            format!("  {} drops", self.field.len()).fg(text),
            if self.field.tuning().shrink_on_fade {
                "  shrinking".fg(text)
            } else {
                "".fg(text)
            },
        ]);
        frame.render_widget(title, chunks[0]);

        let help = Line::from(vec![
            "q".bold().fg(accent),
            " quit  ".fg(text),
            "p".bold().fg(accent),
            " cycle palette  ".fg(text),
            "c".bold().fg(accent),
            " clear  ".fg(text),
            "s".bold().fg(accent),
            " shrink  ".fg(text),
            "click".bold().fg(accent),
            " splash".fg(text),
        ])
        .centered();
        frame.render_widget(help, chunks[2]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most `timeout` so frames stay on schedule.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            let now = self.now_ms();
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(now, mouse),
                Event::Resize(width, height) => self
                    .field
                    .handle_event(now, FieldEvent::Resize(viewport_for(width, height))),
                Event::FocusGained => self.field.handle_event(now, FieldEvent::Visibility(true)),
                Event::FocusLost => self.field.handle_event(now, FieldEvent::Visibility(false)),
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
            (_, KeyCode::Char('p')) => self.cycle_palette(),
            (_, KeyCode::Char('c')) => self.field.clear(),
            (_, KeyCode::Char('s')) => self.toggle_shrink(),
            _ => {}
        }
    }

    /// Toggle whether settled drops shrink while they fade.
    fn toggle_shrink(&mut self) {
        let mut tuning = self.field.tuning();
        tuning.shrink_on_fade = !tuning.shrink_on_fade;
        self.field.set_tuning(tuning);
        tracing::info!(shrink_on_fade = tuning.shrink_on_fade, "tuning changed");
    }

    /// Forward pointer input to the field in logical pixels.
    fn on_mouse_event(&mut self, now: u64, mouse: MouseEvent) {
        let (x, y) = cell_center(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.field.handle_event(now, FieldEvent::PointerMove { x, y })
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.field.handle_event(now, FieldEvent::PointerClick { x, y })
            }
            _ => {}
        }
    }

    /// Cycle through the built-in palettes.
    fn cycle_palette(&mut self) {
        let name = self.palette.cycle();
        tracing::info!(palette = %name, "palette selected");
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

fn color(rgb: Rgb) -> Color {
    rgb.into()
}
