//! Resume Wizard - terminal wizard for building a résumé
//!
//! Walks through a fixed sequence of form steps, assembles the answers
//! into a structured document and renders it to `resume.pdf`.

mod app;
mod config;
mod document;
mod error;
mod platform;
mod render;
mod state;
mod ui;

use anyhow::Result;
use app::App;
use config::WizardConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use render::PdfRenderer;
use state::View;
use std::fs::{self, OpenOptions};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::{
    fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
};

const LOG_FILE: &str = "resume-wizard.log";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; the terminal belongs to the TUI so logs go to a file
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "resume_wizard=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(log_writer()),
        )
        .init();

    let config = WizardConfig::load()?.with_env()?;
    tracing::info!(
        output_dir = %config.output_dir().display(),
        mode = ?config.render_mode(),
        "Starting resume wizard"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let renderer = PdfRenderer::with_snapshot_page(config.page_size());
    let mut app = App::new(config, Arc::new(renderer));
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

/// Log file in the data directory, or nowhere if it cannot be opened
fn log_writer() -> BoxMakeWriter {
    let file = WizardConfig::data_dir().and_then(|dir| {
        fs::create_dir_all(&dir).ok()?;
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(LOG_FILE))
            .ok()
    });
    match file {
        Some(file) => BoxMakeWriter::new(Mutex::new(file)),
        None => BoxMakeWriter::new(io::sink),
    }
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Draw the UI
        let completed = terminal.draw(|frame| ui::draw(frame, app))?;

        // Keep the drawn preview for snapshot rendering
        if app.state.current_view == View::Preview && !app.state.has_errors() {
            let area = ui::preview_area(completed.area);
            app.screen_buffer.capture(completed.buffer, area);
        } else {
            app.screen_buffer.clear();
        }
        app.after_draw();
        app.poll_generation();

        // Handle crossterm events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        app.handle_ctrl_c();
                    } else {
                        app.handle_key(key)?;
                    }
                }
            }
        }

        // Check if app wants to quit
        if app.should_quit() {
            return Ok(());
        }
    }
}
