//! Application state and core logic

use crate::config::{RenderMode, WizardConfig};
use crate::document::Assembler;
use crate::error::WizardError;
use crate::platform::{GENERATE_SHORTCUT, QUIT_HINT, SHORTCUT_MODIFIER};
use crate::render::{capture_snapshot, save_artifact, RenderAdapter, RenderError, RenderInput};
use crate::state::{AppState, GenerationStatus, ScreenBuffer, Transition, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tracing::{info, warn};

/// Window in which a second Ctrl+C quits
const DOUBLE_CTRL_C_WINDOW: Duration = Duration::from_secs(2);

type GenerationResult = Result<PathBuf, RenderError>;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Loaded user configuration
    pub config: WizardConfig,
    /// Adapter that turns documents or snapshots into PDF bytes
    renderer: Arc<dyn RenderAdapter>,
    /// Result channel of the running generation task
    pending: Option<oneshot::Receiver<GenerationResult>>,
    /// Snapshot mode waits for the preview to be drawn before capturing
    capture_requested: bool,
    /// Whether the app should quit
    quit: bool,
    /// Preview cells of the last drawn frame
    pub screen_buffer: ScreenBuffer,
    /// Timestamp of last Ctrl+C press for double-tap quit
    pub last_ctrl_c: Option<Instant>,
}

impl App {
    /// Create a new App instance
    pub fn new(config: WizardConfig, renderer: Arc<dyn RenderAdapter>) -> Self {
        Self {
            state: AppState::default(),
            config,
            renderer,
            pending: None,
            capture_requested: false,
            quit: false,
            screen_buffer: ScreenBuffer::default(),
            last_ctrl_c: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Handle Ctrl+C; the second press inside the window quits
    pub fn handle_ctrl_c(&mut self) {
        let now = Instant::now();
        match self.last_ctrl_c {
            Some(last) if now.duration_since(last) < DOUBLE_CTRL_C_WINDOW => self.quit = true,
            _ => {
                self.last_ctrl_c = Some(now);
                self.state.set_status(QUIT_HINT);
            }
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        match self.state.current_view {
            View::Wizard if self.state.wizard.is_finalized() => self.handle_finalized_key(key),
            View::Wizard => self.handle_wizard_key(key)?,
            View::Preview => self.handle_preview_key(key),
        }
        Ok(())
    }

    /// Handle keys while entering data
    fn handle_wizard_key(&mut self, key: KeyEvent) -> Result<()> {
        let shortcut = key.modifiers.contains(SHORTCUT_MODIFIER);

        match key.code {
            KeyCode::Tab => self.state.next_form_field(),
            KeyCode::BackTab => self.state.prev_form_field(),
            KeyCode::PageDown => self.next_step(),
            KeyCode::PageUp => self.prev_step(),
            KeyCode::Char('n') if shortcut => self.next_step(),
            KeyCode::Char('p') if shortcut => self.prev_step(),
            KeyCode::Char('g') if shortcut => self.generate(),
            KeyCode::Char('a') if shortcut => self.add_entry(),
            KeyCode::Char('x') if shortcut => self.remove_entry(),
            KeyCode::Char('r') if shortcut => self.review(),
            KeyCode::Char(c) if !shortcut => self
                .state
                .form_input_char(c, key.modifiers.contains(KeyModifiers::SHIFT))?,
            KeyCode::Backspace => self.state.form_backspace()?,
            KeyCode::Enter => self.state.form_newline()?,
            _ => {}
        }
        Ok(())
    }

    /// Wizard view after the record is finalized: read-only
    fn handle_finalized_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('r') => self.retry(),
            KeyCode::Char('v') | KeyCode::Enter => self.state.current_view = View::Preview,
            KeyCode::Char('q') => self.quit = true,
            _ => self
                .state
                .set_status("Record is finalized; press r to regenerate or v to preview"),
        }
    }

    /// Handle keys in the preview
    fn handle_preview_key(&mut self, key: KeyEvent) {
        let draft = !self.state.wizard.is_finalized();
        match key.code {
            KeyCode::Char('g') if draft => self.generate(),
            KeyCode::Char('r') if !draft => self.retry(),
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Esc | KeyCode::Char('b') => self.state.current_view = View::Wizard,
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.preview_scroll = self.state.preview_scroll.saturating_add(1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.preview_scroll = self.state.preview_scroll.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn next_step(&mut self) {
        match self.state.wizard.next() {
            Ok(Transition::Moved { to, .. }) => self.entered_step(to),
            Ok(Transition::Blocked { missing }) => {
                self.state
                    .set_status(format!("Please fill in: {}", missing.join(", ")));
            }
            Ok(Transition::AtBoundary) => {
                self.state.set_status(format!(
                    "This is the last step; press {GENERATE_SHORTCUT} to generate"
                ));
            }
            Err(e) => self.push_error(e.to_string()),
        }
    }

    fn prev_step(&mut self) {
        match self.state.wizard.prev() {
            Ok(Transition::Moved { to, .. }) => self.entered_step(to),
            Ok(_) => {}
            Err(e) => self.push_error(e.to_string()),
        }
    }

    fn entered_step(&mut self, step: usize) {
        self.state.active_form_field = 0;
        let title = self
            .state
            .wizard
            .table()
            .step(step)
            .map(|def| def.title)
            .unwrap_or_default();
        self.state.set_status(format!(
            "Step {} of {}: {title}",
            step + 1,
            self.state.wizard.step_count()
        ));
    }

    fn add_entry(&mut self) {
        let Some((group, _)) = self.state.target_entry() else {
            self.state.set_status("This step has no repeatable entries");
            return;
        };
        match self.state.wizard.add_group_entry(group) {
            Ok(index) => {
                self.state.focus_entry(group, index);
                self.state.set_status(format!("Added {group} entry #{}", index + 1));
            }
            Err(e) => self.push_error(e.to_string()),
        }
    }

    fn remove_entry(&mut self) {
        let Some((group, index)) = self.state.target_entry() else {
            self.state.set_status("This step has no repeatable entries");
            return;
        };
        match self.state.wizard.remove_group_entry(group, index) {
            Ok(_) => {
                self.state.clamp_form_field();
                self.state
                    .set_status(format!("Removed {group} entry #{}", index + 1));
            }
            Err(e) => self.push_error(e.to_string()),
        }
    }

    fn assembler(&self) -> Assembler {
        Assembler::new(*self.state.wizard.table()).with_page_size(self.config.page_size())
    }

    /// Read-only preview of the record as entered so far; editing resumes on Esc
    fn review(&mut self) {
        let document = self.assembler().assemble(self.state.wizard.record());
        self.state.document = Some(document);
        self.state.current_view = View::Preview;
        self.state.preview_scroll = 0;
        if self.state.wizard.is_last_step() {
            self.state.set_status("Review your resume: g to generate, Esc to edit");
        } else {
            self.state.set_status("Draft preview: Esc to keep editing");
        }
    }

    /// Finalize the record, assemble the document and start rendering
    fn generate(&mut self) {
        if self.state.generation.is_pending() {
            return;
        }
        match self.state.wizard.generate() {
            Ok(finalized) => {
                let document = self.assembler().assemble(&finalized);
                self.state.document = Some(document);
                self.state.finalized = Some(finalized);
                if self.config.open_preview_on_generate() {
                    self.state.current_view = View::Preview;
                    self.state.preview_scroll = 0;
                }
                self.start_render();
            }
            Err(WizardError::IncompleteStep { missing, .. }) => {
                self.state
                    .set_status(format!("Please fill in: {}", missing.join(", ")));
            }
            Err(e @ WizardError::NotOnFinalStep { .. }) => self.state.set_status(e.to_string()),
            Err(e) => self.push_error(e.to_string()),
        }
    }

    /// Re-run rendering from the kept document; ignored while pending
    fn retry(&mut self) {
        if self.state.generation.is_pending() {
            return;
        }
        if self.state.finalized.is_none() {
            self.state.set_status("Nothing to generate yet");
            return;
        }
        info!("Retrying PDF generation");
        self.start_render();
    }

    fn start_render(&mut self) {
        match self.config.render_mode() {
            RenderMode::Document => {
                let Some(document) = self.state.document.clone() else {
                    return;
                };
                self.spawn_render(RenderInput::Document(document));
            }
            RenderMode::Snapshot => {
                self.state.generation = GenerationStatus::Pending;
                self.capture_requested = true;
            }
        }
    }

    /// Called after every draw; takes the snapshot once the preview is on screen
    pub fn after_draw(&mut self) {
        if !std::mem::take(&mut self.capture_requested) {
            return;
        }
        match capture_snapshot(&self.screen_buffer) {
            Ok(snapshot) => self.spawn_render(RenderInput::Snapshot(snapshot)),
            Err(e) => self.finish_generation(Err(e)),
        }
    }

    fn spawn_render(&mut self, input: RenderInput) {
        let renderer = Arc::clone(&self.renderer);
        let dir = self.config.output_dir();
        let file_name = self.config.file_name().to_string();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let result = match renderer.render(input).await {
                Ok(artifact) => save_artifact(&dir, &file_name, &artifact).await,
                Err(e) => Err(e),
            };
            // Receiver is gone only when the app has exited
            let _ = tx.send(result);
        });

        self.pending = Some(rx);
        self.state.generation = GenerationStatus::Pending;
        self.state.set_status("Generating PDF...");
    }

    /// Check the generation task without blocking
    pub fn poll_generation(&mut self) {
        let Some(rx) = self.pending.as_mut() else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(oneshot::error::TryRecvError::Empty) => return,
            Err(oneshot::error::TryRecvError::Closed) => Err(RenderError::Task(
                "render task ended without a result".to_string(),
            )),
        };
        self.pending = None;
        self.finish_generation(result);
    }

    fn finish_generation(&mut self, result: GenerationResult) {
        match result {
            Ok(path) => {
                info!(path = %path.display(), "Resume generated");
                self.state.set_status(format!("Saved {}", path.display()));
                self.state.generation = GenerationStatus::Ready(path);
            }
            Err(e) => {
                warn!("PDF generation failed: {e}");
                self.state
                    .set_status("PDF generation failed; press r to retry");
                self.state.generation = GenerationStatus::Failed(e.to_string());
            }
        }
    }
}
