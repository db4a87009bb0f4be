//! Application state driven by the runtime loop.
//!
//! `App` owns the open views, the goto prompt and the transient status
//! message. It never touches the terminal: each handler returns an
//! `AppOutcome` telling the runtime what to redraw, what to put on the
//! clipboard and whether to quit.

use anyhow::{Context, Result};
use core_actions::{
    Action, Command, PromptEdit, ViewEvent, copy_offset_text, copy_selection_text, handle,
    hex_pairs_capacity, translate_key, translate_mouse,
};
use core_config::Effective;
use core_events::InputEvent;
use core_model::{GridConfig, ViewManager};
use core_render::{Composed, StatusContext, TERMINAL_METRICS, TabLabel, compose, grid_rows};
use core_source::{ByteSource, SourceError};
use core_terminal::clipboard::MAX_OSC52_BYTES;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppOutcome {
    pub redraw: bool,
    /// Repaint every row (screen size or active view changed).
    pub full: bool,
    pub clipboard: Option<String>,
    pub quit: bool,
}

impl AppOutcome {
    fn none() -> Self {
        Self::default()
    }

    fn redraw() -> Self {
        Self {
            redraw: true,
            ..Self::default()
        }
    }

    fn full() -> Self {
        Self {
            redraw: true,
            full: true,
            ..Self::default()
        }
    }

    fn quit() -> Self {
        Self {
            quit: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StatusMessage {
    text: String,
    expires: Instant,
}

pub struct App {
    views: ViewManager,
    config: Effective,
    prompt: Option<String>,
    message: Option<StatusMessage>,
    width: u16,
    height: u16,
}

impl App {
    pub fn new(config: Effective, width: u16, height: u16) -> Self {
        Self {
            views: ViewManager::new(),
            config,
            prompt: None,
            message: None,
            width,
            height,
        }
    }

    pub fn views(&self) -> &ViewManager {
        &self.views
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().map(|m| m.text.as_str())
    }

    fn grid_config(&self) -> GridConfig {
        GridConfig::new(self.config.row_width, self.config.split_column)
    }

    /// Open `path` in a new focused view.
    pub fn open_path(&mut self, path: &Path) -> Result<()> {
        let source = ByteSource::open(path)?;
        self.open_source(source)
            .with_context(|| format!("opening {}", path.display()))
    }

    pub fn open_source(&mut self, source: ByteSource) -> Result<()> {
        let name = source.name().to_string();
        let visible = grid_rows(self.height);
        self.views
            .open(Arc::new(source), self.grid_config(), visible)?;
        if let Some(view) = self.views.active_mut() {
            handle(view, ViewEvent::Layout(TERMINAL_METRICS));
        }
        info!(target: "runtime", name = name.as_str(), visible, "file_opened");
        Ok(())
    }

    pub fn handle_input(&mut self, input: &InputEvent, now: Instant) -> AppOutcome {
        match input {
            InputEvent::Key(key) => match translate_key(key, self.prompt.is_some()) {
                Some(action) => self.apply(action, now),
                None => AppOutcome::none(),
            },
            InputEvent::Mouse(ev) if self.prompt.is_none() => {
                match translate_mouse(ev, self.config.wheel_rows) {
                    Some(action) => self.apply(action, now),
                    None => AppOutcome::none(),
                }
            }
            InputEvent::Mouse(_) => AppOutcome::none(),
            InputEvent::Resize(w, h) => self.resize(*w, *h),
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) -> AppOutcome {
        self.width = width;
        self.height = height;
        let visible_rows = grid_rows(height);
        for view in self.views.views_mut() {
            handle(view, ViewEvent::Resize { visible_rows });
        }
        debug!(target: "runtime", width, height, visible_rows, "resize");
        AppOutcome::full()
    }

    pub fn apply(&mut self, action: Action, now: Instant) -> AppOutcome {
        match action {
            Action::View(event) => self.apply_view(event),
            Action::Command(cmd) => self.apply_command(cmd, now),
            Action::Prompt(edit) => self.apply_prompt(edit, now),
        }
    }

    fn apply_view(&mut self, event: ViewEvent) -> AppOutcome {
        let Some(view) = self.views.active_mut() else {
            return AppOutcome::none();
        };
        if handle(view, event).dirty {
            AppOutcome::redraw()
        } else {
            AppOutcome::none()
        }
    }

    fn apply_command(&mut self, cmd: Command, now: Instant) -> AppOutcome {
        info!(target: "runtime", ?cmd, "command");
        match cmd {
            Command::Copy => {
                let Some(view) = self.views.active() else {
                    return AppOutcome::none();
                };
                match copy_selection_text(view, hex_pairs_capacity(MAX_OSC52_BYTES)) {
                    Ok(Some(copy)) => {
                        let message = if copy.is_truncated() {
                            warn!(
                                target: "runtime",
                                copied = copy.copied,
                                selected = copy.selected,
                                "copy_truncated"
                            );
                            format!("Copied {} of {} bytes", copy.copied, copy.selected)
                        } else {
                            format!("Copied {} bytes", copy.copied)
                        };
                        self.set_message(message, now);
                        AppOutcome {
                            clipboard: Some(copy.text),
                            ..AppOutcome::redraw()
                        }
                    }
                    Ok(None) => {
                        self.set_message("Nothing selected".to_string(), now);
                        AppOutcome::redraw()
                    }
                    Err(err) => self.source_failure(err, now),
                }
            }
            Command::CopyOffset => {
                let Some(view) = self.views.active() else {
                    return AppOutcome::none();
                };
                let text = copy_offset_text(view);
                self.set_message(format!("Copied offset {text}"), now);
                AppOutcome {
                    clipboard: Some(text),
                    ..AppOutcome::redraw()
                }
            }
            Command::OpenGoto => {
                if self.views.is_empty() {
                    return AppOutcome::none();
                }
                self.prompt = Some(String::new());
                self.message = None;
                AppOutcome::redraw()
            }
            Command::CloseView => {
                self.views.close_active();
                if self.views.is_empty() {
                    AppOutcome::quit()
                } else {
                    AppOutcome::full()
                }
            }
            Command::FocusView(index) => {
                if self.views.focus(index) {
                    AppOutcome::full()
                } else {
                    AppOutcome::none()
                }
            }
            Command::Quit => AppOutcome::quit(),
        }
    }

    fn apply_prompt(&mut self, edit: PromptEdit, now: Instant) -> AppOutcome {
        let Some(text) = self.prompt.as_mut() else {
            return AppOutcome::none();
        };
        match edit {
            PromptEdit::Char(c) => text.push(c),
            PromptEdit::Backspace => {
                text.pop();
            }
            PromptEdit::Cancel => {
                self.prompt = None;
                self.message = None;
            }
            PromptEdit::Submit => {
                let text = text.clone();
                let Some(view) = self.views.active_mut() else {
                    self.prompt = None;
                    return AppOutcome::redraw();
                };
                let update = handle(view, ViewEvent::GotoRequest { text });
                match update.rejected {
                    // prompt stays open so the user can correct the text
                    Some(err) => self.set_message(err.to_string(), now),
                    None => {
                        self.prompt = None;
                        self.message = None;
                    }
                }
            }
        }
        AppOutcome::redraw()
    }

    fn source_failure(&mut self, err: SourceError, now: Instant) -> AppOutcome {
        error!(target: "runtime", error = %err, "source_read_failed");
        self.set_message(err.to_string(), now);
        AppOutcome::redraw()
    }

    fn set_message(&mut self, text: String, now: Instant) {
        self.message = Some(StatusMessage {
            text,
            expires: now + Duration::from_millis(self.config.message_ms),
        });
    }

    /// Drop the status message once it expired. The goto prompt keeps its
    /// message until the prompt closes.
    pub fn tick(&mut self, now: Instant) -> AppOutcome {
        match &self.message {
            Some(msg) if self.prompt.is_none() && now >= msg.expires => {
                self.message = None;
                AppOutcome::redraw()
            }
            _ => AppOutcome::none(),
        }
    }

    /// Build the screen for the active view.
    pub fn compose(&self) -> Result<Composed, SourceError> {
        let active_index = self.views.active_index();
        let tabs: Vec<TabLabel<'_>> = self
            .views
            .views()
            .iter()
            .enumerate()
            .map(|(i, v)| TabLabel {
                name: v.name(),
                active: i == active_index,
            })
            .collect();
        let view = self.views.active();
        let rows = match view {
            Some(v) => v.visible_rows()?,
            None => Vec::new(),
        };
        let status = StatusContext {
            file_name: view.map(|v| v.name()).unwrap_or(""),
            offset: view.map(|v| v.cursor().position).unwrap_or(0),
            size: view.map(|v| v.size()).unwrap_or(0),
            selection_len: view.map(|v| v.selection().len()).unwrap_or(0),
            prompt: self.prompt.as_deref(),
            message: self.message(),
        };
        Ok(compose(
            self.width,
            self.height,
            &tabs,
            view,
            &rows,
            &status,
        ))
    }
}
