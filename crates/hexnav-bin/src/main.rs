//! hexnav entrypoint.
use anyhow::{Result, bail};
use clap::Parser;
use core_events::{EVENT_CHANNEL_CAP, Event, EventSourceRegistry, TickEventSource};
use core_render::RenderEngine;
use core_terminal::{CrosstermBackend, TerminalBackend, TerminalGuard};
use hexnav::{App, AppOutcome};
use std::fmt;
use std::io::{Write, stdout};
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{error, info, trace, warn};
use tracing_appender::non_blocking::WorkerGuard;

const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "hexnav", version, about = "Terminal hex viewer")]
struct Args {
    /// Files to open, one tab each.
    pub files: Vec<PathBuf>,
    /// Configuration file path (overrides discovery of `hexnav.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join("hexnav.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "hexnav.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

/// Load config and open every file before the terminal switches screens,
/// so open failures reach stderr.
fn bootstrap(args: &Args) -> Result<App> {
    let config = core_config::load_from(args.config.clone())?;
    info!(
        target: "runtime.startup",
        config = ?config.path,
        row_width = config.effective.row_width,
        split_column = config.effective.split_column,
        wheel_rows = config.effective.wheel_rows,
        "config_ready"
    );
    let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut app = App::new(config.effective, width, height);
    for path in &args.files {
        if let Err(err) = app.open_path(path) {
            error!(target: "runtime.startup", path = %path.display(), error = %err, "open_failed");
            eprintln!("hexnav: {err:#}");
        }
    }
    if app.views().is_empty() {
        bail!("no file could be opened");
    }
    Ok(app)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ShutdownReason {
    Quit,
    ChannelClosed,
}

impl ShutdownReason {
    fn as_str(&self) -> &'static str {
        match self {
            ShutdownReason::Quit => "quit",
            ShutdownReason::ChannelClosed => "channel_closed",
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn log_shutdown_stage(reason: ShutdownReason, stage: &'static str) {
    info!(
        target: "runtime.shutdown",
        reason = reason.as_str(),
        stage = stage,
        "shutdown_stage"
    );
}

struct Runtime<'a> {
    app: App,
    engine: RenderEngine,
    rx: mpsc::Receiver<Event>,
    tx: Option<mpsc::Sender<Event>>,
    source_handles: Vec<tokio::task::JoinHandle<()>>,
    input_task: Option<tokio::task::JoinHandle<()>>,
    input_shutdown: Option<core_input::AsyncInputShutdown>,
    terminal: TerminalGuard<'a>,
}

impl Runtime<'_> {
    async fn run(&mut self) -> Result<()> {
        self.render();

        let span = tracing::debug_span!(target: "runtime", "event_loop");
        let _enter = span.enter();

        let mut reason = ShutdownReason::ChannelClosed;
        while let Some(event) = self.rx.recv().await {
            let now = Instant::now();
            let outcome = match &event {
                Event::Input(input) => self.app.handle_input(input, now),
                Event::Tick => self.app.tick(now),
            };
            if outcome.quit {
                reason = ShutdownReason::Quit;
                break;
            }
            self.apply(outcome);
        }

        self.rx.close();
        self.finalize_shutdown(reason).await;
        Ok(())
    }

    fn apply(&mut self, outcome: AppOutcome) {
        if let Some(text) = outcome.clipboard.as_deref()
            && let Err(err) = self.terminal.backend().copy_to_clipboard(text)
        {
            warn!(target: "runtime", error = %err, "clipboard_failed");
        }
        if outcome.full {
            self.engine.invalidate();
        }
        if outcome.redraw {
            self.render();
        }
    }

    fn render(&mut self) {
        let composed = match self.app.compose() {
            Ok(c) => c,
            Err(err) => {
                error!(target: "render", error = %err, "compose_failed");
                return;
            }
        };
        let mut out = stdout().lock();
        if let Err(err) = self
            .engine
            .render(&mut out, &composed.frame, composed.cursor)
        {
            error!(target: "render", error = %err, "render_failed");
        }
        let _ = out.flush();
    }

    async fn finalize_shutdown(&mut self, reason: ShutdownReason) {
        log_shutdown_stage(reason, "begin");
        if let Some(tx) = self.tx.take() {
            trace!(target: "runtime.shutdown", reason = reason.as_str(), "dropping_runtime_sender");
            drop(tx);
        }

        while let Some(handle) = self.source_handles.pop() {
            handle.abort();
            match tokio::time::timeout(Duration::from_millis(200), handle).await {
                Ok(Ok(_)) => trace!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "event_source_task_stopped"
                ),
                Ok(Err(err)) if err.is_cancelled() => trace!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "event_source_task_cancelled"
                ),
                Ok(Err(err)) => error!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    ?err,
                    "event_source_task_error"
                ),
                Err(_) => warn!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "event_source_task_timeout"
                ),
            }
        }

        if let Some(shutdown) = self.input_shutdown.take() {
            trace!(target: "runtime.shutdown", reason = reason.as_str(), "input_task_shutdown_signal");
            shutdown.signal();
        }

        if let Some(handle) = self.input_task.take() {
            match handle.await {
                Ok(_) => trace!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "input_task_joined"
                ),
                Err(err) if err.is_cancelled() => trace!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "input_task_cancelled"
                ),
                Err(err) => error!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    ?err,
                    "input_task_join_failed"
                ),
            }
        }

        log_shutdown_stage(reason, "complete");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let args = Args::parse();
    let mut app = bootstrap(&args)?;

    let mut backend = CrosstermBackend::new();
    backend.set_title("hexnav")?;
    let mut terminal = backend.enter_guard()?;
    let (width, height) = terminal.backend().size()?;
    app.resize(width, height);

    let (tx, rx) = mpsc::channel::<Event>(EVENT_CHANNEL_CAP);
    let (input_task, input_shutdown) = core_input::spawn_async_input(tx.clone());
    let mut registry = EventSourceRegistry::new();
    registry.register(TickEventSource::new(TICK_INTERVAL));
    let source_handles = registry.spawn_all(&tx);

    let mut runtime = Runtime {
        app,
        engine: RenderEngine::new(),
        rx,
        tx: Some(tx),
        source_handles,
        input_task: Some(input_task),
        input_shutdown: Some(input_shutdown),
        terminal,
    };
    runtime.run().await
}
