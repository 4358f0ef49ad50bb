//! src/main.rs
//! Fleet console entry point: CLI, config, logging, terminal lifecycle

use std::{
    io::{self, Stdout},
    panic::PanicHookInfo,
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::{signal, sync::watch};
use tracing::{error, info, warn};

use fleet_core::{
    AppState, Language, Logger,
    config::{Config, ThemeName},
    controller::EventLoop,
};

type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Terminal console for browsing and managing a server fleet.
#[derive(Debug, Parser)]
#[command(name = "fleet", version, about)]
struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory for log files.
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Start with this theme (light, dark, pink, green).
    #[arg(short, long)]
    theme: Option<String>,

    /// Start with this language (en, ru, de, fr).
    #[arg(short, long)]
    lang: Option<String>,
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => Config::config_path().context("Failed to resolve config path")?,
    };

    // Logging is not up yet; remember the failure and report it once it is.
    let (mut config, load_error) = match Config::load_from(&config_path).await {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    apply_overrides(&mut config, &cli)?;

    let _log_guard = Logger::init_tracing(&config.logging).context("Failed to initialize logging")?;
    info!(
        marker = "APP_START",
        config = %config_path.display(),
        "Starting fleet console"
    );
    if let Some(e) = load_error {
        warn!(marker = "CONFIG_FALLBACK", error = %e, "Failed to load config, using defaults");
    }

    setup_panic_handler();

    let (mut state, search_rx) = AppState::new(config, Some(config_path))
        .context("Failed to initialize application state")?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    spawn_shutdown_listener(shutdown_tx);

    let mut terminal = setup_terminal().context("Failed to initialize terminal")?;
    let mut event_loop = EventLoop::new(search_rx, state.config.ui.tick_rate, shutdown_rx);

    let outcome = event_loop.run(&mut terminal, &mut state).await;

    if let Err(e) = cleanup_terminal(&mut terminal) {
        warn!(marker = "TERMINAL_CLEANUP_FAILED", error = %e, "Failed to cleanup terminal");
    }

    outcome.context("Application runtime error")?;
    info!(marker = "APP_EXIT", "Application exited cleanly");
    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) -> Result<()> {
    if let Some(theme) = &cli.theme {
        config.ui.theme = theme.parse::<ThemeName>().context("Invalid --theme")?;
    }
    if let Some(lang) = &cli.lang {
        config.ui.language = lang.parse::<Language>().context("Invalid --lang")?;
    }
    if let Some(dir) = &cli.log_dir {
        config.logging.dir.clone_from(dir);
    }
    Ok(())
}

fn spawn_shutdown_listener(shutdown: watch::Sender<bool>) {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};

            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = sigterm.recv() => info!(marker = "SIGNAL", "Received SIGTERM"),
                        _ = signal::ctrl_c() => info!(marker = "SIGNAL", "Received Ctrl+C"),
                    }
                }
                Err(e) => {
                    warn!(
                        marker = "SIGNAL_SETUP_FAILED",
                        error = %e,
                        "Failed to create SIGTERM handler"
                    );
                    if signal::ctrl_c().await.is_err() {
                        return;
                    }
                }
            }
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = signal::ctrl_c().await {
                warn!(marker = "SIGNAL_SETUP_FAILED", error = %e, "Failed to listen for Ctrl+C");
                return;
            }
            info!(marker = "SIGNAL", "Received Ctrl+C");
        }

        let _ = shutdown.send(true);
    });
}

fn setup_terminal() -> Result<AppTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    info!(marker = "TERMINAL_SETUP", "Terminal setup complete");
    Ok(terminal)
}

fn cleanup_terminal(terminal: &mut AppTerminal) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    info!(marker = "TERMINAL_CLEANUP", "Terminal cleanup complete");
    Ok(())
}

fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info: &PanicHookInfo<'_>| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);

        error!(marker = "PANIC", "Application panicked: {}", panic_info);
        original_hook(panic_info);
    }));
}
