// Forbid accidental stdout/stderr writes in the library portion of the TUI;
// anything printed while the alternate screen is active corrupts the UI.
#![deny(clippy::print_stdout, clippy::print_stderr)]

use std::fs::OpenOptions;

use tracing_appender::non_blocking;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use widd_core::config::Config;
use widd_core::config::ConfigOverrides;

use crate::app::App;

mod app;
mod app_event;
mod auth;
mod block_render;
mod chatwidget;
mod cli;
mod thinking;
mod tui;

pub use cli::Cli;

pub async fn run_main(cli: Cli) -> anyhow::Result<()> {
    let overrides = ConfigOverrides {
        webhook_url: cli.webhook_url.clone(),
        session_id: cli.session_id.clone(),
        skip_auth: cli.no_auth,
    };
    let config = Config::load(overrides)?;

    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)?;

    // Open (or create) the log file, appending to it. Keep it private to the
    // current user on unix.
    let mut log_file_opts = OpenOptions::new();
    log_file_opts.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        log_file_opts.mode(0o600);
    }
    let log_file = log_file_opts.open(log_dir.join("widd-tui.log"))?;

    let (non_blocking, _guard) = non_blocking(log_file);

    let default_filter = if cli.debug {
        "widd_core=debug,widd_tui=debug"
    } else {
        "widd_core=info,widd_tui=info"
    };
    // RUST_LOG wins over the debug-flag default.
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_target(false)
        .with_filter(env_filter);
    let _ = tracing_subscriber::registry().with(file_layer).try_init();

    run_ratatui_app(config).map_err(|err| anyhow::anyhow!(err.to_string()))
}

fn run_ratatui_app(config: Config) -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Restore the terminal before the default panic report prints, otherwise
    // the report lands inside the alternate screen and is lost.
    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = tui::restore();
        tracing::error!("panic: {info}");
        prev_hook(info);
    }));

    let mut terminal = tui::init()?;
    let app_result = App::new(config).run(&mut terminal);
    let restore_result = tui::restore();
    app_result?;
    restore_result?;
    Ok(())
}
