use clap::Parser;

use securetask_cli::app;
use securetask_cli::commands::{self, cli};
use securetask_cli::tui;
use securetask_core::api as core_api;
use securetask_core::controller::TaskListController;
use securetask_core::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, error::CliError> {
    let args = cli::Args::parse();
    let cfg = core_api::load_default().map_err(|e| error::CliError::Config(e.to_string()))?;
    init_tracing(&cfg.logging).map_err(error::CliError::Command)?;

    let services = app::build_services(cfg, &args)?;

    match &args.command {
        Some(cli::Commands::Login(login)) => commands::auth::login(&services, login).await,
        Some(cli::Commands::Register(register)) => {
            commands::auth::register(&services, register).await
        }
        Some(cli::Commands::Logout) => commands::auth::logout(&services),
        Some(cli::Commands::Whoami) => commands::auth::whoami(&services).await,
        Some(cli::Commands::Profile(profile)) => {
            commands::auth::profile(&services, profile).await
        }
        Some(cli::Commands::List(filters)) => commands::tasks::list(&services, filters).await,
        Some(cli::Commands::Add(add)) => commands::tasks::add(&services, add).await,
        Some(cli::Commands::Edit(edit)) => commands::tasks::edit(&services, edit).await,
        Some(cli::Commands::Toggle(id)) => commands::tasks::toggle(&services, id).await,
        Some(cli::Commands::Delete(delete)) => commands::tasks::delete(&services, delete).await,
        Some(cli::Commands::Tui(filters)) => run_board(&services, filters).await,
        None => run_board(&services, &cli::FilterArgs::default()).await,
    }
}

async fn run_board(
    services: &app::AppServices,
    filters: &cli::FilterArgs,
) -> Result<i32, error::CliError> {
    if !services.cfg.tui.enabled {
        return commands::tasks::list(services, filters).await;
    }
    if let Err(reason) = tui::check_tui_support() {
        tracing::debug!(target: "securetask.tui", "TUI disabled: {}", reason);
        return commands::tasks::list(services, filters).await;
    }

    let mut ctrl = TaskListController::new(services.tasks.clone());
    ctrl.filters = filters.to_filters();
    tui::run_tui(ctrl, &services.cfg.tui).await
}

fn exit_code_for_error(e: &error::CliError) -> i32 {
    // 0: success
    // 11: config error
    // 12: not logged in
    // 20: remote / IO error
    // 50: internal/uncategorized
    match e {
        error::CliError::Config(_) => 11,
        error::CliError::Auth(_) => 12,
        error::CliError::Remote(_) => 20,
        error::CliError::Io(_) => 20,
        error::CliError::Command(_) => 20,
        error::CliError::Anyhow(_) => 50,
    }
}

fn init_tracing(logging: &core_api::LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("securetask"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("securetask.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        // Nothing to write to; treat as disabled.
        return Ok(());
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
