use anyhow::{Context, bail};
use clap::Parser;
use tracing::{info, warn};

mod app;
mod config;
mod diff;
mod format;
mod logging;
mod reconcile;
mod review;
mod runtime;
mod service;
mod summary;
mod task;
mod ui;

use service::HttpTaskService;

/// Review the pending tasks of a running import session.
#[derive(Debug, Parser)]
#[command(name = "tagreview", version, about)]
struct Args {
    /// Import server base URL; overrides `server.base_url`.
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    /// Print every task as plain text and exit without starting the TUI.
    #[arg(long)]
    dump: bool,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let runtime::LoadedSettings {
        mut settings,
        warnings,
    } = runtime::load_settings();
    if let Some(server) = args.server {
        settings.server.base_url = server;
        if let Err(msg) = settings.validate() {
            bail!("invalid --server: {msg}");
        }
    }

    if args.print_config {
        for w in &warnings {
            eprintln!("tagreview: {w}");
        }
        print!("{}", settings.to_toml().context("rendering settings")?);
        return Ok(());
    }

    let _log_guard = logging::init(&settings.logging)?;
    for w in &warnings {
        warn!("{w}");
    }
    info!(server = %settings.server.base_url, "tagreview starting");

    let service = HttpTaskService::new(&settings.server).context("building HTTP client")?;

    if args.dump {
        let mut stdout = std::io::stdout().lock();
        return runtime::write_dump(&service, &settings, &mut stdout);
    }

    runtime::run(&settings, &service)
}
