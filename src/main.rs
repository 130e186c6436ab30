//! Entry point for the lesson viewer.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load user configuration from `conf/config.toml`.
//! - Load the requested lesson page from the content directory.
//! - Either print the page snapshot or launch the GUI.

mod app;

use crate::app::run_app;
use anyhow::{Context, Result, bail};
use finlit_core::catalog::PageCatalog;
use finlit_core::config::{AppConfig, load_config};
use finlit_core::scroll::ScrollSource;
use finlit_core::session::{PageSession, ScrollBehavior, SessionCommand};
use std::env;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

pub(crate) const CONFIG_PATH: &str = "conf/config.toml";
const USAGE: &str = "Usage: finlit-viewer [page-slug] [--snapshot]";

static SIGINT_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Returns `true` once per Ctrl-C press.
pub(crate) fn take_sigint_requested() -> bool {
    SIGINT_REQUESTED.swap(false, Ordering::SeqCst)
}

#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    page: Option<String>,
    snapshot: bool,
}

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let args = parse_args(env::args().skip(1))?;
    let config = load_config(Path::new(CONFIG_PATH));
    set_log_level(reload_handle, config.log_level.as_filter_str());

    let catalog = PageCatalog::new(&config.content_dir);
    let slug = args.page.unwrap_or_else(|| config.default_page.clone());
    info!(
        page = %slug,
        content_dir = %catalog.dir().display(),
        level = %config.log_level,
        scroll_mode = %config.scroll_mode,
        "Starting lesson viewer"
    );
    let page = catalog
        .load(&slug)
        .with_context(|| format!("Failed to open lesson page `{slug}`"))?;

    if args.snapshot {
        return print_snapshot(page, &config);
    }

    install_sigint_handler();
    run_app(page, catalog, config).context("Failed to start the GUI")?;
    Ok(())
}

fn print_snapshot(page: finlit_core::catalog::PageContent, config: &AppConfig) -> Result<()> {
    let source = ScrollSource::default();
    let mut session = PageSession::mount(page, ScrollBehavior::from(config), &source);
    let event = session.apply_command(SessionCommand::GetSnapshot);
    println!("{}", event.snapshot.to_json_pretty()?);
    Ok(())
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs> {
    let mut parsed = CliArgs::default();
    for arg in args {
        if arg == "--snapshot" {
            parsed.snapshot = true;
        } else if arg.starts_with('-') {
            bail!("Unknown flag `{arg}`\n{USAGE}");
        } else if parsed.page.is_some() {
            bail!("Only one page may be opened\n{USAGE}");
        } else {
            parsed.page = Some(arg);
        }
    }
    Ok(parsed)
}

fn install_sigint_handler() {
    if let Err(err) = ctrlc::set_handler(|| SIGINT_REQUESTED.store(true, Ordering::SeqCst)) {
        warn!("Failed to install Ctrl-C handler: {err}");
    }
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with config.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    if env::var_os("RUST_LOG").is_some() {
        info!("RUST_LOG is set; ignoring config log level");
        return;
    }
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
