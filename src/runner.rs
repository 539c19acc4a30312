use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;

use crate::cli::Cli;
use joomla_hunter::output::render_posture;
use joomla_hunter::{preflight, Catalog, Preflight, ProbeClient, ScanConfig, ScanCoordinator, Url};

fn print_ascii_logo(entries: usize) {
    println!(r#"
       _                       _          _   _             _
      | | ___   ___  _ __ ___ | | __ _   | | | |_   _ _ __ | |_ ___ _ __
   _  | |/ _ \ / _ \| '_ ` _ \| |/ _` |  | |_| | | | | '_ \| __/ _ \ '__|
  | |_| | (_) | (_) | | | | | | | (_| |  |  _  | |_| | | | | ||  __/ |
   \___/ \___/ \___/|_| |_| |_|_|\__,_|  |_| |_|\__,_|_| |_|\__\___|_|
"#);
    println!("              Component Scanner v{} - {} catalog entries", env!("CARGO_PKG_VERSION"), entries);
}

fn init_logging(cli: &Cli) {
    use tracing_subscriber::EnvFilter;
    let crate_level = if cli.debug { "debug" } else if cli.verbose { "info" } else { "warn" };
    // Keep reqwest/hyper quiet even in debug mode; per-probe lines come from our crate.
    let filter_str = format!("joomla_hunter={crate},reqwest=info,hyper=info", crate = crate_level);
    let env_filter = EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new(crate_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(true)
        .with_target(false)
        .init();
}

fn progress_bar(total: usize, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} components")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub async fn run_from_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(&cli);

    let raw = cli.url.strip_suffix('/').unwrap_or(&cli.url);
    let target = Url::parse(raw).context("you must supply an http:// or https:// url")?;

    let user_agent = match cli.user_agent.clone() {
        Some(ua) => ua,
        None => {
            let ua = joomla_hunter::agent::random_desktop_agent();
            println!("[*] No user agent given, generated user agent is: {}", ua);
            ua
        }
    };

    let defaults = ScanConfig::default();
    let config = ScanConfig {
        concurrency: cli.threads.unwrap_or(defaults.concurrency),
        timeout_secs: cli.timeout,
        user_agent,
        ..defaults
    };

    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::bundled(),
    };

    print_ascii_logo(catalog.len());
    tracing::info!(target = %target, concurrency = config.effective_concurrency(), timeout = config.timeout_secs, "Starting scan");

    let probe = Arc::new(ProbeClient::new(&config)?);

    let posture = match preflight(&target, probe.as_ref()).await? {
        Preflight::Ready(posture) => posture,
        Preflight::Aborted(outcome) => {
            println!("[-] Site down ({:?}), check url please...", outcome);
            return Ok(());
        }
    };
    print!("{}", render_posture(&target, &posture, true));

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n[!] Interrupted, finishing in-flight components...");
            ctrl_c.cancel();
        }
    });

    let coordinator = ScanCoordinator::new(probe, &config).with_cancellation(cancel);
    println!("\n[>] Start scan... with {} concurrent tasks!", coordinator.concurrency());

    let pb = progress_bar(catalog.len(), !cli.no_progress);
    let coordinator = coordinator.with_progress(pb.clone());
    let report = coordinator.run(&target, posture, catalog.entries()).await;
    pb.finish_and_clear();

    report.print_summary();

    if let Some(path) = &cli.report {
        report
            .save_to_file(path)
            .with_context(|| format!("failed to save report to {}", path.display()))?;
        println!("[=] Report saved to: {}", path.display());
    }

    Ok(())
}
