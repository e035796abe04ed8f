// src/main.rs

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use log::{error, info};

use logsweep::core::logging;
use logsweep::trigger::{CleanupSession, LogNotifier, Notifier};
use logsweep::{Config, Error, RetentionEngine, report};

const DEFAULT_CONFIG: &str = "logsweep.toml";

#[derive(Debug, Default)]
struct Args {
    config: Option<String>,
    dry_run: bool,
    json: bool,
}

impl Args {
    fn parse() -> anyhow::Result<Self> {
        let mut args = Args::default();
        for arg in std::env::args().skip(1) {
            match arg.as_str() {
                "--dry-run" => args.dry_run = true,
                "--json" => args.json = true,
                flag if flag.starts_with("--") => anyhow::bail!("unknown flag {}", flag),
                path => {
                    if args.config.replace(path.to_string()).is_some() {
                        anyhow::bail!("more than one config path given");
                    }
                }
            }
        }
        Ok(args)
    }
}

struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&self, line: &str) {
        println!("{}", line);
    }
}

fn main() -> ExitCode {
    logging::init("info");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if err
                .downcast_ref::<Error>()
                .is_some_and(Error::is_directory_not_found)
            {
                return ExitCode::from(2);
            }
            error!("[logsweep] {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse()?;
    let cfg_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG);

    // ------------------------------------------------------------
    // Config
    // ------------------------------------------------------------
    let cfg = Config::load_or_default(cfg_path)?;
    info!("[logsweep] config {} window={}", cfg_path, cfg.window);

    // ------------------------------------------------------------
    // Dry run
    // ------------------------------------------------------------
    if args.dry_run {
        let targets = cfg.targets()?;
        let preview = match RetentionEngine::new().preview(&targets, cfg.window) {
            Ok(p) => p,
            Err(err) => {
                if err.is_directory_not_found() {
                    println!("{}", report::directory_missing_line());
                }
                return Err(err.into());
            }
        };
        if args.json {
            println!("{}", serde_json::to_string_pretty(&preview)?);
        } else {
            println!("{}", report::preview_line(&preview, cfg.window));
        }
        return Ok(());
    }

    // ------------------------------------------------------------
    // Manual cleanup
    // ------------------------------------------------------------
    let notifier: Arc<dyn Notifier> = if args.json {
        Arc::new(LogNotifier)
    } else {
        Arc::new(StdoutNotifier)
    };
    let session = CleanupSession::from_config(&cfg, notifier)?;

    let summary = session
        .run_manual()
        .join()
        .map_err(|_| anyhow::anyhow!("cleanup thread panicked"))??;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("cannot encode summary")?
        );
    } else if summary.is_empty() {
        println!("nothing older than {}", cfg.window);
    }

    Ok(())
}
