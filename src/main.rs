use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;

use gatus_uptime::commands::{self, Caller};
use gatus_uptime::logging::init_tracing;
use gatus_uptime::{
    AppConfig, FileSource, JsonSettingsStore, LookbackWindow, ObservationSource, StreamSource,
    UptimeError,
};

#[derive(Parser, Debug)]
#[command(name = "gatus-uptime")]
#[command(about = "Uptime metrics from Gatus alerts posted to a channel")]
struct Args {
    /// Path to a TOML config file (defaults to ./gatus-uptime.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Tenant whose settings are used
    #[arg(short, long, global = true, default_value = "default")]
    tenant: String,

    /// Log level when RUST_LOG is unset (e.g. "debug", "warn")
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Set the channel to analyze. Uses the configured current channel if omitted.
    #[command(name = "setchannel", visible_alias = "sc")]
    SetChannel {
        channel: Option<u64>,

        /// Run with admin rights (required to change settings)
        #[arg(long)]
        admin: bool,
    },

    /// Generate uptime metrics for the configured channel
    #[command(visible_alias = "m")]
    Metrics {
        /// Number of days to look back (default from config, normally 7)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        days: Option<u32>,

        /// Print JSON instead of the text report
        #[arg(long)]
        json: bool,

        /// Read newline-delimited records from stdin instead of the channel's feed file
        #[arg(long)]
        stdin: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_tracing(args.log_level.as_deref()) {
        eprintln!("❌ {:#}", e);
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(code) => code,
        Err(e) => report_failure(e),
    }
}

/// Dispatch the subcommand. Every error ends up in [`report_failure`].
fn run(args: Args) -> Result<ExitCode> {
    let config = AppConfig::load(args.config.as_deref())?;
    let mut store = JsonSettingsStore::new(&config.settings_path);

    match args.command {
        Command::SetChannel { channel, admin } => {
            let caller = Caller {
                tenant: args.tenant,
                is_admin: admin,
                current_channel: config.current_channel,
            };
            let channel = commands::set_channel(&mut store, &caller, channel)?;
            println!("✅ Set target channel to {}", channel);
            Ok(ExitCode::SUCCESS)
        }
        Command::Metrics { days, json, stdin } => {
            let window = match days {
                Some(days) => LookbackWindow::days(days)?,
                None => config.default_window()?,
            };
            run_metrics(&config, &store, &args.tenant, window, json, stdin)
        }
    }
}

/// Resolve the feed, build the report and print it.
fn run_metrics(
    config: &AppConfig,
    store: &JsonSettingsStore,
    tenant: &str,
    window: LookbackWindow,
    json: bool,
    stdin: bool,
) -> Result<ExitCode> {
    let rules = config.rules()?;

    // Build a tokio runtime for the async sources
    let rt = tokio::runtime::Runtime::new()?;

    let (mut source, label): (Box<dyn ObservationSource>, String) = if stdin {
        (Box::new(StreamSource::new(tokio::io::stdin(), "stdin")), "stdin".to_string())
    } else {
        let channel = commands::target_channel(store, tenant)?;
        let path = config.feed_path(channel);
        if !path.exists() {
            return Err(UptimeError::ChannelNotFound(channel).into());
        }
        (Box::new(FileSource::new(path)), format!("channel {}", channel))
    };

    let report = rt.block_on(commands::metrics(source.as_mut(), &label, window, &rules))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.to_json())?);
    } else {
        print!("{}", report);
    }
    Ok(ExitCode::SUCCESS)
}

/// Print a short message for a failed command and pick the exit code.
///
/// Preconditions the user can fix only get the message; anything else is
/// also logged.
fn report_failure(e: anyhow::Error) -> ExitCode {
    let message = failure_message(&e);
    if !is_precondition(&e) {
        error!(error = %format!("{:#}", e), "Error during channel analysis");
    }
    eprintln!("{}", message);
    ExitCode::FAILURE
}

fn is_precondition(e: &anyhow::Error) -> bool {
    e.downcast_ref::<UptimeError>()
        .is_some_and(UptimeError::is_precondition)
}

fn failure_message(e: &anyhow::Error) -> String {
    match e.downcast_ref::<UptimeError>() {
        Some(inner) if inner.is_precondition() => format!("❌ {}", inner),
        Some(inner) => format!("❌ Error during analysis: {}", inner),
        None => format!("❌ {:#}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_precondition_gets_short_message() {
        let err = anyhow::Error::from(UptimeError::NoChannelConfigured);
        assert!(is_precondition(&err));
        assert_eq!(
            failure_message(&err),
            "❌ No target channel configured. Use `setchannel` first."
        );
    }

    #[test]
    fn test_window_errors_are_preconditions() {
        let err = anyhow::Error::from(LookbackWindow::days(0).unwrap_err());
        assert!(is_precondition(&err));
        assert!(failure_message(&err).starts_with("❌ Invalid look-back window"));
    }

    #[test]
    fn test_config_errors_go_through_the_same_boundary() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "default_days = \"many\"").unwrap();

        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert!(!is_precondition(&err));

        let message = failure_message(&err);
        assert!(message.starts_with("❌ Invalid configuration"));
        assert!(!message.starts_with("Error:"));
    }

    #[test]
    fn test_bad_default_window_is_reported() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "default_window = \"9999999999999999d\"").unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        let err = config.default_window().unwrap_err();
        assert!(failure_message(&err).contains("Span out of range"));
    }
}
