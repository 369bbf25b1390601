use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use brb_core::app::Brb;
use brb_core::config::{self, Settings};
use brb_core::duration::{format_duration, parse_duration};
use brb_core::terminal::TerminalWriter;
use brb_core::{DefaultHttpClient, Error};

#[derive(Parser, Debug, Clone)]
#[command(name = "brb")]
#[command(author, version, about = "A tool for letting viewers know when your stream is starting again")]
struct Args {
    /// How long until the stream is back, e.g. 90s, 5m, 1h30m
    duration: String,

    /// Message to display; supports {{ .Countdown }}, {{ .TwitchFollowerCount }},
    /// {{ .TwitterFollowerCount }} and {{ if .Field }}...{{ end }}
    #[arg(long, short = 'm')]
    message: Option<String>,

    /// Config file to read instead of ~/.brb.yaml
    #[arg(long)]
    config: Option<PathBuf>,
}

const DEFAULT_LOG_FILTER: &str = "brb=info,brb_core=info";

/// `RUST_LOG` when it is set and valid, otherwise info for our own crates.
fn env_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn init_tracing() {
    // stdout belongs to the countdown; logs go to stderr.
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let sub = fmt()
        .with_env_filter(env_filter(rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(sub).is_err() {
        eprintln!("brb: a global tracing subscriber was already installed");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Error> {
    // 1) The countdown length, before touching config or the network.
    let duration = parse_duration(&args.duration)?;

    // 2) Config file + environment, resolved into typed settings.
    let config_map = config::load(args.config.as_deref())?;
    let settings = Settings::from_config(&config_map);

    // 3) Compile the template and build fetchers for configured platforms.
    let http = Arc::new(DefaultHttpClient::new());
    let brb = Brb::from_settings(duration, args.message.as_deref(), &settings, http)?;

    // 4) Fetch, then count down on stdout.
    info!("brb starting: {} countdown", format_duration(duration));
    let mut writer = TerminalWriter::stdout();
    let report = brb.run(&mut writer).await?;
    info!("Done after {} frames", report.frames);
    Ok(())
}
