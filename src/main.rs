use clap::Parser;
use ipo_digest::{
    http_client, DigestPipeline, FetchConfig, IpoSource, Mailer, NasdaqSource, NyseSource,
    RunOutcome, ScheduleConfig, SendStateStore,
};
use std::env;
use tracing::info;

/// Fetch the upcoming-IPO calendars and email a digest, at most once
/// per send window.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Recipient email addresses
    #[arg(long, value_name = "ADDR", num_args = 1.., required = true)]
    to_addrs: Vec<String>,

    /// Sender email address
    #[arg(long, value_name = "ADDR")]
    from_addr: String,

    /// Base URL of the mail provider API
    #[arg(long, value_name = "URL")]
    base_api_url: String,

    /// Mail provider API key
    #[arg(long, env = "MAIL_API_KEY")]
    api_key: String,

    /// Skip the send-state store so every run is eligible (debug)
    #[arg(long)]
    ignore_state: bool,

    /// Also pull the Nasdaq calendar
    #[arg(long, env = "ENABLE_NASDAQ")]
    enable_nasdaq: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let store = if args.ignore_state {
        info!("--ignore-state set, skipping the send-state store");
        SendStateStore::disabled()
    } else {
        match env::var("DATABASE_URL") {
            Ok(database_url) => SendStateStore::connect(&database_url).await,
            Err(_) => {
                info!("DATABASE_URL not set, every run will be eligible");
                SendStateStore::disabled()
            }
        }
    };

    let client = http_client(&FetchConfig::default())?;
    let mailer = Mailer::new(
        client.clone(),
        &args.base_api_url,
        args.api_key,
        args.from_addr,
        args.to_addrs,
    )?;

    // Digest priority order: NYSE first, then Nasdaq when enabled.
    let mut sources: Vec<Box<dyn IpoSource>> = vec![Box::new(NyseSource::new())];
    if args.enable_nasdaq {
        sources.push(Box::new(NasdaqSource::new()));
    }

    let pipeline = DigestPipeline::new(client, sources, store, mailer, ScheduleConfig::default());

    match pipeline.run().await? {
        RunOutcome::Skipped => info!("digest not sent"),
        RunOutcome::Sent { aggregated } => {
            info!("digest sent ({aggregated} listings aggregated)")
        }
    }

    Ok(())
}
