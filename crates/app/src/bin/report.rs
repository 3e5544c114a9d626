// Artmart - Monthly report generator

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use artmart_app::{create_api, create_session, run_report, ReportJob};
use artmart_common::config::Config;
use artmart_reports::ReportPeriod;

#[derive(Parser, Debug)]
#[command(
    name = "artmart-report",
    about = "Generate the Artmart monthly PDF report"
)]
struct Cli {
    /// Report month as YYYY-MM
    #[arg(long)]
    month: String,

    /// Output file (defaults to REPORT_OUTPUT_DIR/artmart-report-YYYY-MM.pdf)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Backend base URL, overrides ARTMART_API_BASE_URL
    #[arg(long)]
    base_url: Option<String>,

    /// Bearer token, overrides ARTMART_AUTH_TOKEN
    #[arg(long)]
    token: Option<String>,

    /// Backend provider (http, mock), overrides ARTMART_API_PROVIDER
    #[arg(long)]
    provider: Option<String>,

    /// Also write the report document as JSON next to the PDF
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// Flag values keyed by the environment variable they override
    fn overrides(&self) -> HashMap<&'static str, String> {
        [
            ("ARTMART_API_BASE_URL", self.base_url.clone()),
            ("ARTMART_AUTH_TOKEN", self.token.clone()),
            ("ARTMART_API_PROVIDER", self.provider.clone()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let period = ReportPeriod::parse_month(&cli.month).map_err(|e| {
        error!("Invalid --month value: {}", e);
        anyhow::anyhow!(e)
    })?;

    let overrides = cli.overrides();
    let config = Config::from_lookup(|key| {
        overrides
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
    })
    .map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!(provider = %config.api_provider, period = %period.label(), "Starting report run");

    let session = create_session(&config);
    let api = create_api(&config, session)?;

    let job = ReportJob {
        period,
        output: cli.output,
        write_json: cli.json,
    };

    let path = run_report(&config, api.as_ref(), &job, chrono::Utc::now())
        .await
        .map_err(|e| {
            error!("Report generation failed: {:#}", e);
            e
        })?;

    info!(path = %path.display(), "Report ready");
    println!("{}", path.display());
    Ok(())
}
