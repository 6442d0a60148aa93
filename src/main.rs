use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use contribscan::{export, scan_organization, Config, GitHubClient, LicenseSet, ScanConfig, ScanReport};

#[derive(Parser, Debug)]
#[command(name = "contribscan")]
#[command(version)]
#[command(about = "Find the open source repositories a GitHub organization's members contribute to")]
struct Args {
    /// GitHub organization to scan
    organization: String,

    /// File holding `access_token=...` (defaults to the environment and ./.env)
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// CSV file with a `license_name` column listing accepted licenses
    #[arg(long)]
    licenses: Option<PathBuf>,

    /// Directory for the exported CSV (defaults to the downloads directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of members resolved at the same time
    #[arg(long)]
    concurrency: Option<usize>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Print the results without writing a CSV file
    #[arg(long)]
    no_export: bool,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("contribscan=info,reqwest=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            let message = e
                .downcast_ref::<contribscan::Error>()
                .map(|e| e.user_message())
                .unwrap_or("Something went wrong.");
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> anyhow::Result<()> {
    let config = match &args.env_file {
        Some(path) => Config::from_env_file(path)?,
        None => Config::from_env()?,
    };

    let licenses = match &args.licenses {
        Some(path) => LicenseSet::from_path(path)?,
        None => LicenseSet::bundled()?,
    };

    let scan_config = ScanConfig::new(&args.organization)?
        .with_concurrency(args.concurrency.unwrap_or(config.concurrency_limit))
        .with_progress(!args.no_progress);

    let github = GitHubClient::from_config(&config)?;

    tracing::info!("Starting scan of organization: {}", scan_config.organization);
    let report = scan_organization(&github, &licenses, &scan_config).await?;

    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(&report)?,
        _ => format_text(&report),
    };
    println!("{}", output);

    if !args.no_export {
        let dir = match &args.output_dir {
            Some(dir) => dir.clone(),
            None => export::default_output_dir()?,
        };
        let path = export::export_csv(&report.table, &report.organization, &dir)?;
        eprintln!("Download successful: {}", path.display());
    }

    Ok(())
}

fn format_text(report: &ScanReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n=== Open source contributions: {} ===\n\n",
        report.organization
    ));

    if report.table.is_empty() {
        output.push_str("No open source contributions found.\n");
    } else {
        let person_width = report
            .table
            .iter()
            .map(|r| r.person.len())
            .chain(std::iter::once("person".len()))
            .max()
            .unwrap_or(0);
        let repo_width = report
            .table
            .iter()
            .map(|r| r.repository.len())
            .chain(std::iter::once("repository".len()))
            .max()
            .unwrap_or(0);

        output.push_str(&format!(
            "{:<pw$}  {:<rw$}  {}\n",
            "person",
            "repository",
            "contributions",
            pw = person_width,
            rw = repo_width
        ));
        for record in &report.table {
            output.push_str(&format!(
                "{:<pw$}  {:<rw$}  {}\n",
                record.person,
                record.repository,
                record.contributions,
                pw = person_width,
                rw = repo_width
            ));
        }
    }

    if !report.skipped.is_empty() {
        // Reasons are in the log; only the logins are shown here.
        output.push_str(&format!(
            "\nCould not scan {} members: {}\n",
            report.skipped.len(),
            report
                .skipped
                .iter()
                .map(|m| m.login.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    output
}
