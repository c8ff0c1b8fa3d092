use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "diag-cli")]
#[command(about = "Command-line client for the diagnostic service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:9898")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReadyAction {
    Enable,
    Disable,
}

#[derive(Subcommand)]
enum Commands {
    /// Show runtime information
    Status,
    /// Show version and commit
    Version,
    /// Query liveness and readiness
    Probes,
    /// Toggle readiness
    Ready {
        #[arg(value_enum)]
        action: ReadyAction,
    },
    /// Store content and print its digest
    Write {
        /// Inline content
        data: Option<String>,
        /// Read content from a file instead
        #[arg(short, long, conflicts_with = "data")]
        file: Option<PathBuf>,
    },
    /// Fetch content by digest
    Read { digest: String },
    /// Echo a payload
    Echo { data: String },
    /// Echo the request headers
    Headers,
    /// Run a simulated job
    Job {
        #[arg(short, long, default_value_t = 0)]
        wait: i64,
    },
    /// List watched configuration files
    Configs,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Status => {
            let res = client.get(format!("{}/", base)).send().await?;
            print_response(res).await?;
        }
        Commands::Version => {
            let res = client.get(format!("{}/version", base)).send().await?;
            print_response(res).await?;
        }
        Commands::Probes => {
            for probe in ["healthz", "readyz"] {
                let res = client.get(format!("{}/{}", base, probe)).send().await?;
                println!("{}: {}", probe, res.status());
            }
        }
        Commands::Ready { action } => {
            let path = match action {
                ReadyAction::Enable => "readyz/enable",
                ReadyAction::Disable => "readyz/disable",
            };
            let res = client.post(format!("{}/{}", base, path)).send().await?;
            print_response(res).await?;
        }
        Commands::Write { data, file } => {
            let body = match (data, file) {
                (_, Some(path)) => std::fs::read(path)?,
                (Some(data), None) => data.into_bytes(),
                (None, None) => return Err("either content or --file is required".into()),
            };
            let res = client.post(format!("{}/write", base)).body(body).send().await?;
            print_response(res).await?;
        }
        Commands::Read { digest } => {
            let res = client.post(format!("{}/read", base)).body(digest).send().await?;
            print_response(res).await?;
        }
        Commands::Echo { data } => {
            let res = client.post(format!("{}/echo", base)).body(data).send().await?;
            print_response(res).await?;
        }
        Commands::Headers => {
            let res = client.get(format!("{}/echo/headers", base)).send().await?;
            print_response(res).await?;
        }
        Commands::Job { wait } => {
            let res = client
                .post(format!("{}/job", base))
                .json(&serde_json::json!({ "wait": wait }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Configs => {
            let res = client.get(format!("{}/configs", base)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if !text.is_empty() {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    if !text.is_empty() {
        println!("{}", text.trim_end());
    }
    Ok(())
}
