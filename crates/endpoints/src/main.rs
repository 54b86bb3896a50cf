use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use reqwest::Method;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use common::AppConfig;
use common::logger;
use endpoints::{AnalyzeEndpoint, QuotesEndpoint, Request, Response};

#[derive(Parser)]
#[command(name = "signals")]
#[command(about = "Forex signal endpoints", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve one batch of quote-driven signals
    Quotes {
        /// Request method
        #[arg(short, long, default_value = "GET")]
        method: String,
    },

    /// Extract a signal from a chart screenshot
    Analyze {
        /// JSON request body (reads stdin when omitted)
        body: Option<PathBuf>,

        /// Request method
        #[arg(short, long, default_value = "POST")]
        method: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    logger::setup_logger();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    debug!("Configured pairs: {:?}", config.pairs);

    let response = match cli.command {
        Commands::Quotes { method } => {
            let endpoint = QuotesEndpoint::from_config(&config)?;
            info!("Serving quotes in {:?} mode", endpoint.mode());
            endpoint.handle(&Request::new(parse_method(&method)?)).await
        }
        Commands::Analyze { body, method } => {
            let endpoint = AnalyzeEndpoint::from_config(&config)?;
            let request = Request::new(parse_method(&method)?).with_body(read_body(body).await?);
            endpoint.handle(&request).await
        }
    };

    print_response(&response);
    Ok(())
}

fn parse_method(method: &str) -> Result<Method> {
    Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("invalid request method: {method}"))
}

async fn read_body(path: Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut body = String::new();
            tokio::io::stdin()
                .read_to_string(&mut body)
                .await
                .context("failed to read request body from stdin")?;
            Ok(body)
        }
    }
}

fn print_response(response: &Response) {
    println!("{}", response.status);
    for (name, value) in &response.headers {
        println!("{}: {}", name, value.to_str().unwrap_or_default());
    }
    println!();
    println!("{}", response.body);
}
