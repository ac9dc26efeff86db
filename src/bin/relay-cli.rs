use clap::{Parser, Subcommand};
use serde_json::Value;
use url::Url;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Query a running vehicle relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show service info
    Status,
    /// Check relay liveness
    Health,
    /// Look up a vehicle by plate number
    Lookup {
        /// Plate number, 7 or 8 characters
        plate: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = Url::parse(&cli.url)?;

    let target = match &cli.command {
        Commands::Status => base,
        Commands::Health => base.join("health")?,
        Commands::Lookup { plate } => {
            let mut url = base;
            url.path_segments_mut()
                .map_err(|_| "relay URL cannot carry a path")?
                .pop_if_empty()
                .extend(["api", "vehicle", plate.as_str()]);
            url
        }
    };

    let res = client.get(target).send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    println!("HTTP {}", status);
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
