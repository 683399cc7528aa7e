use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;
use url::Url;

use catalog_router::config::load_config;
use catalog_router::routing::RouteTable;

#[derive(Parser)]
#[command(name = "route-cli")]
#[command(about = "Management CLI for the catalog route table", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the live route table
    Routes,
    /// Resolve a navigation target to a view
    Resolve {
        /// Path, optionally with query and hash (e.g. /characters/42?tab=bio)
        target: String,
    },
    /// Build a path from a route name
    Href {
        name: String,
        /// Route parameter as key=value; repeatable
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Validate a route config file without contacting the server
    Check { config: PathBuf },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{}`", raw))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = Url::parse(&cli.url)?;

    match cli.command {
        Commands::Routes => {
            let res = client.get(base.join("/api/routes")?).send().await?;
            print_response(res).await?;
        }
        Commands::Resolve { target } => {
            let res = client
                .get(base.join("/api/resolve")?)
                .query(&[("path", target.as_str())])
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Href { name, params } => {
            let mut url = base.clone();
            url.path_segments_mut()
                .map_err(|_| "server URL cannot carry a path")?
                .clear()
                .extend(["api", "href", name.as_str()]);
            let res = client.get(url).query(&params).send().await?;
            print_response(res).await?;
        }
        Commands::Check { config } => {
            let config = load_config(&config)?;
            let table = RouteTable::from_config(&config)?;
            println!("OK: {} routes (base {})", table.len(), table.base());
            for route in table.routes() {
                let props = if route.props { " [props]" } else { "" };
                println!("  {:<24} {:<20} -> {}{}", route.path, route.name, route.view, props);
            }
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Server returned status {}", status);
    }
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
