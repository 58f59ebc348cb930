use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::header::HeaderMap;
use serde_json::{json, Map, Value};

use cors_proxy::config::{load_config, ProxyConfig};
use cors_proxy::policy::CachePolicy;

/// Headers the proxy may emit on a forwarded response.
const CONTRACT_HEADERS: &[&str] = &[
    "access-control-allow-origin",
    "access-control-allow-methods",
    "access-control-allow-headers",
    "content-type",
    "content-length",
    "accept-ranges",
    "content-range",
    "cache-control",
    "x-request-id",
];

#[derive(Parser)]
#[command(name = "proxy-cli")]
#[command(about = "Inspection CLI for the CORS forwarding proxy", long_about = None)]
struct Cli {
    /// Base URL of a running proxy.
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Route the proxy is mounted on.
    #[arg(short, long, default_value = "/proxy")]
    path: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// GET a target through the proxy and show the response headers
    Fetch { target: String },
    /// Send a CORS preflight for a target
    Preflight { target: String },
    /// Print the Cache-Control the proxy would derive for a content type
    Policy {
        content_type: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let endpoint = format!("{}{}", cli.url.trim_end_matches('/'), cli.path);
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Fetch { target } => {
            let res = client.get(&endpoint).query(&[("url", &target)]).send().await?;
            print_response(res).await?;
        }
        Commands::Preflight { target } => {
            let res = client
                .request(reqwest::Method::OPTIONS, &endpoint)
                .query(&[("url", &target)])
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Policy { content_type, config } => {
            let config = match config {
                Some(path) => load_config(&path)?,
                None => ProxyConfig::default(),
            };
            let policy = CachePolicy::new(config.cache.rules);
            let directive = policy.select(&content_type);
            let out = json!({
                "content_type": content_type,
                "directive": directive,
                "cache_control": directive.as_str(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    Ok(())
}

fn contract_headers(headers: &HeaderMap) -> Value {
    let mut map = Map::new();
    for name in CONTRACT_HEADERS {
        if let Some(value) = headers.get(*name).and_then(|v| v.to_str().ok()) {
            map.insert((*name).to_string(), Value::String(value.to_string()));
        }
    }
    Value::Object(map)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let headers = contract_headers(res.headers());
    let body = res.bytes().await?;

    let mut out = json!({
        "status": status.as_u16(),
        "headers": headers,
        "body_bytes": body.len(),
    });
    if !status.is_success() {
        out["error"] = Value::String(String::from_utf8_lossy(&body).into_owned());
    }

    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
