use clap::Parser;
use log::error;

use ws_schemaless::Args;

#[tokio::main]
async fn main() {
    pretty_env_logger::formatted_builder()
        .parse_filters(&std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let args = Args::parse();
    if let Err(err) = ws_schemaless::run(&args).await {
        error!("{err:#}");
        std::process::exit(1);
    }
}
