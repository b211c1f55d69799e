//! `npm-mcp` entry point.

use std::process::ExitCode;

use clap::Parser;

use npm_mcp_server::{ServerArgs, ServerConfig, bootstrap, logging, serve};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Fatal error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = ServerArgs::parse();
    logging::init(args.log_filter.as_deref());

    let config = ServerConfig::from_args(&args)?;
    let server = bootstrap(config);

    serve(server, tokio::io::stdin(), tokio::io::stdout()).await?;
    tracing::info!("Input closed, shutting down");
    Ok(())
}
