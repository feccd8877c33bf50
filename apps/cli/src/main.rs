mod cli;
mod config;
mod error;
mod main_lib;
mod orchestrator;

use std::process::ExitCode;

use clap::Parser;

use cli::Args;
use config::Config;
use error::CliResult;
use main_lib::{build_context, init_tracing};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    match execute(&args).await {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!("Run failed: {:?}", err);
            eprintln!("Error: {}", err);
            if let Some(hint) = err.hint() {
                eprintln!("{}", hint);
            }
            ExitCode::from(err.exit_code())
        }
    }
}

async fn execute(args: &Args) -> CliResult<Vec<String>> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let context = build_context(&config)?;
    let result = orchestrator::run(args, &context).await?;
    Ok(orchestrator::render(&result))
}
