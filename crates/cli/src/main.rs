// CLI modules
mod cli;

use clap::{Parser, Subcommand};
use cli::{args::Args, op::Op, Address, Airdrop, Balance, Init, Note, Version};

use notes_cli::state::{AppConfig, AppState};

command_enum! {
    (Init, Init),
    (Address, Address),
    (Airdrop, Airdrop),
    (Balance, Balance),
    (Note, Note),
    (Version, Version),
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Before `init` there is no config yet; log with the defaults
    let config = AppState::load(args.config_path.clone())
        .map(|state| state.config)
        .unwrap_or_else(|_| AppConfig::default());
    let guards = notes_cli::init_logging(config.log_level(), config.log_dir.as_deref());

    let ctx = cli::op::OpContext::new(args.config_path);

    let code = match args.command.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            tracing::debug!("command failed: {:?}", e);
            eprintln!("Error: {}", e);
            1
        }
    };

    // Flush buffered log lines before exiting
    drop(guards);
    std::process::exit(code);
}
