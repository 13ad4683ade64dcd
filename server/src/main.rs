mod error;
mod game_service;
mod in_memory_repository;
mod repository;
mod server_config;
mod web_server;

use std::sync::Arc;

use clap::Parser;
use common::{log, logger};

use game_service::GameService;
use in_memory_repository::InMemoryGameRepository;
use server_config::{DEFAULT_CONFIG_FILE_NAME, get_config_manager};
use web_server::run_web_server;

#[derive(Parser)]
#[command(name = "tictactoe_server")]
struct Args {
    /// Path to the YAML config file.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE_NAME)]
    config: String,

    #[arg(long)]
    use_log_prefix: bool,

    /// Write the default config to `--config` if it does not exist, then exit.
    #[arg(long)]
    write_default_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager = get_config_manager(&args.config);

    if args.write_default_config {
        if config_manager.write_default_if_missing()? {
            log!("Wrote default config to {}", args.config);
        } else {
            log!("Config {} already exists, leaving it untouched", args.config);
        }
        return Ok(());
    }

    let config = config_manager.get_config()?;

    let strategy = config.search.to_strategy()?;
    log!(
        "Search strategy: {} with {} worker(s)",
        if config.search.parallel { "parallel" } else { "sequential" },
        strategy.workers()
    );

    let repository = Arc::new(InMemoryGameRepository::new());
    let service = GameService::new(repository, strategy, config.max_username_length);

    run_web_server(service, &config.bind_address).await?;

    log!("Server shut down gracefully");

    Ok(())
}
