use clap::Parser;
use polo_history::cli::{Cli, Commands};
use polo_history::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            toml::from_str(include_str!("../config.toml.example"))?
        }
    };

    // Initialize telemetry
    polo_history::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::History(args) => {
            tracing::info!("Fetching trade history");
            args.execute(&config).await?;
        }
        Commands::Stats(args) => {
            tracing::info!("Computing rate statistics");
            args.execute().await?;
        }
        Commands::Pairs(args) => {
            args.execute().await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  API: {}", config.api.base_url);
            println!("  Timeout: {}s", config.api.timeout_secs);
            println!("  Unknown pairs: {:?}", config.pairs.unknown);
            match config.pairs.registry() {
                Ok(registry) => println!("  Known pairs: {}", registry.len()),
                Err(e) => println!("  Known pairs: invalid ({})", e),
            }
            println!(
                "  Log level: {} ({:?})",
                config.telemetry.log_level, config.telemetry.format
            );
        }
    }

    Ok(())
}
