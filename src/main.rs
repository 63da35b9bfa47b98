use clap::Parser;
use quake_map::core::ConfigProvider;
use quake_map::utils::{logger, validation::Validate};
use quake_map::{CliConfig, LocalStorage, MapEngine, QuakePipeline, QuakeMapError, TomlConfig};

fn report(e: &QuakeMapError) {
    tracing::error!(
        "Map build failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}

async fn run<C: ConfigProvider + Validate>(config: C) -> Result<String, QuakeMapError> {
    config.validate()?;
    tracing::debug!("Feed URL: {}", config.feed_url());

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = QuakePipeline::new(storage, config)?;
    let engine = MapEngine::new(pipeline);
    engine.run().await
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let result = match cli.config.clone() {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            let ignored = cli.overridden_flags();
            if !ignored.is_empty() {
                tracing::warn!(
                    "Ignoring {} because {} takes precedence",
                    ignored.join(", "),
                    path
                );
            }
            match TomlConfig::from_file(&path) {
                Ok(config) => run(config).await,
                Err(e) => Err(e),
            }
        }
        None => run(cli).await,
    };

    match result {
        Ok(output_path) => {
            println!("✅ Earthquake map written to: {}", output_path);
        }
        Err(e) => {
            report(&e);
            std::process::exit(e.severity().exit_code());
        }
    }
}
