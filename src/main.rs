//! FarmLive command line
//!
//! Main application entry point

use std::path::PathBuf;
use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use FarmLive::{
    config::Settings,
    models::{CacheKey, TranslatableStructure},
    services::ServiceFactory,
    utils::{helpers, logging},
};

#[derive(Parser)]
#[command(name = "farmlive", version, about = "FarmLive translation and farming assistant")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Translate a piece of text
    Translate {
        /// Target language code
        lang: String,
        /// Text to translate
        text: String,
    },
    /// Translate every string leaf of a JSON object
    TranslateJson {
        /// Target language code
        lang: String,
        /// JSON file holding an object
        file: PathBuf,
    },
    /// Ask the farming assistant a question
    Ask {
        /// Language of the answer
        lang: String,
        /// The question
        message: String,
    },
    /// Report which backends are configured
    Health,
    /// Print the effective configuration with secrets redacted
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on exit
    let _guard = logging::init_logging(&settings.logging)?;

    if let Command::Config = cli.command {
        print!("{}", toml::to_string_pretty(&settings.redacted())?);
        return Ok(());
    }

    info!("Starting {}", FarmLive::info());
    let services = ServiceFactory::from_settings(&settings).await?;

    match cli.command {
        Command::Translate { lang, text } => {
            let translation = services
                .translation_service
                .translate_text_detailed(&text, &lang)
                .await;
            println!("{}", translation.text);

            let cached_at = services
                .translation_service
                .cache()
                .get(&CacheKey::new(&text, &lang))
                .await
                .map(|entry| format!(", cached {}", helpers::format_timestamp(entry.cached_at)))
                .unwrap_or_default();
            eprintln!("[{}{}]", translation.source, cached_at);
        }
        Command::TranslateJson { lang, file } => {
            let raw = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let structure: TranslatableStructure = serde_json::from_str(&raw)
                .with_context(|| format!("{} does not hold a JSON object", file.display()))?;

            let translated = services
                .translation_service
                .translate_object(structure, &lang)
                .await;
            println!("{}", serde_json::to_string_pretty(&translated)?);
        }
        Command::Ask { lang, message } => {
            match services.assistant_service.respond(&message, &lang).await {
                Ok(answer) => println!("{}", answer),
                Err(e) if e.is_recoverable() => {
                    logging::log_api_error("assistant", &e.to_string(), Some(&lang));
                    println!("{}", services.assistant_service.error_message(&lang).await);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Command::Health => {
            let health = services.health_check().await;
            let cache_stats = services.translation_service.cache_stats().await;

            println!("translator configured: {}", health.translator_configured);
            println!("generative configured: {}", health.generative_configured);
            println!("fallback languages:    {}", health.fallback_languages);
            for lang in services.translation_service.dictionary().get_stats().languages {
                println!(
                    "  {} {} ({} phrases)",
                    lang.code,
                    lang.native_name.unwrap_or("-"),
                    lang.phrase_count
                );
            }
            println!("cache hit rate:        {}", helpers::format_percentage(cache_stats.hit_rate()));
            for issue in health.get_issues() {
                println!("- {}", issue);
            }
            if !health.is_healthy() {
                error!("No translation source available beyond annotation");
                anyhow::bail!("unhealthy");
            }
        }
        Command::Config => {}
    }

    Ok(())
}
