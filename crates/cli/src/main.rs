//! pdfchat CLI
//!
//! Main entry point for the pdfchat command-line tool.
//! Answers questions about an ingested PDF using a pgvector collection.

mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use commands::{AskCommand, ChatCommand, IngestCommand};
use pdfchat_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// pdfchat - ask questions about a PDF, answered only from its content
#[derive(Parser, Debug)]
#[command(name = "pdfchat")]
#[command(about = "Question answering over a PDF stored in PostgreSQL + pgvector", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output (any non-falsey NO_COLOR value counts)
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    no_color: bool,

    /// Number of chunks retrieved per question
    #[arg(short = 'k', long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    top_k: Option<u32>,

    /// Chat model identifier
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Sampling temperature for the chat model
    #[arg(short, long, global = true)]
    temperature: Option<f32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive question loop
    Chat(ChatCommand),

    /// Answer a single question
    Ask(AskCommand),

    /// Load a PDF into the vector collection
    Ingest(IngestCommand),
}

impl Cli {
    /// Load configuration from the environment and apply CLI overrides.
    fn load_config(&self, pdf_path: Option<PathBuf>) -> AppResult<AppConfig> {
        let config = AppConfig::load()?.with_overrides(
            self.top_k.map(|k| k as usize),
            self.model.clone(),
            self.temperature,
            pdf_path,
            self.log_level.clone(),
            self.verbose,
            self.no_color,
        );
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging comes first so configuration errors are reported too
    let log_level = match (&cli.log_level, cli.verbose) {
        (Some(level), _) => Some(level.as_str()),
        (None, true) => Some("debug"),
        (None, false) => None,
    };
    logging::init_logging(log_level, cli.no_color).context("Failed to initialize logging")?;

    tracing::info!("pdfchat starting");

    let command_name = match &cli.command {
        Commands::Chat(_) => "chat",
        Commands::Ask(_) => "ask",
        Commands::Ingest(_) => "ingest",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match &cli.command {
        Commands::Chat(cmd) => cmd.execute(cli.load_config(None)).await,
        Commands::Ask(cmd) => cmd.execute(&cli.load_config(None)?).await,
        Commands::Ingest(cmd) => cmd.execute(&cli.load_config(cmd.pdf.clone())?).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result.with_context(|| format!("pdfchat {} failed", command_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["pdfchat", "ask", "Qual a receita?", "-k", "5", "--verbose"])
            .unwrap();
        assert_eq!(cli.top_k, Some(5));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Ask(_)));
    }

    #[test]
    fn test_no_color_env_accepts_conventional_values() {
        std::env::set_var("NO_COLOR", "1");
        let cli = Cli::try_parse_from(["pdfchat", "chat"]);
        std::env::remove_var("NO_COLOR");
        assert!(cli.unwrap().no_color);

        std::env::set_var("NO_COLOR", "false");
        let cli = Cli::try_parse_from(["pdfchat", "chat"]);
        std::env::remove_var("NO_COLOR");
        assert!(!cli.unwrap().no_color);
    }

    #[test]
    fn test_top_k_zero_rejected() {
        assert!(Cli::try_parse_from(["pdfchat", "chat", "--top-k", "0"]).is_err());
    }
}
