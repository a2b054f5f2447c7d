//! Ask command handler.
//!
//! Answers a single question and exits.

use clap::Args;
use pdfchat_core::{config::AppConfig, AppError, AppResult};
use pdfchat_knowledge::ask_once;

/// Answer a single question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let question = self.question.trim();
        if question.is_empty() {
            return Err(AppError::Config("No question provided".to_string()));
        }

        let answer = ask_once(config, question).await?;

        if self.json {
            let output = serde_json::json!({
                "question": question,
                "answer": answer,
                "model": config.chat_model,
                "topK": config.top_k,
                "collection": config.collection,
            });

            let json = serde_json::to_string_pretty(&output)?;
            println!("{}", json);
        } else {
            println!("{}", answer);
        }

        Ok(())
    }
}
