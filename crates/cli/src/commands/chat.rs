//! Chat command handler.
//!
//! Interactive loop: one question per line, answered from the collection.

use clap::Args;
use pdfchat_core::{config::AppConfig, AppResult};
use pdfchat_knowledge::RetrievalChain;
use std::future::Future;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Inputs that end the session (compared lower-cased).
const EXIT_COMMANDS: [&str; 4] = [":q", ":quit", ":exit", ":sair"];

const STARTUP_FAILURE: &str =
    "Não foi possível iniciar o chat. Verifique os erros de inicialização.";

/// Interactive question loop
#[derive(Args, Debug)]
pub struct ChatCommand {}

/// Classified line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    Empty,
    Exit,
    Question(String),
}

/// Trim a raw line and classify it.
pub fn parse_input(line: &str) -> ChatInput {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        ChatInput::Empty
    } else if EXIT_COMMANDS.contains(&trimmed.to_lowercase().as_str()) {
        ChatInput::Exit
    } else {
        ChatInput::Question(trimmed.to_string())
    }
}

/// Run `work` unless `interrupt` resolves first.
async fn until_interrupted<T>(
    work: impl Future<Output = T>,
    interrupt: impl Future<Output = ()>,
) -> Option<T> {
    tokio::select! {
        output = work => Some(output),
        _ = interrupt => None,
    }
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed.
async fn ctrl_c() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

impl ChatCommand {
    /// Execute the chat command.
    ///
    /// Configuration errors are reported like bootstrap errors, since the
    /// chat cannot start without either.
    pub async fn execute(&self, config: AppResult<AppConfig>) -> AppResult<()> {
        tracing::info!("Executing chat command");

        let chain = match config.and_then(|config| RetrievalChain::from_config(&config)) {
            Ok(chain) => chain,
            Err(e) => {
                println!("{}\nDetalhes: {}", STARTUP_FAILURE, e);
                return Err(e);
            }
        };

        println!("======== CHAT PDF (RAG com PGVector) ========");
        println!("Digite sua pergunta e pressione Enter.");
        println!("Comandos: :sair  (ou :q / :quit / :exit) para encerrar\n");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            print!("> ");
            std::io::stdout().flush().ok();

            let line = until_interrupted(lines.next_line(), ctrl_c())
                .await
                .transpose()?
                .flatten();

            let Some(line) = line else {
                println!("\nEncerrando...");
                break;
            };

            match parse_input(&line) {
                ChatInput::Empty => continue,
                ChatInput::Exit => {
                    println!("Tchau!");
                    break;
                }
                ChatInput::Question(question) => {
                    let Some(result) =
                        until_interrupted(chain.answer_default(&question), ctrl_c()).await
                    else {
                        println!("\nEncerrando...");
                        break;
                    };
                    print_answer(result);
                }
            }
        }

        Ok(())
    }
}

fn print_answer(result: AppResult<String>) {
    match result {
        Ok(answer) => {
            println!("\n--- Resposta ---");
            println!("{}", answer);
            println!("----------------\n");
        }
        Err(e) => {
            tracing::warn!("Question failed: {}", e);
            println!("[erro] {}\n", e);
        }
    }
}
