//! Terminal quiz: paste multiple-choice questions, then play them.

pub mod commands;
pub mod config;
pub mod error;
pub mod store;

use std::io;
use std::path::Path;

use anyhow::{bail, Context};
use quiz_core::{Phase, QuestionStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::Command;
use crate::config::Config;
use crate::store::JsonFileStore;

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    let file_store = JsonFileStore::new(config.store_path());
    tracing::debug!(path = %file_store.path().display(), "using store");
    let mut store = QuestionStore::with_key(file_store, config.settings.storage_key.clone());

    match command {
        Command::Load { file } => {
            let count = commands::load_file(&mut store, Path::new(&file))?;
            println!("Parsed {} questions.", count);
        }
        Command::Shuffle => {
            commands::shuffle(&mut store)?;
            println!("Questions shuffled.");
        }
        Command::Play { export } => {
            let mut session = commands::open_session(&mut store)?;
            if session.phase() != Phase::Ready {
                bail!("No saved questions. Run `termquiz load FILE` first.");
            }

            let stdin = io::stdin();
            let finished = commands::play(
                &mut session,
                &config.settings,
                &mut stdin.lock(),
                &mut io::stdout(),
            )?;
            if !finished {
                println!("\nQuiz abandoned.");
                return Ok(());
            }

            if let Some(path) = export {
                if commands::export_review(&session, Path::new(&path))
                    .context("failed to export review")?
                {
                    println!("Review written to {}", path);
                } else {
                    println!("No wrong answers to export.");
                }
            }
        }
        Command::Reset => {
            store.clear()?;
            println!("Saved questions cleared.");
        }
        Command::Prompt => {
            println!("{}", commands::LLM_PROMPT);
        }
    }

    Ok(())
}
