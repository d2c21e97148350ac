use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "sheha",
    about = "Persona chatbot that answers from a question/answer dataset"
)]
pub struct Cli {
    /// Question/answer CSV to load (overrides `SHEHA_DATASET`).
    #[arg(long, global = true, value_name = "PATH")]
    pub dataset: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start an interactive chat. Type `exit` or `quit` to leave.
    Chat,

    /// Answer a single question and exit.
    Ask {
        /// The question to ask.
        text: String,
    },

    /// Manage the embedding model.
    Model {
        #[command(subcommand)]
        model_command: ModelCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ModelCommand {
    /// Download the embedding model files from Hugging Face.
    Download {
        /// Force re-download even if files already exist.
        #[arg(long)]
        force: bool,
    },
}
