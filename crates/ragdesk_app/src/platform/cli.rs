use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "ragdesk",
    version,
    about = "Build a knowledge base from documents and web pages, then ask questions against it"
)]
pub struct Cli {
    /// Configuration file (RON). Defaults to ./ragdesk.ron when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the question-answering API.
    #[arg(long, env = "RAGDESK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Increase log verbosity (repeatable).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Interactive session (the default).
    Shell,
    /// Ask one question and print the answer with its sources.
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Add documents and web pages to the knowledge base.
    Ingest {
        /// Files to upload.
        #[arg(short, long, num_args = 1..)]
        files: Vec<PathBuf>,
        /// URLs to process.
        #[arg(short, long, num_args = 1..)]
        urls: Vec<String>,
        /// Directory searched recursively for .pdf, .docx and .doc files.
        #[arg(short, long)]
        directory: Option<PathBuf>,
    },
}
