//! Command-line interface definition for Research Chat
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat, one-shot questions and
//! conversation history management.

use clap::{Parser, Subcommand};

/// Research Chat - persistent conversations with a question-answering service
#[derive(Parser, Debug, Clone)]
#[command(name = "research-chat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the conversation database location
    #[arg(long)]
    pub store_path: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Open this chat instead of the active one
        #[arg(long, conflicts_with = "new")]
        chat: Option<String>,

        /// Start without a chat; the first message creates one
        #[arg(long)]
        new: bool,
    },

    /// Ask a single question and print the reply
    Ask {
        /// Question text
        query: String,

        /// Send to this chat instead of the active one
        #[arg(long, conflicts_with = "new")]
        chat: Option<String>,

        /// Send to a fresh chat
        #[arg(long)]
        new: bool,
    },

    /// Manage stored conversations
    History {
        /// History subcommand
        #[command(subcommand)]
        command: HistoryCommand,
    },
}

/// Conversation history subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum HistoryCommand {
    /// List all chats, active one marked
    List,

    /// Print every message of a chat
    Show {
        /// Chat identifier
        id: String,
    },

    /// Delete a chat
    Delete {
        /// Chat identifier
        id: String,
    },

    /// Make a chat the active one
    Select {
        /// Chat identifier
        id: String,
    },

    /// Create an empty chat and make it active
    New,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            store_path: None,
            command: Commands::History {
                command: HistoryCommand::List,
            },
        }
    }
}
