use crate::cli::HistoryCommand;
use crate::commands::{chat_summaries, open_repository, render};
use crate::config::Config;
use crate::error::{ChatError, Result};
use crate::repository::ChatRepository;
use colored::Colorize;

/// Handle history commands
pub fn handle_history(config: &Config, command: HistoryCommand) -> Result<()> {
    let mut repository = open_repository(config);
    apply_history_command(&mut repository, command)
}

/// Run a history command against an already loaded repository
pub fn apply_history_command(
    repository: &mut ChatRepository,
    command: HistoryCommand,
) -> Result<()> {
    match command {
        HistoryCommand::List => {
            if repository.is_empty() {
                println!("{}", "No conversation history found.".yellow());
                return Ok(());
            }
            let summaries = chat_summaries(repository);
            render::print_chat_list(&summaries, repository.active_chat_id());
            println!(
                "Use {} to continue a conversation.",
                "research-chat chat --chat <ID>".cyan()
            );
            println!();
        }
        HistoryCommand::Show { id } => {
            let chat = repository
                .get(&id)
                .ok_or_else(|| ChatError::ChatNotFound(id.clone()))?;
            render::print_chat(chat);
        }
        HistoryCommand::Delete { id } => {
            if !repository.contains(&id) {
                return Err(ChatError::ChatNotFound(id).into());
            }
            repository.delete_chat(&id);
            println!("{}", format!("Deleted chat {}", id).green());
        }
        HistoryCommand::Select { id } => {
            if !repository.contains(&id) {
                return Err(ChatError::ChatNotFound(id).into());
            }
            repository.select_chat(&id);
            println!("{}", format!("Active chat is now {}", id).green());
        }
        HistoryCommand::New => {
            let chat = repository.create_chat();
            println!("{}", format!("Created chat {}", chat.id).green());
        }
    }

    Ok(())
}
