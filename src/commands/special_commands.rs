//! Special commands parser for interactive chat mode
//!
//! Commands are prefixed with `/` and are case-insensitive; chat
//! identifiers given as arguments keep their case. Bare `exit` and `quit`
//! are accepted as well.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },

    /// Command takes no argument but one was given
    #[error("Command {command} takes no argument, got: {arg}")]
    UnexpectedArgument { command: String, arg: String },
}

/// Commands handled by the session rather than sent as questions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Create an empty chat and make it active
    NewChat,
    /// Show every chat, active one marked
    ListChats,
    /// Switch to the chat with this id
    SelectChat(String),
    /// Delete the chat with this id
    DeleteChat(String),
    /// Reprint the active chat
    ShowChat,
    /// Display help information
    Help,
    /// Leave the session
    Exit,
    /// Not a command; send the input as a question
    None,
}

/// Parse one line of input
///
/// # Examples
///
/// ```
/// use research_chat::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/new").unwrap(), SpecialCommand::NewChat);
/// assert_eq!(
///     parse_special_command("/select k3j9x0a1b").unwrap(),
///     SpecialCommand::SelectChat("k3j9x0a1b".to_string())
/// );
/// assert_eq!(
///     parse_special_command("What is 2 + 2?").unwrap(),
///     SpecialCommand::None
/// );
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if lower == "exit" || lower == "quit" {
        return Ok(SpecialCommand::Exit);
    }

    if !trimmed.starts_with('/') {
        return Ok(SpecialCommand::None);
    }

    let (command, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command.to_lowercase(), rest.trim()),
        None => (lower, ""),
    };

    match command.as_str() {
        "/new" => no_argument(&command, arg, SpecialCommand::NewChat),
        "/list" | "/chats" => no_argument(&command, arg, SpecialCommand::ListChats),
        "/show" => no_argument(&command, arg, SpecialCommand::ShowChat),
        "/help" | "/?" => no_argument(&command, arg, SpecialCommand::Help),
        "/exit" | "/quit" => Ok(SpecialCommand::Exit),
        "/select" | "/open" => {
            with_argument(&command, arg, "/select <chat-id>").map(SpecialCommand::SelectChat)
        }
        "/delete" => {
            with_argument(&command, arg, "/delete <chat-id>").map(SpecialCommand::DeleteChat)
        }
        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

fn no_argument(
    command: &str,
    arg: &str,
    parsed: SpecialCommand,
) -> Result<SpecialCommand, CommandError> {
    if arg.is_empty() {
        Ok(parsed)
    } else {
        Err(CommandError::UnexpectedArgument {
            command: command.to_string(),
            arg: arg.to_string(),
        })
    }
}

fn with_argument(command: &str, arg: &str, usage: &str) -> Result<String, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument {
            command: command.to_string(),
            usage: usage.to_string(),
        });
    }
    Ok(arg.to_string())
}

/// Print the list of special commands
pub fn print_help() {
    println!(
        r#"
Special Commands for Interactive Chat Mode
===========================================

CHATS:
  /new              - Start a new empty chat
  /list             - List all chats (also /chats)
  /select <id>      - Switch to a chat (also /open)
  /delete <id>      - Delete a chat
  /show             - Reprint the current chat

SESSION:
  /help             - Show this help message (also /?)
  /exit             - Leave the session (also /quit, exit, quit)

Anything else is sent to the assistant as a question.
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(
            parse_special_command("What is the capital of France?").unwrap(),
            SpecialCommand::None
        );
    }

    #[test]
    fn test_parse_new_and_list() {
        assert_eq!(parse_special_command("/new").unwrap(), SpecialCommand::NewChat);
        assert_eq!(parse_special_command("/LIST").unwrap(), SpecialCommand::ListChats);
        assert_eq!(parse_special_command("/chats").unwrap(), SpecialCommand::ListChats);
    }

    #[test]
    fn test_parse_exit_variants() {
        for input in ["exit", "QUIT", "/exit", "/quit", "  exit  "] {
            assert_eq!(parse_special_command(input).unwrap(), SpecialCommand::Exit);
        }
    }

    #[test]
    fn test_parse_select_keeps_argument_case() {
        assert_eq!(
            parse_special_command("/Open  AbC123  ").unwrap(),
            SpecialCommand::SelectChat("AbC123".to_string())
        );
    }

    #[test]
    fn test_parse_delete() {
        assert_eq!(
            parse_special_command("/delete k3j9x0a1b").unwrap(),
            SpecialCommand::DeleteChat("k3j9x0a1b".to_string())
        );
    }

    #[test]
    fn test_select_without_id_is_missing_argument() {
        let err = parse_special_command("/select").unwrap_err();
        assert_eq!(
            err,
            CommandError::MissingArgument {
                command: "/select".to_string(),
                usage: "/select <chat-id>".to_string(),
            }
        );
    }

    #[test]
    fn test_new_with_argument_is_rejected() {
        let err = parse_special_command("/new please").unwrap_err();
        assert!(matches!(err, CommandError::UnexpectedArgument { .. }));
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_special_command("/mode write").unwrap_err();
        assert_eq!(err, CommandError::UnknownCommand("/mode write".to_string()));
        assert!(err.to_string().contains("/help"));
    }

    #[test]
    fn test_help_aliases() {
        assert_eq!(parse_special_command("/help").unwrap(), SpecialCommand::Help);
        assert_eq!(parse_special_command("/?").unwrap(), SpecialCommand::Help);
    }
}
