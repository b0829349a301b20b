//! Interactive chat session
//!
//! Runs a readline loop: slash commands manage the conversation set,
//! everything else is sent as a question to the current chat.

use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
use crate::commands::{build_controller, chat_summaries, render};
use crate::config::Config;
use crate::controller::ConversationController;
use crate::error::{ChatError, Result};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

const INDICATOR_TICK: Duration = Duration::from_millis(120);

/// Start an interactive chat session
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `chat` - Optional chat to open instead of the active one
/// * `new` - Start with no chat selected; the first question creates one
pub async fn run_chat(config: Config, chat: Option<String>, new: bool) -> Result<()> {
    tracing::info!("Starting interactive chat session");

    let mut controller = build_controller(&config)?;

    if let Some(id) = &chat {
        if !controller.repository().contains(id) {
            return Err(ChatError::ChatNotFound(id.clone()).into());
        }
        controller.repository_mut().select_chat(id);
    }

    // While detached, the next question goes to a fresh chat
    let mut detached = new;

    let mut rl = DefaultEditor::new()?;

    let current = if detached {
        None
    } else {
        controller.repository().active_chat()
    };
    render::print_welcome_banner(current);
    if let Some(chat) = current {
        render::print_chat(chat);
    }

    loop {
        match rl.readline(&format!("{} ", ">>".cyan().bold())) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                match parse_special_command(trimmed) {
                    Ok(SpecialCommand::None) => {}
                    Ok(SpecialCommand::Exit) => break,
                    Ok(command) => {
                        handle_command(&mut controller, command, &mut detached);
                        continue;
                    }
                    Err(e) => {
                        eprintln!("{}", e.to_string().red());
                        continue;
                    }
                }

                rl.add_history_entry(trimmed)?;

                let indicator = spawn_thinking_indicator(controller.loading_flag());
                let result = if detached {
                    controller.send_to(None, &line).await
                } else {
                    controller.send_message(&line).await
                };
                let _ = indicator.await;

                match result {
                    Ok(turn) => {
                        detached = false;
                        if let Some(reply) = turn.reply() {
                            render::print_message(reply);
                        }
                    }
                    Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Interrupted");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("EOF");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}

/// Apply a session command to the controller's conversation set
fn handle_command(
    controller: &mut ConversationController,
    command: SpecialCommand,
    detached: &mut bool,
) {
    let repository = controller.repository_mut();

    match command {
        SpecialCommand::NewChat => {
            let chat = repository.create_chat();
            *detached = false;
            println!("{}", format!("Started new chat {}", chat.id).green());
            render::print_chat(&chat);
        }
        SpecialCommand::ListChats => {
            let active = if *detached {
                None
            } else {
                repository.active_chat_id()
            };
            let summaries = chat_summaries(repository);
            render::print_chat_list(&summaries, active);
        }
        SpecialCommand::SelectChat(id) => {
            if !repository.contains(&id) {
                eprintln!("{}", format!("Chat not found: {}", id).red());
                return;
            }
            repository.select_chat(&id);
            *detached = false;
            if let Some(chat) = repository.active_chat() {
                render::print_chat(chat);
            }
        }
        SpecialCommand::DeleteChat(id) => {
            if !repository.contains(&id) {
                eprintln!("{}", format!("Chat not found: {}", id).red());
                return;
            }
            repository.delete_chat(&id);
            println!("{}", format!("Deleted chat {}", id).green());
        }
        SpecialCommand::ShowChat => match repository.active_chat() {
            Some(chat) if !*detached => render::print_chat(chat),
            _ => render::print_empty_prompt(),
        },
        SpecialCommand::Help => print_help(),
        SpecialCommand::Exit | SpecialCommand::None => {}
    }
}

/// Show a spinner on stderr for as long as the loading flag stays set
///
/// The first check happens one tick after spawning, so fast turns finish
/// without drawing anything.
fn spawn_thinking_indicator(loading: Arc<AtomicBool>) -> JoinHandle<()> {
    tokio::spawn(async move {
        const FRAMES: [char; 4] = ['|', '/', '-', '\\'];
        let mut frame = 0;
        let mut drawn = false;

        loop {
            tokio::time::sleep(INDICATOR_TICK).await;
            if !loading.load(Ordering::Acquire) {
                break;
            }
            eprint!("\r{} Thinking...", FRAMES[frame % FRAMES.len()]);
            let _ = std::io::stderr().flush();
            frame += 1;
            drawn = true;
        }

        if drawn {
            eprint!("\r{}\r", " ".repeat(16));
            let _ = std::io::stderr().flush();
        }
    })
}
