//! Terminal rendering of chats and messages

use crate::chat::{truncate, Chat, Message, Role};
use crate::storage::ChatSummary;
use chrono::{Local, TimeZone};
use colored::{ColoredString, Colorize};
use prettytable::{format, Table};
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Width of chat titles in listings
pub const LIST_TITLE_CHARS: usize = 25;

/// Format epoch milliseconds as local date and time
pub fn format_timestamp(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(time) => time.format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

/// Title as shown in a chat listing
pub fn list_title(title: &str) -> String {
    truncate(title, LIST_TITLE_CHARS)
}

/// Print one message; assistant replies are rendered as markdown
pub fn print_message(message: &Message) {
    let time = format_timestamp(message.timestamp).dimmed();
    match message.role {
        Role::User => {
            println!("{} {}", "You".cyan().bold(), time);
            println!("{}\n", message.content);
        }
        Role::Assistant => {
            println!("{} {}", "Assistant".green().bold(), time);
            println!("{}\n", format_markdown(&message.content));
        }
    }
}

#[derive(Default)]
struct InlineStyle {
    heading: bool,
    bold: bool,
    italic: bool,
    strikethrough: bool,
}

impl InlineStyle {
    fn apply(&self, text: &str) -> ColoredString {
        let mut styled = text.normal();
        if self.heading || self.bold {
            styled = styled.bold();
        }
        if self.heading {
            styled = styled.underline();
        }
        if self.italic {
            styled = styled.italic();
        }
        if self.strikethrough {
            styled = styled.strikethrough();
        }
        styled
    }
}

/// Render GitHub-flavored markdown as styled terminal text
///
/// Covers headings, emphasis, inline and fenced code, ordered and bulleted
/// lists (nested), task markers, links and tables. Line breaks inside a
/// paragraph are kept.
pub fn format_markdown(text: &str) -> String {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;

    let mut out = String::new();
    let mut style = InlineStyle::default();
    let mut lists: Vec<Option<u64>> = Vec::new();
    let mut in_code_block = false;
    let mut link_target: Option<String> = None;

    for event in Parser::new_ext(text, options) {
        match event {
            Event::Start(Tag::Heading { .. }) => style.heading = true,
            Event::End(TagEnd::Heading(_)) => {
                style.heading = false;
                out.push_str("\n\n");
            }
            Event::Start(Tag::Strong) => style.bold = true,
            Event::End(TagEnd::Strong) => style.bold = false,
            Event::Start(Tag::Emphasis) => style.italic = true,
            Event::End(TagEnd::Emphasis) => style.italic = false,
            Event::Start(Tag::Strikethrough) => style.strikethrough = true,
            Event::End(TagEnd::Strikethrough) => style.strikethrough = false,
            Event::End(TagEnd::Paragraph) => {
                out.push_str(if lists.is_empty() { "\n\n" } else { "\n" });
            }
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                out.push('\n');
            }
            Event::Start(Tag::List(start)) => {
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                lists.pop();
                if lists.is_empty() {
                    out.push('\n');
                }
            }
            Event::Start(Tag::Item) => {
                out.push_str(&"  ".repeat(lists.len().saturating_sub(1)));
                match lists.last_mut() {
                    Some(Some(number)) => {
                        out.push_str(&format!("{}. ", number));
                        *number += 1;
                    }
                    _ => out.push_str("• "),
                }
            }
            Event::End(TagEnd::Item) => {
                if !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            Event::TaskListMarker(done) => out.push_str(if done { "[x] " } else { "[ ] " }),
            Event::Start(Tag::Link { dest_url, .. }) => link_target = Some(dest_url.to_string()),
            Event::End(TagEnd::Link) => {
                if let Some(url) = link_target.take() {
                    out.push_str(&format!(" ({})", url.dimmed()));
                }
            }
            Event::End(TagEnd::TableCell) => out.push('\t'),
            Event::End(TagEnd::TableHead) | Event::End(TagEnd::TableRow) => {
                let trimmed = out.trim_end_matches('\t').len();
                out.truncate(trimmed);
                out.push('\n');
            }
            Event::End(TagEnd::Table) => out.push('\n'),
            Event::Text(text) if in_code_block => {
                for line in text.lines() {
                    out.push_str(&format!("    {}\n", line.yellow()));
                }
            }
            Event::Text(text) => out.push_str(&style.apply(&text).to_string()),
            Event::Code(code) => out.push_str(&code.yellow().to_string()),
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::Rule => out.push_str(&format!("{}\n\n", "─".repeat(40).dimmed())),
            _ => {}
        }
    }

    out.trim_end().to_string()
}

/// Print a chat's title and every message, or the empty-chat prompt
pub fn print_chat(chat: &Chat) {
    println!("\n{} {}\n", chat.title.bold(), format!("({})", chat.id).dimmed());
    if chat.is_empty() {
        print_empty_prompt();
        return;
    }
    for message in &chat.messages {
        print_message(message);
    }
}

pub fn print_empty_prompt() {
    println!("{}", "Research Assistant".bold());
    println!("{}\n", "Ask me anything to begin your research".dimmed());
}

/// Print the conversation set as a table, marking the active chat
pub fn print_chat_list(chats: &[ChatSummary], active: Option<&str>) {
    if chats.is_empty() {
        println!("{}", "No recent chats.".yellow());
        return;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "",
        "ID".bold(),
        "Title".bold(),
        "Messages".bold(),
        "Last Updated".bold()
    ]);

    for chat in chats {
        let marker = if active == Some(chat.id.as_str()) {
            "*".green().bold()
        } else {
            "".normal()
        };
        table.add_row(prettytable::row![
            marker,
            chat.id.cyan(),
            list_title(&chat.title),
            chat.message_count,
            format_timestamp(chat.updated_at)
        ]);
    }

    println!("\nRecent Chats:");
    table.printstd();
    println!();
}

pub fn print_welcome_banner(active: Option<&Chat>) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║             Research Chat - Interactive Session              ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    match active {
        Some(chat) => println!("Current chat: {} ({})", chat.title.bold(), chat.id.cyan()),
        None => println!("No chat selected; your first question starts one."),
    }
    println!("Type '/help' for available commands, 'exit' to quit\n");
}
