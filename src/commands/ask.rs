//! One-shot question against the active chat, a named chat or a new one

use crate::commands::{build_controller, render};
use crate::config::Config;
use crate::controller::{ConversationController, Turn, TurnOutcome};
use crate::error::{ChatError, Result};

/// Where a one-shot question goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskTarget {
    /// The active chat, or a new one if none is active
    Active,
    /// A specific existing chat
    Chat(String),
    /// A fresh chat created from the question
    New,
}

impl AskTarget {
    pub fn from_args(chat: Option<String>, new: bool) -> Self {
        match (chat, new) {
            (_, true) => AskTarget::New,
            (Some(id), false) => AskTarget::Chat(id),
            (None, false) => AskTarget::Active,
        }
    }
}

/// Ask a single question and print the reply
pub async fn run_ask(
    config: Config,
    query: String,
    chat: Option<String>,
    new: bool,
) -> Result<()> {
    let mut controller = build_controller(&config)?;
    let turn = ask(&mut controller, AskTarget::from_args(chat, new), &query).await?;

    if let TurnOutcome::Failed(reason) = &turn.outcome {
        tracing::info!("Turn ended with a failed request: {}", reason);
    }

    if let Some(reply) = turn.reply() {
        render::print_message(reply);
    }
    Ok(())
}

/// Run one turn against `target`
///
/// # Errors
///
/// Returns `ChatError::ChatNotFound` if a named chat does not exist, and
/// whatever the controller rejects (blank question, turn in progress).
pub async fn ask(
    controller: &mut ConversationController,
    target: AskTarget,
    query: &str,
) -> Result<Turn> {
    match target {
        AskTarget::Active => controller.send_message(query).await,
        AskTarget::New => controller.send_to(None, query).await,
        AskTarget::Chat(id) => {
            let chat = controller
                .repository()
                .get(&id)
                .cloned()
                .ok_or(ChatError::ChatNotFound(id))?;
            controller.send_to(Some(chat), query).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::ChatRepository;
    use crate::storage::ChatStore;
    use crate::test_utils::{FakeAnswerClient, FakeReply};
    use std::sync::Arc;

    fn controller(replies: Vec<FakeReply>) -> ConversationController {
        let store = Arc::new(ChatStore::in_memory("research-agent"));
        ConversationController::new(
            ChatRepository::load(store),
            Box::new(FakeAnswerClient::new(replies)),
        )
    }

    #[test]
    fn test_target_from_args() {
        assert_eq!(AskTarget::from_args(None, false), AskTarget::Active);
        assert_eq!(AskTarget::from_args(None, true), AskTarget::New);
        assert_eq!(
            AskTarget::from_args(Some("abc".into()), false),
            AskTarget::Chat("abc".into())
        );
    }

    #[tokio::test]
    async fn test_ask_named_chat_keeps_active_reference() {
        let mut controller = controller(vec![FakeReply::Text("4".into())]);
        let older = controller.repository_mut().create_chat();
        let newer = controller.repository_mut().create_chat();

        let turn = ask(&mut controller, AskTarget::Chat(older.id.clone()), "2 + 2?")
            .await
            .unwrap();

        assert_eq!(turn.chat.id, older.id);
        assert_eq!(turn.reply().unwrap().content, "4");
        assert_eq!(
            controller.repository().active_chat_id(),
            Some(newer.id.as_str())
        );
    }

    #[tokio::test]
    async fn test_ask_new_creates_chat_even_with_active_one() {
        let mut controller = controller(vec![FakeReply::Text("hi".into())]);
        let existing = controller.repository_mut().create_chat();

        let turn = ask(&mut controller, AskTarget::New, "hello").await.unwrap();

        assert_ne!(turn.chat.id, existing.id);
        assert_eq!(controller.repository().len(), 2);
        assert_eq!(controller.repository().chats()[0].id, turn.chat.id);
    }

    #[tokio::test]
    async fn test_ask_unknown_chat_fails_without_sending() {
        let mut controller = controller(vec![]);
        let err = ask(&mut controller, AskTarget::Chat("missing".into()), "hello")
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ChatError>(),
            Some(ChatError::ChatNotFound(_))
        ));
        assert!(controller.repository().is_empty());
    }
}
