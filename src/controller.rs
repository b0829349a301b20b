//! One conversation turn: user message, remote answer, assistant reply
//!
//! A turn moves `Idle -> Sending -> {Answered | Failed} -> Idle`. The user
//! message is published to the repository before the remote call starts,
//! and every outcome ends with an assistant message, so a turn never
//! leaves the chat waiting on a reply that will not come.

use crate::chat::{Chat, Message};
use crate::client::AnswerClient;
use crate::error::{ChatError, Result};
use crate::repository::ChatRepository;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Reply used when the service answers without any text
pub const NO_ANSWER_MESSAGE: &str = "Sorry, I couldn't find an answer.";

/// Reply used when the request itself fails
pub const REQUEST_FAILED_MESSAGE: &str = "Sorry, there was an error processing your request.";

/// How a turn ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The service returned answer text
    Answered,
    /// The service succeeded but returned no text; the fallback reply was used
    NoAnswer,
    /// The request failed; the error reply was used
    Failed(String),
}

/// Result of a completed turn
#[derive(Debug, Clone)]
pub struct Turn {
    /// The chat as published after the assistant reply
    pub chat: Chat,
    pub outcome: TurnOutcome,
}

impl Turn {
    /// The assistant message that closed the turn
    pub fn reply(&self) -> Option<&Message> {
        self.chat.last_message()
    }
}

/// Holds the loading flag for the lifetime of a turn
///
/// Releasing on drop clears the flag on every exit path, including a
/// panic or a future that is dropped mid-request.
struct LoadingGuard {
    flag: Arc<AtomicBool>,
}

impl LoadingGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ChatError::TurnInProgress)?;
        Ok(Self { flag: flag.clone() })
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Orchestrates turns against the conversation repository
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use research_chat::client::HttpAnswerClient;
/// use research_chat::config::Config;
/// use research_chat::controller::ConversationController;
/// use research_chat::repository::ChatRepository;
/// use research_chat::storage::ChatStore;
///
/// # async fn example() -> research_chat::error::Result<()> {
/// let config = Config::default();
/// let store = Arc::new(ChatStore::open(&config.storage)?);
/// let client = HttpAnswerClient::new(config.api.clone())?;
/// let mut controller =
///     ConversationController::new(ChatRepository::load(store), Box::new(client));
///
/// let turn = controller.send_message("What is the capital of France?").await?;
/// println!("{}", turn.reply().map(|m| m.content.as_str()).unwrap_or_default());
/// # Ok(())
/// # }
/// ```
pub struct ConversationController {
    repository: ChatRepository,
    client: Box<dyn AnswerClient>,
    loading: Arc<AtomicBool>,
}

impl ConversationController {
    pub fn new(repository: ChatRepository, client: Box<dyn AnswerClient>) -> Self {
        Self {
            repository,
            client,
            loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn repository(&self) -> &ChatRepository {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut ChatRepository {
        &mut self.repository
    }

    /// Whether a turn is outstanding
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Shared handle to the loading flag, for indicators running elsewhere
    pub fn loading_flag(&self) -> Arc<AtomicBool> {
        self.loading.clone()
    }

    /// Send `content` to the active chat
    ///
    /// With no active chat (or a stale reference) a new chat is created
    /// from the message.
    pub async fn send_message(&mut self, content: &str) -> Result<Turn> {
        let target = self.repository.active_chat().cloned();
        self.send_to(target, content).await
    }

    /// Run one turn against `target`, or against a new chat when `None`
    ///
    /// # Errors
    ///
    /// Returns `ChatError::EmptyMessage` for blank content and
    /// `ChatError::TurnInProgress` while another turn holds the loading
    /// flag. Remote failures are not errors; they end the turn with
    /// `TurnOutcome::Failed`.
    pub async fn send_to(&mut self, target: Option<Chat>, content: &str) -> Result<Turn> {
        if content.trim().is_empty() {
            return Err(ChatError::EmptyMessage.into());
        }

        let _guard = LoadingGuard::acquire(&self.loading)?;

        let user_message = Message::user(content);
        let mut chat = match target {
            None => Chat::from_first_message(self.repository.fresh_chat_id(), user_message),
            Some(mut chat) => {
                chat.append_user_message(user_message);
                chat
            }
        };

        // The user's message is visible before the request goes out
        self.repository.apply_update(chat.clone());
        tracing::debug!("Turn started in chat {}", chat.id);

        let (reply, outcome) = match self.client.ask(content).await {
            Ok(answer) => match answer.text() {
                Some(text) => (text.to_string(), TurnOutcome::Answered),
                None => (NO_ANSWER_MESSAGE.to_string(), TurnOutcome::NoAnswer),
            },
            Err(e) => {
                tracing::warn!("Question failed in chat {}: {}", chat.id, e);
                (REQUEST_FAILED_MESSAGE.to_string(), TurnOutcome::Failed(e.to_string()))
            }
        };

        chat.append(Message::assistant(reply));
        self.repository.apply_update(chat.clone());
        tracing::debug!("Turn finished in chat {}: {:?}", chat.id, outcome);

        Ok(Turn { chat, outcome })
    }
}
