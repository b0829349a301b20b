//! Test utilities for Research Chat
//!
//! Provides a scripted answer client so controller tests can run turns
//! without a network.

use crate::chat::Chat;
use crate::client::{Answer, AnswerClient};
use crate::error::{ChatError, Result};
use crate::storage::ChatStore;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One scripted response
#[derive(Debug, Clone)]
pub enum FakeReply {
    /// Succeed with this answer text
    Text(String),
    /// Succeed without any answer text
    Empty,
    /// Fail with this message
    Fail(String),
}

/// Answer client that replays scripted replies in order
///
/// Records every query it receives and, when observing a store, a
/// snapshot of the stored conversation set at the moment of each request.
pub struct FakeAnswerClient {
    replies: Mutex<VecDeque<FakeReply>>,
    queries: Arc<Mutex<Vec<String>>>,
    snapshots: Arc<Mutex<Vec<Vec<Chat>>>>,
    observed: Option<Arc<ChatStore>>,
    never_answers: bool,
}

impl FakeAnswerClient {
    pub fn new(replies: Vec<FakeReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            queries: Arc::new(Mutex::new(Vec::new())),
            snapshots: Arc::new(Mutex::new(Vec::new())),
            observed: None,
            never_answers: false,
        }
    }

    /// A client whose requests never complete
    pub fn pending() -> Self {
        Self {
            never_answers: true,
            ..Self::new(Vec::new())
        }
    }

    /// Snapshot `store` each time a question arrives
    pub fn observing(mut self, store: Arc<ChatStore>) -> Self {
        self.observed = Some(store);
        self
    }

    pub fn queries(&self) -> Arc<Mutex<Vec<String>>> {
        self.queries.clone()
    }

    pub fn snapshots(&self) -> Arc<Mutex<Vec<Vec<Chat>>>> {
        self.snapshots.clone()
    }
}

#[async_trait]
impl AnswerClient for FakeAnswerClient {
    async fn ask(&self, query: &str) -> Result<Answer> {
        self.queries
            .lock()
            .expect("queries lock poisoned")
            .push(query.to_string());

        if let Some(store) = &self.observed {
            self.snapshots
                .lock()
                .expect("snapshots lock poisoned")
                .push(store.load_all_chats());
        }

        if self.never_answers {
            std::future::pending::<()>().await;
        }

        let reply = self
            .replies
            .lock()
            .expect("replies lock poisoned")
            .pop_front();

        match reply {
            Some(FakeReply::Text(text)) => Ok(Answer::new(text)),
            Some(FakeReply::Empty) => Ok(Answer::default()),
            Some(FakeReply::Fail(message)) => Err(ChatError::Client(message).into()),
            None => Err(ChatError::Client("no scripted reply left".to_string()).into()),
        }
    }
}
