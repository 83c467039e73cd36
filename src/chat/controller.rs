//! Chat conversation state and request lifecycle.
//!
//! This module provides the `ChatController` struct which owns the linear
//! message history and drives each submitted question through its
//! `Idle -> Sending -> settled` lifecycle.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{from_reader, to_writer_pretty};

use crate::client::Verdict;
use crate::error::{Error, Result};
use crate::observability::{CHAT_FALLBACKS, CHAT_TURNS};
use crate::types::{ChatMessage, ChatRole};

/// Assistant message seeded into every fresh conversation.
pub const GREETING: &str = "Hello! I'm VerdictAI, your legal assistant. I can help you with legal questions using my knowledge of legal texts and regulations. What would you like to know?";

/// Assistant message appended when a question fails for any reason.
///
/// The underlying error detail is deliberately not shown on this path; the
/// transcript gets this fixed text instead.
pub const FALLBACK_ANSWER: &str = "I apologize, but I'm having trouble connecting to my legal database right now. Please try again in a moment.";

/// Request lifecycle state for the conversation.
///
/// At most one question is in flight at a time; `submit` refuses input
/// while `Sending`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SendState {
    /// No request in flight.
    Idle,

    /// A question has been dispatched and its response is pending.
    Sending,
}

/// What a call to [`ChatController::submit`] did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was empty or a request was already in flight; nothing changed.
    Ignored,

    /// The backend answered and its answer was appended.
    Answered,

    /// The request failed and the fixed fallback message was appended.
    FellBack,
}

/// Aggregated stats for a conversation.
#[derive(Debug, Clone)]
pub struct ChatStats {
    /// The number of messages in the transcript.
    pub message_count: usize,
    /// Total questions dispatched to the backend.
    pub request_count: u64,
    /// How many of those ended in the fallback message.
    pub fallback_count: u64,
    /// Current request lifecycle state.
    pub state: SendState,
}

/// A controller that owns one conversation with the legal assistant.
///
/// The transcript is append-only: the user's message is committed
/// optimistically at submit time and is never retracted, even when the
/// request fails. Every exchange appends exactly two messages (user, then
/// assistant answer or fallback) and returns the controller to `Idle`.
pub struct ChatController {
    client: Verdict,
    messages: Vec<ChatMessage>,
    pending_input: String,
    state: SendState,
    next_id: u64,
    request_count: u64,
    fallback_count: u64,
}

impl ChatController {
    /// Creates a controller with a fresh transcript seeded with the greeting.
    pub fn new(client: Verdict) -> Self {
        let mut controller = Self {
            client,
            messages: Vec::new(),
            pending_input: String::new(),
            state: SendState::Idle,
            next_id: 1,
            request_count: 0,
            fallback_count: 0,
        };
        controller.seed_greeting();
        controller
    }

    fn seed_greeting(&mut self) {
        let id = self.next_message_id();
        self.messages.push(ChatMessage::assistant(id, GREETING));
    }

    fn next_message_id(&mut self) -> String {
        let id = format!("msg-{}", self.next_id);
        self.next_id += 1;
        id
    }

    /// Returns the transcript in order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Returns the number of messages in the transcript.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Returns the text of the most recent assistant message, if any.
    pub fn last_answer(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|message| message.role == ChatRole::Assistant)
            .map(|message| message.content.as_str())
    }

    /// Returns the current request lifecycle state.
    pub fn state(&self) -> SendState {
        self.state
    }

    /// Returns true while a question is in flight.
    pub fn is_loading(&self) -> bool {
        self.state == SendState::Sending
    }

    /// Returns the text waiting in the input field.
    pub fn input(&self) -> &str {
        &self.pending_input
    }

    /// Replaces the text in the input field.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.pending_input = input.into();
    }

    /// Submits the pending input as a question.
    ///
    /// Empty or whitespace-only input is ignored, as is a submit while a
    /// request is already in flight. Otherwise the user message is
    /// appended immediately, the input field is cleared, and the backend
    /// round trip only ever appends an assistant message: the answer on
    /// success, [`FALLBACK_ANSWER`] on any failure. The controller returns
    /// to `Idle` on every exit path.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.state == SendState::Sending {
            return SubmitOutcome::Ignored;
        }
        let query = self.pending_input.trim().to_string();
        if query.is_empty() {
            return SubmitOutcome::Ignored;
        }
        self.pending_input.clear();

        let id = self.next_message_id();
        self.messages.push(ChatMessage::user(id, query.clone()));

        self.state = SendState::Sending;
        CHAT_TURNS.click();
        self.request_count += 1;

        let outcome = match self.client.ask(query).await {
            Ok(response) => {
                let id = self.next_message_id();
                self.messages.push(ChatMessage::assistant(id, response.answer));
                SubmitOutcome::Answered
            }
            Err(_) => {
                CHAT_FALLBACKS.click();
                self.fallback_count += 1;
                let id = self.next_message_id();
                self.messages
                    .push(ChatMessage::assistant(id, FALLBACK_ANSWER));
                SubmitOutcome::FellBack
            }
        };

        self.state = SendState::Idle;
        outcome
    }

    /// Sets the input field and submits in one step.
    pub async fn send(&mut self, input: impl Into<String>) -> SubmitOutcome {
        self.set_input(input);
        self.submit().await
    }

    /// Clears the transcript and reseeds the greeting.
    ///
    /// The id generator keeps running so ids never repeat within a
    /// controller instance.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.seed_greeting();
    }

    /// Returns the current conversation statistics snapshot.
    pub fn stats(&self) -> ChatStats {
        ChatStats {
            message_count: self.message_count(),
            request_count: self.request_count,
            fallback_count: self.fallback_count,
            state: self.state,
        }
    }

    /// Saves the transcript to the specified path.
    pub fn save_transcript_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let transcript = TranscriptFile::new(&self.messages);
        let file = File::create(path.as_ref())
            .map_err(|err| Error::io("failed to create transcript file", err))?;
        let writer = BufWriter::new(file);
        to_writer_pretty(writer, &transcript).map_err(|err| {
            Error::serialization("failed to serialize transcript", Some(Box::new(err)))
        })
    }

    /// Loads a transcript from disk, replacing the current conversation.
    pub fn load_transcript_from<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let file = File::open(path.as_ref())
            .map_err(|err| Error::io("failed to open transcript file", err))?;
        let reader = BufReader::new(file);
        let transcript: TranscriptFile = from_reader(reader).map_err(|err| {
            Error::serialization("failed to parse transcript", Some(Box::new(err)))
        })?;
        self.messages = transcript.messages;
        self.resume_id_sequence();
        Ok(())
    }

    /// Advances the id generator past any loaded message ids.
    fn resume_id_sequence(&mut self) {
        let max_loaded = self
            .messages
            .iter()
            .filter_map(|message| message.id.strip_prefix("msg-"))
            .filter_map(|suffix| suffix.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        self.next_id = self.next_id.max(max_loaded + 1);
    }
}

#[derive(Serialize, Deserialize)]
struct TranscriptFile {
    version: u8,
    messages: Vec<ChatMessage>,
}

impl TranscriptFile {
    fn new(messages: &[ChatMessage]) -> Self {
        Self {
            version: 1,
            messages: messages.to_vec(),
        }
    }
}
