//! Chat application module for conversing with the legal assistant.
//!
//! This module provides the conversation core used by the `verdict-chat`
//! REPL. It supports:
//!
//! - A linear, append-only transcript with a seeded greeting
//! - One in-flight question at a time, with a fixed fallback answer on
//!   failure
//! - Slash commands for session and account control
//! - Transcript save/load
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`controller`]: Conversation state and the ask lifecycle
//! - [`commands`]: Slash command parsing and handling

mod commands;
mod config;
mod controller;

pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use controller::{
    ChatController, ChatStats, FALLBACK_ANSWER, GREETING, SendState, SubmitOutcome,
};
