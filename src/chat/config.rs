//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for wiring the chat REPL to a backend and token store.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::client::Verdict;
use crate::error::Result;
use crate::token_store::{FileTokenStore, TokenStore};

/// Command-line arguments for the verdict-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Backend base URL.
    #[arrrg(
        optional,
        "Backend base URL (default: $VERDICT_API_URL or http://localhost:8000/)",
        "URL"
    )]
    pub api_url: Option<String>,

    /// Token file location.
    #[arrrg(
        optional,
        "Token file (default: $VERDICT_TOKEN_FILE or ~/.verdict/token)",
        "PATH"
    )]
    pub token_file: Option<String>,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: 60)", "SECONDS")]
    pub timeout: Option<u64>,

    /// Auto-save transcript path.
    #[arrrg(optional, "Auto-save the transcript to this path", "PATH")]
    pub transcript: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Backend base URL; `None` falls back to the environment or the
    /// local development default.
    pub api_url: Option<String>,

    /// Token file location; `None` uses the default store location.
    pub token_file: Option<PathBuf>,

    /// Request timeout; `None` uses the client default.
    pub timeout: Option<Duration>,

    /// Path to persist the transcript automatically after each turn.
    pub transcript_path: Option<PathBuf>,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    pub fn new() -> Self {
        Self {
            api_url: None,
            token_file: None,
            timeout: None,
            transcript_path: None,
            use_color: true,
        }
    }

    /// Sets the backend base URL.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    /// Sets the token file location.
    pub fn with_token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_file = Some(path.into());
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the transcript auto-save path.
    pub fn with_transcript_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.transcript_path = Some(path.into());
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Builds a client wired to this configuration's backend and token
    /// store.
    pub fn client(&self) -> Result<Verdict> {
        let store: Option<Arc<dyn TokenStore>> = self
            .token_file
            .as_ref()
            .map(|path| Arc::new(FileTokenStore::at(path.clone())) as Arc<dyn TokenStore>);
        Verdict::with_options(self.api_url.clone(), self.timeout, store)
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        ChatConfig {
            api_url: args.api_url,
            token_file: args.token_file.map(PathBuf::from),
            timeout: args.timeout.map(Duration::from_secs),
            transcript_path: args.transcript.map(PathBuf::from),
            use_color: !args.no_color,
        }
    }
}
