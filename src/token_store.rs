//! Single-slot persistence for the bearer token.
//!
//! Every component that needs the current credential goes through a
//! [`TokenStore`]; nothing reads the backing storage directly. The store
//! holds at most one token, and saving a new token silently replaces any
//! prior one.
//!
//! Storage failures never surface to callers: `save` degrades to a no-op
//! when the backing location is unusable, `get` is a pure read, and `clear`
//! is idempotent.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::observability::TOKEN_SAVE_FAILURES;

/// Environment variable overriding the token file location.
pub const TOKEN_FILE_ENV: &str = "VERDICT_TOKEN_FILE";

/// Token file location relative to the home directory.
const DEFAULT_TOKEN_FILE: &str = ".verdict/token";

/// Storage for the single current bearer token.
pub trait TokenStore: Send + Sync {
    /// Stores `token`, replacing any previous value.
    ///
    /// Never fails. When the backing storage cannot be written this is a
    /// no-op rather than an error.
    fn save(&self, token: &str);

    /// Returns the stored token, or `None` when the slot is empty.
    fn get(&self) -> Option<String>;

    /// Removes any stored token. Clearing an empty store is not an error.
    fn clear(&self);
}

/// Token store backed by a single file on disk.
///
/// The file location is `$VERDICT_TOKEN_FILE` when set, otherwise
/// `$HOME/.verdict/token`. When neither variable resolves, the store has no
/// backing location and every operation is a safe no-op.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: Option<PathBuf>,
}

impl FileTokenStore {
    /// Creates a store at the default location.
    pub fn new() -> Self {
        let path = env::var(TOKEN_FILE_ENV)
            .map(PathBuf::from)
            .ok()
            .or_else(|| env::var("HOME").map(|home| Path::new(&home).join(DEFAULT_TOKEN_FILE)).ok());
        Self { path }
    }

    /// Creates a store backed by a specific file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Returns the backing file path, if one resolved.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl Default for FileTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for FileTokenStore {
    fn save(&self, token: &str) {
        let Some(path) = &self.path else {
            return;
        };
        if let Some(parent) = path.parent() {
            if fs::create_dir_all(parent).is_err() {
                TOKEN_SAVE_FAILURES.click();
                return;
            }
        }
        if fs::write(path, token).is_err() {
            TOKEN_SAVE_FAILURES.click();
        }
    }

    fn get(&self) -> Option<String> {
        let path = self.path.as_ref()?;
        let token = fs::read_to_string(path).ok()?;
        let token = token.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn clear(&self) {
        if let Some(path) = &self.path {
            let _ = fs::remove_file(path);
        }
    }
}

/// In-process token store with no persistence.
///
/// Used in tests and by callers that manage credentials per-invocation.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn get(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}
