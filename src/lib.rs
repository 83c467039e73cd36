// Public modules
pub mod chat;
pub mod claims;
pub mod client;
pub mod error;
pub mod observability;
pub mod session;
pub mod token_store;
pub mod types;
pub mod utils;

// Re-exports
pub use claims::Claims;
pub use client::Verdict;
pub use error::{Error, Result};
pub use session::{Session, authenticated, current_user, is_expired};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use types::*;
