use serde::{Deserialize, Serialize};

/// Successful response from `/ask`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AskResponse {
    /// The assistant's answer text.
    pub answer: String,
}
