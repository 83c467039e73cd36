use serde::{Deserialize, Serialize};

/// Body of a question posted to `/ask`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AskRequest {
    /// The question text.
    pub query: String,
}

impl AskRequest {
    /// Create a new `AskRequest` with the given question.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

impl From<&str> for AskRequest {
    fn from(query: &str) -> Self {
        Self::new(query)
    }
}

impl From<String> for AskRequest {
    fn from(query: String) -> Self {
        Self::new(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn serializes_to_query_field() {
        let request = AskRequest::new("What is a tort?");
        let json = to_value(&request).unwrap();
        assert_eq!(json, json!({"query": "What is a tort?"}));
    }

    #[test]
    fn from_str() {
        let request: AskRequest = "What is consideration?".into();
        assert_eq!(request.query, "What is consideration?");
    }
}
