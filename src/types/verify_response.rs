use serde::{Deserialize, Serialize};

/// Successful response from `/verify-token/{token}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyResponse {
    /// Confirmation message from the backend.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_message() {
        let json = json!({"message": "Token is valid"});
        let response: VerifyResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.message, "Token is valid");
    }
}
