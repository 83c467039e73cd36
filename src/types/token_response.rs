use serde::{Deserialize, Serialize};

/// Successful response from the `/token` exchange.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    /// The bearer token to attach to subsequent requests.
    pub access_token: String,

    /// Token type, `"bearer"` for this backend.
    pub token_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_token_fields() {
        let json = json!({"access_token": "abc.def.ghi", "token_type": "bearer"});
        let response: TokenResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.access_token, "abc.def.ghi");
        assert_eq!(response.token_type, "bearer");
    }
}
