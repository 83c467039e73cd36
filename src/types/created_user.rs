use serde::{Deserialize, Serialize};

/// Response from `/register`.
///
/// The payload shape is backend-defined beyond the username; extra fields
/// are carried opaquely rather than dropped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatedUser {
    /// The username the account was created with.
    pub username: String,

    /// Any additional fields the backend includes.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_with_extra_fields() {
        let json = json!({"username": "ada", "id": 7, "created": true});
        let user: CreatedUser = serde_json::from_value(json).unwrap();
        assert_eq!(user.username, "ada");
        assert_eq!(user.extra.get("id"), Some(&json!(7)));
        assert_eq!(user.extra.get("created"), Some(&json!(true)));
    }

    #[test]
    fn deserializes_bare_username() {
        let json = json!({"username": "ada"});
        let user: CreatedUser = serde_json::from_value(json).unwrap();
        assert_eq!(user.username, "ada");
        assert!(user.extra.is_empty());
    }
}
