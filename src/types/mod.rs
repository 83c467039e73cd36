//! Request and response types for the VerdictAI API.

mod ask_request;
mod ask_response;
mod chat_message;
mod created_user;
mod credentials;
mod token_response;
mod verify_response;

pub use ask_request::AskRequest;
pub use ask_response::AskResponse;
pub use chat_message::{ChatMessage, ChatRole};
pub use created_user::CreatedUser;
pub use credentials::Credentials;
pub use token_response::TokenResponse;
pub use verify_response::VerifyResponse;
