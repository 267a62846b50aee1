//! AI-assisted chat and search: prompt construction, the
//! chat-completion gateway, and best-effort reply interpretation.

pub mod gateway;
pub mod prompt;
pub mod reply;

pub use gateway::{ChatGateway, CompletionRequest, GatewayError, OpenAiGateway};
pub use reply::SearchReply;
