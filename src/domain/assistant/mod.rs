pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;

pub use entities::{ChatMessage, ChatRole, ChatTurn};
pub use errors::AssistantError;
pub use ports::ChatCompletionClient;
pub use services::AssistantService;
