mod ask_assistant;

pub use ask_assistant::{AskAssistantCommand, AskAssistantResponse, AskAssistantUseCase};
