pub mod chat;
pub mod document;
pub mod fetchers;
pub mod memory;
pub mod prompt;
pub mod providers;

pub use chat::{ChatService, ChatTurn};
pub use document::{DocumentRouter, InputKind};
pub use memory::SessionMemory;
