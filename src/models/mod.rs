pub mod chat_message;
pub mod email;
