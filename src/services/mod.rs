pub mod email_service;
pub mod responder;
