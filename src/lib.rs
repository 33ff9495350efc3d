pub mod chat_api;
pub mod message_store;
pub mod student_registry;
pub mod students_api;
