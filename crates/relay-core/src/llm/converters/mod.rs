//! Message format converters

pub mod messages;

pub use messages::MessageConverter;
