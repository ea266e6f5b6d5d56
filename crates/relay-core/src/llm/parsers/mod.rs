//! Response parsers for different providers

pub mod responses;


pub use responses::{ParseError, ParsedResponse, ResponseParser};
