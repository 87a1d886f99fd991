//! Generic VICI message trees used by higher-level strongSwan tools.

pub mod format;
pub mod message;
pub mod parser;
pub mod writer;

pub use format::{format_json, format_summary, format_text};
pub use message::{Element, Message, MessageError, MAX_KEY_LEN, MAX_VALUE_LEN};
pub use parser::{parse, parse_file, ParseError};
pub use writer::{write, write_file, WriteError};
