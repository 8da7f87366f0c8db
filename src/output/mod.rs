//! Listing output destinations
//!
//! # Module Structure
//!
//! - `sink` - The `ListingSink` contract visitors write through
//! - `config` - Output configuration types
//! - `writer` - File and stdout writer with size-bounded parts

mod config;
mod sink;
mod writer;

pub use config::WriterConfig;
pub use sink::ListingSink;
pub use writer::{TextWriter, part_path};
