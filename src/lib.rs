//! lsimage - ls-style listing of a file system namespace snapshot

pub mod element;
pub mod error;
pub mod events;
pub mod output;
pub mod timestamp;
pub mod visitor;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use element::{ImageElement, InodeKind};
pub use error::{Error, Result};
pub use events::{Event, EventReplay, Payload, ReplaySummary};
pub use output::{ListingSink, TextWriter, WriterConfig};
pub use timestamp::TimestampFormat;
pub use visitor::{ImageVisitor, LsVisitor, VisitorConfig};
