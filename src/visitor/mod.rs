//! Snapshot traversal visitors
//!
//! A walker drives an [`ImageVisitor`] with a flat stream of scope and value
//! callbacks. [`LsVisitor`] recovers inode boundaries from that stream and
//! renders each inode as one ls-style line.

mod config;
mod image_visitor;
mod line;
mod listing;
mod record;
mod scope;

pub use config::VisitorConfig;
pub use image_visitor::ImageVisitor;
pub use line::{push_column, render_line, type_glyph};
pub use listing::{INPUT_ENDED_NOTICE, LsVisitor};
pub use record::{InodeRecord, ROOT_PATH};
pub use scope::ScopeStack;
