//! Stack of the scopes currently open in a traversal

use crate::element::ImageElement;
use crate::error::{Error, Result};

/// Open scopes, innermost last. Depth always equals the traversal's
/// current nesting depth.
#[derive(Debug, Default)]
pub struct ScopeStack {
    open: Vec<ImageElement>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: ImageElement) {
        self.open.push(element);
    }

    /// Close the innermost scope. An empty stack means the event stream
    /// left more scopes than it entered.
    pub fn pop(&mut self) -> Result<ImageElement> {
        self.open.pop().ok_or(Error::ScopeUnderflow)
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}
