//! Callback contract between a snapshot walker and its visitors

use crate::element::ImageElement;
use crate::error::Result;

/// Receives a depth-first traversal of a snapshot as a flat event stream.
///
/// Every `enter_scope*` call is matched by exactly one later `leave_scope`
/// in a well-formed stream. Leaf values belong to the innermost open scope.
pub trait ImageVisitor {
    /// Traversal begins.
    fn start(&mut self) -> Result<()>;

    /// Enter a scope that can contain nested elements.
    fn enter_scope(&mut self, element: ImageElement) -> Result<()>;

    /// Enter a scope announced together with a numeric count, e.g. the
    /// number of blocks in a `BLOCKS` scope.
    fn enter_scope_counted(
        &mut self,
        element: ImageElement,
        key: ImageElement,
        count: i64,
    ) -> Result<()>;

    /// Same as [`enter_scope_counted`](Self::enter_scope_counted) with the
    /// count delivered as text.
    fn enter_scope_counted_text(
        &mut self,
        element: ImageElement,
        key: ImageElement,
        count: &str,
    ) -> Result<()>;

    /// Leave the innermost open scope.
    fn leave_scope(&mut self) -> Result<()>;

    fn visit_number(&mut self, element: ImageElement, value: i64) -> Result<()>;

    fn visit_text(&mut self, element: ImageElement, value: &str) -> Result<()>;

    /// Traversal completed normally.
    fn finish(&mut self) -> Result<()>;

    /// Input ended before the traversal completed. Called at most once and
    /// never after [`finish`](Self::finish).
    fn finish_abnormally(&mut self) -> Result<()>;
}
