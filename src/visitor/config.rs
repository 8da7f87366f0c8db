//! Configuration types for the listing visitor

/// Construction-time options of the listing visitor.
#[derive(Debug, Clone, Default)]
pub struct VisitorConfig {
    /// Insert the hardlink id column after the replication column
    pub print_hardlink_id: bool,
}
