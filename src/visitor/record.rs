//! Per-inode scratch state collected while an inode scope is open

use crate::element::{ImageElement, InodeKind, TextField};
use crate::error::{Error, Result};

/// Path shown for an inode whose stored path is empty.
pub const ROOT_PATH: &str = "/";

/// Fields of one inode gathered from leaf values.
///
/// A negative `num_blocks` marks a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InodeRecord {
    pub num_blocks: i64,
    pub permissions: String,
    pub replication: String,
    pub owner: String,
    pub group: String,
    pub size: u64,
    pub modification_time: String,
    pub path: String,
    pub link_target: String,
    /// Raw `INODE_TYPE` text, compared against [`InodeKind`] markers.
    pub inode_type: String,
    pub hardlink_id: String,
}

impl Default for InodeRecord {
    fn default() -> Self {
        Self {
            num_blocks: 0,
            permissions: String::new(),
            replication: String::new(),
            owner: String::new(),
            group: String::new(),
            size: 0,
            modification_time: String::new(),
            path: String::new(),
            link_target: String::new(),
            inode_type: InodeKind::Regular.marker().to_string(),
            hardlink_id: String::new(),
        }
    }
}

impl InodeRecord {
    /// Start a new inode. Reuses the existing string allocations.
    pub fn reset(&mut self) {
        self.num_blocks = 0;
        self.permissions.clear();
        self.replication.clear();
        self.owner.clear();
        self.group.clear();
        self.size = 0;
        self.modification_time.clear();
        self.path.clear();
        self.link_target.clear();
        self.inode_type.clear();
        self.inode_type.push_str(InodeKind::Regular.marker());
        self.hardlink_id.clear();
    }

    pub fn is_directory(&self) -> bool {
        self.num_blocks < 0
    }

    pub fn is_hardlinked(&self) -> bool {
        self.inode_type == InodeKind::Hardlinked.marker()
    }

    /// Add one block's contribution to the byte count.
    pub fn add_bytes(&mut self, element: ImageElement, bytes: u64) -> Result<()> {
        self.size = self
            .size
            .checked_add(bytes)
            .ok_or(Error::SizeOverflow { element })?;
        Ok(())
    }

    /// Store a textual value in the field it targets.
    pub fn apply_text(&mut self, element: ImageElement, field: TextField, value: &str) -> Result<()> {
        let slot = match field {
            TextField::Bytes => {
                let bytes = value
                    .parse::<u64>()
                    .map_err(|e| Error::invalid_number(element, value, e))?;
                return self.add_bytes(element, bytes);
            }
            TextField::Path if value.is_empty() => {
                self.path.clear();
                self.path.push_str(ROOT_PATH);
                return Ok(());
            }
            TextField::Path => &mut self.path,
            TextField::Permissions => &mut self.permissions,
            TextField::Replication => &mut self.replication,
            TextField::Owner => &mut self.owner,
            TextField::Group => &mut self.group,
            TextField::ModificationTime => &mut self.modification_time,
            TextField::LinkTarget => &mut self.link_target,
            TextField::InodeType => &mut self.inode_type,
            TextField::HardlinkId => &mut self.hardlink_id,
        };
        slot.clear();
        slot.push_str(value);
        Ok(())
    }
}
