//! Test utilities for driving visitors with synthetic snapshots.
//!
//! This module is only compiled for tests and benchmarks.

use std::io;

use crate::element::{ImageElement, InodeKind};
use crate::error::Result;
use crate::events::{Event, Payload};
use crate::output::ListingSink;
use crate::visitor::ImageVisitor;

/// In-memory sink that records everything a visitor hands it.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub output: String,
    pub rolls: usize,
    pub finished: bool,
    pub finished_abnormally: bool,
    /// Make every write fail with an I/O error
    pub fail_writes: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Written lines without their terminators.
    pub fn lines(&self) -> Vec<&str> {
        self.output.lines().collect()
    }
}

impl ListingSink for MemorySink {
    fn write(&mut self, text: &str) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::other("write refused"));
        }
        self.output.push_str(text);
        Ok(())
    }

    fn roll_if_needed(&mut self) -> io::Result<()> {
        self.rolls += 1;
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.finished = true;
        Ok(())
    }

    fn finish_abnormally(&mut self) -> io::Result<()> {
        self.finished_abnormally = true;
        Ok(())
    }
}

/// An inode as a snapshot walker would report it.
///
/// Files carry one byte count per block; directories report a block count
/// of -1 and no blocks.
#[derive(Debug, Clone)]
pub struct InodeSpec {
    pub path: String,
    pub replication: i64,
    pub modification_time: i64,
    pub access_time: i64,
    pub blocks: Option<Vec<u64>>,
    pub owner: String,
    pub group: String,
    pub permissions: String,
    pub symlink: Option<String>,
    pub inode_type: Option<String>,
    pub hardlink_id: Option<String>,
}

impl InodeSpec {
    pub fn file(path: &str, block_bytes: &[u64]) -> Self {
        Self {
            path: path.to_string(),
            replication: 3,
            modification_time: 0,
            access_time: 0,
            blocks: Some(block_bytes.to_vec()),
            owner: "hdfs".to_string(),
            group: "supergroup".to_string(),
            permissions: "rw-r--r--".to_string(),
            symlink: None,
            inode_type: None,
            hardlink_id: None,
        }
    }

    pub fn directory(path: &str) -> Self {
        Self {
            replication: 0,
            blocks: None,
            permissions: "rwxr-xr-x".to_string(),
            ..Self::file(path, &[])
        }
    }

    pub fn with_owner(mut self, owner: &str, group: &str) -> Self {
        self.owner = owner.to_string();
        self.group = group.to_string();
        self
    }

    pub fn with_modification_time(mut self, millis: i64) -> Self {
        self.modification_time = millis;
        self
    }

    pub fn with_symlink(mut self, target: &str) -> Self {
        self.symlink = Some(target.to_string());
        self
    }

    pub fn with_inode_type(mut self, marker: &str) -> Self {
        self.inode_type = Some(marker.to_string());
        self
    }

    /// Mark as hardlinked and attach the shared id.
    pub fn with_hardlink_id(mut self, id: &str) -> Self {
        self.inode_type = Some(InodeKind::Hardlinked.marker().to_string());
        self.hardlink_id = Some(id.to_string());
        self
    }

    /// Events for this inode, from its scope entry to its scope exit.
    pub fn events(&self) -> Vec<Event> {
        use ImageElement::*;

        let mut events = vec![
            Event::Enter { element: Inode },
            Event::value(InodePath, self.path.as_str()),
            Event::value(Replication, self.replication),
            Event::value(ModificationTime, self.modification_time),
            Event::value(AccessTime, self.access_time),
            Event::value(BlockSize, 134_217_728_i64),
        ];

        match &self.blocks {
            Some(blocks) => {
                events.push(Event::EnterCounted {
                    element: Blocks,
                    key: NumBlocks,
                    count: Payload::Number(blocks.len() as i64),
                });
                for (i, bytes) in blocks.iter().enumerate() {
                    events.push(Event::Enter { element: Block });
                    events.push(Event::value(BlockId, 1_073_741_825 + i as i64));
                    events.push(Event::value(NumBytes, *bytes as i64));
                    events.push(Event::value(GenerationStamp, 1001_i64));
                    events.push(Event::Leave);
                }
                events.push(Event::Leave);
            }
            None => {
                events.push(Event::EnterCounted {
                    element: Blocks,
                    key: NumBlocks,
                    count: Payload::Number(-1),
                });
                events.push(Event::Leave);
                events.push(Event::value(NsQuota, -1_i64));
                events.push(Event::value(DsQuota, -1_i64));
            }
        }

        if let Some(target) = &self.symlink {
            events.push(Event::value(Symlink, target.as_str()));
        }

        events.push(Event::Enter { element: Permissions });
        events.push(Event::value(UserName, self.owner.as_str()));
        events.push(Event::value(GroupName, self.group.as_str()));
        events.push(Event::value(PermissionString, self.permissions.as_str()));
        events.push(Event::Leave);

        if let Some(marker) = &self.inode_type {
            events.push(Event::value(InodeType, marker.as_str()));
        }
        if let Some(id) = &self.hardlink_id {
            events.push(Event::value(InodeHardlinkId, id.as_str()));
        }

        events.push(Event::Leave);
        events
    }
}

/// Events for a complete snapshot holding `inodes`, ending with finish.
pub fn image_events(inodes: &[InodeSpec]) -> Vec<Event> {
    use ImageElement::*;

    let mut events = vec![
        Event::Start,
        Event::Enter { element: FsImage },
        Event::value(ImageVersion, -19_i64),
        Event::value(NamespaceId, 463_031_076_i64),
        Event::value(GenerationStamp, 1000_i64),
        Event::EnterCounted {
            element: Inodes,
            key: NumInodes,
            count: Payload::Number(inodes.len() as i64),
        },
    ];
    for inode in inodes {
        events.extend(inode.events());
    }
    events.push(Event::Leave);
    events.push(Event::Enter {
        element: InodesUnderConstruction,
    });
    events.push(Event::Leave);
    events.push(Event::Leave);
    events.push(Event::Finish);
    events
}

/// Drive `visitor` through a complete snapshot holding `inodes`.
pub fn play_image<V: ImageVisitor + ?Sized>(visitor: &mut V, inodes: &[InodeSpec]) -> Result<()> {
    for event in image_events(inodes) {
        event.deliver(visitor)?;
    }
    Ok(())
}
