//! Schema elements of a namespace snapshot and the per-element listing dispatch

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named position in the snapshot schema.
///
/// Elements either open a scope (they contain nested elements) or carry a
/// single leaf value. The serialized form is the upper snake case schema
/// name, e.g. `INODE_PATH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageElement {
    FsImage,
    ImageVersion,
    NamespaceId,
    IsCompressed,
    CompressCodec,
    LayoutVersion,
    NumInodes,
    GenerationStamp,
    Inodes,
    Inode,
    InodePath,
    Replication,
    ModificationTime,
    AccessTime,
    BlockSize,
    NumBlocks,
    Blocks,
    Block,
    BlockId,
    NumBytes,
    NsQuota,
    DsQuota,
    Permissions,
    PermissionString,
    UserName,
    GroupName,
    Symlink,
    InodeType,
    InodeHardlinkId,
    NumInodesUnderConstruction,
    InodesUnderConstruction,
    InodeUnderConstruction,
    PreferredBlockSize,
    ClientName,
    ClientMachine,
    CurrentDelegationKeyId,
    NumDelegationKeys,
    DelegationKeys,
    DelegationKey,
    DelegationKeyId,
    DelegationKeyExpiryTime,
    DelegationKeyLength,
    DelegationTokenSequenceNumber,
    NumDelegationTokens,
    DelegationTokens,
    DelegationTokenIdentifier,
    DelegationTokenIdentifierKind,
    DelegationTokenIdentifierSeqno,
    DelegationTokenIdentifierOwner,
    DelegationTokenIdentifierRenewer,
    DelegationTokenIdentifierRealuser,
    DelegationTokenIdentifierIssueDate,
    DelegationTokenIdentifierMaxDate,
    DelegationTokenIdentifierExpiryTime,
    DelegationTokenIdentifierMasterKeyId,
}

/// What a listing does with a numeric leaf value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericAction {
    /// Add the value to the inode's cumulative byte count.
    AddBytes,
    /// Render the value as a display timestamp, then store it as text.
    FormatTimestamp,
    /// Drop the value before any conversion.
    Discard,
    /// Convert to decimal text and dispatch as a textual value.
    AsText,
}

/// Record field targeted by a textual leaf value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Path,
    Permissions,
    Replication,
    Owner,
    Group,
    /// Parsed as an integer and added to the byte count.
    Bytes,
    ModificationTime,
    LinkTarget,
    InodeType,
    HardlinkId,
}

impl ImageElement {
    /// Dispatch for numeric payloads.
    pub fn numeric_action(self) -> NumericAction {
        use ImageElement::*;
        match self {
            NumBytes => NumericAction::AddBytes,
            ModificationTime => NumericAction::FormatTimestamp,
            AccessTime | NsQuota | DsQuota | BlockSize | BlockId | GenerationStamp => {
                NumericAction::Discard
            }
            _ => NumericAction::AsText,
        }
    }

    /// Dispatch for textual payloads. `None` means the listing does not
    /// render this element and the value is ignored.
    pub fn text_field(self) -> Option<TextField> {
        use ImageElement::*;
        match self {
            InodePath => Some(TextField::Path),
            PermissionString => Some(TextField::Permissions),
            Replication => Some(TextField::Replication),
            UserName => Some(TextField::Owner),
            GroupName => Some(TextField::Group),
            NumBytes => Some(TextField::Bytes),
            ModificationTime => Some(TextField::ModificationTime),
            Symlink => Some(TextField::LinkTarget),
            InodeType => Some(TextField::InodeType),
            InodeHardlinkId => Some(TextField::HardlinkId),
            _ => None,
        }
    }

    /// Upper snake case schema name.
    pub fn name(self) -> &'static str {
        use ImageElement::*;
        match self {
            FsImage => "FS_IMAGE",
            ImageVersion => "IMAGE_VERSION",
            NamespaceId => "NAMESPACE_ID",
            IsCompressed => "IS_COMPRESSED",
            CompressCodec => "COMPRESS_CODEC",
            LayoutVersion => "LAYOUT_VERSION",
            NumInodes => "NUM_INODES",
            GenerationStamp => "GENERATION_STAMP",
            Inodes => "INODES",
            Inode => "INODE",
            InodePath => "INODE_PATH",
            Replication => "REPLICATION",
            ModificationTime => "MODIFICATION_TIME",
            AccessTime => "ACCESS_TIME",
            BlockSize => "BLOCK_SIZE",
            NumBlocks => "NUM_BLOCKS",
            Blocks => "BLOCKS",
            Block => "BLOCK",
            BlockId => "BLOCK_ID",
            NumBytes => "NUM_BYTES",
            NsQuota => "NS_QUOTA",
            DsQuota => "DS_QUOTA",
            Permissions => "PERMISSIONS",
            PermissionString => "PERMISSION_STRING",
            UserName => "USER_NAME",
            GroupName => "GROUP_NAME",
            Symlink => "SYMLINK",
            InodeType => "INODE_TYPE",
            InodeHardlinkId => "INODE_HARDLINK_ID",
            NumInodesUnderConstruction => "NUM_INODES_UNDER_CONSTRUCTION",
            InodesUnderConstruction => "INODES_UNDER_CONSTRUCTION",
            InodeUnderConstruction => "INODE_UNDER_CONSTRUCTION",
            PreferredBlockSize => "PREFERRED_BLOCK_SIZE",
            ClientName => "CLIENT_NAME",
            ClientMachine => "CLIENT_MACHINE",
            CurrentDelegationKeyId => "CURRENT_DELEGATION_KEY_ID",
            NumDelegationKeys => "NUM_DELEGATION_KEYS",
            DelegationKeys => "DELEGATION_KEYS",
            DelegationKey => "DELEGATION_KEY",
            DelegationKeyId => "DELEGATION_KEY_ID",
            DelegationKeyExpiryTime => "DELEGATION_KEY_EXPIRY_TIME",
            DelegationKeyLength => "DELEGATION_KEY_LENGTH",
            DelegationTokenSequenceNumber => "DELEGATION_TOKEN_SEQUENCE_NUMBER",
            NumDelegationTokens => "NUM_DELEGATION_TOKENS",
            DelegationTokens => "DELEGATION_TOKENS",
            DelegationTokenIdentifier => "DELEGATION_TOKEN_IDENTIFIER",
            DelegationTokenIdentifierKind => "DELEGATION_TOKEN_IDENTIFIER_KIND",
            DelegationTokenIdentifierSeqno => "DELEGATION_TOKEN_IDENTIFIER_SEQNO",
            DelegationTokenIdentifierOwner => "DELEGATION_TOKEN_IDENTIFIER_OWNER",
            DelegationTokenIdentifierRenewer => "DELEGATION_TOKEN_IDENTIFIER_RENEWER",
            DelegationTokenIdentifierRealuser => "DELEGATION_TOKEN_IDENTIFIER_REALUSER",
            DelegationTokenIdentifierIssueDate => "DELEGATION_TOKEN_IDENTIFIER_ISSUE_DATE",
            DelegationTokenIdentifierMaxDate => "DELEGATION_TOKEN_IDENTIFIER_MAX_DATE",
            DelegationTokenIdentifierExpiryTime => "DELEGATION_TOKEN_IDENTIFIER_EXPIRY_TIME",
            DelegationTokenIdentifierMasterKeyId => "DELEGATION_TOKEN_IDENTIFIER_MASTER_KEY_ID",
        }
    }
}

impl fmt::Display for ImageElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inode type markers as they appear in the `INODE_TYPE` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InodeKind {
    #[default]
    Regular,
    Hardlinked,
    Directory,
}

impl InodeKind {
    pub fn marker(self) -> &'static str {
        match self {
            InodeKind::Regular => "REGULAR_INODE",
            InodeKind::Hardlinked => "HARDLINKED_INODE",
            InodeKind::Directory => "DIRECTORY_INODE",
        }
    }
}

impl FromStr for InodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REGULAR_INODE" => Ok(InodeKind::Regular),
            "HARDLINKED_INODE" => Ok(InodeKind::Hardlinked),
            "DIRECTORY_INODE" => Ok(InodeKind::Directory),
            other => Err(format!("unknown inode type: {}", other)),
        }
    }
}

impl fmt::Display for InodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}
