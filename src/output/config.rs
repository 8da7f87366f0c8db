//! Output configuration types

use std::path::PathBuf;

const DEFAULT_PART_SIZE: u64 = 64 * 1024 * 1024;

/// Configuration for where listing text goes.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Destination file. With more than one part, `_<index>` is appended
    pub output: Option<PathBuf>,
    /// Echo everything to stdout as well
    pub print_to_screen: bool,
    /// Maximum number of output files; the last one takes the remainder
    pub number_of_parts: usize,
    /// Bytes after which a new part is started
    pub part_size: u64,
}

impl WriterConfig {
    pub fn is_multi_part(&self) -> bool {
        self.number_of_parts > 1
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            output: None,
            print_to_screen: false,
            number_of_parts: 1,
            part_size: DEFAULT_PART_SIZE,
        }
    }
}
