//! LsVisitor - renders one ls-style line per inode of a snapshot traversal

use crate::element::{ImageElement, NumericAction};
use crate::error::{Error, Result};
use crate::output::ListingSink;
use crate::timestamp::TimestampFormat;

use super::config::VisitorConfig;
use super::image_visitor::ImageVisitor;
use super::line::render_line;
use super::record::InodeRecord;
use super::scope::ScopeStack;

/// Printed to stderr when the traversal ends before the snapshot does.
pub const INPUT_ENDED_NOTICE: &str = "Input ended unexpectedly.";

/// Listing visitor.
///
/// Entries are emitted in traversal order; the listing cannot be sorted
/// because each line is written as soon as its inode scope closes.
pub struct LsVisitor<S: ListingSink> {
    sink: S,
    config: VisitorConfig,
    timestamps: TimestampFormat,
    scopes: ScopeStack,
    record: InodeRecord,
    in_inode: bool,
    line: String,
    lines_written: u64,
}

impl<S: ListingSink> LsVisitor<S> {
    pub fn new(sink: S, config: VisitorConfig) -> Self {
        Self {
            sink,
            config,
            timestamps: TimestampFormat::default(),
            scopes: ScopeStack::new(),
            record: InodeRecord::default(),
            in_inode: false,
            line: String::new(),
            lines_written: 0,
        }
    }

    /// Set the time zone used for numeric modification times.
    pub fn with_timestamp_format(mut self, timestamps: TimestampFormat) -> Self {
        self.timestamps = timestamps;
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Number of inode lines handed to the sink so far.
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    fn open_scope(&mut self, element: ImageElement) {
        self.scopes.push(element);
        if element == ImageElement::Inode {
            self.record.reset();
            self.in_inode = true;
        }
    }

    fn print_line(&mut self) -> Result<()> {
        render_line(&self.record, self.config.print_hardlink_id, &mut self.line);
        self.sink.write(&self.line)?;
        self.lines_written += 1;
        tracing::trace!(path = %self.record.path, "listed inode");
        Ok(())
    }
}

impl<S: ListingSink> ImageVisitor for LsVisitor<S> {
    fn start(&mut self) -> Result<()> {
        Ok(())
    }

    fn enter_scope(&mut self, element: ImageElement) -> Result<()> {
        self.open_scope(element);
        Ok(())
    }

    fn enter_scope_counted(
        &mut self,
        element: ImageElement,
        _key: ImageElement,
        count: i64,
    ) -> Result<()> {
        self.open_scope(element);
        if element == ImageElement::Blocks {
            self.record.num_blocks = count;
        }
        Ok(())
    }

    fn enter_scope_counted_text(
        &mut self,
        element: ImageElement,
        key: ImageElement,
        count: &str,
    ) -> Result<()> {
        self.open_scope(element);
        if element == ImageElement::Blocks {
            self.record.num_blocks = count
                .parse()
                .map_err(|e| Error::invalid_number(key, count, e))?;
        }
        Ok(())
    }

    fn leave_scope(&mut self) -> Result<()> {
        if self.scopes.pop()? == ImageElement::Inode {
            self.in_inode = false;
            self.print_line()?;
            self.sink.roll_if_needed()?;
        }
        Ok(())
    }

    fn visit_number(&mut self, element: ImageElement, value: i64) -> Result<()> {
        if !self.in_inode {
            return Ok(());
        }
        match element.numeric_action() {
            NumericAction::AddBytes => {
                let bytes =
                    u64::try_from(value).map_err(|e| Error::invalid_number(element, value.to_string(), e))?;
                self.record.add_bytes(element, bytes)
            }
            NumericAction::FormatTimestamp => {
                let text = self.timestamps.format(value);
                self.visit_text(element, &text)
            }
            NumericAction::Discard => Ok(()),
            NumericAction::AsText => self.visit_text(element, &value.to_string()),
        }
    }

    fn visit_text(&mut self, element: ImageElement, value: &str) -> Result<()> {
        if !self.in_inode {
            return Ok(());
        }
        match element.text_field() {
            Some(field) => self.record.apply_text(element, field, value),
            None => Ok(()),
        }
    }

    fn finish(&mut self) -> Result<()> {
        tracing::debug!("listing finished: {} inodes", self.lines_written);
        self.sink.finish()?;
        Ok(())
    }

    fn finish_abnormally(&mut self) -> Result<()> {
        eprintln!("{}", INPUT_ENDED_NOTICE);
        tracing::debug!(
            "listing ended abnormally after {} inodes at depth {}",
            self.lines_written,
            self.scopes.depth()
        );
        self.sink.finish_abnormally()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{InodeSpec, MemorySink, play_image};

    fn visitor(print_hardlink_id: bool) -> LsVisitor<MemorySink> {
        LsVisitor::new(MemorySink::new(), VisitorConfig { print_hardlink_id })
            .with_timestamp_format(TimestampFormat::Utc)
    }

    #[test]
    fn test_one_line_per_inode_in_traversal_order() {
        let mut v = visitor(false);
        let inodes = [
            InodeSpec::directory("/"),
            InodeSpec::file("/z", &[10]),
            InodeSpec::file("/a", &[20]),
            InodeSpec::directory("/m"),
        ];
        play_image(&mut v, &inodes).unwrap();

        let lines = v.sink().lines();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with(" /"));
        assert!(lines[1].ends_with(" /z"));
        assert!(lines[2].ends_with(" /a"));
        assert!(lines[3].ends_with(" /m"));
        assert_eq!(v.lines_written(), 4);
        assert_eq!(v.sink().rolls, 4);
        assert!(v.sink().finished);
    }

    #[test]
    fn test_block_sizes_are_summed() {
        let mut v = visitor(false);
        play_image(&mut v, &[InodeSpec::file("/f", &[5, 7, 3])]).unwrap();

        let lines = v.sink().lines();
        let line = lines[0];
        assert!(line.contains("         15 "), "{}", line);
    }

    #[test]
    fn test_rendered_fields() {
        let mut v = visitor(false);
        let inode = InodeSpec::file("/a/b", &[4096])
            .with_owner("alice", "staff")
            .with_modification_time(1_704_067_200_000);
        play_image(&mut v, &[inode]).unwrap();

        assert_eq!(
            v.sink().output,
            "-rw-r--r--  3    alice      staff       4096 2024-01-01 00:00 /a/b\n"
        );
    }

    #[test]
    fn test_directory_from_negative_block_count() {
        let mut v = visitor(false);
        let dir = InodeSpec::directory("/d").with_inode_type("HARDLINKED_INODE");
        play_image(&mut v, &[dir]).unwrap();

        let lines = v.sink().lines();
        let line = lines[0];
        assert!(line.starts_with("drwxr-xr-x  - "), "{}", line);
    }

    #[test]
    fn test_symlink_and_root_path() {
        let mut v = visitor(false);
        let inodes = [
            InodeSpec::directory(""),
            InodeSpec::file("/link", &[]).with_symlink("/target"),
        ];
        play_image(&mut v, &inodes).unwrap();

        let lines = v.sink().lines();
        assert!(lines[0].ends_with(" /"), "{}", lines[0]);
        assert!(lines[1].ends_with(" /link -> /target"), "{}", lines[1]);
    }

    #[test]
    fn test_hardlink_id_column() {
        let mut v = visitor(true);
        let inodes = [
            InodeSpec::file("/plain", &[1]),
            InodeSpec::file("/linked", &[1]).with_hardlink_id("77"),
        ];
        play_image(&mut v, &inodes).unwrap();

        let lines = v.sink().lines();
        assert!(lines[0].starts_with("-rw-r--r--  3          - "), "{}", lines[0]);
        assert!(lines[1].starts_with("hrw-r--r--  3         77 "), "{}", lines[1]);
    }

    #[test]
    fn test_textual_values_and_counts() {
        let mut v = visitor(false);
        v.enter_scope(ImageElement::Inode).unwrap();
        v.visit_text(ImageElement::InodePath, "/t").unwrap();
        v.visit_text(ImageElement::Replication, "2").unwrap();
        v.visit_text(ImageElement::ModificationTime, "yesterday").unwrap();
        v.enter_scope_counted_text(ImageElement::Blocks, ImageElement::NumBlocks, "2")
            .unwrap();
        v.visit_text(ImageElement::NumBytes, "100").unwrap();
        v.visit_number(ImageElement::NumBytes, 50).unwrap();
        v.leave_scope().unwrap();
        v.leave_scope().unwrap();

        let lines = v.sink().lines();
        let line = lines[0];
        assert!(line.starts_with("-  2 "), "{}", line);
        assert!(line.contains("        150  yesterday /t"), "{}", line);
    }

    #[test]
    fn test_values_outside_inode_are_ignored() {
        let mut v = visitor(false);
        v.enter_scope(ImageElement::FsImage).unwrap();
        v.visit_number(ImageElement::NumBytes, -5).unwrap();
        v.visit_text(ImageElement::NumBytes, "not a number").unwrap();
        v.leave_scope().unwrap();
        assert!(v.sink().output.is_empty());
    }

    #[test]
    fn test_discarded_numeric_elements() {
        let mut v = visitor(false);
        v.enter_scope(ImageElement::Inode).unwrap();
        v.visit_number(ImageElement::AccessTime, 1).unwrap();
        v.visit_number(ImageElement::BlockId, -9).unwrap();
        v.visit_number(ImageElement::NsQuota, -1).unwrap();
        v.visit_number(ImageElement::ClientName, 12).unwrap();
        v.leave_scope().unwrap();

        assert_eq!(
            v.sink().lines()[0],
            format!("-{}0{}", " ".repeat(33), " ".repeat(12))
        );
    }

    #[test]
    fn test_leave_without_scope_is_underflow() {
        let mut v = visitor(false);
        assert!(matches!(v.leave_scope(), Err(Error::ScopeUnderflow)));
        assert!(v.sink().output.is_empty());
        assert_eq!(v.sink().rolls, 0);
    }

    #[test]
    fn test_malformed_numbers_propagate() {
        let mut v = visitor(false);
        v.enter_scope(ImageElement::Inode).unwrap();
        assert!(matches!(
            v.visit_text(ImageElement::NumBytes, "12kb"),
            Err(Error::InvalidNumber { .. })
        ));
        assert!(matches!(
            v.visit_number(ImageElement::NumBytes, -1),
            Err(Error::InvalidNumber { .. })
        ));
        assert!(matches!(
            v.enter_scope_counted_text(ImageElement::Blocks, ImageElement::NumBlocks, "many"),
            Err(Error::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_each_inode_starts_fresh() {
        let mut v = visitor(false);
        let inodes = [
            InodeSpec::file("/first", &[9]).with_symlink("/elsewhere"),
            InodeSpec::file("/second", &[1]),
        ];
        play_image(&mut v, &inodes).unwrap();

        let lines = v.sink().lines();
        assert!(lines[1].ends_with(" /second"), "{}", lines[1]);
        assert!(lines[1].contains("          1 "), "{}", lines[1]);
    }

    #[test]
    fn test_finish_abnormally_delegates_to_sink() {
        let mut v = visitor(false);
        v.enter_scope(ImageElement::Inode).unwrap();
        v.finish_abnormally().unwrap();
        assert!(v.sink().finished_abnormally);
        assert!(!v.sink().finished);
        assert!(v.sink().output.is_empty());
    }

    #[test]
    fn test_sink_write_failure_propagates() {
        let mut sink = MemorySink::new();
        sink.fail_writes = true;
        let mut v = LsVisitor::new(sink, VisitorConfig::default());
        v.enter_scope(ImageElement::Inode).unwrap();
        assert!(matches!(v.leave_scope(), Err(Error::Io(_))));
        assert_eq!(v.sink().rolls, 0);
    }
}
