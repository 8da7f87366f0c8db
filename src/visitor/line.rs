//! ls-style rendering of a completed inode record

use super::record::InodeRecord;

const WIDTH_REPLICATION: usize = 2;
const WIDTH_HARDLINK_ID: usize = 10;
const WIDTH_OWNER: usize = 8;
const WIDTH_GROUP: usize = 10;
const WIDTH_SIZE: usize = 10;
const WIDTH_MODIFICATION_TIME: usize = 10;

const DIRECTORY_GLYPH: char = 'd';
const HARDLINK_GLYPH: char = 'h';
const REGULAR_GLYPH: char = '-';

/// Shown in place of an unset replication ("0") or a hardlink id that
/// does not apply.
const PLACEHOLDER: &str = "-";

const SYMLINK_ARROW: &str = " -> ";

/// Leading type character. A negative block count wins over the inode type.
pub fn type_glyph(record: &InodeRecord) -> char {
    if record.is_directory() {
        DIRECTORY_GLYPH
    } else if record.is_hardlinked() {
        HARDLINK_GLYPH
    } else {
        REGULAR_GLYPH
    }
}

/// Append `text` right-justified to `width`, always preceded by at least
/// one space.
pub fn push_column(line: &mut String, text: &str, width: usize) {
    let filler = width.saturating_sub(text.chars().count());
    line.extend(std::iter::repeat_n(' ', filler + 1));
    line.push_str(text);
}

/// Render `record` into `line`, replacing whatever `line` held before.
/// The result ends with exactly one `\n`.
pub fn render_line(record: &InodeRecord, print_hardlink_id: bool, line: &mut String) {
    line.clear();

    let glyph = type_glyph(record);
    line.push(glyph);
    line.push_str(&record.permissions);

    let replication = if record.replication == "0" {
        PLACEHOLDER
    } else {
        record.replication.as_str()
    };
    push_column(line, replication, WIDTH_REPLICATION);

    if print_hardlink_id {
        let id = if glyph == HARDLINK_GLYPH {
            record.hardlink_id.as_str()
        } else {
            PLACEHOLDER
        };
        push_column(line, id, WIDTH_HARDLINK_ID);
    }

    push_column(line, &record.owner, WIDTH_OWNER);
    push_column(line, &record.group, WIDTH_GROUP);

    push_column(line, &record.size.to_string(), WIDTH_SIZE);

    push_column(line, &record.modification_time, WIDTH_MODIFICATION_TIME);

    push_column(line, &record.path, 0);
    if !record.link_target.is_empty() {
        line.push_str(SYMLINK_ARROW);
        line.push_str(&record.link_target);
    }

    line.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::InodeKind;

    fn sample() -> InodeRecord {
        InodeRecord {
            permissions: "rwxr-xr-x".to_string(),
            replication: "3".to_string(),
            owner: "alice".to_string(),
            group: "staff".to_string(),
            size: 4096,
            modification_time: "2024-01-01".to_string(),
            path: "/a/b".to_string(),
            ..Default::default()
        }
    }

    fn render(record: &InodeRecord, print_hardlink_id: bool) -> String {
        let mut line = String::new();
        render_line(record, print_hardlink_id, &mut line);
        line
    }

    #[test]
    fn test_regular_file_line() {
        assert_eq!(
            render(&sample(), false),
            "-rwxr-xr-x  3    alice      staff       4096 2024-01-01 /a/b\n"
        );
    }

    #[test]
    fn test_push_column_padding() {
        let mut line = String::new();
        push_column(&mut line, "ab", 5);
        assert_eq!(line, "    ab");

        line.clear();
        push_column(&mut line, "toolongvalue", 5);
        assert_eq!(line, " toolongvalue");

        line.clear();
        push_column(&mut line, "/p", 0);
        assert_eq!(line, " /p");
    }

    #[test]
    fn test_zero_replication_renders_dash() {
        let mut record = sample();
        record.replication = "0".to_string();
        assert!(render(&record, false).starts_with("-rwxr-xr-x  - "));
    }

    #[test]
    fn test_negative_blocks_win_over_type() {
        let mut record = sample();
        record.num_blocks = -1;
        record.inode_type = InodeKind::Hardlinked.marker().to_string();
        assert_eq!(type_glyph(&record), 'd');
        assert!(render(&record, false).starts_with("drwxr-xr-x"));
    }

    #[test]
    fn test_hardlinked_glyph() {
        let mut record = sample();
        record.inode_type = InodeKind::Hardlinked.marker().to_string();
        assert_eq!(type_glyph(&record), 'h');
    }

    #[test]
    fn test_symlink_suffix() {
        let mut record = sample();
        record.link_target = "/target".to_string();
        assert!(render(&record, false).ends_with(" /a/b -> /target\n"));
    }

    #[test]
    fn test_hardlink_id_column() {
        let mut record = sample();
        record.hardlink_id = "42".to_string();

        // regular inode: placeholder even if an id was stored
        assert_eq!(
            render(&record, true),
            "-rwxr-xr-x  3          -    alice      staff       4096 2024-01-01 /a/b\n"
        );

        record.inode_type = InodeKind::Hardlinked.marker().to_string();
        assert_eq!(
            render(&record, true),
            "hrwxr-xr-x  3         42    alice      staff       4096 2024-01-01 /a/b\n"
        );
    }

    #[test]
    fn test_render_clears_previous_content() {
        let mut line = String::from("stale content\n");
        render_line(&sample(), false, &mut line);
        assert!(line.starts_with("-rwx"));
        assert_eq!(line.matches('\n').count(), 1);
    }
}
