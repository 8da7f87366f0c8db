//! CLI entry point for lsimage

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use lsimage::{
    EventReplay, LsVisitor, TextWriter, TimestampFormat, VisitorConfig, WriterConfig,
};

#[derive(Parser, Debug)]
#[command(name = "lsimage")]
#[command(about = "List the inodes of a namespace snapshot traversal in ls style")]
#[command(version)]
struct Args {
    /// Recorded traversal (JSON Lines); reads stdin when omitted
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Write the listing to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Also print the listing to stdout when writing to a file
    #[arg(short = 'p', long = "print-to-screen")]
    print_to_screen: bool,

    /// Split the output file into at most N parts (suffixes _0, _1, ...)
    #[arg(long = "parts", value_name = "N", default_value = "1", requires = "output")]
    parts: usize,

    /// Size at which a new part is started (default: 64M)
    /// Use suffixes: K, M, G (e.g., 512K)
    #[arg(long = "part-size", value_name = "SIZE", requires = "output")]
    part_size: Option<String>,

    /// Show the hardlink id column
    #[arg(long = "hardlink-id")]
    hardlink_id: bool,

    /// Render modification times in UTC instead of the local time zone
    #[arg(long = "utc")]
    utc: bool,
}

/// Parse a file size string like "5M", "100K", "1G" into bytes.
/// Supports suffixes: K/KB (1024), M/MB (1024^2), G/GB (1024^3)
/// Without suffix, interprets as bytes.
fn parse_file_size(s: &str) -> Result<u64, String> {
    let s = s.trim().to_uppercase();
    let (num_str, multiplier) = if let Some(n) = s.strip_suffix("GB") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('G') {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('K') {
        (n, 1024)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", num_str))?;

    num.checked_mul(multiplier)
        .filter(|&bytes| bytes > 0)
        .ok_or_else(|| format!("size out of range: {}", s))
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lsimage=warn")),
        )
        .init();
}

fn main() {
    init_logging();
    let args = Args::parse();

    let mut writer_config = WriterConfig {
        print_to_screen: args.print_to_screen || args.output.is_none(),
        output: args.output.clone(),
        number_of_parts: args.parts.max(1),
        ..Default::default()
    };
    if let Some(ref size_str) = args.part_size {
        match parse_file_size(size_str) {
            Ok(size) => writer_config.part_size = size,
            Err(e) => {
                eprintln!("lsimage: invalid --part-size '{}': {}", size_str, e);
                process::exit(1);
            }
        }
    }

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                eprintln!("lsimage: cannot open '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => Box::new(io::stdin().lock()),
    };

    let writer = match TextWriter::new(writer_config) {
        Ok(writer) => writer,
        Err(e) => {
            let target = args
                .output
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "stdout".to_string());
            eprintln!("lsimage: cannot create '{}': {}", target, e);
            process::exit(1);
        }
    };

    let timestamps = if args.utc {
        TimestampFormat::Utc
    } else {
        TimestampFormat::Local
    };
    let mut visitor = LsVisitor::new(
        writer,
        VisitorConfig {
            print_hardlink_id: args.hardlink_id,
        },
    )
    .with_timestamp_format(timestamps);

    match EventReplay::new(input).run(&mut visitor) {
        Ok(summary) => {
            tracing::info!(
                "replayed {} events, listed {} inodes",
                summary.events,
                visitor.lines_written()
            );
            if !summary.completed {
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("lsimage: {}", e);
            drop(visitor);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_size() {
        assert_eq!(parse_file_size("100"), Ok(100));
        assert_eq!(parse_file_size("4k"), Ok(4096));
        assert_eq!(parse_file_size(" 2MB "), Ok(2 * 1024 * 1024));
        assert_eq!(parse_file_size("1G"), Ok(1024 * 1024 * 1024));
        assert!(parse_file_size("abc").is_err());
        assert!(parse_file_size("0").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "lsimage",
            "-i",
            "events.jsonl",
            "-o",
            "out.txt",
            "--parts",
            "3",
            "--part-size",
            "1M",
            "--hardlink-id",
        ])
        .unwrap();
        assert_eq!(args.parts, 3);
        assert!(args.hardlink_id);
        assert!(!args.utc);
    }

    #[test]
    fn test_parts_require_output() {
        assert!(Args::try_parse_from(["lsimage", "--parts", "2"]).is_err());
    }
}
