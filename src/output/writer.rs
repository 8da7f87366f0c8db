//! TextWriter - writes listing text to files and/or stdout, split into parts

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::config::WriterConfig;
use super::sink::ListingSink;

/// File name of part `index`. A single-part output uses `path` verbatim.
pub fn part_path(path: &Path, index: usize, number_of_parts: usize) -> PathBuf {
    if number_of_parts <= 1 {
        return path.to_path_buf();
    }
    let mut name = OsString::from(path.as_os_str());
    name.push(format!("_{}", index));
    PathBuf::from(name)
}

/// Sink writing to an optional file destination and optionally stdout.
///
/// With `number_of_parts > 1`, a new file is started once the current one
/// holds at least `part_size` bytes; the final part is never rolled.
pub struct TextWriter {
    config: WriterConfig,
    file: Option<BufWriter<File>>,
    screen: Option<io::Stdout>,
    part: usize,
    part_bytes: u64,
    finished: bool,
}

impl TextWriter {
    /// Open the first part. Existing files are truncated.
    pub fn new(config: WriterConfig) -> io::Result<Self> {
        let file = match &config.output {
            Some(path) => Some(open_part(path, 0, config.number_of_parts)?),
            None => None,
        };
        let screen = config.print_to_screen.then(io::stdout);
        Ok(Self {
            config,
            file,
            screen,
            part: 0,
            part_bytes: 0,
            finished: false,
        })
    }

    /// Index of the part currently written to.
    pub fn current_part(&self) -> usize {
        self.part
    }

    /// Paths of every part opened so far.
    pub fn part_paths(&self) -> Vec<PathBuf> {
        match &self.config.output {
            Some(path) => (0..=self.part)
                .map(|i| part_path(path, i, self.config.number_of_parts))
                .collect(),
            None => Vec::new(),
        }
    }

    fn close(&mut self) -> io::Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }
        if let Some(screen) = self.screen.as_mut() {
            screen.flush()?;
        }
        self.finished = true;
        Ok(())
    }
}

fn open_part(path: &Path, index: usize, number_of_parts: usize) -> io::Result<BufWriter<File>> {
    let path = part_path(path, index, number_of_parts);
    tracing::debug!("opening listing part {}", path.display());
    Ok(BufWriter::new(File::create(path)?))
}

impl ListingSink for TextWriter {
    fn write(&mut self, text: &str) -> io::Result<()> {
        if self.finished {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "listing output already finished",
            ));
        }
        if let Some(file) = self.file.as_mut() {
            file.write_all(text.as_bytes())?;
            self.part_bytes += text.len() as u64;
        }
        if let Some(screen) = self.screen.as_mut() {
            screen.write_all(text.as_bytes())?;
        }
        Ok(())
    }

    fn roll_if_needed(&mut self) -> io::Result<()> {
        if self.finished || !self.config.is_multi_part() {
            return Ok(());
        }
        if self.part_bytes < self.config.part_size || self.part + 1 >= self.config.number_of_parts {
            return Ok(());
        }
        let Some(path) = self.config.output.clone() else {
            return Ok(());
        };

        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }
        self.part += 1;
        self.part_bytes = 0;
        self.file = Some(open_part(&path, self.part, self.config.number_of_parts)?);
        tracing::debug!("rolled listing output to part {}", self.part);
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        if self.finished {
            return Ok(());
        }
        tracing::debug!("closing listing output after {} parts", self.part + 1);
        self.close()
    }

    fn finish_abnormally(&mut self) -> io::Result<()> {
        if self.finished {
            return Ok(());
        }
        tracing::debug!("closing truncated listing output in part {}", self.part);
        self.close()
    }
}
