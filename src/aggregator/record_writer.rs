use std::io::{self, Write};

pub const FILE_START_MARKER: &str = "========== FILE START ==========";
pub const CODE_MARKER: &str = "========== CODE ==========";
pub const FILE_END_MARKER: &str = "========== FILE END ==========";

/// One source file, fully read, ready to be written as a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub relative_path: String,
    pub size: u64,
    pub content: String,
}

impl FileRecord {
    pub fn new(relative_path: impl Into<String>, size: u64, content: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            size,
            content: content.into(),
        }
    }

    /// Renders the block exactly as it appears in the snapshot, trailing blank
    /// lines included.
    pub fn render(&self) -> String {
        let mut block = String::with_capacity(self.content.len() + 160);
        block.push_str(FILE_START_MARKER);
        block.push('\n');
        block.push_str(&format!("File: {}\n", self.relative_path));
        block.push_str(&format!("Size: {} bytes\n", self.size));
        block.push_str(CODE_MARKER);
        block.push('\n');
        block.push_str(&self.content);
        block.push('\n');
        block.push_str(FILE_END_MARKER);
        block.push_str("\n\n\n");
        block
    }
}

/// Appends records to an output sink.
///
/// Each record is rendered in memory first and handed to the sink in a single
/// `write_all`, so a record never reaches the sink half-built.
pub struct RecordWriter<W: Write> {
    writer: W,
    records_written: usize,
    bytes_written: u64,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records_written: 0,
            bytes_written: 0,
        }
    }

    pub fn write_record(&mut self, record: &FileRecord) -> io::Result<()> {
        let block = record.render();
        self.writer.write_all(block.as_bytes())?;
        self.records_written += 1;
        self.bytes_written += block.len() as u64;
        Ok(())
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Bytes handed to the sink, markers included.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
