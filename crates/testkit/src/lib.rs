#![warn(missing_docs)]
//! Test and replay surfaces: a JSONL command log plus anchor fixtures.

mod fixtures;

use anyhow::Result;
use arplace_core::RouterCommand;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub use fixtures::*;

/// One applied command, as written to the command log.
#[derive(Debug, Serialize)]
pub struct CommandRecord<'a> {
    /// Frame the triggering host event arrived in.
    pub frame: u64,
    /// Label of the triggering host event.
    pub cause: &'a str,
    /// The command itself.
    pub command: &'a RouterCommand,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    writer: BufWriter<File>,
    written: usize,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    /// Append a record to the log.
    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush buffered records to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arplace_core::{AnchorId, AnchorRemoval, HapticCommand};

    #[test]
    fn jsonl_sink_writes_one_line_per_record() {
        let dir = std::env::temp_dir().join(format!("arplace-testkit-{}", std::process::id()));
        let path = dir.join("commands.jsonl");
        let haptic = RouterCommand::Haptic(HapticCommand::Vibrate);
        let removal = RouterCommand::RemoveAnchor(AnchorRemoval {
            anchor: AnchorId(4),
        });

        let mut sink = JsonlSink::create(&path).expect("sink create");
        for command in [&haptic, &removal] {
            sink.write(&CommandRecord {
                frame: 2,
                cause: "anchor_added",
                command,
            })
            .expect("write succeeds");
        }
        sink.flush().expect("flush succeeds");
        assert_eq!(sink.written(), 2);

        let contents = fs::read_to_string(&path).expect("file readable");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("vibrate"));
        assert!(lines[1].contains("remove_anchor"));
        let _ = fs::remove_dir_all(dir);
    }
}
