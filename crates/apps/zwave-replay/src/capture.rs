//! Reading and writing captured notification streams.
//!
//! Two layouts are supported: JSON lines (one record per line, blank lines
//! and `#` comments skipped) and concatenated MessagePack maps.

use std::io::{self, BufRead, BufReader, Cursor, Read, Write};
use std::path::Path;

use zwave_state::Notification;

#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum CaptureFormat {
    Json,
    Msgpack,
}

impl CaptureFormat {
    /// Guesses the layout from a file extension, defaulting to JSON lines.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("msgpack" | "mpk") => Self::Msgpack,
            _ => Self::Json,
        }
    }
}

pub fn read_capture<R: Read>(reader: R, format: CaptureFormat) -> io::Result<Vec<Notification>> {
    match format {
        CaptureFormat::Json => read_json_lines(reader),
        CaptureFormat::Msgpack => read_msgpack(reader),
    }
}

pub fn write_capture<W: Write>(
    mut writer: W,
    format: CaptureFormat,
    notifications: &[Notification],
) -> io::Result<()> {
    for notification in notifications {
        match format {
            CaptureFormat::Json => {
                serde_json::to_writer(&mut writer, notification)?;
                writer.write_all(b"\n")?;
            }
            CaptureFormat::Msgpack => {
                let bytes = rmp_serde::to_vec_named(notification)
                    .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
                writer.write_all(&bytes)?;
            }
        }
    }
    writer.flush()
}

fn read_json_lines<R: Read>(reader: R) -> io::Result<Vec<Notification>> {
    let mut notifications = Vec::new();
    for (line_no, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let notification = serde_json::from_str(trimmed).map_err(|err| {
            io::Error::new(io::ErrorKind::InvalidData, format!("line {}: {}", line_no + 1, err))
        })?;
        notifications.push(notification);
    }
    Ok(notifications)
}

fn read_msgpack<R: Read>(mut reader: R) -> io::Result<Vec<Notification>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    let mut cursor = Cursor::new(bytes.as_slice());
    let mut notifications = Vec::new();
    while (cursor.position() as usize) < bytes.len() {
        let offset = cursor.position();
        let notification = rmp_serde::from_read(&mut cursor).map_err(|err| {
            io::Error::new(io::ErrorKind::InvalidData, format!("offset {offset}: {err}"))
        })?;
        notifications.push(notification);
    }
    Ok(notifications)
}
