use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use std::time::Duration;

use crate::landmarks::domain::frame::Frame;
use crate::landmarks::domain::landmark_provider::{LandmarkProvider, ProviderError};
use crate::shared::gesture::Timestamp;

/// Replays a recorded landmark stream, one JSON `Frame` per line.
///
/// Blank lines are skipped. A malformed line surfaces as a per-tick
/// `ProviderError::Parse` (or `Io` for invalid UTF-8) and the cursor moves
/// past it. End of input is `ProviderError::Exhausted`, and so is any other
/// read failure: the stream cannot make progress after one.
pub struct JsonlLandmarkProvider<R> {
    reader: R,
    line_number: usize,
    realtime: bool,
    last_timestamp: Option<Timestamp>,
    broken: bool,
}

impl JsonlLandmarkProvider<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, ProviderError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> JsonlLandmarkProvider<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            realtime: false,
            last_timestamp: None,
            broken: false,
        }
    }

    /// Sleep between frames so they are delivered at their recorded pace.
    pub fn with_realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    fn pace(&mut self, timestamp: Timestamp) {
        if self.realtime {
            if let Some(prev) = self.last_timestamp {
                let gap = timestamp.saturating_sub(prev);
                if gap > 0 {
                    std::thread::sleep(Duration::from_millis(gap));
                }
            }
        }
        self.last_timestamp = Some(timestamp);
    }
}

impl<R: BufRead + Send> LandmarkProvider for JsonlLandmarkProvider<R> {
    fn next_frame(&mut self) -> Result<Frame, ProviderError> {
        if self.broken {
            return Err(ProviderError::Exhausted);
        }

        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return Err(ProviderError::Exhausted),
                Ok(_) => self.line_number += 1,
                // The undecodable line was consumed; the next read resumes after it.
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    self.line_number += 1;
                    return Err(ProviderError::Io(e));
                }
                Err(e) => {
                    log::warn!("Landmark stream unreadable after line {}: {e}", self.line_number);
                    self.broken = true;
                    return Err(ProviderError::Exhausted);
                }
            }
            if !line.trim().is_empty() {
                break;
            }
        }

        let frame: Frame = serde_json::from_str(line.trim()).map_err(|source| ProviderError::Parse {
            line: self.line_number,
            source,
        })?;
        self.pace(frame.timestamp_ms());
        Ok(frame)
    }
}
