//! File-backed recorder
//!
//! Writes one line per event to the crawl log and echoes the same line to
//! stdout. The file write happens first and is flushed before the echo, so
//! nothing appears on screen that is not already durable.

use crate::output::traits::{LinkEvent, OutputError, OutputResult, Recorder};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use url::Url;

/// Recorder that appends line-oriented UTF-8 records to a log file
///
/// Writes are serialized through an internal lock, so a single recorder
/// can be shared by any number of callers without interleaving partial
/// lines.
#[derive(Debug)]
pub struct FileRecorder {
    file: Mutex<File>,
}

impl FileRecorder {
    /// Creates the log file, truncating any previous crawl's log
    ///
    /// This is the crawl's only fatal resource acquisition: without a log
    /// sink there is nothing to crawl into, so the caller aborts on error.
    pub fn create(path: &Path) -> OutputResult<Self> {
        let file = File::create(path).map_err(|source| OutputError::Open {
            path: path.display().to_string(),
            source,
        })?;

        Ok(Self {
            file: Mutex::new(file),
        })
    }

    fn append(&self, line: &str) -> OutputResult<()> {
        {
            let mut file = self.file.lock().unwrap();
            writeln!(file, "{}", line)?;
            file.flush()?;
        }

        println!("{}", line);
        Ok(())
    }
}

impl Recorder for FileRecorder {
    fn record_visit(&self, url: &Url) -> OutputResult<()> {
        self.append(&format!("Visited: {}", url))
    }

    fn record_link(&self, event: &LinkEvent) -> OutputResult<()> {
        self.append(&format!(
            "Link found on {}: {:?} -> {}",
            event.source,
            event.text,
            event.target()
        ))
    }

    fn record_failure(&self, url: &Url, cause: &str) -> OutputResult<()> {
        self.append(&format!("Fetch failed: {} ({})", url, cause))
    }
}
