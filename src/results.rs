//! Append-only log of found keys
//!
//! One line per match: `<hex> - <bitstring> -> <address>`.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::search::{LoopIndex, Match};

/// A persisted match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundRecord {
    /// Private key, lowercase hex without `0x`
    pub private_key_hex: String,
    /// Working bit string at the time of the match
    pub fingerprint: String,
    pub address: String,
    pub index: LoopIndex,
    pub tick: u64,
}

impl FoundRecord {
    pub fn from_match(found: &Match, tick: u64) -> Self {
        Self {
            private_key_hex: found.key.to_string(),
            fingerprint: found.working.to_string(),
            address: found.address.clone(),
            index: found.index,
            tick,
        }
    }
}

impl fmt::Display for FoundRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} -> {}",
            self.private_key_hex, self.fingerprint, self.address
        )
    }
}

/// Writer that can force appended bytes to stable storage
pub trait Durable: Write {
    fn sync(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Durable for File {
    fn sync(&mut self) -> io::Result<()> {
        self.sync_data()
    }
}

impl Durable for Vec<u8> {}

/// Append-only sink for found records
pub struct ResultLog<W: Durable> {
    sink: W,
    written: usize,
}

impl ResultLog<File> {
    /// Open (or create) a log file for appending
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        log::info!("Result log: {}", path.display());
        Ok(Self::new(file))
    }
}

impl<W: Durable> ResultLog<W> {
    pub fn new(sink: W) -> Self {
        Self { sink, written: 0 }
    }

    /// Append one record and sync it to storage
    pub fn append(&mut self, record: &FoundRecord) -> Result<()> {
        writeln!(self.sink, "{record}")?;
        self.sink.flush()?;
        self.sink.sync()?;
        self.written += 1;
        Ok(())
    }

    /// Records appended through this handle
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{BitString, CandidateKey};

    fn record() -> FoundRecord {
        let found = Match {
            key: CandidateKey::from_hex_body("ab"),
            index: LoopIndex::default(),
            working: "10101011".parse::<BitString>().unwrap(),
            address: "1Target".to_string(),
        };
        FoundRecord::from_match(&found, 7)
    }

    #[test]
    fn test_line_format() {
        let mut log = ResultLog::new(Vec::new());
        log.append(&record()).unwrap();
        assert_eq!(log.written(), 1);
        let text = String::from_utf8(log.into_inner()).unwrap();
        assert_eq!(text, "1ab - 10101011 -> 1Target\n");
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Durable for BrokenSink {}

    #[test]
    fn test_write_failure_propagates() {
        let mut log = ResultLog::new(BrokenSink);
        assert!(matches!(log.append(&record()), Err(crate::Error::Io(_))));
        assert_eq!(log.written(), 0);
    }

    #[test]
    fn test_file_appends() {
        let path = std::env::temp_dir().join(format!("ballkey-results-{}.txt", std::process::id()));
        let _ = std::fs::remove_file(&path);

        ResultLog::open(&path).unwrap().append(&record()).unwrap();
        ResultLog::open(&path).unwrap().append(&record()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        std::fs::remove_file(&path).unwrap();
    }
}
