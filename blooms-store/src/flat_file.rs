use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use blooms_core::{CoreError, CoreResult, LoadReport, RecordSink, RecordSource};

/// Turns a record into one line of a record file (without the newline).
pub trait LineEncoder {
    type Record;

    fn encode(&self, record: &Self::Record) -> String;
}

/// Parses one trimmed, non-empty line. `None` marks the line as malformed.
pub trait LineDecoder: LineEncoder {
    fn decode(&self, line: &str) -> Option<Self::Record>;
}

/// A text file holding one record per line
#[derive(Debug, Clone)]
pub struct FlatFile<C> {
    path: PathBuf,
    codec: C,
}

impl<C> FlatFile<C> {
    pub fn new(path: impl Into<PathBuf>, codec: C) -> Self {
        Self {
            path: path.into(),
            codec,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<C: LineEncoder> RecordSink<C::Record> for FlatFile<C> {
    fn save(&self, records: &[&C::Record]) -> CoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| CoreError::io(parent, e))?;
        }

        let mut contents = String::new();
        for record in records {
            contents.push_str(&self.codec.encode(record));
            contents.push('\n');
        }

        fs::write(&self.path, contents).map_err(|e| CoreError::io(&self.path, e))?;
        debug!(path = %self.path.display(), count = records.len(), "Records saved");
        Ok(())
    }
}

impl<C: LineDecoder> RecordSource<C::Record> for FlatFile<C> {
    fn load(&self) -> CoreResult<LoadReport<C::Record>> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Record file missing");
                return Ok(LoadReport::missing());
            }
            Err(e) => return Err(CoreError::io(&self.path, e)),
        };

        let mut records = Vec::new();
        let mut skipped = 0;
        for (index, raw) in contents.split(|byte| *byte == b'\n').enumerate() {
            // A line that is not UTF-8 is malformed like any other.
            let line = std::str::from_utf8(raw).map(str::trim);
            if matches!(line, Ok("")) {
                continue;
            }
            match line.ok().and_then(|line| self.codec.decode(line)) {
                Some(record) => records.push(record),
                None => {
                    skipped += 1;
                    warn!(path = %self.path.display(), line = index + 1, "Skipping malformed record");
                }
            }
        }

        Ok(LoadReport {
            records,
            skipped,
            missing: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Lines of the form `word:number`
    struct PairCodec;

    impl LineEncoder for PairCodec {
        type Record = (String, u32);

        fn encode(&self, record: &Self::Record) -> String {
            format!("{}:{}", record.0, record.1)
        }
    }

    impl LineDecoder for PairCodec {
        fn decode(&self, line: &str) -> Option<Self::Record> {
            let (word, number) = line.split_once(':')?;
            Some((word.to_string(), number.parse().ok()?))
        }
    }

    #[test]
    fn test_missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let file = FlatFile::new(dir.path().join("nothing.txt"), PairCodec);

        let report = file.load().unwrap();
        assert!(report.missing);
        assert!(report.records.is_empty());
    }

    #[test]
    fn test_blank_and_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pairs.txt");
        fs::write(&path, "a:1\n\n   \nbroken\nb:x\n  c:3  \n").unwrap();

        let report = FlatFile::new(&path, PairCodec).load().unwrap();
        assert!(!report.missing);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.records, vec![("a".to_string(), 1), ("c".to_string(), 3)]);
    }

    #[test]
    fn test_undecodable_line_only_loses_itself() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pairs.txt");
        fs::write(&path, b"a:1\r\nb\xff:2\nc:3".as_slice()).unwrap();

        let report = FlatFile::new(&path, PairCodec).load().unwrap();
        assert_eq!(report.skipped, 1);
        assert_eq!(report.records, vec![("a".to_string(), 1), ("c".to_string(), 3)]);
    }

    #[test]
    fn test_save_rewrites_and_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = FlatFile::new(dir.path().join("nested").join("pairs.txt"), PairCodec);

        let first = ("x".to_string(), 1);
        let second = ("y".to_string(), 2);
        file.save(&[&first, &second]).unwrap();
        file.save(&[&second]).unwrap();

        assert_eq!(fs::read_to_string(file.path()).unwrap(), "y:2\n");
    }
}
