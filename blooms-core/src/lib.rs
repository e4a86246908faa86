pub mod clock;
pub mod repository;

pub use clock::{Clock, FixedClock, SystemClock};
pub use repository::{LoadReport, RecordSink, RecordSource};

use std::path::PathBuf;

/// Storage-level failures shared by the record files
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
