use crate::CoreResult;

/// Outcome of reading a record file.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport<T> {
    pub records: Vec<T>,
    /// Lines that could not be turned into a record.
    pub skipped: usize,
    /// The backing file did not exist.
    pub missing: bool,
}

impl<T> LoadReport<T> {
    pub fn missing() -> Self {
        Self {
            records: Vec::new(),
            skipped: 0,
            missing: true,
        }
    }
}

/// Read side of a record store
pub trait RecordSource<T> {
    fn load(&self) -> CoreResult<LoadReport<T>>;
}

/// Write side of a record store. Every save replaces the stored set.
pub trait RecordSink<T> {
    fn save(&self, records: &[&T]) -> CoreResult<()>;
}
