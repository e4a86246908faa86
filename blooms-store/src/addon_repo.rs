use std::path::PathBuf;
use tracing::{info, warn};
use blooms_catalog::{Addon, Availability};
use blooms_core::{CoreError, CoreResult, LoadReport, RecordSink, RecordSource};
use blooms_shared::Money;
use crate::flat_file::{FlatFile, LineDecoder, LineEncoder};

/// `code,name,price,status`; a line without status is Available.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddonCodec;

pub type AddonFile = FlatFile<AddonCodec>;

impl AddonFile {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        FlatFile::new(path, AddonCodec)
    }

    /// Load add-ons, writing out the default set when the file does not exist yet.
    ///
    /// The defaults are returned even if writing them fails; the write error comes
    /// back alongside so it can be reported.
    pub fn load_or_seed(&self) -> CoreResult<(LoadReport<Addon>, Option<CoreError>)> {
        let report = self.load()?;
        if !report.missing {
            return Ok((report, None));
        }

        let defaults = Addon::defaults();
        let refs: Vec<&Addon> = defaults.iter().collect();
        let seed_error = match self.save(&refs) {
            Ok(()) => {
                info!(path = %self.path().display(), count = defaults.len(), "Seeded default add-ons");
                None
            }
            Err(e) => {
                warn!(error = %e, "Could not write default add-ons");
                Some(e)
            }
        };

        let report = LoadReport {
            records: defaults,
            skipped: 0,
            missing: true,
        };
        Ok((report, seed_error))
    }
}

impl LineEncoder for AddonCodec {
    type Record = Addon;

    fn encode(&self, addon: &Addon) -> String {
        format!("{},{},{},{}", addon.code, addon.name, addon.price, addon.status)
    }
}

impl LineDecoder for AddonCodec {
    fn decode(&self, line: &str) -> Option<Addon> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let (code, name, price, status) = match fields.as_slice() {
            [code, name, price] => (*code, *name, *price, None),
            [code, name, price, status] => (*code, *name, *price, Some(*status)),
            _ => return None,
        };

        if code.is_empty() || name.is_empty() {
            return None;
        }
        let price = Money::parse(price).ok().filter(Money::is_positive)?;
        let status = match status {
            Some(status) => status.parse().ok()?,
            None => Availability::Available,
        };

        Some(Addon::new(code, name, price).with_status(status))
    }
}
