use log::{debug, warn};

use crate::bencode::BValue;
use crate::config::Config;
use crate::resume::{Confirm, ResetError, ResumeEntry, UploadCounter};
use crate::utils::format_gigabytes;

#[derive(Debug, Clone)]
pub struct ResetOptions {
    pub counter_field: Vec<u8>,
    pub name_field: Vec<u8>,
    /// Ask the `Confirm` implementation before each reset.
    pub interactive: bool,
}

impl Default for ResetOptions {
    fn default() -> Self {
        Self::from_config(&Config::default(), false)
    }
}

impl ResetOptions {
    pub fn from_config(config: &Config, interactive: bool) -> Self {
        Self {
            counter_field: config.counter_field.as_bytes().to_vec(),
            name_field: config.name_field.as_bytes().to_vec(),
            interactive,
        }
    }
}

/// One entry whose counter was zeroed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetEntry {
    pub id: String,
    pub name: String,
    pub previous: u128,
}

#[derive(Debug, Default, Clone)]
pub struct ResetReport {
    pub modified: Vec<ResetEntry>,
    pub examined: usize,
}

impl ResetReport {
    pub fn changed(&self) -> bool {
        !self.modified.is_empty()
    }

    pub fn modified_names(&self) -> Vec<String> {
        self.modified.iter().map(|e| e.name.clone()).collect()
    }
}

/// Zeroes the upload counter of every entry in a decoded state file.
///
/// Entries are visited in key order. Counters already at zero are skipped,
/// as are entries declined through `confirm` in interactive mode. Rewritten
/// entries keep their storage form, and fixed-width counters keep their width.
/// On error the document may be partially updated and must not be persisted.
pub fn reset_uploads(
    document: &mut BValue,
    options: &ResetOptions,
    confirm: &mut dyn Confirm,
) -> Result<ResetReport, ResetError> {
    let kind = document.kind();
    let entries = document
        .as_dict_mut()
        .ok_or(ResetError::NotADictionary(kind))?;

    let mut report = ResetReport::default();

    for (id, slot) in entries.iter_mut() {
        report.examined += 1;
        let mut entry = ResumeEntry::from_bvalue(id, slot)?;
        let name = entry.display_name(&options.name_field);
        let counter = entry.counter(&options.counter_field);

        if let UploadCounter::Unsupported(found) = &counter {
            warn!(
                "{} ({}): counter is a {}, leaving it alone",
                name,
                entry.id_hex(),
                found
            );
        }

        debug!(
            "{} ({}): {:?}, width {}",
            name,
            entry.id_hex(),
            counter,
            counter.width()
        );

        if counter.is_zero() {
            continue;
        }

        let replacement = match counter.zeroed() {
            Some(value) => value,
            None => continue,
        };

        if options.interactive && !confirm.ask(&name, &format_gigabytes(counter.as_u128())) {
            debug!("{} ({}): declined", name, entry.id_hex());
            continue;
        }

        entry.set_field(&options.counter_field, replacement);
        report.modified.push(ResetEntry {
            id: entry.id_hex(),
            name,
            previous: counter.as_u128(),
        });
        *slot = entry.into_bvalue();
    }

    Ok(report)
}
