// src/engine.rs
use anyhow::Context;
use log::info;
use serde_json::Value;
use std::path::PathBuf;

use crate::bencode::{bvalue_to_json, decode_document, encode_bvalue, BValue};
use crate::config::Config;
use crate::resume::{reset_uploads, Confirm, ResetOptions, ResumeEntry};
use crate::store::StateFile;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub interactive: bool,
    /// Compute the result but leave the state file and backup alone.
    pub dry_run: bool,
}

/// What a run did, in entry order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Reset { names: Vec<String>, backup: PathBuf },
    DryRun { names: Vec<String> },
    NothingToReset,
}

/// Reads the state file, resets every nonzero upload counter and, when
/// anything changed, writes a backup followed by the rewritten file.
///
/// The new contents are fully encoded before the first file is touched.
pub fn run(
    state: &StateFile,
    config: &Config,
    options: RunOptions,
    confirm: &mut dyn Confirm,
) -> anyhow::Result<RunOutcome> {
    info!("Using file: {}", state.path().display());

    let original = state.read()?;
    let mut document = decode_document(&original)
        .with_context(|| format!("Error decoding {}", state.path().display()))?;

    let reset_options = ResetOptions::from_config(config, options.interactive);
    let report = reset_uploads(&mut document, &reset_options, confirm)
        .with_context(|| format!("Error processing {}", state.path().display()))?;

    info!(
        "{} of {} entries need a reset",
        report.modified.len(),
        report.examined
    );

    if !report.changed() {
        return Ok(RunOutcome::NothingToReset);
    }

    let names = report.modified_names();
    if options.dry_run {
        return Ok(RunOutcome::DryRun { names });
    }

    let encoded = encode_bvalue(&document);
    let backup = state
        .write_with_backup(&original, &encoded)
        .with_context(|| format!("Error writing {}", state.path().display()))?;

    Ok(RunOutcome::Reset { names, backup })
}

/// JSON view of the state file with every sub-document decoded in place.
pub fn dump(state: &StateFile) -> anyhow::Result<Value> {
    let original = state.read()?;
    let mut document = decode_document(&original)
        .with_context(|| format!("Error decoding {}", state.path().display()))?;

    if let Some(entries) = document.as_dict_mut() {
        for (id, slot) in entries.iter_mut() {
            let entry = ResumeEntry::from_bvalue(id, slot)?;
            *slot = BValue::Dict(entry.fields);
        }
    }
    Ok(bvalue_to_json(&document))
}
