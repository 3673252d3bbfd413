//! Placement resolver: copies essential loader files from the cache onto
//! the device.
//!
//! Each rule lists the cache-relative locations an artifact may have been
//! extracted to, in preference order. The first candidate that exists wins
//! and is copied over the destination unconditionally, so re-running a
//! provision always re-syncs the device with the cache.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// One essential file and where it may be found in the cache.
#[derive(Debug)]
pub struct PlacementRule {
    /// Display name of the artifact file.
    pub name: &'static str,
    /// Cache-relative candidate source paths, tried in order.
    pub candidates: &'static [&'static str],
    /// Destination path relative to the device root.
    pub dest: &'static str,
}

/// Files the loader needs, with the extraction directories each release
/// archive is known to use.
pub const PLACEMENT_RULES: &[PlacementRule] = &[
    PlacementRule {
        name: "boot.firm",
        candidates: &["luma3ds/boot.firm", "Luma3DS/boot.firm"],
        dest: "boot.firm",
    },
    PlacementRule {
        name: "boot.3dsx",
        candidates: &["homebrew_launcher/boot.3dsx", "boot.3dsx/boot.3dsx"],
        dest: "boot.3dsx",
    },
    PlacementRule {
        name: "GodMode9.firm",
        candidates: &["godmode9/GodMode9.firm", "GodMode9/GodMode9.firm"],
        dest: "luma/payloads/GodMode9.firm",
    },
];

/// Outcome of one placement pass.
#[derive(Debug, Default)]
pub struct PlacementReport {
    /// Number of rules that found a source and were copied.
    pub placed: usize,
    /// Names of rules with no matching candidate in the cache.
    pub unmatched: Vec<String>,
}

/// Copy each rule's first existing candidate onto the device.
///
/// Rules are independent: a rule with no candidate present is recorded in
/// the report and does not abort the pass. Copy failures do abort, since
/// they indicate a device problem rather than a missing download.
pub fn place_essential_files(
    cache_root: &Path,
    device_root: &Path,
    rules: &[PlacementRule],
) -> Result<PlacementReport> {
    let mut report = PlacementReport::default();

    for rule in rules {
        match rule.candidates.iter().find_map(|candidate| {
            let source = cache_root.join(candidate);
            source.is_file().then_some(source)
        }) {
            Some(source) => {
                let dest = device_root.join(rule.dest);
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
                }
                fs::copy(&source, &dest).map_err(|e| Error::io(&dest, e))?;
                log::info!("Placed {} -> {}", rule.name, dest.display());
                report.placed += 1;
            }
            None => {
                log::warn!("{}", Error::MissingArtifact(rule.name.to_string()));
                report.unmatched.push(rule.name.to_string());
            }
        }
    }

    Ok(report)
}
