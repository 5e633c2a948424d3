//! Discovery of `.vue` files and bridging them from disk.
//!
//! Directories are scanned recursively; components are bridged in parallel
//! and keyed by path so the output order does not depend on scheduling.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::config::BridgeOptions;
use crate::{bridge_with_options, BridgeOutput};

// ═══════════════════════════════════════════════════════════════════════════════
// FILE DISCOVERY
// ═══════════════════════════════════════════════════════════════════════════════

/// Recursively find all .vue files in a directory, sorted.
pub fn find_vue_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "vue"))
        .collect();
    files.sort();
    files
}

// ═══════════════════════════════════════════════════════════════════════════════
// BRIDGING FROM DISK
// ═══════════════════════════════════════════════════════════════════════════════

pub fn bridge_file(path: &Path, options: &BridgeOptions) -> anyhow::Result<Vec<BridgeOutput>> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    bridge_with_options(&source, options)
        .with_context(|| format!("Error processing file {}", path.display()))
}

/// Bridges every component under `dir`. The first failing file aborts the run.
pub fn bridge_dir(
    dir: &Path,
    options: &BridgeOptions,
) -> anyhow::Result<BTreeMap<String, Vec<BridgeOutput>>> {
    let files = find_vue_files(dir);
    tracing::debug!(dir = %dir.display(), files = files.len(), "discovered components");

    files
        .par_iter()
        .map(|path| -> anyhow::Result<(String, Vec<BridgeOutput>)> {
            let outputs = bridge_file(path, options)?;
            Ok((path.to_string_lossy().into_owned(), outputs))
        })
        .collect()
}
