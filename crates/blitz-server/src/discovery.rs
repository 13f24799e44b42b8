// File: src/discovery.rs
// Purpose: Walk a project root and build the route table from its files

use anyhow::{Context, Result};
use blitz_router::RouteTable;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::RoutingConfig;

/// Collects every file under `root` as a forward-slash path relative to it
///
/// Directories named in `ignore` are skipped entirely. Output is sorted by
/// file name per directory so discovery is deterministic.
pub fn collect_files(root: &Path, ignore: &[String]) -> Result<Vec<String>> {
    if !root.is_dir() {
        anyhow::bail!("Routing root is not a directory: {:?}", root);
    }

    let is_ignored = |entry: &DirEntry| {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| ignore.iter().any(|i| i == name))
    };

    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_ignored(e))
    {
        let entry = entry.with_context(|| format!("Failed to walk {:?}", root))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let Some(relative) = relative.to_str() else {
            warn!(path = ?entry.path(), "skipping non UTF-8 path");
            continue;
        };

        files.push(relative.replace('\\', "/"));
    }

    debug!(count = files.len(), "collected project files");
    Ok(files)
}

/// Discovers routes under the configured root and builds a validated table
pub fn discover(config: &RoutingConfig) -> Result<RouteTable> {
    let root = Path::new(&config.root);
    let files = collect_files(root, &config.ignore)?;

    let table = RouteTable::builder()
        .case_insensitive(config.case_insensitive)
        .files(&files)?
        .build()
        .with_context(|| format!("Invalid routes under {:?}", root))?;

    Ok(table)
}
