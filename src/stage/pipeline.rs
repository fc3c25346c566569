use std::fs;
use std::path::Path;

use tracing::{error, info, warn};

use crate::config::Settings;
use crate::error::Result;
use crate::inventory::{read_inventory, InventoryEntry};
use crate::mount::{MountManager, MountService, ResourceTracker};
use crate::stage::copy::FileCopier;
use crate::stage::discover::{discover_flat, discover_pattern};

/// What happened to one inventory row. Skips are data rather than errors so
/// the continue-on-failure policy is visible to callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Staged { staged: usize, failed: usize },
    NoMatches,
}

/// Aggregate of all rows of a run, for the end-of-run log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageSummary {
    pub rows: usize,
    pub rows_without_matches: usize,
    pub staged: usize,
    pub failed_copies: usize,
}

pub struct StagingPipeline<'a> {
    settings: &'a Settings,
    copier: &'a dyn FileCopier,
}

impl<'a> StagingPipeline<'a> {
    pub fn new(settings: &'a Settings, copier: &'a dyn FileCopier) -> Self {
        Self { settings, copier }
    }

    /// Processes rows strictly in inventory order so the log reads as an
    /// audit trail of what was attempted per row.
    pub fn process_inventory(&self, entries: &[InventoryEntry]) -> Result<StageSummary> {
        let mut summary = StageSummary::default();
        for entry in entries {
            summary.rows += 1;
            match self.process_entry(entry)? {
                RowOutcome::Staged { staged, failed } => {
                    summary.staged += staged;
                    summary.failed_copies += failed;
                }
                RowOutcome::NoMatches => summary.rows_without_matches += 1,
            }
        }
        Ok(summary)
    }

    pub fn process_entry(&self, entry: &InventoryEntry) -> Result<RowOutcome> {
        let full_target = self.settings.unpack_root.join(&entry.target_dir);
        fs::create_dir_all(&full_target)?;

        let found = match entry.pattern.as_deref() {
            Some(pattern) => {
                discover_pattern(&self.settings.media_mount_root, pattern, &entry.mask)?
            }
            None => discover_flat(&self.settings.backup_mount, &entry.mask)?,
        };

        if found.is_empty() {
            warn!(
                "no files found for pattern {}*/{}",
                entry.pattern.as_deref().unwrap_or(""),
                entry.mask
            );
            return Ok(RowOutcome::NoMatches);
        }

        let mut staged = 0;
        let mut failed = 0;
        for source in &found {
            match self.copier.copy(source, &full_target) {
                Ok(()) => {
                    info!("copied {} to {}", source.display(), full_target.display());
                    staged += 1;
                }
                Err(e) => {
                    error!("failed to copy {}: {}", source.display(), e);
                    failed += 1;
                }
            }
        }
        Ok(RowOutcome::Staged { staged, failed })
    }
}

/// Full run: mount both shares (fatal on failure), mount whatever media
/// images the ISO share holds, stage the inventory, and always release every
/// tracked resource before the result propagates.
pub fn run_stage(
    service: &dyn MountService,
    copier: &dyn FileCopier,
    settings: &Settings,
    inventory_path: &Path,
) -> Result<()> {
    let mut tracker = ResourceTracker::new();
    let result = stage_tracked(service, copier, settings, inventory_path, &mut tracker);
    let report = tracker.release_all(service);
    if !report.is_clean() {
        warn!(
            "cleanup finished with {} failure(s); see log for details",
            report.failures.len()
        );
    }
    result
}

fn stage_tracked(
    service: &dyn MountService,
    copier: &dyn FileCopier,
    settings: &Settings,
    inventory_path: &Path,
    tracker: &mut ResourceTracker,
) -> Result<()> {
    let manager = MountManager::new(service, settings.media_mount_root.clone());
    manager.mount_remote_share(tracker, &settings.iso_share, &settings.iso_mount)?;
    manager.mount_remote_share(tracker, &settings.backup_share, &settings.backup_mount)?;

    match manager.mount_all_images(tracker, &settings.iso_mount) {
        Ok(mounted) => info!("{} media image(s) available", mounted),
        Err(e) => warn!("scan {}: {}", settings.iso_mount.display(), e),
    }

    let entries = read_inventory(inventory_path)?;
    info!(
        "processing {} inventory row(s) from {}",
        entries.len(),
        inventory_path.display()
    );
    let pipeline = StagingPipeline::new(settings, copier);
    let summary = pipeline.process_inventory(&entries)?;
    info!(
        "staged {} file(s) across {} row(s); {} row(s) without matches, {} failed cop{}",
        summary.staged,
        summary.rows,
        summary.rows_without_matches,
        summary.failed_copies,
        if summary.failed_copies == 1 { "y" } else { "ies" }
    );
    Ok(())
}
