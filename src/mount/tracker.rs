use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::mount::service::MountService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountKind {
    RemoteShare,
    OpticalDirect,
    LoopBacked,
}

#[derive(Debug, Clone)]
pub struct MountRecord {
    pub path: PathBuf,
    pub kind: MountKind,
    /// The tracker removes the mount-point directory after unmounting when
    /// the manager created it (per-image mount points under the media root).
    pub created_dir: bool,
}

#[derive(Debug, Clone)]
pub struct LoopDevice {
    pub device_path: PathBuf,
}

/// Summary of a cleanup sweep. The sweep itself never fails; callers decide
/// what to do with the failure list (log inspection, exit status is
/// unaffected).
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub unmounted: usize,
    pub detached: usize,
    pub failures: Vec<String>,
}

impl CleanupReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Records acquired mounts and loop devices in acquisition order and releases
/// them in reverse. Mount points drain fully before loop devices so a device
/// is never detached while still backing an active mount.
#[derive(Debug, Default)]
pub struct ResourceTracker {
    mounts: Vec<MountRecord>,
    loops: Vec<LoopDevice>,
}

impl ResourceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track_mount(&mut self, record: MountRecord) {
        self.mounts.push(record);
    }

    pub fn track_loop(&mut self, device: LoopDevice) {
        self.loops.push(device);
    }

    pub fn mounts(&self) -> &[MountRecord] {
        &self.mounts
    }

    pub fn loops(&self) -> &[LoopDevice] {
        &self.loops
    }

    /// Best-effort, total release: every tracked resource is attempted
    /// exactly once, failures are logged and collected, the sweep never
    /// stops early.
    pub fn release_all(&mut self, service: &dyn MountService) -> CleanupReport {
        let mut report = CleanupReport::default();
        for record in self.mounts.drain(..).rev() {
            match service.unmount(&record.path) {
                Ok(()) => {
                    info!("unmounted {}", record.path.display());
                    report.unmounted += 1;
                    if record.created_dir {
                        if let Err(e) = fs::remove_dir(&record.path) {
                            warn!("remove mount point {}: {}", record.path.display(), e);
                        }
                    }
                }
                Err(e) => {
                    warn!("unmount {}: {}", record.path.display(), e);
                    report
                        .failures
                        .push(format!("unmount {}: {}", record.path.display(), e));
                }
            }
        }
        for device in self.loops.drain(..).rev() {
            match service.detach_loop(&device.device_path) {
                Ok(()) => {
                    info!("detached loop device {}", device.device_path.display());
                    report.detached += 1;
                }
                Err(e) => {
                    warn!("detach {}: {}", device.device_path.display(), e);
                    report
                        .failures
                        .push(format!("detach {}: {}", device.device_path.display(), e));
                }
            }
        }
        report
    }
}
