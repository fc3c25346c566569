use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::error::Result;
use crate::mount::service::MountService;
use crate::mount::tracker::{LoopDevice, MountKind, MountRecord, ResourceTracker};

/// Outcome of a single image mount attempt. Failures are data, not errors:
/// a skipped image must never stop the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageMount {
    Mounted(PathBuf),
    AlreadyMounted(PathBuf),
    Skipped(String),
}

pub struct MountManager<'a> {
    service: &'a dyn MountService,
    media_mount_root: PathBuf,
}

impl<'a> MountManager<'a> {
    pub fn new(service: &'a dyn MountService, media_mount_root: PathBuf) -> Self {
        Self {
            service,
            media_mount_root,
        }
    }

    /// Mounts a CIFS share. The pipeline cannot proceed without its source
    /// and backup shares, so failure here propagates.
    pub fn mount_remote_share(
        &self,
        tracker: &mut ResourceTracker,
        share: &str,
        mountpoint: &Path,
    ) -> Result<()> {
        self.service.mount_remote(share, mountpoint)?;
        tracker.track_mount(MountRecord {
            path: mountpoint.to_path_buf(),
            kind: MountKind::RemoteShare,
            created_dir: false,
        });
        info!("mounted {} at {}", share, mountpoint.display());
        Ok(())
    }

    /// Mounts one optical image under the media root, read-only. Already
    /// mounted is a no-op; any probe/attach/mount failure skips the image.
    /// A loop device attached before a failing mount stays tracked so
    /// cleanup detaches it.
    pub fn mount_image(&self, tracker: &mut ResourceTracker, image: &Path) -> ImageMount {
        let Some(stem) = image.file_stem() else {
            return self.skip(image, "image has no base name".to_string());
        };
        let mount_point = self.media_mount_root.join(stem);
        if let Err(e) = fs::create_dir_all(&mount_point) {
            return self.skip(image, format!("create {}: {}", mount_point.display(), e));
        }

        if self.service.is_mounted(&mount_point) {
            info!("{} already mounted", mount_point.display());
            return ImageMount::AlreadyMounted(mount_point);
        }

        if self.service.probe_iso9660(image) {
            if let Err(e) = self.service.mount_image_direct(image, &mount_point) {
                return self.skip(image, e.to_string());
            }
            tracker.track_mount(MountRecord {
                path: mount_point.clone(),
                kind: MountKind::OpticalDirect,
                created_dir: true,
            });
        } else {
            let device = match self.service.attach_loop(image) {
                Ok(device) => device,
                Err(e) => return self.skip(image, e.to_string()),
            };
            tracker.track_loop(LoopDevice {
                device_path: device.clone(),
            });
            if let Err(e) = self.service.mount_device_readonly(&device, &mount_point) {
                return self.skip(image, e.to_string());
            }
            tracker.track_mount(MountRecord {
                path: mount_point.clone(),
                kind: MountKind::LoopBacked,
                created_dir: true,
            });
        }

        info!("mounted {} at {}", image.display(), mount_point.display());
        ImageMount::Mounted(mount_point)
    }

    /// Mounts every image file found directly in the ISO share, in sorted
    /// order. Returns how many are mounted (including already-mounted ones).
    pub fn mount_all_images(&self, tracker: &mut ResourceTracker, iso_root: &Path) -> Result<usize> {
        let mut images = Vec::new();
        for entry in fs::read_dir(iso_root)? {
            let entry = entry?;
            let path = entry.path();
            let is_iso = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("iso"))
                .unwrap_or(false);
            if path.is_file() && is_iso {
                images.push(path);
            }
        }
        images.sort();

        let mut mounted = 0;
        for image in &images {
            match self.mount_image(tracker, image) {
                ImageMount::Mounted(_) | ImageMount::AlreadyMounted(_) => mounted += 1,
                ImageMount::Skipped(_) => {}
            }
        }
        Ok(mounted)
    }

    fn skip(&self, image: &Path, reason: String) -> ImageMount {
        error!("failed to mount {}: {}", image.display(), reason);
        ImageMount::Skipped(reason)
    }
}
