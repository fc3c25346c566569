//! Recording fake for tests: scripts probe/is-mounted answers, injects
//! per-operation failures, and keeps the exact call order.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{MountError, Result};
use crate::mount::service::MountService;

#[derive(Default)]
pub struct FakeMountService {
    events: RefCell<Vec<String>>,
    mounted: RefCell<HashSet<PathBuf>>,
    iso9660: RefCell<HashSet<PathBuf>>,
    failing: RefCell<HashSet<String>>,
    next_loop: Cell<usize>,
}

impl FakeMountService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    /// Marks an operation key (e.g. `unmount:/media/B`) as failing.
    pub fn fail_op(&self, key: &str) {
        self.failing.borrow_mut().insert(key.to_string());
    }

    pub fn set_mounted(&self, mountpoint: &Path) {
        self.mounted.borrow_mut().insert(mountpoint.to_path_buf());
    }

    pub fn set_iso9660(&self, image: &Path) {
        self.iso9660.borrow_mut().insert(image.to_path_buf());
    }

    fn record(&self, event: String) {
        self.events.borrow_mut().push(event);
    }

    fn check(&self, key: &str) -> Result<()> {
        if self.failing.borrow().contains(key) {
            return Err(MountError::Command(format!("{} failed (injected)", key)).into());
        }
        Ok(())
    }
}

impl MountService for FakeMountService {
    fn mount_remote(&self, share: &str, mountpoint: &Path) -> Result<()> {
        let key = format!("mount_remote:{}", share);
        self.record(key.clone());
        if self.failing.borrow().contains(&key) {
            return Err(MountError::RemoteShare {
                share: share.to_string(),
                mountpoint: mountpoint.to_path_buf(),
                reason: "injected".to_string(),
            }
            .into());
        }
        self.mounted.borrow_mut().insert(mountpoint.to_path_buf());
        Ok(())
    }

    fn is_mounted(&self, mountpoint: &Path) -> bool {
        self.mounted.borrow().contains(mountpoint)
    }

    fn probe_iso9660(&self, image: &Path) -> bool {
        self.record(format!("probe:{}", image.display()));
        self.iso9660.borrow().contains(image)
    }

    fn attach_loop(&self, image: &Path) -> Result<PathBuf> {
        let key = format!("attach:{}", image.display());
        self.record(key.clone());
        self.check(&key)?;
        let n = self.next_loop.get();
        self.next_loop.set(n + 1);
        Ok(PathBuf::from(format!("/dev/loop{}", n)))
    }

    fn detach_loop(&self, device: &Path) -> Result<()> {
        let key = format!("detach:{}", device.display());
        self.record(key.clone());
        self.check(&key)
    }

    fn mount_image_direct(&self, image: &Path, mountpoint: &Path) -> Result<()> {
        let key = format!("mount_direct:{}", image.display());
        self.record(key.clone());
        self.check(&key)?;
        self.mounted.borrow_mut().insert(mountpoint.to_path_buf());
        Ok(())
    }

    fn mount_device_readonly(&self, device: &Path, mountpoint: &Path) -> Result<()> {
        let key = format!("mount_device:{}", device.display());
        self.record(key.clone());
        self.check(&key)?;
        self.mounted.borrow_mut().insert(mountpoint.to_path_buf());
        Ok(())
    }

    fn unmount(&self, mountpoint: &Path) -> Result<()> {
        let key = format!("unmount:{}", mountpoint.display());
        self.record(key.clone());
        self.check(&key)?;
        self.mounted.borrow_mut().remove(mountpoint);
        Ok(())
    }
}
