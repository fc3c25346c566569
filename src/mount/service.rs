use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{MountError, Result};
use crate::types::RunMode;
use crate::util::command::{maybe_print_command, run_command, run_command_capture};

/// External mount operations behind a trait so the pipeline can be exercised
/// with fakes. Queries (`is_mounted`, `probe_iso9660`) are boolean
/// capabilities; everything else either succeeds or reports why not.
pub trait MountService {
    fn mount_remote(&self, share: &str, mountpoint: &Path) -> Result<()>;
    fn is_mounted(&self, mountpoint: &Path) -> bool;
    fn probe_iso9660(&self, image: &Path) -> bool;
    fn attach_loop(&self, image: &Path) -> Result<PathBuf>;
    fn detach_loop(&self, device: &Path) -> Result<()>;
    fn mount_image_direct(&self, image: &Path, mountpoint: &Path) -> Result<()>;
    fn mount_device_readonly(&self, device: &Path, mountpoint: &Path) -> Result<()>;
    fn unmount(&self, mountpoint: &Path) -> Result<()>;
}

/// Production implementation shelling out to the usual tools: mount.cifs,
/// mountpoint, isoinfo, losetup, fuseiso, pmount, fusermount.
pub struct SystemMountService {
    run_mode: RunMode,
}

impl SystemMountService {
    pub fn new(run_mode: RunMode) -> Self {
        Self { run_mode }
    }
}

impl MountService for SystemMountService {
    fn mount_remote(&self, share: &str, mountpoint: &Path) -> Result<()> {
        let mut cmd = Command::new("mount.cifs");
        cmd.arg(share).arg(mountpoint);
        let rc = run_command(&mut cmd, self.run_mode)?;
        if rc != 0 {
            return Err(MountError::RemoteShare {
                share: share.to_string(),
                mountpoint: mountpoint.to_path_buf(),
                reason: format!("mount.cifs exited with code {}", rc),
            }
            .into());
        }
        Ok(())
    }

    fn is_mounted(&self, mountpoint: &Path) -> bool {
        // Read-only query, safe under dry-run.
        Command::new("mountpoint")
            .arg("-q")
            .arg(mountpoint)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn probe_iso9660(&self, image: &Path) -> bool {
        Command::new("isoinfo")
            .arg("-i")
            .arg(image)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn attach_loop(&self, image: &Path) -> Result<PathBuf> {
        let mut cmd = Command::new("losetup");
        cmd.arg("--show").arg("-f").arg(image);
        if self.run_mode.dry_run {
            maybe_print_command(&cmd, self.run_mode);
            return Ok(PathBuf::from("/dev/loop-dryrun"));
        }
        let device = run_command_capture(&mut cmd, self.run_mode)
            .map_err(|e| MountError::Command(format!("losetup {}: {}", image.display(), e)))?;
        if device.is_empty() {
            return Err(MountError::Command(format!(
                "losetup {}: no free loop device reported",
                image.display()
            ))
            .into());
        }
        Ok(PathBuf::from(device))
    }

    fn detach_loop(&self, device: &Path) -> Result<()> {
        let mut cmd = Command::new("losetup");
        cmd.arg("-d").arg(device);
        let rc = run_command(&mut cmd, self.run_mode)?;
        if rc != 0 {
            return Err(MountError::Command(format!(
                "losetup -d {} failed with exit code {}",
                device.display(),
                rc
            ))
            .into());
        }
        Ok(())
    }

    fn mount_image_direct(&self, image: &Path, mountpoint: &Path) -> Result<()> {
        let mut cmd = Command::new("fuseiso");
        cmd.arg("-o").arg("ro").arg(image).arg(mountpoint);
        let rc = run_command(&mut cmd, self.run_mode)?;
        if rc != 0 {
            return Err(MountError::Command(format!(
                "fuseiso {} failed with exit code {}",
                image.display(),
                rc
            ))
            .into());
        }
        Ok(())
    }

    fn mount_device_readonly(&self, device: &Path, mountpoint: &Path) -> Result<()> {
        let mut cmd = Command::new("pmount");
        cmd.arg("-r").arg(device).arg(mountpoint);
        let rc = run_command(&mut cmd, self.run_mode)?;
        if rc != 0 {
            return Err(MountError::Command(format!(
                "pmount {} failed with exit code {}",
                device.display(),
                rc
            ))
            .into());
        }
        Ok(())
    }

    fn unmount(&self, mountpoint: &Path) -> Result<()> {
        let mut cmd = Command::new("fusermount");
        cmd.arg("-u").arg(mountpoint);
        let rc = run_command(&mut cmd, self.run_mode)?;
        if rc != 0 {
            return Err(MountError::Command(format!(
                "fusermount -u {} failed with exit code {}",
                mountpoint.display(),
                rc
            ))
            .into());
        }
        Ok(())
    }
}
