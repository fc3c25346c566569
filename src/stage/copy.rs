use std::path::Path;
use std::process::Command;

use crate::error::{Result, StageError};
use crate::types::RunMode;
use crate::util::command::run_command;

/// Copies one discovered source (file or directory) into a target directory.
pub trait FileCopier {
    fn copy(&self, source: &Path, target_dir: &Path) -> Result<()>;
}

/// rsync with a fixed bandwidth ceiling so staging does not saturate shared
/// network links. Archive mode preserves permissions and timestamps and
/// recurses into directories.
pub struct RsyncCopier {
    bw_limit_kb: u32,
    run_mode: RunMode,
}

impl RsyncCopier {
    pub fn new(bw_limit_kb: u32, run_mode: RunMode) -> Self {
        Self {
            bw_limit_kb,
            run_mode,
        }
    }
}

impl FileCopier for RsyncCopier {
    fn copy(&self, source: &Path, target_dir: &Path) -> Result<()> {
        let mut cmd = Command::new("rsync");
        cmd.arg("-ah")
            .arg(format!("--bwlimit={}", self.bw_limit_kb))
            .arg(source)
            .arg(target_dir);
        let rc = run_command(&mut cmd, self.run_mode)?;
        if rc != 0 {
            return Err(StageError::message(format!(
                "rsync {} failed with exit code {}",
                source.display(),
                rc
            )));
        }
        Ok(())
    }
}
