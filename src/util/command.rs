use std::process::Command;

use crate::error::{Result, StageError};
use crate::types::RunMode;

pub fn maybe_print_command(cmd: &Command, run_mode: RunMode) {
    if !run_mode.dry_run && !run_mode.verbose {
        return;
    }
    let program = cmd.get_program().to_string_lossy();
    let args: Vec<String> = cmd
        .get_args()
        .map(|a| a.to_string_lossy().to_string())
        .collect();
    println!("{} {}", program, args.join(" "));
}

pub fn run_command(cmd: &mut Command, run_mode: RunMode) -> Result<i32> {
    maybe_print_command(cmd, run_mode);
    if run_mode.dry_run {
        return Ok(0);
    }
    let status = cmd.status().map_err(|e| {
        StageError::message(format!("{}: {}", cmd.get_program().to_string_lossy(), e))
    })?;
    Ok(status.code().unwrap_or(1))
}

/// Runs a command and captures stdout, for tools that answer on stdout
/// (losetup --show). Trailing whitespace is trimmed.
pub fn run_command_capture(cmd: &mut Command, run_mode: RunMode) -> Result<String> {
    maybe_print_command(cmd, run_mode);
    let output = cmd.output().map_err(|e| {
        StageError::message(format!("{}: {}", cmd.get_program().to_string_lossy(), e))
    })?;
    if !output.status.success() {
        return Err(StageError::message(format!(
            "{} failed with exit code {}",
            cmd.get_program().to_string_lossy(),
            output.status.code().unwrap_or(1)
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
