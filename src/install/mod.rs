use crate::constants::tool;
use anyhow::{Context, Result};
use nix::unistd::{access, AccessFlags};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use tracing::{debug, info, warn};

#[cfg(test)]
mod tests;

/// A rendered unit written to its staging locations.
pub struct StagedUnit {
    pub staged_path: PathBuf,
    pub backup_path: PathBuf,
    _temp_dir: TempDir, // keep the staging directory alive until dropped
}

/// Writes the rendered text to a temporary staging file and a backup copy
/// under `backup_dir`. Both writes are full overwrites.
pub fn stage(text: &str, file_name: &str, backup_dir: &Path) -> Result<StagedUnit> {
    let temp_dir = tempfile::tempdir().context("Failed to create staging directory")?;
    let staged_path = temp_dir.path().join(file_name);
    fs::write(&staged_path, text)
        .with_context(|| format!("Failed to write staged unit {:?}", staged_path))?;

    let backup_path = backup_dir.join(file_name);
    fs::write(&backup_path, text)
        .with_context(|| format!("Failed to write backup copy {:?}", backup_path))?;

    debug!("Staged unit at {:?}, backup at {:?}", staged_path, backup_path);
    Ok(StagedUnit {
        staged_path,
        backup_path,
        _temp_dir: temp_dir,
    })
}

/// Path the finished unit lands at.
pub fn unit_path(unit_dir: &Path, file_name: &str) -> PathBuf {
    unit_dir.join(file_name)
}

/// Whether this process can install into the unit directory. Checked once
/// up front; a negative answer downgrades the run to file-generation-only.
pub fn can_install(unit_dir: &Path) -> bool {
    access(unit_dir, AccessFlags::W_OK).is_ok()
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InstallOutcome {
    pub installed: bool,
    pub enabled: bool,
    pub started: bool,
}

/// Copies the staged unit into the unit directory and drives systemctl:
/// daemon-reload, then optional enable and start. Each step is attempted
/// on its own; a failed reload gates the later steps, and a failed start
/// surfaces recent journal output without rolling back the installed file.
pub fn install(
    staged: &StagedUnit,
    name: &str,
    file_name: &str,
    unit_dir: &Path,
    enable: bool,
    start: bool,
) -> Result<InstallOutcome> {
    let mut outcome = InstallOutcome::default();

    let target = unit_path(unit_dir, file_name);
    fs::copy(&staged.staged_path, &target)
        .with_context(|| format!("Failed to install unit at {:?}", target))?;
    outcome.installed = true;
    info!("Installed {:?}", target);

    if !systemctl_step(&["daemon-reload"]) {
        warn!("daemon-reload failed; skipping enable/start");
        return Ok(outcome);
    }

    if enable {
        outcome.enabled = systemctl_step(&["enable", name]);
        if outcome.enabled {
            info!("Enabled {} for boot-time activation", name);
        }
    }

    if start {
        outcome.started = systemctl_step(&["start", name]);
        if outcome.started {
            info!("Started {}", name);
        } else {
            report_start_failure(name);
        }
    }

    Ok(outcome)
}

/// Instructions printed when install is skipped or not permitted.
pub fn manual_instructions(backup_path: &Path, unit_dir: &Path, name: &str, enable: bool) -> String {
    let mut text = format!(
        "To install the service manually, run as root:\n  cp {} {}/\n  systemctl daemon-reload\n",
        backup_path.display(),
        unit_dir.display()
    );
    if enable {
        text.push_str(&format!("  systemctl enable {}\n", name));
    }
    text.push_str(&format!("  systemctl start {}\n", name));
    text
}

/// Runs one systemctl verb, logging stderr on failure. Missing systemctl
/// counts as a failed step, not a fatal error.
fn systemctl_step(args: &[&str]) -> bool {
    let systemctl = match which::which(tool::SYSTEMCTL) {
        Ok(path) => path,
        Err(_) => {
            warn!("systemctl not found on PATH; skipping `systemctl {}`", args.join(" "));
            return false;
        }
    };

    debug!("Running systemctl {}", args.join(" "));
    match Command::new(systemctl).args(args).output() {
        Ok(output) if output.status.success() => true,
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("systemctl {} failed: {}", args.join(" "), stderr.trim());
            false
        }
        Err(err) => {
            warn!("Failed to run systemctl {}: {}", args.join(" "), err);
            false
        }
    }
}

/// Surfaces the unit's status and recent journal lines after a failed
/// start. Diagnostic only; the installed file stays in place.
fn report_start_failure(name: &str) {
    warn!("{} did not start; recent diagnostics follow", name);

    if let Ok(systemctl) = which::which(tool::SYSTEMCTL) {
        if let Ok(output) = Command::new(systemctl)
            .args(["status", "--no-pager", name])
            .output()
        {
            let status = String::from_utf8_lossy(&output.stdout);
            if !status.trim().is_empty() {
                warn!("systemctl status {}:\n{}", name, status.trim_end());
            }
        }
    }

    if let Ok(journalctl) = which::which(tool::JOURNALCTL) {
        let lines = tool::DIAGNOSTIC_LINES.to_string();
        if let Ok(output) = Command::new(journalctl)
            .args(["-u", name, "-n", &lines, "--no-pager"])
            .output()
        {
            let journal = String::from_utf8_lossy(&output.stdout);
            if !journal.trim().is_empty() {
                warn!("journalctl -u {}:\n{}", name, journal.trim_end());
            }
        }
    }
}
