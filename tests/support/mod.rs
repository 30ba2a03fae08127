use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::process::{Command, Output};

pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Command for the `detect-compat` binary with hostcompat env vars cleared.
pub fn detect_compat() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_detect-compat"));
    cmd.env_remove("HOSTCOMPAT_CONFIG")
        .env_remove("HOSTCOMPAT_MAX_LEVEL")
        .env_remove("HOSTCOMPAT_MESSAGES")
        .env_remove("RUST_LOG");
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}
