use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Run `program` and return its stdout. Secrets belong in `envs`, never in
/// `args`, since args are logged.
pub(crate) fn run(program: &str, args: &[&str], envs: &[(&str, &str)]) -> Result<String> {
    tracing::debug!(program, ?args, "running command");

    let output = Command::new(program)
        .args(args)
        .envs(envs.iter().copied())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .with_context(|| format!("failed to execute {} (is it installed?)", program))?;

    if !output.status.success() {
        anyhow::bail!(
            "{} {} failed ({}): {}",
            program,
            args.join(" "),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    String::from_utf8(output.stdout).with_context(|| format!("decode {} output", program))
}

pub(crate) fn run_json<T: DeserializeOwned>(
    program: &str,
    args: &[&str],
    envs: &[(&str, &str)],
) -> Result<T> {
    let out = run(program, args, envs)?;
    serde_json::from_str(&out).with_context(|| format!("parse {} output", program))
}
