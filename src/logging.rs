use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Log lines written while a full-screen prompt is up.
static HELD: Mutex<Option<Vec<u8>>> = Mutex::new(None);

fn held() -> MutexGuard<'static, Option<Vec<u8>>> {
    HELD.lock().unwrap_or_else(PoisonError::into_inner)
}

fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Log to stderr. `RUST_LOG` wins over `-v` when set.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(StderrGate)
        .with_target(verbose >= 2)
        .with_line_number(verbose >= 3)
        .try_init()
        .ok();

    tracing::debug!(verbose, "logging initialized");
}

/// Buffers log output until the returned guard drops, then writes it to
/// stderr in one piece.
#[must_use]
pub fn hold_stderr() -> HoldGuard {
    held().get_or_insert_with(Vec::new);
    HoldGuard(())
}

pub struct HoldGuard(());

impl Drop for HoldGuard {
    fn drop(&mut self) {
        if let Some(buffered) = held().take()
            && !buffered.is_empty()
        {
            let mut err = io::stderr();
            err.write_all(&buffered).ok();
            err.flush().ok();
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct StderrGate;

pub(crate) struct GateWriter;

impl Write for GateWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match held().as_mut() {
            Some(buffer) => {
                buffer.extend_from_slice(buf);
                Ok(buf.len())
            }
            None => io::stderr().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

impl<'a> MakeWriter<'a> for StderrGate {
    type Writer = GateWriter;

    fn make_writer(&'a self) -> Self::Writer {
        GateWriter
    }
}

#[cfg(test)]
#[path = "tests/logging_tests.rs"]
mod tests;
