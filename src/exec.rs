//! Synchronous external command execution.
//!
//! The resolver lives behind the [`CommandExecutor`] trait so the dialogue
//! can be driven against a fake in tests. The real implementation blocks
//! until the child exits and fully reaps it; there is no timeout, so a
//! hung resolver hangs the whole invocation.

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

/// What a finished child process left behind.
pub struct ExecOutput {
    pub stdout: String,
    /// Exit code, or -1 if the process died on a signal.
    pub code: i32,
}

pub trait CommandExecutor {
    /// Run `program` with `args` and the extra environment bindings `env`,
    /// blocking until it exits. Captures stdout; the child's stderr is
    /// discarded and its stdin is null so it cannot read from the AGI
    /// channel.
    fn execute(&self, program: &Path, args: &[&str], env: &[(&str, &str)])
        -> io::Result<ExecOutput>;
}

/// Executor backed by `std::process::Command`.
pub struct SystemExecutor;

impl CommandExecutor for SystemExecutor {
    fn execute(
        &self,
        program: &Path,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> io::Result<ExecOutput> {
        debug!(program = %program.display(), ?args, "spawning resolver");
        let output = Command::new(program)
            .args(args)
            .envs(env.iter().copied())
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()?;
        Ok(ExecOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            code: output.status.code().unwrap_or(-1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout_and_exit_code() {
        let out = SystemExecutor
            .execute(Path::new("/bin/sh"), &["-c", "printf hello; exit 3"], &[])
            .unwrap();
        assert_eq!(out.stdout, "hello");
        assert_eq!(out.code, 3);
    }

    #[test]
    fn passes_extra_environment() {
        let out = SystemExecutor
            .execute(
                Path::new("/bin/sh"),
                &["-c", "printf \"$SERVALINSTANCE_PATH\""],
                &[("SERVALINSTANCE_PATH", "/var/serval")],
            )
            .unwrap();
        assert_eq!(out.stdout, "/var/serval");
    }

    #[test]
    fn missing_binary_is_an_io_error() {
        let err = SystemExecutor.execute(Path::new("/nonexistent/resolver"), &[], &[]);
        assert!(err.is_err());
    }
}
