//! Process hand-off.
//!
//! On Unix the launcher replaces the current process image with the
//! target program, so it inherits the PID, the terminal, and every signal
//! aimed at ocean. Elsewhere it spawns the program, survives the console
//! interrupt the child also receives, and exits with the child's status.

use std::io::Write;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use ocean_common::error::{OceanError, Result};

/// A program and its arguments, excluding `argv[0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name, looked up on `PATH`.
    pub program: String,
    /// Arguments passed after the program name.
    pub args: Vec<String>,
}

impl Invocation {
    /// Creates an invocation of `program` with `args`.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Hands control to an external program.
pub trait Launcher {
    /// Runs `invocation` in place of the current process.
    ///
    /// Production implementations do not return on success.
    ///
    /// # Errors
    ///
    /// Returns [`OceanError::Exec`] if the program cannot be located or
    /// started.
    fn launch(&self, invocation: &Invocation) -> Result<()>;
}

/// Launcher that replaces the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecLauncher;

impl Launcher for ExecLauncher {
    fn launch(&self, invocation: &Invocation) -> Result<()> {
        let binary = which::which(&invocation.program)
            .map_err(|e| exec_error(&invocation.program, e))?;
        tracing::info!(
            binary = %binary.display(),
            args = ?invocation.args,
            "handing off to external program"
        );
        replace_process(&binary, invocation)
    }
}

#[cfg(unix)]
fn replace_process(binary: &Path, invocation: &Invocation) -> Result<()> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let program = &invocation.program;
    let path = CString::new(binary.as_os_str().as_bytes()).map_err(|e| exec_error(program, e))?;
    let argv = std::iter::once(program)
        .chain(&invocation.args)
        .map(|a| CString::new(a.as_bytes()))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| exec_error(program, e))?;
    let env = std::env::vars_os()
        .map(|(key, value)| {
            let mut entry = key.as_bytes().to_vec();
            entry.push(b'=');
            entry.extend_from_slice(value.as_bytes());
            CString::new(entry)
        })
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| exec_error(program, e))?;

    match nix::unistd::execve(&path, &argv, &env) {
        Ok(never) => match never {},
        Err(errno) => Err(exec_error(program, errno)),
    }
}

#[cfg(not(unix))]
fn replace_process(binary: &Path, invocation: &Invocation) -> Result<()> {
    let program = &invocation.program;
    ctrlc::set_handler(|| {}).map_err(|e| exec_error(program, e))?;
    let status = Command::new(binary)
        .args(&invocation.args)
        .status()
        .map_err(|e| exec_error(program, e))?;
    std::process::exit(
        status
            .code()
            .unwrap_or(ocean_common::constants::FAILURE_EXIT_CODE),
    );
}

/// Runs `command` to completion while feeding `input` to its stdin.
///
/// The input is written from a separate thread so a child that produces
/// output before draining its stdin cannot deadlock against the writer.
///
/// # Errors
///
/// Returns [`OceanError::Exec`] if the process cannot be spawned or
/// waited on, or if writing its input fails while it still succeeds.
pub fn run_with_input(mut command: Command, program: &str, input: Vec<u8>) -> Result<ExitStatus> {
    let mut child = command
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| exec_error(program, e))?;
    let mut stdin = child.stdin.take().ok_or_else(|| OceanError::Exec {
        program: program.to_owned(),
        message: "child stdin was not captured".into(),
    })?;

    let writer = std::thread::spawn(move || stdin.write_all(&input));
    let status = child.wait().map_err(|e| exec_error(program, e))?;

    match writer.join() {
        Ok(Ok(())) => {}
        Ok(Err(e)) if status.success() => return Err(exec_error(program, e)),
        Ok(Err(e)) => tracing::debug!(error = %e, "input not fully consumed by failed process"),
        Err(_) => {
            return Err(OceanError::Exec {
                program: program.to_owned(),
                message: "input writer panicked".into(),
            });
        }
    }
    Ok(status)
}

fn exec_error(program: &str, err: impl std::fmt::Display) -> OceanError {
    OceanError::Exec {
        program: program.to_owned(),
        message: err.to_string(),
    }
}
