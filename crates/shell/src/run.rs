// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command spawning, output capture, and timeout enforcement.

use std::process::Stdio;
use std::time::Instant;

use nix::sys::signal::{killpg, Signal};
use nix::unistd::Pid;
use tokio::io::AsyncReadExt;
use tokio::process::Child;

use crate::{CommandLine, ExecError, ExecOutput, Invocation};

/// Cap on captured output per stream.
const SNIPPET_LIMIT: usize = 64 * 1024;

/// Run one command to completion.
///
/// The child is placed in its own process group so a timeout can kill the
/// whole tree, not just the direct child.
pub async fn run(invocation: &Invocation) -> Result<ExecOutput, ExecError> {
    let program = invocation.command.program().to_string();
    let start = Instant::now();

    let cmd_span = tracing::info_span!(
        "shell.cmd",
        cmd = %program,
        user = invocation.user.as_deref().unwrap_or(""),
        exit_code = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    );
    let mut process = build_command(invocation)?;
    let mut child = process.spawn().map_err(|source| spawn_error(invocation, &program, source))?;

    // Drain both pipes concurrently with wait() so a chatty child cannot
    // deadlock on a full pipe.
    let stdout_task = capture_stream(child.stdout.take());
    let stderr_task = capture_stream(child.stderr.take());

    let status = match invocation.timeout {
        None => child.wait().await.map_err(|source| ExecError::Io {
            command: program.clone(),
            source,
        })?,
        Some(timeout) => match tokio::time::timeout(timeout, child.wait()).await {
            Ok(waited) => waited.map_err(|source| ExecError::Io {
                command: program.clone(),
                source,
            })?,
            Err(_elapsed) => {
                kill_process_group(&mut child).await;
                let stdout = stdout_task.await.unwrap_or_default();
                let stderr = stderr_task.await.unwrap_or_default();
                tracing::warn!(cmd = %program, ?timeout, "command timed out, process group killed");
                return Err(ExecError::TimedOut {
                    command: program,
                    timeout,
                    stdout: truncate_snippet(&stdout),
                    stderr: truncate_snippet(&stderr),
                });
            }
        },
    };

    let stdout = stdout_task.await.unwrap_or_default();
    let stderr = stderr_task.await.unwrap_or_default();

    let exit_code = status.code().unwrap_or(-1);
    cmd_span.record("exit_code", exit_code);
    cmd_span.record("duration_ms", start.elapsed().as_millis() as u64);

    Ok(ExecOutput {
        exit_code,
        stdout: truncate_snippet(&stdout),
        stderr: truncate_snippet(&stderr),
    })
}

fn build_command(invocation: &Invocation) -> Result<tokio::process::Command, ExecError> {
    let mut process = match &invocation.command {
        CommandLine::Argv(argv) => {
            let mut it = argv.iter();
            let program = it.next().map(String::as_str).unwrap_or("");
            let mut p = tokio::process::Command::new(program);
            p.args(it);
            p
        }
        CommandLine::Shell(script) => {
            let mut p = tokio::process::Command::new("/bin/sh");
            p.arg("-c").arg(script);
            p
        }
    };

    if let Some(cwd) = &invocation.cwd {
        process.current_dir(cwd);
    }
    for (k, v) in &invocation.env {
        process.env(k, v);
    }

    // Privilege drop happens in the child before exec, never after.
    if let Some(user) = &invocation.user {
        let resolved = nix::unistd::User::from_name(user)
            .ok()
            .flatten()
            .ok_or_else(|| ExecError::UnknownUser { user: user.clone() })?;
        process.uid(resolved.uid.as_raw());
        process.gid(resolved.gid.as_raw());
    }

    process.process_group(0);
    process.stdin(Stdio::null());
    process.stdout(Stdio::piped());
    process.stderr(Stdio::piped());
    Ok(process)
}

fn spawn_error(invocation: &Invocation, program: &str, source: std::io::Error) -> ExecError {
    match source.kind() {
        std::io::ErrorKind::NotFound => ExecError::NotFound {
            command: program.to_string(),
        },
        std::io::ErrorKind::PermissionDenied if invocation.user.is_some() => {
            ExecError::PermissionDenied {
                user: invocation.user.clone().unwrap_or_default(),
            }
        }
        _ => ExecError::SpawnFailed {
            command: program.to_string(),
            source,
        },
    }
}

/// Kill the child's whole process group and reap it.
async fn kill_process_group(child: &mut Child) {
    if let Some(pid) = child.id() {
        let _ = killpg(Pid::from_raw(pid as i32), Signal::SIGKILL);
    }
    let _ = child.wait().await;
}

fn capture_stream<R>(stream: Option<R>) -> tokio::task::JoinHandle<Vec<u8>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut reader) = stream {
            let _ = reader.read_to_end(&mut buf).await;
        }
        buf
    })
}

/// Truncate a byte buffer to a UTF-8–safe snippet of at most
/// `SNIPPET_LIMIT` bytes.
fn truncate_snippet(bytes: &[u8]) -> String {
    let s = String::from_utf8_lossy(bytes);
    if s.len() <= SNIPPET_LIMIT {
        return s.into_owned();
    }
    let mut end = SNIPPET_LIMIT;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_string()
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
