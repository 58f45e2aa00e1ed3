// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One handler per action kind.
//!
//! A handler makes one attempt and reports what happened; retry policy
//! lives in the worker. Returning `Ok(None)` means "nothing to report",
//! which the worker counts as success.

use drover_core::{Action, ActionKind};
use drover_resource::{
    DirectoryResource, ExecuteResource, FileResource, Ownership, ServiceResource,
};
use drover_shell::ExecOutput;

use crate::{ActionQueue, EngineError};

/// Dispatch one attempt of an action. Unknown kinds are rejected by the
/// worker before this is reached.
pub(crate) async fn apply(
    queue: &ActionQueue,
    action: &Action,
) -> Result<Option<ExecOutput>, EngineError> {
    match action.kind {
        ActionKind::Start => start(queue, action),
        ActionKind::Run => run(queue, action).await,
        ActionKind::CreateStructure => Ok(Some(create_structure(action))),
        ActionKind::DeleteStructure => Ok(Some(delete_structure(action))),
        ActionKind::WriteFile => write_file(action),
        ActionKind::InstallAndConfig => install_and_config(queue, action).await,
        ActionKind::NoOp => Ok(None),
        // the worker fails these before dispatch
        ActionKind::Unknown => Err(EngineError::MissingField {
            id: action.id,
            kind: action.kind,
            field: "kind",
        }),
    }
}

fn start(queue: &ActionQueue, action: &Action) -> Result<Option<ExecOutput>, EngineError> {
    let command = require(action, action.command.as_ref(), "command")?;
    let mut service = ServiceResource::new(action.process_key(), command)
        .user(action.user.clone());
    service.start(queue.registry())?;
    Ok(None)
}

async fn run(queue: &ActionQueue, action: &Action) -> Result<Option<ExecOutput>, EngineError> {
    let command = require(action, action.command.as_ref(), "command")?;
    let mut execute = ExecuteResource::new(command);
    if let Some(user) = &action.user {
        execute = execute.user(user.clone());
    }
    if let Some(timeout) = queue.tuning().command_timeout {
        execute = execute.timeout(timeout);
    }
    Ok(execute.run().await?)
}

/// Directory-structure actions are fire-and-forget: the report always says
/// exit 0, with any provider failure captured as text only.
fn create_structure(action: &Action) -> ExecOutput {
    let outcome = action
        .path
        .as_ref()
        .ok_or_else(|| EngineError::MissingField {
            id: action.id,
            kind: action.kind,
            field: "path",
        })
        .and_then(|path| {
            let mut dir = DirectoryResource::new(path)
                .recursive(true)
                .ownership(ownership_of(action));
            dir.create().map_err(EngineError::from)
        });
    swallow(action, outcome)
}

fn delete_structure(action: &Action) -> ExecOutput {
    let outcome = action
        .path
        .as_ref()
        .ok_or_else(|| EngineError::MissingField {
            id: action.id,
            kind: action.kind,
            field: "path",
        })
        .and_then(|path| DirectoryResource::new(path).delete().map_err(EngineError::from));
    swallow(action, outcome)
}

fn write_file(action: &Action) -> Result<Option<ExecOutput>, EngineError> {
    let path = require(action, action.path.as_ref(), "path")?;
    let mut file = FileResource::new(path)
        .ownership(ownership_of(action))
        .backup(true);
    if let Some(content) = &action.content {
        file = file.content(content.clone());
    }
    file.create()?;
    Ok(None)
}

/// Write the configuration artifact, then run it: either the explicit
/// command from the action, or the artifact prefixed by the configured
/// driver script. Success records the artifact id as the currently
/// applied configuration.
async fn install_and_config(
    queue: &ActionQueue,
    action: &Action,
) -> Result<Option<ExecOutput>, EngineError> {
    let path = require(action, action.path.as_ref(), "path")?.clone();
    let content = require(action, action.content.as_ref(), "content")?;

    let mut artifact = FileResource::new(&path)
        .content(content.clone())
        .ownership(ownership_of(action));
    artifact.create()?;

    let command = match &action.command {
        Some(command) => command.clone(),
        None => fallback_command(queue, action, &path)?,
    };

    let mut execute = ExecuteResource::new(command);
    if let Some(user) = &action.user {
        execute = execute.user(user.clone());
    }
    if let Some(timeout) = queue.tuning().command_timeout {
        execute = execute.timeout(timeout);
    }

    let output = execute.run().await?;
    if output.as_ref().map_or(true, ExecOutput::is_success) {
        queue.record_applied_config(action.id);
    }
    Ok(output)
}

/// No explicit command: concatenate the driver script onto the artifact
/// and invoke the combined file, or invoke the artifact alone when no
/// driver is configured.
fn fallback_command(
    queue: &ActionQueue,
    action: &Action,
    artifact_path: &str,
) -> Result<String, EngineError> {
    let Some(driver) = &queue.tuning().driver_script else {
        return Ok(format!("/bin/sh {artifact_path}"));
    };

    let driver_text = std::fs::read_to_string(driver).map_err(|e| {
        EngineError::Resource(drover_resource::ResourceError::Io {
            op: "read",
            path: driver.clone(),
            source: e,
        })
    })?;
    let artifact_text = action.content.clone().unwrap_or_default();

    let combined_path = format!("{artifact_path}.run");
    let mut combined = FileResource::new(&combined_path)
        .content(format!("{driver_text}\n{artifact_text}"));
    combined.create()?;
    Ok(format!("/bin/sh {combined_path}"))
}

fn require<'a, T>(
    action: &Action,
    value: Option<&'a T>,
    field: &'static str,
) -> Result<&'a T, EngineError> {
    value.ok_or(EngineError::MissingField {
        id: action.id,
        kind: action.kind,
        field,
    })
}

fn ownership_of(action: &Action) -> Ownership {
    Ownership {
        owner: action.owner.clone(),
        group: action.group.clone(),
        mode: action.permission.clone(),
    }
}

fn swallow(action: &Action, outcome: Result<bool, EngineError>) -> ExecOutput {
    match outcome {
        Ok(_) => ExecOutput {
            exit_code: 0,
            stdout: String::new(),
            stderr: String::new(),
        },
        Err(err) => {
            tracing::warn!(id = action.id, kind = %action.kind, error = %err,
                "structure action failed, exit code forced to 0");
            ExecOutput {
                exit_code: 0,
                stdout: String::new(),
                stderr: err.to_string(),
            }
        }
    }
}
