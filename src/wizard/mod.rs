use crate::config::Config;
use crate::definition::{
    build_exec_command, env_key, validate_env_entry, validate_name, Logging, RestartPolicy,
    ServiceDefinition, ServiceType,
};
use crate::detect::{self, Confidence};
use crate::install;
use crate::prompt::Prompter;
use anyhow::Result;
use nix::unistd::{Uid, User};
use std::io::{BufRead, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tracing::debug;

#[cfg(test)]
mod tests;

/// What a completed session produced: the definition itself plus the
/// operator's choice to start the unit right away (only asked when an
/// install will actually happen).
pub struct WizardOutput {
    pub definition: ServiceDefinition,
    pub start_now: bool,
}

/// Walks the operator through every field of a service definition, one
/// blocking prompt at a time. Validation failures re-prompt the current
/// field; nothing aborts the session short of the input closing.
pub fn run<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    config: &Config,
    unit_dir: &Path,
    will_install: bool,
) -> Result<WizardOutput> {
    let name = prompt_name(prompter, unit_dir)?;
    let description = prompter.ask("Description", Some(&format!("{} service", name)))?;
    let exec_path = prompt_executable(prompter)?;

    let interpreter = match detect::interpreter_for(Path::new(&exec_path), &config.interpreters) {
        Some(token) => {
            let question = format!("Script extension detected; run via {}?", token);
            prompter.confirm(&question, true)?.then_some(token)
        }
        None => None,
    };

    let args = prompter.ask("Arguments (appended verbatim)", None)?;
    let exec_start = build_exec_command(&exec_path, &args, interpreter.as_deref());

    let hint = detect::classify_execution_model(Path::new(&exec_path));
    if hint.service_type == ServiceType::Forking && hint.confidence == Confidence::High {
        prompter.status("note: the target appears to background itself")?;
    }
    let service_type = prompter.ask_until(
        "Service type (simple/forking)",
        Some(hint.service_type.as_str()),
        |raw| ServiceType::parse(raw).ok_or_else(|| format!("unknown service type {:?}", raw)),
    )?;

    let (exec_stop, exec_reload) = if service_type == ServiceType::Forking {
        let stop_default = hint
            .stop_hint
            .as_deref()
            .map(|word| build_exec_command(&exec_path, word, interpreter.as_deref()));
        let stop = prompter.ask("ExecStop command (blank for none)", stop_default.as_deref())?;
        let reload = prompter.ask("ExecReload command (blank for none)", None)?;
        (none_if_empty(stop), none_if_empty(reload))
    } else {
        (None, None)
    };

    let default_workdir = parent_directory(&exec_path);
    let working_directory =
        PathBuf::from(prompter.ask("Working directory", Some(&default_workdir))?);

    let run_as_user = prompt_user(prompter)?;

    let restart_policy = prompter.ask_until(
        "Restart policy (on-failure/always/on-abnormal/no)",
        Some(RestartPolicy::OnFailure.as_str()),
        |raw| RestartPolicy::parse(raw).ok_or_else(|| format!("unknown restart policy {:?}", raw)),
    )?;
    let restart_sec = if restart_policy != RestartPolicy::No {
        let sec = prompter.ask_until(
            "Seconds between restarts",
            Some(&config.default_restart_sec.to_string()),
            |raw| raw.parse::<u32>().map_err(|_| format!("{:?} is not a number", raw)),
        )?;
        Some(sec)
    } else {
        None
    };

    let environment = collect_environment(prompter)?;
    let auto_start_on_boot = prompter.confirm("Enable the service at boot?", true)?;
    let logging = prompt_logging(prompter)?;

    let definition = ServiceDefinition {
        name,
        description,
        exec_start,
        exec_stop,
        exec_reload,
        service_type,
        remain_after_exit: service_type == ServiceType::Forking,
        working_directory,
        run_as_user,
        restart_policy,
        restart_sec,
        environment,
        auto_start_on_boot,
        logging,
    };

    let start_now = if will_install {
        prompter.confirm("Start the service now?", true)?
    } else {
        false
    };

    Ok(WizardOutput {
        definition,
        start_now,
    })
}

/// Name prompt: charset validation plus the existing-unit collision check.
/// A collision needs explicit overwrite consent; refusing re-prompts for a
/// different name and leaves the existing file alone.
fn prompt_name<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    unit_dir: &Path,
) -> Result<String> {
    loop {
        let name = prompter.ask_until("Service name", None, |raw| {
            validate_name(raw).map(|_| raw.to_string())
        })?;

        let existing = install::unit_path(unit_dir, &format!("{}.service", name));
        if existing.exists() {
            let question = format!("{} already exists; overwrite it?", existing.display());
            if prompter.confirm(&question, false)? {
                return Ok(name);
            }
            prompter.status("Keeping the existing unit; choose another name")?;
            continue;
        }
        return Ok(name);
    }
}

/// Executable prompt. A missing or non-executable target is a warning the
/// operator can bypass, not a hard failure; detection later degrades
/// gracefully either way.
fn prompt_executable<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<String> {
    loop {
        let raw = prompter.ask_until("Executable to run (full path)", None, |raw| {
            if raw.is_empty() {
                Err("an executable path is required".to_string())
            } else {
                Ok(raw.to_string())
            }
        })?;

        match executable_warning(Path::new(&raw)) {
            Some(warning) => {
                let question = format!("{}; use it anyway?", warning);
                if prompter.confirm(&question, false)? {
                    return Ok(raw);
                }
            }
            None => return Ok(raw),
        }
    }
}

fn executable_warning(path: &Path) -> Option<String> {
    let Ok(metadata) = path.metadata() else {
        return Some(format!("{} does not exist", path.display()));
    };
    if !metadata.is_file() {
        return Some(format!("{} is not a regular file", path.display()));
    }
    if metadata.permissions().mode() & 0o111 == 0 {
        return Some(format!("{} is not executable", path.display()));
    }
    None
}

/// Run-as user prompt, validated against the host user database. An
/// unknown name can be kept with explicit consent; declining falls back
/// to the invoking user.
fn prompt_user<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<String> {
    let invoking = invoking_user();
    let answer = prompter.ask("Run as user", Some(&invoking))?;
    if answer == invoking || user_exists(&answer) {
        return Ok(answer);
    }

    let question = format!("User {:?} not found on this host; use it anyway?", answer);
    if prompter.confirm(&question, false)? {
        Ok(answer)
    } else {
        prompter.status(&format!("Falling back to {}", invoking))?;
        Ok(invoking)
    }
}

/// Accepts `KEY=value` lines until a blank one. Invalid entries and
/// duplicate keys are rejected inline without losing what was already
/// accepted; order of acceptance is preserved.
pub fn collect_environment<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<Vec<String>> {
    let mut entries: Vec<String> = Vec::new();
    loop {
        let line = prompter.ask("Environment variable (KEY=value, blank to finish)", None)?;
        if line.is_empty() {
            return Ok(entries);
        }
        if let Err(reason) = validate_env_entry(&line) {
            prompter.status(&format!("error: {}", reason))?;
            continue;
        }
        let key = env_key(&line);
        if entries.iter().any(|e| env_key(e) == key) {
            prompter.status(&format!("error: {} is already set", key))?;
            continue;
        }
        entries.push(line);
    }
}

fn prompt_logging<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<Logging> {
    prompter.ask_until("Logging (journal or file:<path>)", Some("journal"), |raw| {
        if raw == "journal" {
            return Ok(Logging::Journal);
        }
        match raw.strip_prefix("file:") {
            Some(path) if !path.is_empty() => Ok(Logging::File(PathBuf::from(path))),
            _ => Err(format!("{:?} is neither journal nor file:<path>", raw)),
        }
    })
}

fn none_if_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parent_directory(exec_path: &str) -> String {
    Path::new(exec_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "/".to_string())
}

fn invoking_user() -> String {
    match User::from_uid(Uid::effective()) {
        Ok(Some(user)) => user.name,
        _ => {
            debug!("Could not resolve the invoking user; defaulting to root");
            "root".to_string()
        }
    }
}

fn user_exists(name: &str) -> bool {
    matches!(User::from_name(name), Ok(Some(_)))
}
