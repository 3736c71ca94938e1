use std::fmt;
use std::path::PathBuf;


/// Process lifecycle model the service manager should assume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    Simple,
    Forking,
}

impl ServiceType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "simple" => Some(ServiceType::Simple),
            "forking" => Some(ServiceType::Forking),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Simple => "simple",
            ServiceType::Forking => "forking",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartPolicy {
    OnFailure,
    Always,
    OnAbnormal,
    No,
}

impl RestartPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "on-failure" => Some(RestartPolicy::OnFailure),
            "always" => Some(RestartPolicy::Always),
            "on-abnormal" => Some(RestartPolicy::OnAbnormal),
            "no" => Some(RestartPolicy::No),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RestartPolicy::OnFailure => "on-failure",
            RestartPolicy::Always => "always",
            RestartPolicy::OnAbnormal => "on-abnormal",
            RestartPolicy::No => "no",
        }
    }
}

impl fmt::Display for RestartPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the supervised process's stdout/stderr go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Logging {
    Journal,
    File(PathBuf),
}

impl Logging {
    /// The value written to StandardOutput= / StandardError=.
    pub fn directive(&self) -> String {
        match self {
            Logging::Journal => "journal".to_string(),
            Logging::File(path) => format!("append:{}", path.display()),
        }
    }
}

/// Everything the wizard collects before serialization. Built field by
/// field, rendered once, then discarded.
#[derive(Debug, Clone)]
pub struct ServiceDefinition {
    pub name: String,
    pub description: String,
    pub exec_start: String,
    pub exec_stop: Option<String>,
    pub exec_reload: Option<String>,
    pub service_type: ServiceType,
    pub remain_after_exit: bool,
    pub working_directory: PathBuf,
    pub run_as_user: String,
    pub restart_policy: RestartPolicy,
    pub restart_sec: Option<u32>,
    pub environment: Vec<String>,
    pub auto_start_on_boot: bool,
    pub logging: Logging,
}

impl ServiceDefinition {
    /// Filename of the unit, `<name>.service`.
    pub fn unit_file_name(&self) -> String {
        format!("{}.{}", self.name, crate::constants::unit::EXTENSION)
    }
}

/// Checks a candidate service name: non-empty, `[a-z0-9_-]` only.
/// Collisions with existing units are the wizard's concern, not ours.
pub fn validate_name(candidate: &str) -> Result<(), String> {
    if candidate.is_empty() {
        return Err("service name must not be empty".to_string());
    }
    if let Some(bad) = candidate
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-'))
    {
        return Err(format!(
            "invalid character {:?} in service name (allowed: a-z, 0-9, '_', '-')",
            bad
        ));
    }
    Ok(())
}

/// Checks one environment entry against `KEY=value` where KEY matches
/// `[A-Za-z_][A-Za-z0-9_]*`.
pub fn validate_env_entry(entry: &str) -> Result<(), String> {
    let Some((key, _value)) = entry.split_once('=') else {
        return Err(format!("{:?} is not of the form KEY=value", entry));
    };
    let mut chars = key.chars();
    let valid_first = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !valid_first || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!(
            "invalid variable name {:?} (must match [A-Za-z_][A-Za-z0-9_]*)",
            key
        ));
    }
    Ok(())
}

/// Key part of an already-validated `KEY=value` entry.
pub fn env_key(entry: &str) -> &str {
    entry.split_once('=').map(|(k, _)| k).unwrap_or(entry)
}

/// Composes the ExecStart command line: optional interpreter token, the
/// executable path, then arguments verbatim. No shell-escaping is done;
/// the operator's text is trusted as-is.
pub fn build_exec_command(exec_path: &str, args: &str, interpreter: Option<&str>) -> String {
    let mut command = String::new();
    if let Some(token) = interpreter {
        command.push_str(token);
        command.push(' ');
    }
    command.push_str(exec_path);
    if !args.is_empty() {
        command.push(' ');
        command.push_str(args);
    }
    command
}
