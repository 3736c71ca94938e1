use crate::definition::ServiceType;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;


/// How strongly the heuristic believes its suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    Low,
    High,
}

/// Suggested process model for a target executable. Always a suggestion;
/// the operator confirms or overrides it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecModelHint {
    pub service_type: ServiceType,
    pub confidence: Confidence,
    /// Subcommand word to suggest for ExecStop, when the script visibly
    /// handles one.
    pub stop_hint: Option<String>,
}

impl ExecModelHint {
    fn simple(confidence: Confidence) -> Self {
        ExecModelHint {
            service_type: ServiceType::Simple,
            confidence,
            stop_hint: None,
        }
    }
}

/// Inspects the target file for backgrounding idioms and suggests a
/// service type. Missing or unreadable targets skip detection entirely
/// and fall back to `simple` with low confidence.
pub fn classify_execution_model(path: &Path) -> ExecModelHint {
    match fs::read_to_string(path) {
        Ok(contents) => classify_contents(&contents),
        Err(err) => {
            debug!("Skipping execution model detection for {:?}: {}", path, err);
            ExecModelHint::simple(Confidence::Low)
        }
    }
}

/// The pure half of the heuristic: pattern matching over file content.
///
/// Two patterns suggest `forking`: an explicit `nohup … &` idiom, or a
/// trailing `&` on a line that also carries a recognizable start command.
/// Anything else suggests `simple`.
pub fn classify_contents(contents: &str) -> ExecModelHint {
    let mut forking = false;
    let mut confidence = Confidence::Low;

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if !is_backgrounded(line) {
            continue;
        }
        if has_word(line, "nohup") {
            forking = true;
            confidence = Confidence::High;
            break;
        }
        if has_word(line, "start") || has_word(line, "daemon") {
            forking = true;
        }
    }

    if !forking {
        return ExecModelHint::simple(Confidence::High);
    }

    // A script that backgrounds its work and also handles a stop word is
    // worth a stop-command suggestion; the match is on word boundaries
    // only, and the operator still confirms it.
    let stop_hint = contents
        .lines()
        .any(|line| has_word(line, "stop"))
        .then(|| "stop".to_string());

    ExecModelHint {
        service_type: ServiceType::Forking,
        confidence,
        stop_hint,
    }
}

/// True when the line launches something into the background: a trailing
/// lone `&`, not the `&&` operator.
fn is_backgrounded(line: &str) -> bool {
    let line = line.trim_end();
    line.ends_with('&') && !line.ends_with("&&")
}

/// Word-boundary containment check, where a word boundary is anything
/// outside `[A-Za-z0-9_]`.
fn has_word(line: &str, word: &str) -> bool {
    let bytes = line.as_bytes();
    let mut start = 0;
    while let Some(pos) = line[start..].find(word) {
        let begin = start + pos;
        let end = begin + word.len();
        let left_ok = begin == 0 || !is_word_byte(bytes[begin - 1]);
        let right_ok = end == bytes.len() || !is_word_byte(bytes[end]);
        if left_ok && right_ok {
            return true;
        }
        start = begin + 1;
    }
    false
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Resolves the interpreter token for a target with a recognized script
/// extension. Config overrides win; otherwise the interpreter binary is
/// located on PATH with a constant fallback path.
pub fn interpreter_for(path: &Path, overrides: &HashMap<String, String>) -> Option<String> {
    let ext = path.extension()?.to_str()?;
    if let Some(custom) = overrides.get(ext) {
        return Some(custom.clone());
    }
    let entry = crate::constants::interpreter::TABLE
        .iter()
        .find(|(e, _, _)| *e == ext)?;
    let (_, binary, fallback) = *entry;
    match which::which(binary) {
        Ok(resolved) => Some(resolved.display().to_string()),
        Err(_) => {
            debug!("{} not found on PATH, using {}", binary, fallback);
            Some(fallback.to_string())
        }
    }
}
