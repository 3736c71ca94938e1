use crate::constants::unit;
use crate::definition::{RestartPolicy, ServiceDefinition, ServiceType};


/// Serializes a definition into unit-file text. Section and key order is
/// fixed; downstream tooling parses these files positionally. Optional
/// keys are omitted entirely rather than written empty, and environment
/// entries appear one per line in input order.
pub fn render_unit(def: &ServiceDefinition) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("[Unit]".to_string());
    lines.push(format!("Description={}", def.description));
    lines.push(format!("After={}", unit::AFTER_TARGET));
    lines.push(String::new());

    lines.push("[Service]".to_string());
    lines.push(format!("Type={}", def.service_type));
    lines.push(format!("User={}", def.run_as_user));
    lines.push(format!(
        "WorkingDirectory={}",
        def.working_directory.display()
    ));
    lines.push(format!("ExecStart={}", def.exec_start));
    if let Some(stop) = &def.exec_stop {
        lines.push(format!("ExecStop={}", stop));
    }
    if let Some(reload) = &def.exec_reload {
        lines.push(format!("ExecReload={}", reload));
    }
    if def.remain_after_exit || def.service_type == ServiceType::Forking {
        lines.push("RemainAfterExit=yes".to_string());
    }
    lines.push(format!("Restart={}", def.restart_policy));
    if def.restart_policy != RestartPolicy::No {
        if let Some(sec) = def.restart_sec {
            lines.push(format!("RestartSec={}", sec));
        }
    }
    for entry in &def.environment {
        lines.push(format!("Environment=\"{}\"", entry));
    }
    let log = def.logging.directive();
    lines.push(format!("StandardOutput={}", log));
    lines.push(format!("StandardError={}", log));
    lines.push("NoNewPrivileges=true".to_string());
    lines.push(String::new());

    lines.push("[Install]".to_string());
    lines.push(format!("WantedBy={}", unit::WANTED_BY));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
