/// Unit file locations and fixed directives
pub mod unit {
    /// System-wide unit directory written during install
    pub const SYSTEM_DIR: &str = "/etc/systemd/system";

    /// File extension for service units
    pub const EXTENSION: &str = "service";

    /// Ordering target every generated unit waits for
    pub const AFTER_TARGET: &str = "network.target";

    /// Install target the unit is wanted by
    pub const WANTED_BY: &str = "multi-user.target";
}

/// Restart policy defaults
pub mod restart {
    /// Default delay between restarts, in seconds
    pub const DEFAULT_SEC: u32 = 5;
}

/// Interpreter fallback paths by script extension, used when `which`
/// cannot resolve the interpreter on PATH
pub mod interpreter {
    /// (extension, binary name, fallback path)
    pub const TABLE: &[(&str, &str, &str)] = &[
        ("sh", "sh", "/bin/sh"),
        ("bash", "bash", "/bin/bash"),
        ("py", "python3", "/usr/bin/python3"),
        ("pl", "perl", "/usr/bin/perl"),
        ("rb", "ruby", "/usr/bin/ruby"),
    ];
}

/// External tools driven during install
pub mod tool {
    pub const SYSTEMCTL: &str = "systemctl";
    pub const JOURNALCTL: &str = "journalctl";

    /// Journal lines shown when a unit fails to start
    pub const DIAGNOSTIC_LINES: u32 = 20;
}
