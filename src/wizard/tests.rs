#[cfg(test)]
mod tests {
    use super::super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn prompter(lines: &[&str]) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        let mut input = lines.join("\n");
        input.push('\n');
        Prompter::new(Cursor::new(input.into_bytes()), Vec::new())
    }

    fn write_script(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[test]
    fn test_full_simple_session() {
        let dir = tempdir().unwrap();
        let script = write_script(dir.path(), "run.sh", "#!/bin/sh\nexec ./app\n");
        let script_str = script.display().to_string();

        let mut p = prompter(&[
            "demo",        // name
            "",            // description -> default
            &script_str,   // executable
            "n",           // no interpreter prefix
            "--port 8080", // arguments
            "",            // service type -> suggested simple
            "",            // working directory -> parent of script
            "",            // user -> invoking user
            "",            // restart policy -> on-failure
            "10",          // restart seconds
            "",            // no environment entries
            "y",           // enable at boot
            "",            // logging -> journal
        ]);

        let config = Config::default();
        let out = run(&mut p, &config, dir.path(), false).unwrap();
        let def = out.definition;

        assert_eq!(def.name, "demo");
        assert_eq!(def.description, "demo service");
        assert_eq!(def.exec_start, format!("{} --port 8080", script_str));
        assert_eq!(def.service_type, ServiceType::Simple);
        assert!(!def.remain_after_exit);
        assert!(def.exec_stop.is_none());
        assert!(def.exec_reload.is_none());
        assert_eq!(def.working_directory, dir.path());
        assert_eq!(def.run_as_user, invoking_user());
        assert_eq!(def.restart_policy, RestartPolicy::OnFailure);
        assert_eq!(def.restart_sec, Some(10));
        assert!(def.environment.is_empty());
        assert!(def.auto_start_on_boot);
        assert_eq!(def.logging, Logging::Journal);
        assert!(!out.start_now);
    }

    #[test]
    fn test_forking_suggestion_forces_remain_after_exit() {
        let dir = tempdir().unwrap();
        let script = write_script(
            dir.path(),
            "daemon.sh",
            "#!/bin/sh\nnohup ./server &\n[ \"$1\" = stop ] && kill 1\n",
        );
        let script_str = script.display().to_string();
        let config = Config::default();
        let interpreter =
            detect::interpreter_for(&script, &config.interpreters).unwrap();

        let mut p = prompter(&[
            "fork-demo",
            "",  // description
            &script_str,
            "y", // accept interpreter prefix
            "",  // no arguments
            "",  // service type -> suggested forking
            "",  // ExecStop -> suggested stop command
            "",  // no ExecReload
            "",  // working directory
            "",  // user
            "always",
            "", // restart seconds -> config default
            "", // no environment
            "n" /* boot */,
            "file:/var/log/fork.log",
        ]);

        let out = run(&mut p, &config, dir.path(), false).unwrap();
        let def = out.definition;

        assert_eq!(def.service_type, ServiceType::Forking);
        assert!(def.remain_after_exit);
        assert_eq!(def.exec_start, format!("{} {}", interpreter, script_str));
        assert_eq!(
            def.exec_stop,
            Some(format!("{} {} stop", interpreter, script_str))
        );
        assert!(def.exec_reload.is_none());
        assert_eq!(def.restart_policy, RestartPolicy::Always);
        assert_eq!(def.restart_sec, Some(config.default_restart_sec));
        assert!(!def.auto_start_on_boot);
        assert_eq!(def.logging, Logging::File("/var/log/fork.log".into()));

        let transcript = String::from_utf8(p.output.clone()).unwrap();
        assert!(transcript.contains("appears to background itself"));
    }

    #[test]
    fn test_collect_environment_rejects_invalid_and_duplicates() {
        let mut p = prompter(&["FOO", "FOO=bar", "FOO=baz", "BAR=1", ""]);
        let entries = collect_environment(&mut p).unwrap();
        assert_eq!(entries, vec!["FOO=bar".to_string(), "BAR=1".to_string()]);

        let transcript = String::from_utf8(p.output.clone()).unwrap();
        assert!(transcript.contains("not of the form KEY=value"));
        assert!(transcript.contains("FOO is already set"));
    }

    #[test]
    fn test_name_collision_refusal_reprompts() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("demo.service"), "existing").unwrap();

        let mut p = prompter(&["demo", "n", "demo2"]);
        let name = prompt_name(&mut p, dir.path()).unwrap();
        assert_eq!(name, "demo2");

        // refusal must leave the existing unit untouched
        let kept = fs::read_to_string(dir.path().join("demo.service")).unwrap();
        assert_eq!(kept, "existing");
    }

    #[test]
    fn test_name_collision_accepted_with_consent() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("demo.service"), "existing").unwrap();

        let mut p = prompter(&["demo", "y"]);
        assert_eq!(prompt_name(&mut p, dir.path()).unwrap(), "demo");
    }

    #[test]
    fn test_invalid_name_reprompts() {
        let dir = tempdir().unwrap();
        let mut p = prompter(&["Bad Name", "good-name"]);
        assert_eq!(prompt_name(&mut p, dir.path()).unwrap(), "good-name");
    }

    #[test]
    fn test_missing_executable_needs_consent() {
        let mut p = prompter(&["/nonexistent/app", "n", "/nonexistent/other", "y"]);
        let path = prompt_executable(&mut p).unwrap();
        assert_eq!(path, "/nonexistent/other");
    }

    #[test]
    fn test_non_executable_file_warns() {
        let dir = tempdir().unwrap();
        let plain = dir.path().join("data.txt");
        fs::write(&plain, "not a program").unwrap();
        let mut perms = fs::metadata(&plain).unwrap().permissions();
        perms.set_mode(0o644);
        fs::set_permissions(&plain, perms).unwrap();

        assert!(executable_warning(&plain)
            .unwrap()
            .contains("not executable"));
    }

    #[test]
    fn test_unknown_user_declined_falls_back_to_invoking_user() {
        let mut p = prompter(&["no-such-user-zz", "n"]);
        let user = prompt_user(&mut p).unwrap();
        assert_eq!(user, invoking_user());
    }

    #[test]
    fn test_unknown_user_kept_with_consent() {
        let mut p = prompter(&["no-such-user-zz", "y"]);
        assert_eq!(prompt_user(&mut p).unwrap(), "no-such-user-zz");
    }

    #[test]
    fn test_parent_directory_defaults() {
        assert_eq!(parent_directory("/opt/app/run.sh"), "/opt/app");
        assert_eq!(parent_directory("run.sh"), "/");
    }
}
