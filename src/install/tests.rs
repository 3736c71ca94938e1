#[cfg(test)]
mod tests {
    use super::super::*;
    use tempfile::tempdir;

    #[test]
    fn test_stage_writes_both_copies() {
        let backup_dir = tempdir().unwrap();
        let staged = stage("[Unit]\n", "demo.service", backup_dir.path()).unwrap();

        assert_eq!(fs::read_to_string(&staged.staged_path).unwrap(), "[Unit]\n");
        assert_eq!(fs::read_to_string(&staged.backup_path).unwrap(), "[Unit]\n");
        assert_eq!(
            staged.backup_path,
            backup_dir.path().join("demo.service")
        );
    }

    #[test]
    fn test_stage_overwrites_existing_backup() {
        let backup_dir = tempdir().unwrap();
        fs::write(backup_dir.path().join("demo.service"), "old contents").unwrap();

        let staged = stage("new contents", "demo.service", backup_dir.path()).unwrap();
        assert_eq!(
            fs::read_to_string(&staged.backup_path).unwrap(),
            "new contents"
        );
    }

    #[test]
    fn test_can_install_writable_directory() {
        let dir = tempdir().unwrap();
        assert!(can_install(dir.path()));
    }

    #[test]
    fn test_can_install_missing_directory() {
        assert!(!can_install(Path::new("/nonexistent/unit/dir")));
    }

    #[test]
    fn test_install_copies_unit_into_directory() {
        let backup_dir = tempdir().unwrap();
        let unit_dir = tempdir().unwrap();
        let staged = stage("[Unit]\nDescription=x\n", "demo.service", backup_dir.path()).unwrap();

        // systemctl steps are best-effort; only the copy is asserted here
        let outcome = install(
            &staged,
            "demo",
            "demo.service",
            unit_dir.path(),
            false,
            false,
        )
        .unwrap();

        assert!(outcome.installed);
        let installed = fs::read_to_string(unit_dir.path().join("demo.service")).unwrap();
        assert_eq!(installed, "[Unit]\nDescription=x\n");
    }

    #[test]
    fn test_unit_path() {
        assert_eq!(
            unit_path(Path::new("/etc/systemd/system"), "demo.service"),
            PathBuf::from("/etc/systemd/system/demo.service")
        );
    }

    #[test]
    fn test_manual_instructions_mention_each_step() {
        let text = manual_instructions(
            Path::new("/home/op/demo.service"),
            Path::new("/etc/systemd/system"),
            "demo",
            true,
        );
        assert!(text.contains("cp /home/op/demo.service /etc/systemd/system/"));
        assert!(text.contains("systemctl daemon-reload"));
        assert!(text.contains("systemctl enable demo"));
        assert!(text.contains("systemctl start demo"));
    }

    #[test]
    fn test_manual_instructions_without_enable() {
        let text = manual_instructions(
            Path::new("/home/op/demo.service"),
            Path::new("/etc/systemd/system"),
            "demo",
            false,
        );
        assert!(!text.contains("systemctl enable"));
    }
}
