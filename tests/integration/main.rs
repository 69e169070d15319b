//! Integration tests for Pupprinteer

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use pupprinteer::chrome::PlatformId;
    use std::fs::File;
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const ENV_VARS: &[&str] = &[
        "PUPPRINTEER_CONFIG",
        "PUPPRINTEER_CACHE_DIR",
        "PUPPRINTEER_CHROME_ARCHIVE",
        "PUPPRINTEER_CHROME_VERSION_FILE",
        "PUPPRINTEER_CHROME_EXECUTABLE",
    ];

    /// Command isolated from the user's config and environment
    fn pupprinteer(temp: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("pupprinteer");
        for var in ENV_VARS {
            cmd.env_remove(var);
        }
        cmd.env("CI", "1");
        cmd.arg("--config").arg(temp.path().join("config.toml"));
        cmd
    }

    /// Bundle directory with `chrome.zip` and `version.txt` for this host
    fn write_bundle(temp: &TempDir, version: &str) -> PathBuf {
        let bundle = temp.path().join("bundle");
        std::fs::create_dir_all(&bundle).unwrap();
        write_chrome_zip(&bundle.join("chrome.zip"));
        std::fs::write(bundle.join("version.txt"), format!("{}\n", version)).unwrap();
        bundle
    }

    fn write_chrome_zip(path: &Path) {
        let platform = PlatformId::detect().unwrap();
        let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .unix_permissions(0o644);

        let folder = platform.folder_name();
        zip.add_directory(format!("{}/", folder), options).unwrap();
        zip.start_file(format!("{}/{}", folder, platform.executable_name()), options)
            .unwrap();
        zip.write_all(b"#!/bin/sh\necho headless\n").unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        pupprinteer(&temp)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("bundled headless Chrome"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        pupprinteer(&temp)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("pupprinteer"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        pupprinteer(&temp)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let temp = TempDir::new().unwrap();
        pupprinteer(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[general]"));
    }

    #[test]
    fn config_init_writes_file() {
        let temp = TempDir::new().unwrap();
        pupprinteer(&temp)
            .args(["config", "init"])
            .assert()
            .success();

        let written = std::fs::read_to_string(temp.path().join("config.toml")).unwrap();
        assert!(written.contains("log_format"));
    }

    #[test]
    fn invalid_config_is_reported() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("config.toml"), "[chrome\n").unwrap();

        pupprinteer(&temp)
            .args(["config", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn ensure_missing_archive_fails() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("version.txt"), "123.0.0.0\n").unwrap();

        pupprinteer(&temp)
            .arg("ensure")
            .arg("--cache-dir")
            .arg(temp.path().join("cache"))
            .arg("--chrome-archive")
            .arg(temp.path().join("chrome.zip"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Chrome archive not found"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn ensure_missing_version_file_fails() {
        let temp = TempDir::new().unwrap();

        pupprinteer(&temp)
            .arg("ensure")
            .arg("--cache-dir")
            .arg(temp.path().join("cache"))
            .arg("--chrome-archive")
            .arg(temp.path().join("chrome.zip"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to read bundled Chrome version"));
    }

    #[test]
    fn ensure_with_executable_override_prints_path() {
        let temp = TempDir::new().unwrap();

        pupprinteer(&temp)
            .args(["ensure", "--chrome-executable", "/usr/bin/chromium"])
            .assert()
            .success()
            .stdout(predicate::str::contains("/usr/bin/chromium"));

        assert!(!temp.path().join("cache").exists());
    }

    #[test]
    fn ensure_extracts_then_reuses() {
        let temp = TempDir::new().unwrap();
        let bundle = write_bundle(&temp, "123.0.0.0");
        let cache = temp.path().join("cache");
        let platform = PlatformId::detect().unwrap();
        let expected = platform.executable_path(&cache);

        pupprinteer(&temp)
            .arg("ensure")
            .arg("--cache-dir")
            .arg(&cache)
            .arg("--chrome-archive")
            .arg(bundle.join("chrome.zip"))
            .assert()
            .success()
            .stdout(predicate::str::contains(expected.display().to_string()));

        assert!(expected.exists());
        assert_eq!(
            std::fs::read_to_string(cache.join("version.txt")).unwrap(),
            "123.0.0.0"
        );

        // Second run must not need the archive
        std::fs::remove_file(bundle.join("chrome.zip")).unwrap();

        pupprinteer(&temp)
            .arg("-v")
            .arg("ensure")
            .arg("--cache-dir")
            .arg(&cache)
            .arg("--chrome-archive")
            .arg(bundle.join("chrome.zip"))
            .assert()
            .success()
            .stdout(predicate::str::contains(expected.display().to_string()))
            .stderr(predicate::str::contains("skipping extraction"));
    }

    #[test]
    fn debug_json_reports_cache() {
        let temp = TempDir::new().unwrap();
        let bundle = write_bundle(&temp, "123.0.0.0");
        let cache = temp.path().join("cache");

        let output = pupprinteer(&temp)
            .args(["debug", "--format", "json"])
            .arg("--cache-dir")
            .arg(&cache)
            .arg("--chrome-archive")
            .arg(bundle.join("chrome.zip"))
            .output()
            .unwrap();
        assert!(output.status.success());

        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(
            report["platform"],
            PlatformId::detect().unwrap().as_str()
        );
        assert_eq!(report["bundle"]["declared_version"], "123.0.0.0");
        assert_eq!(report["bundle"]["archive_exists"], true);
        assert_eq!(report["cache"]["reusable"], false);
        assert!(!cache.exists());
    }

    #[test]
    fn debug_text_report_goes_to_stdout() {
        let temp = TempDir::new().unwrap();
        let bundle = write_bundle(&temp, "123.0.0.0");

        pupprinteer(&temp)
            .args(["-q", "debug"])
            .arg("--cache-dir")
            .arg(temp.path().join("cache"))
            .arg("--chrome-archive")
            .arg(bundle.join("chrome.zip"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Reusable"))
            .stdout(predicate::str::contains("123.0.0.0"))
            .stdout(predicate::str::contains(PlatformId::detect().unwrap().as_str()));
    }

    #[test]
    fn clear_removes_extracted_cache() {
        let temp = TempDir::new().unwrap();
        let bundle = write_bundle(&temp, "123.0.0.0");
        let cache = temp.path().join("cache");

        pupprinteer(&temp)
            .arg("ensure")
            .arg("--cache-dir")
            .arg(&cache)
            .arg("--chrome-archive")
            .arg(bundle.join("chrome.zip"))
            .assert()
            .success();

        pupprinteer(&temp)
            .args(["clear", "--yes"])
            .arg("--cache-dir")
            .arg(&cache)
            .assert()
            .success();

        let platform = PlatformId::detect().unwrap();
        assert!(!platform.executable_path(&cache).exists());
        assert!(!cache.join("version.txt").exists());
    }

    #[test]
    fn clear_without_cache_is_noop() {
        let temp = TempDir::new().unwrap();

        pupprinteer(&temp)
            .args(["clear", "--yes"])
            .arg("--cache-dir")
            .arg(temp.path().join("cache"))
            .assert()
            .success()
            .stderr(predicate::str::contains("Nothing to clear"));
    }
}
