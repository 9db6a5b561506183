use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Environment variables that would leak host configuration into a test run.
const SCRUBBED_ENV: &[&str] = &[
    "GH_TOKEN",
    "EOL_CHECK_GH",
    "EOL_CHECK_HTTP_TIMEOUT",
    "EOL_CHECK_WARN_DAYS",
    "EOL_CHECK_LOG",
    "EOL_CHECK_QUIET",
];

/// TestHarness provides an isolated working directory for running the
/// eol-check binary against inventory files.
pub struct TestHarness {
    pub dir: TempDir,
    pub binary: PathBuf,
    env: Vec<(String, String)>,
}

impl TestHarness {
    pub fn new() -> Self {
        TestHarness {
            dir: TempDir::new().expect("Failed to create temp dir"),
            binary: PathBuf::from(env!("CARGO_BIN_EXE_eol-check")),
            env: Vec::new(),
        }
    }

    /// Returns the base directory path (the TempDir path).
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes an inventory file and returns its path.
    pub fn write_inventory(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content).expect("Failed to write inventory");
        path
    }

    /// Sets an environment variable for subsequent runs.
    #[allow(dead_code)]
    pub fn env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    /// Executes the binary with the given arguments in the harness directory.
    pub fn run(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(&self.binary);
        cmd.args(args).current_dir(self.path()).env("NO_COLOR", "1");
        for key in SCRUBBED_ENV {
            cmd.env_remove(key);
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd.output().expect("Failed to run eol-check")
    }

    /// Installs a fake `gh` script and points EOL_CHECK_GH at it.
    ///
    /// Every invocation is appended to `gh.log`. With `fail` set, every call
    /// exits 1 with a credentials error. Otherwise `issue list` prints the
    /// contents of `gh-existing.json` when present, `[]` otherwise.
    #[cfg(unix)]
    #[allow(dead_code)]
    pub fn install_fake_gh(&mut self, fail: bool) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script_path = self.path().join("fake-gh");
        let log_path = self.path().join("gh.log");
        let existing_path = self.path().join("gh-existing.json");

        let body = if fail {
            "echo 'HTTP 401: Bad credentials' >&2\nexit 1\n".to_string()
        } else {
            format!(
                "case \"$2\" in\n  list) if [ -f '{existing}' ]; then cat '{existing}'; else echo '[]'; fi ;;\n  create) echo 'https://github.com/acme/repo/issues/1' ;;\nesac\n",
                existing = existing_path.display()
            )
        };
        // Issue bodies span lines; flatten each invocation onto one log line
        let script = format!(
            "#!/bin/sh\nprintf '%s' \"$*\" | tr '\\n' ' ' >> '{log}'\necho >> '{log}'\n{body}",
            log = log_path.display(),
            body = body
        );

        fs::write(&script_path, script).expect("Failed to write fake gh");
        fs::set_permissions(&script_path, fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod fake gh");

        let script_str = script_path.display().to_string();
        self.env("EOL_CHECK_GH", &script_str);
        script_path
    }

    /// Lines logged by the fake `gh`, one per invocation.
    #[allow(dead_code)]
    pub fn gh_calls(&self) -> Vec<String> {
        fs::read_to_string(self.path().join("gh.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
