//! Shared helpers for CLI specs.
//!
//! A `Workspace` is a temp directory holding a config file, a ledger, and an
//! outbox spool. `ws.mg()` builds an invocation of the binary against it.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Workspace with the default outbox transport
    pub fn empty() -> Self {
        Self::with_config("")
    }

    /// Workspace with extra TOML tables appended to the generated config
    pub fn with_config(extra: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let config = format!(
            r#"app_name = "Mailgate"

[store]
path = "{store}"

[mail]
sender = "noreply@example.com"
transport = "outbox"
outbox_path = "{outbox}"

{extra}
"#,
            extra = extra,
            store = root.join("ledger.wal").display(),
            outbox = root.join("outbox.jsonl").display(),
        );
        std::fs::write(root.join("mailgate.toml"), config).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("mailgate.toml")
    }

    /// Build an `mg` invocation against this workspace
    pub fn mg(&self) -> Cli {
        let mut cmd = Command::cargo_bin("mg").unwrap();
        cmd.arg("--config")
            .arg(self.config_path())
            .env_remove("MAILGATE_CONFIG")
            .env_remove("MAILGATE_RELAY_TOKEN")
            .env_remove("MAILGATE_STORE")
            .env_remove("MAILGATE_LOG");
        Cli { cmd }
    }

    /// Messages in the outbox spool, oldest first
    pub fn outbox(&self) -> Vec<Value> {
        let path = self.path().join("outbox.jsonl");
        match std::fs::read_to_string(path) {
            Ok(text) => text
                .lines()
                .filter(|l| !l.trim().is_empty())
                .map(|l| serde_json::from_str(l).unwrap())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// The token in the latest message body
    pub fn last_token(&self) -> String {
        let messages = self.outbox();
        let body = messages.last().unwrap()["body"].as_str().unwrap().to_string();
        let start = body.find("<strong>").unwrap() + "<strong>".len();
        let end = body[start..].find("</strong>").unwrap() + start;
        body[start..end].to_string()
    }
}

pub struct Cli {
    cmd: Command,
}

impl Cli {
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and expect exit code 0
    pub fn passes(mut self) -> Run {
        let output = self.cmd.output().unwrap();
        let run = Run::from(output);
        assert_eq!(
            run.code, 0,
            "expected success\nstdout:\n{}\nstderr:\n{}",
            run.stdout, run.stderr
        );
        run
    }

    /// Run and expect the given non-zero exit code
    pub fn exits_with(mut self, code: i32) -> Run {
        let output = self.cmd.output().unwrap();
        let run = Run::from(output);
        assert_eq!(
            run.code, code,
            "unexpected exit code\nstdout:\n{}\nstderr:\n{}",
            run.stdout, run.stderr
        );
        run
    }
}

pub struct Run {
    code: i32,
    stdout: String,
    stderr: String,
}

impl From<std::process::Output> for Run {
    fn from(output: std::process::Output) -> Self {
        Self {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

impl Run {
    pub fn stdout_has(&self, needle: &str) -> &Self {
        assert!(
            predicate::str::contains(needle).eval(&self.stdout),
            "stdout missing {:?}\nstdout:\n{}",
            needle,
            self.stdout
        );
        self
    }

    pub fn stderr_has(&self, needle: &str) -> &Self {
        assert!(
            predicate::str::contains(needle).eval(&self.stderr),
            "stderr missing {:?}\nstderr:\n{}",
            needle,
            self.stderr
        );
        self
    }

    pub fn stdout_eq(&self, expected: &str) -> &Self {
        similar_asserts::assert_eq!(self.stdout.as_str(), expected);
        self
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.stdout).unwrap()
    }
}
