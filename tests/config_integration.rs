//! Integration tests for configuration through the CLI.
//!
//! These tests verify:
//! - `config set` / `get` / `list` in repo and global scope
//! - The global config file named by `REMOTELINK_CONFIG`
//! - Repo settings overriding global ones
//! - Invalid files and values are rejected

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Env {
    home: TempDir,
}

impl Env {
    fn new() -> Self {
        let env = Self {
            home: TempDir::new().unwrap(),
        };
        let repo = git2::Repository::init(env.repo()).unwrap();
        repo.remote("origin", "git@github.com:o/r.git").unwrap();
        repo.remote("upstream", "git@gitlab.com:g/p.git").unwrap();
        env
    }

    fn repo(&self) -> PathBuf {
        self.home.path().join("repo")
    }

    fn global_config(&self) -> PathBuf {
        self.home.path().join("global.toml")
    }

    fn repo_config(&self) -> PathBuf {
        self.repo().join(".git/remotelink/config.toml")
    }

    fn write_global(&self, contents: &str) {
        fs::write(self.global_config(), contents).unwrap();
    }

    fn rl_in(&self, dir: &Path) -> Command {
        let mut cmd = Command::cargo_bin("rl").unwrap();
        cmd.current_dir(dir)
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.home.path().join("xdg"))
            .env("REMOTELINK_CONFIG", self.global_config())
            .env_remove("RUST_LOG");
        cmd
    }

    fn rl(&self) -> Command {
        self.rl_in(&self.repo())
    }
}

mod set_and_get {
    use super::*;

    #[test]
    fn repo_scope() {
        let env = Env::new();

        env.rl()
            .args(["config", "set", "remote", "upstream"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Set remote = upstream"));

        assert!(env.repo_config().exists());
        assert!(!env.global_config().exists());

        env.rl()
            .args(["config", "get", "remote"])
            .assert()
            .success()
            .stdout("upstream\n");

        // The configured remote is now the one links go to.
        env.rl()
            .args(["url", "repo"])
            .assert()
            .success()
            .stdout("https://gitlab.com/g/p\n");
    }

    #[test]
    fn global_scope() {
        let env = Env::new();

        env.rl()
            .args(["config", "set", "--global", "protocol", "http"])
            .assert()
            .success();

        let written = fs::read_to_string(env.global_config()).unwrap();
        assert!(written.contains("protocol = \"http\""));

        env.rl()
            .args(["url", "commit", "abc"])
            .assert()
            .success()
            .stdout("http://github.com/o/r/commit/abc\n");
    }

    #[test]
    fn quiet_set_prints_nothing() {
        let env = Env::new();
        env.rl()
            .args(["-q", "config", "set", "protocol", "http"])
            .assert()
            .success()
            .stdout("")
            .stderr("");
    }

    #[test]
    fn defaults() {
        let env = Env::new();
        env.rl()
            .args(["config", "get", "protocol"])
            .assert()
            .success()
            .stdout("https\n");
        env.rl()
            .args(["config", "get", "remote"])
            .assert()
            .success()
            .stdout("origin\n");
    }

    #[test]
    fn repo_overrides_global() {
        let env = Env::new();
        env.write_global("remote = \"upstream\"\nprotocol = \"http\"\n");

        env.rl()
            .args(["config", "set", "protocol", "https"])
            .assert()
            .success();

        env.rl()
            .args(["config", "get", "protocol"])
            .assert()
            .success()
            .stdout("https\n");
        env.rl()
            .args(["config", "get", "remote"])
            .assert()
            .success()
            .stdout("upstream\n");
    }

    #[test]
    fn set_outside_repo_needs_global() {
        let env = Env::new();
        env.rl_in(env.home.path())
            .args(["config", "set", "remote", "upstream"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--global"));
    }
}

mod list {
    use super::*;

    #[test]
    fn shows_keys_and_remotes() {
        let env = Env::new();
        env.write_global(
            r#"
            [[remotes]]
            domain = "git.corp.example"
            type = "gitlab"
            "#,
        );

        env.rl()
            .args(["config", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("remote"))
            .stdout(predicate::str::contains("protocol"))
            .stdout(predicate::str::contains("remotes.git.corp.example"));
    }
}

mod remotes {
    use super::*;

    #[test]
    fn configured_host_from_global_file() {
        let env = Env::new();
        env.write_global(
            r#"
            [[remotes]]
            domain = "git.corp.example"
            type = "bitbucket-server"
            "#,
        );

        env.rl()
            .args([
                "--remote-url",
                "https://git.corp.example/scm/proj/tool.git",
                "url",
                "commit",
                "abc",
            ])
            .assert()
            .success()
            .stdout("https://git.corp.example/projects/PROJ/repos/tool/commits/abc\n");
    }

    #[test]
    fn custom_templates() {
        let env = Env::new();
        env.write_global(
            r#"
            [[remotes]]
            domain = "code.internal"
            type = "custom"
            name = "Internal"

            [remotes.urls]
            repository = "https://code.internal/${repo}"
            branch = "https://code.internal/${repo}/log/${branch}"
            commit = "https://code.internal/${repo}/rev/${id}"
            file = "https://code.internal/${repo}/view/${file}${line}"
            "#,
        );

        env.rl()
            .args([
                "--remote-url",
                "git@code.internal:team/app.git",
                "url",
                "commit",
                "c0ffee",
            ])
            .assert()
            .success()
            .stdout("https://code.internal/team/app/rev/c0ffee\n");
    }
}

mod invalid {
    use super::*;

    #[test]
    fn unknown_key_in_file() {
        let env = Env::new();
        env.write_global("colour = \"blue\"\n");

        env.rl()
            .args(["url", "repo"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to load config"));
    }

    #[test]
    fn unknown_remote_type() {
        let env = Env::new();
        env.write_global(
            r#"
            [[remotes]]
            domain = "git.corp.example"
            type = "sourcehut"
            "#,
        );

        env.rl()
            .args(["config", "list"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid remote type 'sourcehut'"));
    }

    #[test]
    fn unknown_key_on_set() {
        let env = Env::new();
        env.rl()
            .args(["config", "set", "editor", "vim"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown key"));
    }

    #[test]
    fn bad_protocol_value() {
        let env = Env::new();
        env.rl()
            .args(["config", "set", "protocol", "ftp"])
            .assert()
            .failure();
        assert!(!env.repo_config().exists());
    }
}
