use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    run_git_command(dir.path(), &["init", "--quiet"])
        .status()
        .expect("Failed to run git init");
    dir
}

/// Repository with two commits: `file1.txt`, then `file2.txt`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    git_commit_file(repository_dir.path(), "file1.txt", "one\n", "Add file1");
    git_commit_file(repository_dir.path(), "file2.txt", "two\n", "Add file2");
    repository_dir
}

pub fn run_commit_deps_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("commit-deps").expect("Failed to find commit-deps binary");
    cmd.envs(vec![("NO_COLOR", "1")]);
    cmd.env_remove("COMMIT_DEPS_STRATEGY");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn run_git_command(dir: &Path, args: &[&str]) -> std::process::Command {
    let mut cmd = std::process::Command::new("git");
    cmd.envs(vec![
        ("GIT_AUTHOR_NAME", "Test Author"),
        ("GIT_AUTHOR_EMAIL", "author@example.com"),
        ("GIT_COMMITTER_NAME", "Test Author"),
        ("GIT_COMMITTER_EMAIL", "author@example.com"),
        ("GIT_CONFIG_NOSYSTEM", "1"),
    ]);
    cmd.args(["-c", "commit.gpgsign=false", "-c", "init.defaultBranch=master"]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn git_commit_file(dir: &Path, name: &str, content: &str, message: &str) {
    std::fs::write(dir.join(name), content).expect("Failed to write file");

    let added = run_git_command(dir, &["add", name])
        .status()
        .expect("Failed to run git add");
    assert!(added.success(), "git add {name} failed");

    let committed = run_git_command(dir, &["commit", "--quiet", "-m", message])
        .status()
        .expect("Failed to run git commit");
    assert!(committed.success(), "git commit failed");
}

/// Commit ids from oldest to newest
pub fn commit_history(dir: &Path) -> Vec<String> {
    let output = run_git_command(dir, &["log", "--format=%H"])
        .output()
        .expect("Failed to run git log");

    let mut history: Vec<String> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect();
    history.reverse();
    history
}

#[cfg(unix)]
pub fn fake_renderer(dir: &Path, exit_code: i32) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-mmdc");
    std::fs::write(
        &script,
        format!("#!/bin/sh\ncp \"$2\" \"$4\"\nexit {exit_code}\n"),
    )
    .expect("Failed to write fake renderer");
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake renderer executable");
    script
}
