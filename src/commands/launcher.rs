use anyhow::Context;
use std::path::Path;
use std::process::Command;

/// Open a file with the platform's default viewer
pub fn open(path: &Path) -> anyhow::Result<()> {
    let mut command = opener_command();
    command.arg(path);

    let status = command
        .status()
        .context(format!("Unable to launch a viewer for {}", path.display()))?;

    if !status.success() {
        anyhow::bail!("Viewer for {} exited with {status}", path.display());
    }

    Ok(())
}

#[cfg(target_os = "windows")]
fn opener_command() -> Command {
    let mut command = Command::new("cmd");
    // empty title, otherwise `start` takes a quoted path as the window title
    command.args(["/C", "start", ""]);
    command
}

#[cfg(target_os = "macos")]
fn opener_command() -> Command {
    Command::new("open")
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn opener_command() -> Command {
    Command::new("xdg-open")
}
