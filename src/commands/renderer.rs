use crate::errors::DepsError;
use derive_new::new;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

/// External diagram renderer, invoked as `<executable> -i <input> -o <output>`
#[derive(Debug, Clone, new)]
pub struct Renderer {
    executable: PathBuf,
}

impl Renderer {
    /// Write `diagram` to a temporary `.mmd` file and render it to `output`
    ///
    /// The temporary file is removed whether or not rendering succeeds.
    pub fn render(&self, diagram: &str, output: &Path) -> Result<(), DepsError> {
        let mut file = tempfile::Builder::new()
            .prefix("commit-deps-")
            .suffix(".mmd")
            .tempfile()
            .map_err(|err| self.failure(format!("unable to create diagram input: {err}")))?;

        file.write_all(diagram.as_bytes()).map_err(|err| {
            self.failure(format!("unable to write {}: {err}", file.path().display()))
        })?;

        // closes the handle, the path itself lives until `close` or drop
        let input = file.into_temp_path();
        let result = self.run(&input, output);

        let path = input.to_path_buf();
        if let Err(err) = input.close() {
            tracing::warn!(path = %path.display(), error = %err, "unable to remove diagram input");
        }

        result
    }

    fn run(&self, input: &Path, output: &Path) -> Result<(), DepsError> {
        tracing::info!(
            renderer = %self.executable.display(),
            output = %output.display(),
            "rendering diagram"
        );

        let status = Command::new(&self.executable)
            .arg("-i")
            .arg(input)
            .arg("-o")
            .arg(output)
            .status()
            .map_err(|err| self.failure(format!("unable to start: {err}")))?;

        if !status.success() {
            return Err(self.failure(format!("exited with {status}")));
        }

        Ok(())
    }

    fn failure(&self, reason: String) -> DepsError {
        DepsError::RendererInvocation {
            executable: self.executable.clone(),
            reason,
        }
    }
}
