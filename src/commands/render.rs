use crate::areas::repository::Repository;
use crate::artifacts::diagram::mermaid::to_mermaid;
use crate::artifacts::extract::Strategy;
use crate::commands::launcher;
use crate::commands::renderer::Renderer;
use colored::Colorize;
use std::path::PathBuf;

/// Default image written next to the current directory
pub const DEFAULT_OUTPUT: &str = "graph_output.png";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub visualizer: PathBuf,
    pub output: PathBuf,
    pub strategy: Strategy,
    pub open: bool,
}

impl Repository {
    pub fn render(&mut self, opts: &RenderOptions) -> anyhow::Result<()> {
        let extraction = self.extract(opts.strategy)?;
        let diagram = to_mermaid(&extraction.graph);

        Renderer::new(opts.visualizer.clone()).render(&diagram, &opts.output)?;

        writeln!(
            self.writer(),
            "{} {}",
            "Graph saved to".green(),
            opts.output.display()
        )?;

        if opts.open {
            // the image exists at this point, a missing viewer is not a failure
            if let Err(err) = launcher::open(&opts.output) {
                let reason = format!("{err:#}");
                tracing::warn!(error = %reason, "unable to open the rendered graph");
            }
        }

        Ok(())
    }
}
