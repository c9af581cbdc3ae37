use crate::artifacts::extract::Strategy;
use crate::artifacts::graph::builder::Extraction;
use anyhow::Context;
use colored::Colorize;
use std::cell::{RefCell, RefMut};
use std::path::Path;

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path)
            .canonicalize()
            .context(format!("Repository path {path} does not exist"))?;

        if !path.is_dir() {
            anyhow::bail!("Repository path {} is not a directory", path.display());
        }

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
        })
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    /// Run the chosen extraction strategy and report anything it skipped
    pub fn extract(&self, strategy: Strategy) -> anyhow::Result<Extraction> {
        let extraction = strategy
            .extractor()
            .resolve(&self.path)
            .context(format!("Unable to extract dependencies with the {strategy} strategy"))?;

        if !extraction.is_complete() {
            eprintln!(
                "{} skipped {} object(s) while building the graph",
                "warning:".yellow().bold(),
                extraction.diagnostics.len()
            );
            for diagnostic in &extraction.diagnostics {
                eprintln!("  {diagnostic}");
            }
        }

        Ok(extraction)
    }
}
