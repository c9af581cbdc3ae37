use crate::areas::repository::Repository;
use crate::artifacts::extract::Strategy;
use colored::Colorize;

impl Repository {
    pub fn list(&mut self, strategy: Strategy, abbrev_commit: bool) -> anyhow::Result<()> {
        let extraction = self.extract(strategy)?;

        for (commit, names) in extraction.graph.iter() {
            let commit = if abbrev_commit {
                commit.to_short_oid()
            } else {
                commit.to_string()
            };

            writeln!(self.writer(), "{} {}", commit.yellow(), names.join(" "))?;
        }

        Ok(())
    }
}
