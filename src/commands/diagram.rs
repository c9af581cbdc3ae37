use crate::areas::repository::Repository;
use crate::artifacts::diagram::mermaid::to_mermaid;
use crate::artifacts::extract::Strategy;

impl Repository {
    pub fn diagram(&mut self, strategy: Strategy) -> anyhow::Result<()> {
        let extraction = self.extract(strategy)?;

        writeln!(self.writer(), "{}", to_mermaid(&extraction.graph))?;

        Ok(())
    }
}
