use crate::artifacts::graph::dependency_graph::DependencyGraph;

const HEADER: &str = "graph TD";
const INDENT: &str = "    ";

/// Serialize the graph as a Mermaid top-down flowchart
///
/// Every commit becomes a node of class `commit` with one edge per name.
/// Lines are joined with `\n`, without a trailing newline.
pub fn to_mermaid(graph: &DependencyGraph) -> String {
    let mut lines = vec![HEADER.to_string()];

    for (commit, names) in graph.iter() {
        lines.push(format!("{INDENT}{commit}:::commit"));
        for name in names {
            lines.push(format!("{INDENT}{commit} --> {name}"));
        }
    }

    lines.join("\n")
}
