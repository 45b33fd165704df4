//! Mermaid flowchart rendering of graphs and Hasse diagrams.

use std::fmt;

use ergo_graph::{Graph, HasseDiagram};

use crate::label::vertex_label;

const GRAPH_HEADER: &str = "---\nconfig:\n  layout: elk\n  theme: neo\n  look: neo\n---\n\nflowchart LR\n";
const HASSE_HEADER: &str = "---\nconfig:\n  layout: elk\n  theme: mc\n  look: classic\n---\n\nflowchart LR\n";

/// Renders a graph as a Mermaid flowchart.
///
/// One circular node `A((1))` per vertex, then one edge `A -->|0.50000|B`
/// per graph edge in vertex order.
pub fn graph_to_mermaid(graph: &Graph) -> String {
    GraphChart(graph).to_string()
}

/// Renders a Hasse diagram as a Mermaid flowchart.
///
/// One node `A["{1,2}"]` per class (labelled by class position), then one
/// `A --> B` line per link.
pub fn hasse_to_mermaid(hasse: &HasseDiagram<'_>) -> String {
    HasseChart(hasse).to_string()
}

struct GraphChart<'a>(&'a Graph);

impl fmt::Display for GraphChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let graph = self.0;
        f.write_str(GRAPH_HEADER)?;
        for v in 1..=graph.size() {
            writeln!(f, "{}(({v}))", vertex_label(v))?;
        }
        writeln!(f)?;
        for (src, edge) in graph.edges() {
            writeln!(
                f,
                "{} -->|{:.5}|{}",
                vertex_label(src),
                edge.weight,
                vertex_label(edge.dst)
            )?;
        }
        Ok(())
    }
}

struct HasseChart<'a, 'p>(&'a HasseDiagram<'p>);

impl fmt::Display for HasseChart<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hasse = self.0;
        f.write_str(HASSE_HEADER)?;
        for class in hasse.partition() {
            let members: Vec<String> = class.members().iter().map(ToString::to_string).collect();
            writeln!(
                f,
                "{}[\"{{{}}}\"]",
                vertex_label(class.id() + 1),
                members.join(",")
            )?;
        }
        writeln!(f)?;
        for link in hasse.links() {
            writeln!(
                f,
                "{} --> {}",
                vertex_label(link.src + 1),
                vertex_label(link.dst + 1)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ergo_graph::strongly_connected_components;

    fn chain() -> Graph {
        let mut g = Graph::new(3).unwrap();
        g.add_edge(1, 2, 0.5).unwrap();
        g.add_edge(1, 1, 0.5).unwrap();
        g.add_edge(2, 3, 1.0).unwrap();
        g.add_edge(3, 3, 1.0).unwrap();
        g
    }

    #[test]
    fn graph_nodes_and_weighted_edges() {
        let text = graph_to_mermaid(&chain());
        assert!(text.starts_with("---\nconfig:\n  layout: elk\n"));
        assert!(text.contains("flowchart LR\nA((1))\nB((2))\nC((3))\n\n"));
        // Newest edge first within a vertex.
        assert!(text.contains("A -->|0.50000|A\nA -->|0.50000|B\n"));
        assert!(text.ends_with("B -->|1.00000|C\nC -->|1.00000|C\n"));
    }

    #[test]
    fn hasse_nodes_and_links() {
        let g = chain();
        let p = strongly_connected_components(&g);
        let h = HasseDiagram::build(&g, &p).unwrap();
        let text = hasse_to_mermaid(&h);
        // Classes close in reverse topological order: {3}, {2}, {1}.
        assert!(text.contains("flowchart LR\nA[\"{3}\"]\nB[\"{2}\"]\nC[\"{1}\"]\n\n"));
        assert!(text.contains("C --> B\n"));
        assert!(text.contains("B --> A\n"));
        assert_eq!(text.matches("-->").count(), 2);
    }

    #[test]
    fn multi_member_class_label() {
        let mut g = Graph::new(2).unwrap();
        g.add_edge(1, 2, 1.0).unwrap();
        g.add_edge(2, 1, 1.0).unwrap();
        let p = strongly_connected_components(&g);
        let h = HasseDiagram::build(&g, &p).unwrap();
        assert!(hasse_to_mermaid(&h).contains("A[\"{1,2}\"]\n"));
    }
}
