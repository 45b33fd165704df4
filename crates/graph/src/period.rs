//! Period of a communicating class.

use std::collections::VecDeque;

use crate::error::GraphError;
use crate::graph::Graph;
use crate::hasse::HasseDiagram;

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Returns the period of a class: the gcd of the lengths of its cycles.
///
/// Levels are assigned by a breadth-first search from the class's smallest
/// member using intra-class edges only; every intra-class edge `u -> v`
/// contributes `level(u) + 1 - level(v)` to the gcd. A class without any
/// intra-class edge (a lone vertex with no self-loop) has period 0.
///
/// # Errors
///
/// Returns [`GraphError::ClassOutOfRange`] if `class` is unknown, or
/// [`GraphError::VertexOutOfRange`] if `hasse` was built for a larger graph.
///
/// # Example
///
/// ```
/// use ergo_graph::{Graph, HasseDiagram, class_period, strongly_connected_components};
///
/// let mut graph = Graph::new(2).unwrap();
/// graph.add_edge(1, 2, 1.0).unwrap();
/// graph.add_edge(2, 1, 1.0).unwrap();
/// let partition = strongly_connected_components(&graph);
/// let hasse = HasseDiagram::build(&graph, &partition).unwrap();
/// assert_eq!(class_period(&graph, &hasse, 0).unwrap(), 2);
/// ```
pub fn class_period(
    graph: &Graph,
    hasse: &HasseDiagram<'_>,
    class: usize,
) -> Result<usize, GraphError> {
    let members = hasse.partition().class(class)?.members();
    let Some(&start) = members.first() else {
        return Ok(0);
    };
    if start > graph.size() {
        return Err(GraphError::VertexOutOfRange {
            vertex: start,
            size: graph.size(),
        });
    }
    let classes = hasse.vertex_classes();

    let mut level: Vec<Option<usize>> = vec![None; graph.size()];
    level[start - 1] = Some(0);
    let mut queue = VecDeque::from([start]);
    let mut period = 0;

    while let Some(u) = queue.pop_front() {
        let lu = level[u - 1].unwrap_or_default();
        for edge in graph.neighbors(u)? {
            let v = edge.dst;
            if classes.get(v - 1) != Some(&class) {
                continue;
            }
            match level[v - 1] {
                None => {
                    level[v - 1] = Some(lu + 1);
                    queue.push_back(v);
                }
                Some(lv) => period = gcd(period, lu + 1 - lv),
            }
        }
    }
    Ok(period)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tarjan::strongly_connected_components;

    fn graph_from(size: usize, edges: &[(usize, usize)]) -> Graph {
        let mut g = Graph::new(size).unwrap();
        for &(s, d) in edges {
            g.add_edge(s, d, 1.0).unwrap();
        }
        g
    }

    fn period_of(g: &Graph, vertex: usize) -> usize {
        let p = strongly_connected_components(g);
        let h = HasseDiagram::build(g, &p).unwrap();
        class_period(g, &h, h.class_of(vertex).unwrap()).unwrap()
    }

    #[test]
    fn gcd_basics() {
        assert_eq!(gcd(0, 4), 4);
        assert_eq!(gcd(6, 4), 2);
        assert_eq!(gcd(3, 0), 3);
    }

    #[test]
    fn four_cycle_has_period_four() {
        let g = graph_from(4, &[(1, 2), (2, 3), (3, 4), (4, 1)]);
        assert_eq!(period_of(&g, 1), 4);
    }

    #[test]
    fn self_loop_is_aperiodic() {
        let g = graph_from(3, &[(1, 2), (2, 3), (3, 1), (1, 1)]);
        assert_eq!(period_of(&g, 2), 1);
    }

    #[test]
    fn cycles_of_two_and_three_are_aperiodic() {
        let g = graph_from(3, &[(1, 2), (2, 1), (2, 3), (3, 1)]);
        assert_eq!(period_of(&g, 1), 1);
    }

    #[test]
    fn cycles_of_two_and_four_have_period_two() {
        let g = graph_from(4, &[(1, 2), (2, 1), (2, 3), (3, 4), (4, 1)]);
        assert_eq!(period_of(&g, 3), 2);
    }

    #[test]
    fn lone_vertex_has_period_zero() {
        let g = graph_from(2, &[(1, 2), (2, 2)]);
        assert_eq!(period_of(&g, 1), 0);
        assert_eq!(period_of(&g, 2), 1);
    }

    #[test]
    fn unknown_class() {
        let g = graph_from(1, &[]);
        let p = strongly_connected_components(&g);
        let h = HasseDiagram::build(&g, &p).unwrap();
        assert!(matches!(
            class_period(&g, &h, 3),
            Err(GraphError::ClassOutOfRange { class: 3, .. })
        ));
    }
}
