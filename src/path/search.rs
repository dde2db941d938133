use pathfinding::prelude::dijkstra;

use crate::graph::{Node, QueryGraph};

/// Shortest chain of links from `start` to `goal`, both included.
///
/// Edge weights are Euclidean lengths scaled by `cost_resolution` and
/// rounded to integers for the search. Returns `None` if `goal` is not
/// reachable.
#[must_use]
pub fn shortest_path(
    graph: &QueryGraph<'_>,
    start: Node,
    goal: Node,
    cost_resolution: f64,
) -> Option<Vec<Node>> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let result = dijkstra(
        &start,
        |node| {
            graph
                .links(node)
                .map(|next| {
                    let scaled = (node.distance(&next) * cost_resolution).round() as u64;
                    (next, scaled)
                })
                .collect::<Vec<_>>()
        },
        |node| *node == goal,
    );
    result.map(|(nodes, _)| nodes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::graph::{DynamicLinks, StaticLinks};

    /// Square corners; the diagonal (0,0)–(10,10) is blocked.
    fn statics() -> StaticLinks {
        StaticLinks::calculate(
            vec![
                Node::new(0.0, 0.0),
                Node::new(10.0, 0.0),
                Node::new(10.0, 10.0),
                Node::new(0.0, 10.0),
            ],
            |p, q| (p.x - q.x).abs() < 1e-9 || (p.y - q.y).abs() < 1e-9,
        )
    }

    #[test]
    fn routes_around_blocked_link() {
        let statics = statics();
        let dynamic = DynamicLinks::default();
        let graph = QueryGraph::new(&statics, &dynamic);
        let path =
            shortest_path(&graph, Node::new(0.0, 0.0), Node::new(10.0, 10.0), 1000.0).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], Node::new(0.0, 0.0));
        assert_eq!(path[2], Node::new(10.0, 10.0));
    }

    #[test]
    fn start_equals_goal() {
        let statics = statics();
        let dynamic = DynamicLinks::default();
        let graph = QueryGraph::new(&statics, &dynamic);
        let path = shortest_path(&graph, Node::new(0.0, 0.0), Node::new(0.0, 0.0), 1000.0).unwrap();
        assert_eq!(path, vec![Node::new(0.0, 0.0)]);
    }

    #[test]
    fn prefers_shorter_total_length() {
        let statics = statics();
        // Goal sits near (10, 0): the path through that corner is shorter.
        let goal = Node::new(9.0, 1.0);
        let start = Node::new(0.0, 0.0);
        let dynamic = DynamicLinks::calculate(&statics, start, goal, |p, q| {
            // The goal only sees the two right-hand corners.
            p.x > 5.0 && q.x > 5.0
        });
        let graph = QueryGraph::new(&statics, &dynamic);
        let path = shortest_path(&graph, start, goal, 1000.0).unwrap();
        assert_eq!(path, vec![start, Node::new(10.0, 0.0), goal]);
    }

    #[test]
    fn unlinked_goal_is_unreachable() {
        let statics = statics();
        let goal = Node::new(5.0, 5.0);
        let dynamic = DynamicLinks::calculate(&statics, Node::new(0.0, 0.0), goal, |_, _| false);
        let graph = QueryGraph::new(&statics, &dynamic);
        assert!(shortest_path(&graph, Node::new(0.0, 0.0), goal, 1000.0).is_none());
    }
}
