use crate::math::Point2;

use super::{LinkGraph, Node};

/// Links between persistent mesh nodes, computed once at load.
#[derive(Debug, Clone, Default)]
pub struct StaticLinks {
    nodes: Vec<Node>,
    graph: LinkGraph,
}

impl StaticLinks {
    /// Links every pair of distinct `nodes` for which `visible` holds.
    ///
    /// Each ordered pair is tested unless the reverse pair already linked
    /// them. Cost is quadratic in the node count.
    pub fn calculate<F>(nodes: Vec<Node>, visible: F) -> Self
    where
        F: Fn(&Point2, &Point2) -> bool,
    {
        let mut graph = LinkGraph::new();
        for outer in &nodes {
            for inner in &nodes {
                if outer == inner || graph.is_linked(outer, inner) {
                    continue;
                }
                if visible(&outer.0, &inner.0) {
                    graph.link(*outer, *inner);
                }
            }
        }
        Self { nodes, graph }
    }

    /// The persistent node set.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns `true` if `node` is one of the persistent nodes.
    #[must_use]
    pub fn is_node(&self, node: &Node) -> bool {
        self.nodes.contains(node)
    }

    /// The link graph between persistent nodes.
    #[must_use]
    pub fn graph(&self) -> &LinkGraph {
        &self.graph
    }
}
