//! Undirected visibility graphs over mesh nodes.
//!
//! Static links cover the persistent boundary nodes and are computed once.
//! Dynamic links attach the transient endpoints of a single query to the
//! static node set and are rebuilt per query. A [`QueryGraph`] joins both.

mod dynamic_links;
mod node;
mod static_links;

pub use dynamic_links::DynamicLinks;
pub use node::Node;
pub use static_links::StaticLinks;

use std::collections::{HashMap, HashSet};

/// An undirected adjacency map keyed by node value.
#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    links: HashMap<Node, HashSet<Node>>,
}

impl LinkGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Links `a` and `b` in both directions.
    pub fn link(&mut self, a: Node, b: Node) {
        self.links.entry(a).or_default().insert(b);
        self.links.entry(b).or_default().insert(a);
    }

    /// Returns `true` if `a` and `b` are directly linked.
    #[must_use]
    pub fn is_linked(&self, a: &Node, b: &Node) -> bool {
        self.links.get(a).is_some_and(|set| set.contains(b))
    }

    /// Iterates over the direct neighbors of `node`.
    pub fn neighbors<'a>(&'a self, node: &Node) -> impl Iterator<Item = Node> + 'a {
        self.links.get(node).into_iter().flatten().copied()
    }

    /// Number of undirected links.
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.values().map(HashSet::len).sum::<usize>() / 2
    }

    /// Removes all links.
    pub fn clear(&mut self) {
        self.links.clear();
    }
}

/// Adjacency view over the union of static and dynamic links.
#[derive(Debug, Clone, Copy)]
pub struct QueryGraph<'a> {
    statics: &'a StaticLinks,
    dynamic: &'a DynamicLinks,
}

impl<'a> QueryGraph<'a> {
    /// Joins a static graph with the dynamic links of one query.
    #[must_use]
    pub fn new(statics: &'a StaticLinks, dynamic: &'a DynamicLinks) -> Self {
        Self { statics, dynamic }
    }

    /// Static neighbors of `node` followed by its dynamic neighbors.
    pub fn links(&self, node: &Node) -> impl Iterator<Item = Node> + 'a {
        let (statics, dynamic) = (self.statics, self.dynamic);
        statics
            .graph()
            .neighbors(node)
            .chain(dynamic.graph().neighbors(node))
    }
}
