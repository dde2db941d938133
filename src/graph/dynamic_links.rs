use crate::math::Point2;

use super::{LinkGraph, Node, StaticLinks};

/// Links for the transient endpoints of one path query.
///
/// Built per query against a fixed [`StaticLinks`] set and discarded
/// afterwards; it never modifies the static graph.
#[derive(Debug, Clone, Default)]
pub struct DynamicLinks {
    transient: Vec<Node>,
    graph: LinkGraph,
}

impl DynamicLinks {
    /// Computes the dynamic links for a query from `start` to `end`.
    pub fn calculate<F>(statics: &StaticLinks, start: Node, end: Node, visible: F) -> Self
    where
        F: Fn(&Point2, &Point2) -> bool,
    {
        let mut links = Self::default();
        links.recalculate(statics, start, end, visible);
        links
    }

    /// Clears and recomputes the links in place, reusing allocations.
    ///
    /// Endpoints that coincide with a static node are not added, and
    /// `start == end` adds at most one transient node. Each transient node
    /// is tested against every static node, and against the other
    /// transient node when both are new.
    pub fn recalculate<F>(&mut self, statics: &StaticLinks, start: Node, end: Node, visible: F)
    where
        F: Fn(&Point2, &Point2) -> bool,
    {
        self.graph.clear();
        self.transient.clear();

        for endpoint in [start, end] {
            if !statics.is_node(&endpoint) && !self.transient.contains(&endpoint) {
                self.transient.push(endpoint);
            }
        }

        for transient in &self.transient {
            for node in statics.nodes() {
                if visible(&transient.0, &node.0) {
                    self.graph.link(*transient, *node);
                }
            }
        }

        if let [a, b] = self.transient[..] {
            if visible(&a.0, &b.0) {
                self.graph.link(a, b);
            }
        }
    }

    /// Endpoints of the query that are not static nodes.
    #[must_use]
    pub fn transient_nodes(&self) -> &[Node] {
        &self.transient
    }

    /// The links added for this query.
    #[must_use]
    pub fn graph(&self) -> &LinkGraph {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn statics() -> StaticLinks {
        StaticLinks::calculate(
            vec![
                Node::new(0.0, 0.0),
                Node::new(10.0, 0.0),
                Node::new(10.0, 10.0),
            ],
            |_, _| true,
        )
    }

    #[test]
    fn static_endpoints_are_not_readded() {
        let statics = statics();
        let links = DynamicLinks::calculate(
            &statics,
            Node::new(0.0, 0.0),
            Node::new(10.0, 10.0),
            |_, _| true,
        );
        assert!(links.transient_nodes().is_empty());
        assert_eq!(links.graph().link_count(), 0);
    }

    #[test]
    fn equal_endpoints_add_one_node() {
        let statics = statics();
        let p = Node::new(5.0, 2.0);
        let links = DynamicLinks::calculate(&statics, p, p, |_, _| true);
        assert_eq!(links.transient_nodes(), &[p]);
        assert_eq!(links.graph().link_count(), 3);
    }

    #[test]
    fn two_transient_nodes_link_each_other() {
        let statics = statics();
        let (s, e) = (Node::new(5.0, 2.0), Node::new(8.0, 4.0));
        let links = DynamicLinks::calculate(&statics, s, e, |_, _| true);
        assert_eq!(links.transient_nodes().len(), 2);
        assert!(links.graph().is_linked(&s, &e));
        assert_eq!(links.graph().link_count(), 7);
    }

    #[test]
    fn cost_is_linear_in_static_nodes() {
        let statics = statics();
        let calls = Cell::new(0);
        let _ = DynamicLinks::calculate(&statics, Node::new(5.0, 2.0), Node::new(8.0, 4.0), |_, _| {
            calls.set(calls.get() + 1);
            false
        });
        // Two transients against three statics, plus the pair itself.
        assert_eq!(calls.get(), 7);
    }

    #[test]
    fn recalculate_clears_previous_query() {
        let statics = statics();
        let first = Node::new(5.0, 2.0);
        let mut links = DynamicLinks::calculate(&statics, first, first, |_, _| true);
        links.recalculate(&statics, Node::new(0.0, 0.0), Node::new(10.0, 0.0), |_, _| true);
        assert!(links.transient_nodes().is_empty());
        assert_eq!(links.graph().neighbors(&first).count(), 0);
    }

    #[test]
    fn statics_untouched() {
        let statics = statics();
        let before = statics.graph().link_count();
        let _ = DynamicLinks::calculate(
            &statics,
            Node::new(1.0, 1.0),
            Node::new(2.0, 1.0),
            |_, _| true,
        );
        assert_eq!(statics.graph().link_count(), before);
    }
}
