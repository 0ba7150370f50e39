//! The terrain quadtree: divide/collapse/visit operations relative to a
//! fixed world-space root.

use crate::{Circle, Node, Point, Quad};

/// Adaptive quadtree over the flattened surface map.
///
/// The root quad is fixed at construction and never destroyed. Subdivision
/// depth is capped only by each call's explicit `depth` argument; callers
/// must bound it themselves (unbounded depth exhausts memory).
#[derive(Clone, Debug)]
pub struct TerrainQuadTree {
    root: Node,
}

impl TerrainQuadTree {
    /// Create a tree whose root covers `quad`. The root sits at depth 1.
    #[must_use]
    pub fn new(quad: Quad) -> Self {
        Self {
            root: Node::new(quad, 1),
        }
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Full width of the root quad.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.root.quad().width()
    }

    /// Full height of the root quad.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.root.quad().height()
    }

    /// Refine the single leaf chain containing `point` by `depth` levels.
    ///
    /// Returns `false` without modifying the tree when the root quad does
    /// not contain the point.
    pub fn divide_at(&mut self, point: Point, depth: u32) -> bool {
        if !self.root.quad().contains(point) {
            return false;
        }
        self.root.divide_at(point, depth);
        true
    }

    /// Refine every subtree intersecting `circle` down to `depth` levels,
    /// producing a footprint of uniformly refined leaves around the disc.
    ///
    /// Returns `false` without modifying the tree when the circle does not
    /// intersect the root quad. A zero `depth` is a successful no-op.
    pub fn divide_region(&mut self, circle: &Circle, depth: u32) -> bool {
        if !circle.intersects(self.root.quad()) {
            return false;
        }
        self.root.divide_region(circle, depth);
        true
    }

    /// Discard all subdivision, resetting the tree to a single leaf.
    /// Idempotent; the driver calls this once per frame so refinement never
    /// accumulates across frames.
    pub fn collapse(&mut self) {
        self.root.collapse();
    }

    /// Traverse the tree, pruning subtrees whose quads do not intersect
    /// `circle`, and invoke `f` for every leaf reached.
    ///
    /// Intersection prunes interior nodes only: a leaf reached through an
    /// intersecting ancestor chain is visited even if its own quad lies
    /// outside the circle, so callers size the visit circle to also serve as
    /// the final acceptance test.
    pub fn visit<F: FnMut(&Node)>(&self, circle: &Circle, mut f: F) {
        self.root.visit(circle, &mut f);
    }

    /// The deepest node whose quad covers `point`, or `None` when the point
    /// lies outside the root quad.
    #[must_use]
    pub fn node_at(&self, point: Point) -> Option<&Node> {
        if !self.root.quad().contains(point) {
            return None;
        }
        Some(self.root.node_at(point))
    }

    /// Eagerly collect every leaf.
    #[must_use]
    pub fn leaves(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        self.root.collect_leaves(&mut out);
        out
    }

    /// Eagerly collect the leaves reached by a [`visit`](Self::visit) with
    /// the same circle. Used for debug visualization and call sites that
    /// prefer a sequence over a callback.
    #[must_use]
    pub fn leaves_in(&self, circle: &Circle) -> Vec<&Node> {
        let mut out = Vec::new();
        self.root.visit(circle, &mut |node| out.push(node));
        out
    }
}
