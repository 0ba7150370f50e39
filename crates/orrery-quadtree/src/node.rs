//! Quadtree node: a leaf, or an interior node owning exactly four children.

use crate::{Circle, Point, Quad};

/// A node in the terrain quadtree.
///
/// A node either has no children (a leaf, the unit that maps to one rendered
/// patch) or exactly four, whose quads quarter the parent's quad. Children
/// are exclusively owned; dropping a node tears down its whole subtree.
#[derive(Clone, Debug)]
pub struct Node {
    quad: Quad,
    depth: u32,
    children: Option<Box<[Node; 4]>>,
}

impl Node {
    pub(crate) fn new(quad: Quad, depth: u32) -> Self {
        Self {
            quad,
            depth,
            children: None,
        }
    }

    /// The square region this node covers.
    #[must_use]
    pub fn quad(&self) -> &Quad {
        &self.quad
    }

    /// Depth of this node; the root sits at depth 1.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Whether this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Split a leaf into four children quartering its quad. No-op on an
    /// already-divided node.
    pub(crate) fn divide(&mut self) {
        if self.children.is_some() {
            return;
        }

        let half = self.quad.half_size / 2.0;
        let c = self.quad.center;
        let depth = self.depth + 1;

        self.children = Some(Box::new([
            Node::new(Quad::new(c - self.quad.half_size / 2.0, half), depth),
            Node::new(Quad::new(c + Point::new(half.x, -half.y), half), depth),
            Node::new(Quad::new(c + Point::new(-half.x, half.y), half), depth),
            Node::new(Quad::new(c + self.quad.half_size / 2.0, half), depth),
        ]));
    }

    /// Drop all descendants, making this node a leaf again.
    pub(crate) fn collapse(&mut self) {
        self.children = None;
    }

    /// Index of the child quadrant owning `point`. Coordinates exactly on the
    /// shared center lines go to the low side, so every point belongs to
    /// exactly one child.
    fn child_index_at(&self, point: Point) -> usize {
        let ix = usize::from(point.x > self.quad.center.x);
        let iy = usize::from(point.y > self.quad.center.y);
        iy * 2 + ix
    }

    pub(crate) fn child_at(&self, point: Point) -> Option<&Node> {
        let idx = self.child_index_at(point);
        self.children.as_ref().map(|c| &c[idx])
    }

    pub(crate) fn child_at_mut(&mut self, point: Point) -> Option<&mut Node> {
        let idx = self.child_index_at(point);
        self.children.as_mut().map(|c| &mut c[idx])
    }

    /// Descend to the deepest node whose quad covers `point`.
    pub(crate) fn node_at(&self, point: Point) -> &Node {
        match self.child_at(point) {
            Some(child) => child.node_at(point),
            None => self,
        }
    }

    /// Refine along the single path of children containing `point` until
    /// `depth` additional levels exist below the starting node.
    pub(crate) fn divide_at(&mut self, point: Point, depth: u32) {
        if depth == 0 {
            return;
        }
        self.divide();
        if let Some(child) = self.child_at_mut(point) {
            child.divide_at(point, depth - 1);
        }
    }

    /// Refine every subtree intersecting `circle` down to `depth` additional
    /// levels. This is what produces a footprint of uniformly refined leaves
    /// around a disc, with depth falling away outside it.
    pub(crate) fn divide_region(&mut self, circle: &Circle, depth: u32) {
        if depth == 0 {
            return;
        }
        self.divide();
        if let Some(children) = self.children.as_mut() {
            for child in children.iter_mut() {
                if circle.intersects(&child.quad) {
                    child.divide_region(circle, depth - 1);
                }
            }
        }
    }

    /// Depth-first traversal pruned by `circle` at interior nodes. A leaf is
    /// visited as soon as it is reached; the circle never filters leaves,
    /// only whole subtrees.
    pub(crate) fn visit<'a, F: FnMut(&'a Node)>(&'a self, circle: &Circle, f: &mut F) {
        match self.children.as_ref() {
            None => f(self),
            Some(children) => {
                for child in children.iter() {
                    if circle.intersects(&child.quad) {
                        child.visit(circle, f);
                    }
                }
            }
        }
    }

    /// Collect every leaf of this subtree.
    pub(crate) fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Node>) {
        match self.children.as_ref() {
            None => out.push(self),
            Some(children) => {
                for child in children.iter() {
                    child.collect_leaves(out);
                }
            }
        }
    }
}
