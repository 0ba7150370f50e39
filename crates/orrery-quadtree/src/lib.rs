//! Adaptive quadtree over the flattened planet-surface map.
//!
//! The tree is rebuilt every frame: the LOD driver collapses it, issues a
//! staircase of circular divide calls around the viewer's footprint, then
//! visits the resulting leaves to render one grid patch per leaf.

mod geom;
mod node;
mod tree;

pub use geom::{Circle, Point, Quad};
pub use node::Node;
pub use tree::TerrainQuadTree;
