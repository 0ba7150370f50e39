//! The per-frame planet-surface LOD driver.
//!
//! Each frame the driver collapses the quadtree, refines a concentric
//! staircase of detail rings around the viewer, then renders one shared grid
//! patch per leaf through the opaque [`RenderDevice`] boundary.
//!
//! [`RenderDevice`]: orrery_render::RenderDevice

mod displacement;
mod driver;
mod level;
mod report;

pub use displacement::displacement_field;
pub use driver::PlanetTerrain;
pub use level::{level_from_distance, LevelDesc};
pub use report::FrameReport;
