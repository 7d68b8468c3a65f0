//! Pure geometry over longitude/latitude polygon rings.
//!
//! Everything in this module is a plain function with no ECS state, so the
//! sync controller and the hover reactor can be tested against it directly.
//!
//! - [`ring`] - The [`Ring`] type (closed lon/lat boundary)
//! - [`area`] - Spherical surface area in hectares
//! - [`bounds`] - Axis-aligned lon/lat bounding boxes
//! - [`contains`] - Point-in-polygon containment
//! - [`intersect`] - Pairwise overlap regions between rings

mod area;
mod bounds;
mod contains;
mod intersect;
mod ring;

pub use area::ring_area_hectares;
pub use bounds::Bounds;
pub use contains::ring_contains;
pub use intersect::pairwise_intersections;
pub use ring::Ring;
