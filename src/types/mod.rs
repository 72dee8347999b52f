//! Basic value types shared by the whole crate.

pub mod bounds;
pub mod color;
pub mod point;

pub use bounds::BoundingRect;
pub use color::Color;
pub use point::PointG;
