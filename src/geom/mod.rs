//! Geometry helpers: hit-test distances, spline evaluation, arrow
//! construction and the logical-to-device coordinate mapping.

pub mod arrow;
pub mod curves;
pub mod distances;
pub mod map;

pub use arrow::{head_geometry, round_intelligently, Arrow, ArrowHead, ArrowStyle};
pub use map::MapCoordinates;
