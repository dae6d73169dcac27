//! Bespoke objective checks.

pub mod adjacent_area;
pub mod crew;
pub mod detect_and_avoid;
pub mod operational_volume;

pub use adjacent_area::AdjacentAreaCheck;
pub use crew::{CrewPerformanceCheck, CrewScore};
pub use detect_and_avoid::DetectAndAvoidCheck;
pub use operational_volume::OperationalVolumeCheck;
