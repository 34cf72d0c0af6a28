//! Common utilities and data structures shared by the zone builder and the query layer

mod geometry;
mod math;
mod mesh;
mod vector;
mod zone;

pub use geometry::*;
pub use math::*;
pub use mesh::*;
pub use vector::*;
pub use zone::*;

/// Represents a 3D position
pub type Vec3 = glam::Vec3;

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid input mesh: {0}")]
    InvalidMesh(String),

    #[error("invalid weld tolerance: {0} (must be positive and at least f32::EPSILON)")]
    InvalidTolerance(f32),

    #[error("invalid zone configuration: {0}")]
    InvalidConfig(String),

    #[error("zone build failed: {0}")]
    ZoneBuild(String),

    #[error("invalid zone data: {0}")]
    InvalidZone(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[cfg(feature = "std")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for zone operations
pub type Result<T> = std::result::Result<T, Error>;
