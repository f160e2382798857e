//! Column geometry shared by the table strategies.

pub mod cluster;
pub mod columns;
pub mod patterns;

pub use cluster::cluster_positions;
pub use columns::{BoundarySet, ColumnDetector};
