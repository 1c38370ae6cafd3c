pub mod connection;
pub mod entities;
pub mod repositories;
pub mod snapshot;

pub use repositories::SnapshotRepository;
pub use snapshot::*;
