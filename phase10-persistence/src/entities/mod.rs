pub mod snapshots;

pub mod prelude {
    pub use super::snapshots::Entity as Snapshots;
}
