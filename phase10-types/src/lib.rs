pub mod game;
pub mod messages;
pub mod phases;
pub mod scoring;
pub mod store;

pub type GameId = String;
pub type PlayerId = String;

// Re-export all types
pub use game::*;
pub use messages::*;
pub use phases::*;
pub use scoring::*;
pub use store::*;
