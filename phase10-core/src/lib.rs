pub mod game_store;
pub mod ids;
pub mod ranking;
pub mod round_scoring;
pub mod store_events;

// Re-export main components
pub use game_store::*;
pub use ids::*;
pub use ranking::*;
pub use round_scoring::*;
pub use store_events::*;
