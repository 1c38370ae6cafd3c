pub mod config;
pub mod dispatcher;

pub use dispatcher::ScoreKeeper;
