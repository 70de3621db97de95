//! Everything around the board engine: configuration, sessions and score
//! reporting, terminal input, and seeded self-play.

pub mod actor;
pub mod config;
pub mod input;
pub mod report;
pub mod selfplay;
pub mod session;

pub use config::Config;
pub use report::{Points, ScoreReport, ScoreSink};
pub use session::Session;
