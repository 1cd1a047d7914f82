pub mod achievement;
pub mod advisor;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod journal;
pub mod leaderboard;
pub mod model;
pub mod nemesis;
pub mod notice;
pub mod oracle;
pub mod paths;
pub mod profile;
pub mod progress;
pub mod rank;
pub mod session;
pub mod store;
pub mod task;
pub mod tribulation;
pub mod types;

pub use error::{DaoError, Result};
