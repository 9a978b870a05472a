pub mod backup;
pub mod completion;
pub mod habit;
pub mod log;
pub mod stats;
pub mod store;
pub mod streak;
pub mod user;
