mod watched;

pub use watched::{Aggregates, WatchedEntry};
