pub mod activity;
pub mod config;
pub mod detail;
pub mod error;
pub mod fetch;
pub mod models;
pub mod rating;
pub mod search;
pub mod shortcuts;
pub mod storage;
pub mod watched;
