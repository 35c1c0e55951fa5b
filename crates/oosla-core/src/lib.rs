pub mod age;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod gate;
pub mod io;
pub mod message;
pub mod report;
pub mod sla;
pub mod tracker;
pub mod types;

pub use error::{OoslaError, Result};
