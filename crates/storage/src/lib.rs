#![forbid(unsafe_code)]

mod config;
mod store;

pub use config::StoreConfig;
pub use store::*;
