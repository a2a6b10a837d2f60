#![forbid(unsafe_code)]

mod link;
mod types;
mod view;

pub use link::*;
pub use types::*;
pub use view::*;
