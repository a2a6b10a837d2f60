#![forbid(unsafe_code)]

mod capabilities;
mod compile;
mod connectivity;
mod eval;
mod grant;
mod predicate;
mod scope;

pub use capabilities::*;
pub use compile::*;
pub use connectivity::*;
pub use eval::*;
pub use grant::*;
pub use predicate::*;
pub use scope::*;
