//! Domain models for the crop advisor

mod crop;
mod insight;

pub use crop::*;
pub use insight::*;
