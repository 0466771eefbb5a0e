mod smd;
mod snippet;

pub use smd::*;
pub use snippet::*;
