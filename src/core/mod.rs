mod key;
mod math;

pub use key::*;
pub use math::*;
