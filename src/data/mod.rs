mod bone;
mod reference;
mod skeleton;

pub use bone::*;
pub use reference::*;
pub use skeleton::*;
