pub mod duration;
pub mod literal;
pub mod program;

pub use duration::*;
pub use program::*;
