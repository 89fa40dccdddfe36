pub mod conversion;
pub mod definition;
pub mod path;

pub use conversion::*;
pub use definition::*;
pub use path::*;
