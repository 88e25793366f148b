mod authoring;
pub mod conversion;
pub mod definition;

pub use conversion::*;
pub use definition::*;
