pub mod store;
pub mod value;

pub use store::*;
pub use value::*;
