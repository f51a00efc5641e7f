pub mod backend;
pub use backend::*;

pub mod domain;
pub use domain::*;
