pub mod favorites;
pub mod fighter;

pub use favorites::*;
pub use fighter::*;
