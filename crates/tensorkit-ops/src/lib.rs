pub mod elementwise;

pub use elementwise::*;
