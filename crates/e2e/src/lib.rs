pub mod arguments;
pub mod setup;

pub use arguments::Arguments;
