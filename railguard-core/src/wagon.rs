mod catalog;
mod number;
mod selected_wagon;
mod wagon_spec;

pub use catalog::*;
pub use number::*;
pub use selected_wagon::*;
pub use wagon_spec::*;
