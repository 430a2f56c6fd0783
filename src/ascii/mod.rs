pub mod boolean;
pub mod number;

pub use boolean::{Boolean, boolean};
pub use number::{Number, Radix, float, int, number, uint};
