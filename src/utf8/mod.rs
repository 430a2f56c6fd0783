pub mod char;
pub mod class;
pub mod eol;
pub mod string;

pub use char::{Satisfy, any_char, ch, char_range, none_of, one_of};
pub use class::{alnum, alpha, blank, digit, space};
pub use eol::{Eol, eol};
pub use string::{Lit, LiteralText, StringParser, lit, string};
