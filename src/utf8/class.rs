use super::char::Satisfy;

/// Parser that matches a Unicode whitespace character, line breaks included
pub fn space() -> Satisfy<impl Fn(char) -> bool> {
    Satisfy::new(char::is_whitespace, "whitespace")
}

/// Parser that matches a space or a tab
pub fn blank() -> Satisfy<impl Fn(char) -> bool> {
    Satisfy::new(|c| c == ' ' || c == '\t', "space or tab")
}

/// Parser that matches a Unicode alphabetic character
pub fn alpha() -> Satisfy<impl Fn(char) -> bool> {
    Satisfy::new(char::is_alphabetic, "alphabetic character")
}

/// Parser that matches a Unicode alphanumeric character
pub fn alnum() -> Satisfy<impl Fn(char) -> bool> {
    Satisfy::new(char::is_alphanumeric, "alphanumeric character")
}

/// Parser that matches an ASCII digit
pub fn digit() -> Satisfy<impl Fn(char) -> bool> {
    Satisfy::new(|c: char| c.is_ascii_digit(), "digit")
}
