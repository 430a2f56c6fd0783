/// Generic cursor trait for parser combinators
///
/// A cursor represents a position in a sequence of elements that can be advanced
/// and queried. Cursors are `Copy`: keeping a copy is a snapshot, and carrying on
/// from an older copy restores it. No combinator ever needs an explicit "undo".
pub trait Cursor<'code>: Copy + Clone + Sized {
    /// The type of elements this cursor iterates over
    type Element;

    /// Get the element at the current cursor position, `None` at end of input
    fn value(&self) -> Option<Self::Element>;

    /// Advance the cursor to the next element
    ///
    /// If already at the end, returns a cursor still positioned at the end
    fn next(self) -> Self;

    /// Get the current position in the sequence
    ///
    /// For end-of-sequence cursors this is the length of the sequence
    fn position(&self) -> usize;

    /// Check if the cursor is at the end of the sequence
    fn eos(&self) -> bool {
        self.value().is_none()
    }

    /// Get the whole input this cursor walks over
    fn source(&self) -> &'code str;

    /// Consume the cursor and return its input and position
    fn inner(self) -> (&'code str, usize);
}
