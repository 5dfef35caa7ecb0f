//! Sequential access with a caller-settable position.

/// A position into a byte buffer, advanced by every primitive read or write.
///
/// The offset can be moved freely to re-read or overwrite earlier data. The
/// cursor is a view: it never owns or resizes the buffer by itself.
pub trait ByteCursor {
    /// Returns the current position.
    fn offset(&self) -> usize;

    /// Moves the cursor to `offset`.
    fn set_offset(&mut self, offset: usize);

    /// Moves the cursor forward by `n` bytes.
    fn advance(&mut self, n: usize) {
        let offset = self.offset() + n;
        self.set_offset(offset);
    }
}
