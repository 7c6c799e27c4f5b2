/// Single-pass cursor over a report stream with one item of lookahead.
///
/// The pending item is fetched lazily and stays buffered until a caller
/// takes it, so an item that does not match the current line is kept for a
/// later one.
pub struct Cursor<I: Iterator> {
    source: I,
    pending: Option<I::Item>,
}

impl<I: Iterator> Cursor<I> {
    pub fn new(source: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            source: source.into_iter(),
            pending: None,
        }
    }

    pub fn peek(&mut self) -> Option<&I::Item> {
        if self.pending.is_none() {
            self.pending = self.source.next();
        }
        self.pending.as_ref()
    }

    /// Take the pending item if it satisfies `predicate`
    pub fn next_if(&mut self, predicate: impl FnOnce(&I::Item) -> bool) -> Option<I::Item> {
        if self.peek().is_some_and(predicate) {
            self.pending.take()
        } else {
            None
        }
    }
}
