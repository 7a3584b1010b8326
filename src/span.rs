use crate::Input;
use core::fmt;

/// A slice of parser input.
///
/// A [`Span`] is delimited by two [`Input`] positions: where a parser started
/// and the remaining input it left behind. Spans over `&str` and slices convert
/// back into the underlying text with [`Into`], and compare equal to it.
///
/// ```
/// # use knit::prelude::*;
/// # use knit::character::alpha1;
/// let Success(word, rem) = alpha1.parse("knit 1").unwrap();
/// assert_eq!(word, "knit");
/// assert_eq!(word.len(), 4);
/// let word: &str = word.into();
/// assert_eq!(word, "knit");
/// assert_eq!(rem, " 1");
/// ```
#[derive(Debug, Clone)]
pub struct Span<I: Input> {
    begin: I,
    end: I,
}

impl<I: Input + Copy> Copy for Span<I> {}

impl<I: Input> Span<I> {
    /// Creates a new [`Span`] over the input between `begin` and `end`.
    pub fn new(begin: I, end: I) -> Self {
        Self { begin, end }
    }

    /// Gets the start position of the [`Span`].
    pub fn start(&self) -> &I {
        &self.begin
    }

    /// Gets the end position of the [`Span`].
    pub fn end(&self) -> &I {
        &self.end
    }

    /// Length of the span in storage units.
    pub fn len(&self) -> usize {
        self.begin.len().saturating_sub(self.end.len())
    }

    /// Checks if the [`Span`] is empty.
    pub fn is_empty(&self) -> bool {
        self.begin.len() <= self.end.len()
    }
}

impl<I: Input> Input for Span<I> {
    type Symbol = I::Symbol;

    fn next(&mut self) -> Option<Self::Symbol> {
        if self.is_empty() {
            None
        } else {
            self.begin.next()
        }
    }

    fn len(&self) -> usize {
        Span::len(self)
    }

    fn pos_eq(&self, other: &Self) -> bool {
        self.begin.pos_eq(&other.begin)
    }
}

impl<I: Input> Iterator for Span<I> {
    type Item = I::Symbol;

    fn next(&mut self) -> Option<Self::Item> {
        Input::next(self)
    }
}

impl<'a> From<Span<&'a str>> for &'a str {
    fn from(span: Span<&'a str>) -> &'a str {
        &span.start()[..span.len()]
    }
}

impl<'a, T: crate::Symbol> From<Span<&'a [T]>> for &'a [T] {
    fn from(span: Span<&'a [T]>) -> &'a [T] {
        &span.start()[..span.len()]
    }
}

impl<I: Input> PartialEq for Span<I> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && Iterator::eq(self.clone(), other.clone())
    }
}

impl PartialEq<&str> for Span<&str> {
    fn eq(&self, other: &&str) -> bool {
        self.start().get(..self.len()) == Some(*other)
    }
}

impl<T: crate::Symbol> PartialEq<&[T]> for Span<&[T]> {
    fn eq(&self, other: &&[T]) -> bool {
        self.start().get(..self.len()) == Some(*other)
    }
}

impl<T: crate::Symbol, const LEN: usize> PartialEq<&[T; LEN]> for Span<&[T]> {
    fn eq(&self, other: &&[T; LEN]) -> bool {
        self.start().get(..self.len()) == Some(&other[..])
    }
}

impl fmt::Display for Span<&str> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.start().get(..self.len()).unwrap_or_default())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn span_of_str() {
        let text = "hello world";
        let span = Span::new(text, &text[5..]);
        assert_eq!(span.len(), 5);
        assert_eq!(span, "hello");
        assert_eq!(span.to_string(), "hello");
        assert!(!span.is_empty());
        assert!(Span::new(text, text).is_empty());
    }

    #[test]
    fn span_iterates_symbols() {
        let bytes = &b"\x01\x02\x03"[..];
        let span = Span::new(bytes, &bytes[2..]);
        assert_eq!(span, b"\x01\x02");
        assert_eq!(span.collect::<alloc::vec::Vec<_>>(), [1u8, 2]);
    }

    #[test]
    fn spans_compare_by_content() {
        let text = "abab";
        assert_eq!(Span::new(text, &text[2..]), Span::new(&text[2..], ""));
        assert_ne!(Span::new(text, &text[1..]), Span::new(&text[1..], &text[2..]));
    }

    #[test]
    fn span_bounds_are_lengths() {
        let span = Span::new("latin123", "123");
        assert_eq!(span.len(), 5);
        assert_eq!(span.clone().count(), 5);
        assert!(!span.is_empty());
        assert!(Span::new("abc", "xyz").is_empty());
        let text = "latin123";
        assert_eq!(span, Span::new(text, &text[5..]));
    }
}
