use ascii::{AsciiChar, AsciiStr, ToAsciiChar};

/// A single unit of parser input.
///
/// Symbols are compared by value, and can be viewed as a [`char`] for building
/// error descriptors and as an [`AsciiChar`] for character classification.
pub trait Symbol: Copy + PartialEq + core::fmt::Debug {
    /// Returns the symbol as an ASCII character, if it is one.
    fn ascii(self) -> Option<AsciiChar>;

    /// Returns the symbol as a [`char`].
    ///
    /// Bytes are widened as Latin-1.
    fn to_char(self) -> char;
}

impl Symbol for char {
    #[inline]
    fn ascii(self) -> Option<AsciiChar> {
        self.to_ascii_char().ok()
    }

    #[inline]
    fn to_char(self) -> char {
        self
    }
}

impl Symbol for u8 {
    #[inline]
    fn ascii(self) -> Option<AsciiChar> {
        self.to_ascii_char().ok()
    }

    #[inline]
    fn to_char(self) -> char {
        char::from(self)
    }
}

impl Symbol for AsciiChar {
    #[inline]
    fn ascii(self) -> Option<AsciiChar> {
        Some(self)
    }

    #[inline]
    fn to_char(self) -> char {
        AsciiChar::as_char(self)
    }
}

/// A stream of symbols a parser reads from.
///
/// [`Input`] is an [`Iterator`] that can be cloned and whose remaining length
/// is always known. Parsers backtrack by keeping a clone of the input they were
/// given, and measure progress by comparing remaining lengths.
pub trait Input: Clone {
    /// Type of the symbols in the stream.
    type Symbol: Symbol;

    /// Takes the next symbol off the front of the stream.
    ///
    /// Returns [`None`] once the stream is exhausted.
    fn next(&mut self) -> Option<Self::Symbol>;

    /// Returns the remaining length of the stream in storage units.
    ///
    /// For `&str` this is a byte count, for slices an element count. A parser
    /// consumed `original.len() - remaining.len()` units.
    fn len(&self) -> usize;

    /// Returns `true` if both inputs point at the same position of the same buffer.
    fn pos_eq(&self, other: &Self) -> bool;

    /// Skips up to `count` symbols.
    ///
    /// The number of skipped symbols is returned, which is less than `count`
    /// only if the end of input was reached.
    fn advance_by(&mut self, count: usize) -> usize {
        for idx in 0..count {
            let Some(_) = self.next() else {
                return idx;
            };
        }
        count
    }

    /// Gets the next symbol without advancing.
    #[inline]
    fn peek(&self) -> Option<Self::Symbol> {
        self.clone().next()
    }

    /// Returns `true` if no symbols remain.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Conversion into an [`Input`].
///
/// [`Parse::parse`](crate::Parse::parse) accepts any [`IntoInput`], so given
/// `let text: String;`, `my_parser.parse(&text)` works without an explicit
/// conversion to `&str`.
pub trait IntoInput {
    /// Symbol type of the converted input.
    type Symbol: Symbol;

    /// The converted input type.
    type Input: Input<Symbol = Self::Symbol>;

    /// Performs the conversion.
    fn into_input(self) -> Self::Input;
}

impl<T: Symbol> Input for &[T] {
    type Symbol = T;

    fn next(&mut self) -> Option<Self::Symbol> {
        let (head, tail) = self.split_first()?;
        *self = tail;
        Some(*head)
    }

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn pos_eq(&self, other: &Self) -> bool {
        self.as_ptr() == other.as_ptr()
    }

    fn advance_by(&mut self, count: usize) -> usize {
        let count = core::cmp::min(<[T]>::len(self), count);
        *self = &self[count..];
        count
    }
}

impl Input for &str {
    type Symbol = char;

    fn next(&mut self) -> Option<Self::Symbol> {
        let mut chars = self.chars();
        let ret = chars.next();
        *self = chars.as_str();
        ret
    }

    #[inline]
    fn len(&self) -> usize {
        str::len(self)
    }

    fn pos_eq(&self, other: &Self) -> bool {
        self.as_ptr() == other.as_ptr()
    }
}

impl Input for &AsciiStr {
    type Symbol = AsciiChar;

    fn next(&mut self) -> Option<Self::Symbol> {
        let mut chars = self.chars();
        let ret = chars.next();
        *self = chars.as_str();
        ret
    }

    #[inline]
    fn len(&self) -> usize {
        AsciiStr::len(self)
    }

    fn pos_eq(&self, other: &Self) -> bool {
        self.as_ptr() == other.as_ptr()
    }
}

impl<I: Input> IntoInput for I {
    type Symbol = <I as Input>::Symbol;
    type Input = I;

    fn into_input(self) -> Self::Input {
        self
    }
}

impl<'a, T: Symbol, const LEN: usize> IntoInput for &'a [T; LEN] {
    type Symbol = T;
    type Input = &'a [T];

    fn into_input(self) -> Self::Input {
        self
    }
}

impl<'a, T: Symbol> IntoInput for &'a alloc::vec::Vec<T> {
    type Symbol = T;
    type Input = &'a [T];

    fn into_input(self) -> &'a [T] {
        self
    }
}

impl<'a, T: Symbol> IntoInput for &'a alloc::boxed::Box<[T]> {
    type Symbol = T;
    type Input = &'a [T];

    fn into_input(self) -> &'a [T] {
        self
    }
}

impl<'a> IntoInput for &'a alloc::boxed::Box<str> {
    type Symbol = char;
    type Input = &'a str;

    fn into_input(self) -> &'a str {
        self
    }
}

impl<'a> IntoInput for &'a alloc::string::String {
    type Symbol = char;
    type Input = &'a str;

    fn into_input(self) -> &'a str {
        self
    }
}

impl<'a> IntoInput for &'a ascii::AsciiString {
    type Symbol = AsciiChar;
    type Input = &'a AsciiStr;

    fn into_input(self) -> Self::Input {
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloc::string::String;

    #[test]
    fn str_len_counts_bytes() {
        let mut input = "é1";
        assert_eq!(Input::len(&input), 3);
        assert_eq!(Input::next(&mut input), Some('é'));
        assert_eq!(Input::len(&input), 1);
    }

    #[test]
    fn advance_stops_at_end() {
        let mut input = &b"abc"[..];
        assert_eq!(input.advance_by(5), 3);
        assert!(Input::is_empty(&input));
        assert_eq!(Input::next(&mut input), None);
    }

    #[test]
    fn peek_does_not_advance() {
        let input = "xy";
        assert_eq!(input.peek(), Some('x'));
        assert_eq!(input, "xy");
    }

    #[test]
    fn ascii_input() {
        let mut input = AsciiStr::from_ascii("ok").unwrap();
        assert_eq!(Input::next(&mut input), Some(AsciiChar::o));
        assert_eq!(Input::len(&input), 1);
    }

    #[test]
    fn symbols_classify_as_ascii() {
        assert_eq!('a'.ascii(), Some(AsciiChar::a));
        assert_eq!('é'.ascii(), None);
        assert_eq!(b'7'.ascii(), Some(AsciiChar::_7));
        assert_eq!(0xe9u8.to_char(), 'é');
    }

    #[test]
    fn owned_buffers_convert() {
        let text = String::from("abc");
        let input: &str = (&text).into_input();
        assert_eq!(input, "abc");
    }
}
