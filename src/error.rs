use crate::{Error, Input};
use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// The underlying cause of a fatal [`ParseError`].
pub type Cause = Box<dyn core::error::Error + Send + Sync + 'static>;

/// The error produced by every primitive parser in `knit`.
///
/// A [`ParseError`] records the input position it describes, the descriptors
/// of what was expected there, and, for fatal errors, an underlying cause.
/// An error with a cause is fatal: combinators never backtrack over it.
///
/// ```
/// # use knit::prelude::*;
/// # use knit::character::digit1;
/// let err = digit1.parse("abc").unwrap_err().0;
/// assert!(!err.is_fatal());
/// assert_eq!(err.descriptors(), ["digit"]);
/// assert_eq!(err.to_string(), "expected digit");
/// ```
#[derive(Debug)]
pub struct ParseError<I> {
    input: I,
    expected: Vec<Cow<'static, str>>,
    cause: Option<Cause>,
}

/// A [`ParseError`] rendered with its offset into the original input.
///
/// Created by [`ParseError::at`].
#[derive(Debug)]
pub struct ErrorAt<'a, I> {
    error: &'a ParseError<I>,
    offset: usize,
}

impl<I: Input> ParseError<I> {
    /// Creates a recoverable error at `input` with the given expected descriptors.
    pub fn new<E, D>(input: I, expected: E) -> Self
    where
        E: IntoIterator<Item = D>,
        D: Into<Cow<'static, str>>,
    {
        Self {
            input,
            expected: expected.into_iter().map(Into::into).collect(),
            cause: None,
        }
    }

    /// Creates a fatal error at `input` caused by `cause`.
    pub fn new_fatal<C, E, D>(input: I, cause: C, expected: E) -> Self
    where
        C: Into<Cause>,
        E: IntoIterator<Item = D>,
        D: Into<Cow<'static, str>>,
    {
        let mut err = Self::new(input, expected);
        err.cause = Some(cause.into());
        err
    }

    /// Gets the input position the error describes.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Gets the descriptors of what was expected, in the order they were added.
    pub fn descriptors(&self) -> &[Cow<'static, str>] {
        &self.expected
    }

    /// Gets the underlying cause of a fatal error.
    pub fn cause(&self) -> Option<&(dyn core::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Returns `true` if the error has an underlying cause.
    pub fn is_fatal(&self) -> bool {
        self.cause.is_some()
    }

    /// Offset of the error position from the start of `original`, in storage units.
    pub fn offset(&self, original: &I) -> usize {
        original.len().saturating_sub(self.input.len())
    }

    /// Renders the error as `char at position N, expected ...`.
    ///
    /// `N` is the one-based position of the error within `original`.
    ///
    /// ```
    /// # use knit::prelude::*;
    /// # use knit::character::char;
    /// let text = "ab";
    /// let err = preceded(char('a'), char('c')).parse(text).unwrap_err().0;
    /// assert_eq!(err.at(&text).to_string(), "char at position 2, expected Char(c)");
    /// ```
    pub fn at(&self, original: &I) -> ErrorAt<'_, I> {
        ErrorAt {
            error: self,
            offset: self.offset(original),
        }
    }

    /// Appends the descriptors of `other` to this error.
    ///
    /// If this error has no cause, it takes the cause of `other`.
    pub fn add(&mut self, other: Self) {
        self.expected.extend(other.expected);
        if self.cause.is_none() {
            self.cause = other.cause;
        }
    }

    fn fmt_expected(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected ")?;
        for (idx, descriptor) in self.expected.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            f.write_str(descriptor)?;
        }
        Ok(())
    }
}

impl<I: Input> Error<I> for ParseError<I> {
    fn expected<D>(pos: I, descriptor: D) -> Self
    where
        D: Into<Cow<'static, str>>,
    {
        Self::new(pos, [descriptor])
    }

    fn fatal<C>(pos: I, cause: C) -> Self
    where
        C: Into<Cause>,
    {
        Self {
            input: pos,
            expected: Vec::new(),
            cause: Some(cause.into()),
        }
    }

    fn position(&self) -> &I {
        &self.input
    }

    fn is_fatal(&self) -> bool {
        self.cause.is_some()
    }

    fn merge(mut self, other: Self) -> Self {
        let (this, that) = (self.input.len(), other.input.len());
        if that < this {
            other
        } else {
            if that == this {
                self.add(other);
            }
            self
        }
    }
}

impl<I: Input> fmt::Display for ParseError<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.cause, self.expected.is_empty()) {
            (Some(cause), true) => write!(f, "{cause}"),
            (Some(cause), false) => {
                self.fmt_expected(f)?;
                write!(f, ": {cause}")
            }
            (None, _) => self.fmt_expected(f),
        }
    }
}

impl<I: Input> fmt::Display for ErrorAt<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "char at position {}, {}", self.offset + 1, self.error)
    }
}

impl<I: Input + fmt::Debug> core::error::Error for ParseError<I> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(&**cause),
            None => None,
        }
    }
}

impl<I: PartialEq> PartialEq for ParseError<I> {
    fn eq(&self, other: &Self) -> bool {
        self.input == other.input
            && self.expected == other.expected
            && self.cause.is_some() == other.cause.is_some()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloc::string::ToString;

    #[derive(Debug)]
    struct Overflow;

    impl fmt::Display for Overflow {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("overflow")
        }
    }

    impl core::error::Error for Overflow {}

    #[test]
    fn renders_expected_list() {
        let err = ParseError::new("x", ["digit", "alpha"]);
        assert_eq!(err.to_string(), "expected digit, alpha");
        assert!(!err.is_fatal());
    }

    #[test]
    fn renders_position() {
        let text = "12x";
        let err = ParseError::new(&text[2..], ["Char(y)"]);
        assert_eq!(err.offset(&text), 2);
        assert_eq!(
            err.at(&text).to_string(),
            "char at position 3, expected Char(y)"
        );
    }

    #[test]
    fn fatal_keeps_cause() {
        let err: ParseError<&str> = Error::fatal("", Overflow);
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "overflow");
        assert!(core::error::Error::source(&err).is_some());
        assert_eq!(err.cause().map(ToString::to_string).as_deref(), Some("overflow"));
    }

    #[test]
    fn add_appends_and_adopts_cause() {
        let mut err = ParseError::new("a", ["x"]);
        err.add(ParseError::new_fatal("a", Overflow, ["y"]));
        assert_eq!(err.descriptors(), ["x", "y"]);
        assert!(err.is_fatal());

        let mut err = ParseError::new_fatal("a", Overflow, ["x"]);
        err.add(ParseError::new("a", ["y"]));
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "expected x, y: overflow");
    }

    #[test]
    fn merge_prefers_furthest() {
        let text = "abc";
        let near = ParseError::new(text, ["near"]);
        let far = ParseError::new(&text[2..], ["far"]);
        assert_eq!(near.merge(far).descriptors(), ["far"]);

        let far = ParseError::new(&text[2..], ["far"]);
        let near = ParseError::new(text, ["near"]);
        assert_eq!(far.merge(near).descriptors(), ["far"]);

        let a = ParseError::new(text, ["a"]);
        let b = ParseError::new(text, ["b"]);
        assert_eq!(a.merge(b).descriptors(), ["a", "b"]);
    }

    #[test]
    fn equality_ignores_cause_identity() {
        let a: ParseError<&str> = Error::fatal("z", Overflow);
        let b: ParseError<&str> = Error::fatal("z", "other");
        assert_eq!(a, b);
        assert_ne!(a, ParseError::new("z", [] as [&str; 0]));
    }
}
