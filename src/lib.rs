#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Small parser-combinator core for Rust.
//! `knit` builds parsers for textual and binary formats out of small, reusable
//! pieces. Every parser is a plain value implementing [`Parse`]: it receives an
//! input, and either succeeds with a parsed value and the input that follows it,
//! or fails with an error and the input exactly as it was received.
//!
//! # Contents
//! * [Example](#example) - A complete parser for CSS-style hex colors
//! * [Parser Input](#parser-input) - What can be parsed
//! * [Defining a Parser](#defining-a-parser) - Writing your own parser
//! * [Recoverable and Fatal Errors](#recoverable-and-fatal-errors) - How
//!   failures steer backtracking
//! * [Features](#features) - Available crate features
//!
//! # Example
//! ```
//! use knit::prelude::*;
//! use knit::character::{char, is_hex_digit};
//! use knit::token::take_while_m_n;
//!
//! #[derive(Debug, PartialEq)]
//! struct Color {
//!     red: u8,
//!     green: u8,
//!     blue: u8,
//! }
//!
//! fn hex_byte(input: &str) -> PResult<u8, &str> {
//!     take_while_m_n(2, 2, is_hex_digit)
//!         .try_map(|digits: Span<&str>| u8::from_str_radix(digits.into(), 16))
//!         .parse(input)
//! }
//!
//! fn hex_color(input: &str) -> PResult<Color, &str> {
//!     preceded(char('#'), count(hex_byte, 3))
//!         .map(|rgb| Color {
//!             red: rgb[0],
//!             green: rgb[1],
//!             blue: rgb[2],
//!         })
//!         .parse(input)
//! }
//!
//! fn main() {
//!     assert_eq!(
//!         hex_color.parse("#2F14DF"),
//!         Ok(Success(Color {
//!             red: 0x2f,
//!             green: 0x14,
//!             blue: 0xdf,
//!         }, ""))
//!     );
//!     assert!(hex_color.parse("2F14DF").is_err());
//! }
//! ```
//!
//! # Parser Input
//! A parser consumes a stream of symbols described by the [`Input`] trait.
//! [`Input`] is implemented for `&str` (symbols are [`char`]), for slices
//! `&[T]` of bytes, chars or [`AsciiChar`](ascii::AsciiChar), for
//! [`&AsciiStr`](ascii::AsciiStr), and for [`Span`]s of any of those.
//! Cloning an input is cheap, so backtracking is just a matter of keeping the
//! original input around.
//!
//! [`Parse::parse`] accepts anything implementing [`IntoInput`], so owned
//! buffers such as [`&String`](alloc::string::String) or
//! [`&Vec<u8>`](alloc::vec::Vec) can be handed to a parser directly.
//!
//! The amount of input a parser consumed is always
//! `original.len() - remaining.len()` (see [`Input::len`]).
//!
//! # Defining a Parser
//! Most parsers are plain functions. Any `Fn(I) -> PResult<T, I, E>` where `I`
//! implements [`Input`] and `E` implements [`Error<I>`] is a
//! [`Parse<I, Parsed = T, Error = E>`](Parse).
//!
//! ```
//! use knit::prelude::*;
//! use knit::character::digit1;
//!
//! fn digit_count<I: Input>(input: I) -> PResult<usize, I> {
//!     digit1.map(|digits: Span<I>| digits.len()).parse(input)
//! }
//!
//! assert_eq!(digit_count.parse("2024-01-01"), Ok(Success(4, "-01-01")));
//! ```
//!
//! Parsers that need configuration are built by constructor functions, such as
//! [`token::token`] or [`multi::count`], which capture the configuration once and
//! return an [`impl Parse`](Parse) that can be applied any number of times.
//!
//! # Recoverable and Fatal Errors
//! A failed parser reports an [`Error`]. Errors come in two flavours:
//!
//! * *Recoverable* errors carry a list of human readable "expected" descriptors.
//!   They mean "this alternative did not match here" and let [`branch::either`],
//!   [`branch::optional`] and the repetition combinators try something else.
//! * *Fatal* errors carry an underlying cause, such as an integer overflow or a
//!   rejected value transformation. Combinators never backtrack over a fatal
//!   error: it propagates to the caller unchanged.
//!
//! [`ParseError`] is the concrete error produced by every primitive in this
//! crate. Generic combinators only require [`Error<I>`], so a user defined error
//! type works just as well.
//!
//! Fallible transformations ([`Parse::try_map`]) return any [`ErrorSeed`]:
//! [`ErrorKind`] produces recoverable errors, and any
//! [`core::error::Error`] produces a fatal error wrapping it as its cause.
//!
//! # Features
//! * `macros` - Re-export the variadic [`alt!`](branch::alt) and
//!   [`seq!`](sequence::seq) macros. Enabled by default.

extern crate alloc;

mod container;
mod error;
mod input;
mod span;

pub mod branch;
pub mod character;
pub mod combinator;
pub mod multi;
pub mod number;
pub mod sequence;
pub mod token;

pub use container::*;
pub use error::*;
pub use input::*;
pub use span::*;

extern crate self as knit;

use alloc::borrow::Cow;
use alloc::vec::Vec;

/// The `knit` prelude.
pub mod prelude {
    #[cfg(feature = "macros")]
    pub use super::branch::alt;
    pub use super::branch::{alternative, assign, either, opt, optional, peek, recognize};
    pub use super::combinator::{complete, eof, expect, map, try_map, verify};
    pub use super::multi::{count, many0, many1, separated_list0, separated_list1};
    #[cfg(feature = "macros")]
    pub use super::sequence::seq;
    pub use super::sequence::{delimited, pair, preceded, separated_pair, sequence, terminated};
    pub use super::{
        Error as _, ErrorSeed as _, Failure, Input, IntoInput, PResult, PResultExt, PairContainer,
        Parse, ParseError, Span, Success,
    };
}

/// A parsing error.
///
/// Every error records the input position it describes and is either
/// recoverable (a list of expected descriptors) or fatal (an underlying cause).
/// See [`ParseError`] for the error type used by the primitives in this crate.
pub trait Error<I: Input>: Sized {
    /// Creates a recoverable error expecting `descriptor` at `pos`.
    fn expected<D>(pos: I, descriptor: D) -> Self
    where
        D: Into<Cow<'static, str>>;

    /// Creates a fatal error at `pos` caused by `cause`.
    fn fatal<C>(pos: I, cause: C) -> Self
    where
        C: Into<Cause>;

    /// Input position the error describes.
    fn position(&self) -> &I;

    /// Returns `true` if combinators must not backtrack over this error.
    fn is_fatal(&self) -> bool;

    /// Combines the errors of two failed alternatives.
    ///
    /// The error that progressed further into the input is kept. When both
    /// stopped at the same position, their expected descriptors are combined.
    fn merge(self, other: Self) -> Self;

    /// Creates a recoverable error reporting that the input ended too early.
    #[inline]
    fn need_more_input(pos: I) -> Self {
        Self::expected(pos, "more input")
    }

    /// Creates a recoverable error reporting input left over where it should have ended.
    #[inline]
    fn expected_eof(pos: I) -> Self {
        Self::expected(pos, "end of input")
    }
}

/// A parsing failure that is not yet tied to an input position.
///
/// An [`ErrorSeed`] is a parsing error with the input position abstracted away.
/// Fallible combinators such as [`Parse::try_map`] accept any seed and attach
/// the position themselves.
///
/// ```
/// # use knit::prelude::*;
/// # use knit::character::digit1;
/// fn even(input: &str) -> PResult<u32, &str> {
///     digit1
///         .try_map(|digits: Span<&str>| {
///             let s: &str = digits.into();
///             s.parse::<u32>()
///         })
///         .verify(|n| n % 2 == 0)
///         .parse(input)
/// }
///
/// assert_eq!(even.parse("42!"), Ok(Success(42, "!")));
/// // `ParseIntError` is a seed for a fatal error
/// assert!(even.parse("99999999999").unwrap_err().0.is_fatal());
/// // a failed verification is recoverable
/// assert!(!even.parse("41").unwrap_err().0.is_fatal());
/// ```
///
/// Every [`core::error::Error`] that is `Send + Sync + 'static` is a seed for a
/// fatal error. [`ErrorKind`] is a seed for recoverable errors.
pub trait ErrorSeed<I: Input, E: Error<I>> {
    /// Builds the error, anchored at `pos`.
    fn into_error(self, pos: I) -> E;
}

/// A type implementing [`ErrorSeed`] for recoverable errors of every error and input type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorKind {
    /// Becomes [`Error::need_more_input`].
    NeedMoreInput,
    /// Becomes [`Error::expected_eof`].
    ExpectedEof,
    /// Becomes [`Error::expected`] with the given descriptor.
    Expected(&'static str),
}

/// The outcome of a successful parse.
///
/// [`Success`] is a named tuple containing the parsed value (see
/// [`Parse::Parsed`]) and the remaining unparsed input.
#[derive(Debug, Clone)]
pub struct Success<T, I>(
    /// The parsed value
    pub T,
    /// Input left over after the parsed value
    pub I,
);

/// The outcome of a failed parse.
///
/// [`Failure`] is a named tuple containing the parsing error and the input that
/// failed to parse. The input member is always the input that was originally
/// provided to the parser, even when the error itself points further ahead.
#[derive(Debug, Clone)]
pub struct Failure<E, I>(
    /// The parsing error
    pub E,
    /// The input the parser was given
    pub I,
);

/// What every parser returns.
///
/// The error type defaults to [`ParseError`], the error produced by the
/// primitives in this crate.
pub type PResult<T, I, E = ParseError<I>> = Result<Success<T, I>, Failure<E, I>>;

/// A parser.
///
/// Parsers are immutable once built. Applying the same parser to the same input
/// always gives the same result, so a parser can be shared and reused freely.
pub trait Parse<I: Input> {
    /// Value produced on success.
    type Parsed: Sized;

    /// Error produced on failure.
    type Error: Error<I>;

    /// Applies the parser to `input`.
    fn parse<N>(&self, input: N) -> PResult<Self::Parsed, I, Self::Error>
    where
        N: IntoInput<Input = I>;

    /// Creates a parser that transforms the parsed value with `map_fn`.
    ///
    /// See also [`combinator::map`].
    ///
    /// # Example
    /// ```
    /// # use knit::prelude::*;
    /// # use knit::character::any_char;
    /// fn upper(input: &str) -> PResult<char, &str> {
    ///     any_char.map(|ch: char| ch.to_ascii_uppercase()).parse(input)
    /// }
    ///
    /// assert_eq!(upper.parse("abc"), Ok(Success('A', "bc")));
    /// ```
    #[inline]
    fn map<F, R>(self, map_fn: F) -> impl Parse<I, Parsed = R, Error = Self::Error>
    where
        Self: Sized,
        F: Fn(Self::Parsed) -> R,
    {
        combinator::map(self, map_fn)
    }

    /// Creates a parser that transforms the parsed value with the fallible `map_fn`.
    ///
    /// When `map_fn` returns an [`Err`], the new parser fails at the original
    /// input and the seed is converted with [`ErrorSeed::into_error`].
    ///
    /// See also [`combinator::try_map`].
    #[inline]
    fn try_map<F, R, S>(self, map_fn: F) -> impl Parse<I, Parsed = R, Error = Self::Error>
    where
        Self: Sized,
        S: ErrorSeed<I, Self::Error>,
        F: Fn(Self::Parsed) -> Result<R, S>,
    {
        combinator::try_map(self, map_fn)
    }

    /// Creates a parser that converts failures with `map_err_fn`.
    ///
    /// See also [`combinator::map_err`].
    #[inline]
    fn map_err<F, R>(self, map_err_fn: F) -> impl Parse<I, Parsed = Self::Parsed, Error = R>
    where
        Self: Sized,
        F: Fn(Self::Error) -> R,
        R: Error<I>,
    {
        combinator::map_err(self, map_err_fn)
    }

    /// Creates a parser whose parsed result is converted with [`Into`].
    ///
    /// # Example
    /// ```
    /// # use knit::prelude::*;
    /// # use knit::character::alpha1;
    /// fn word(input: &str) -> PResult<&str, &str> {
    ///     alpha1.ok_into().parse(input)
    /// }
    ///
    /// assert_eq!(word.parse("hello world"), Ok(Success("hello", " world")));
    /// ```
    #[inline]
    fn ok_into<R>(self) -> impl Parse<I, Parsed = R, Error = Self::Error>
    where
        Self: Sized,
        Self::Parsed: Into<R>,
    {
        combinator::map(self, Into::into)
    }

    /// Creates a parser that reports `descriptor` when `self` fails recoverably.
    ///
    /// See also [`combinator::expect`].
    #[inline]
    fn expect(
        self,
        descriptor: &'static str,
    ) -> impl Parse<I, Parsed = Self::Parsed, Error = Self::Error>
    where
        Self: Sized,
    {
        combinator::expect(self, descriptor)
    }

    /// Creates a parser that rejects parsed values failing `verify_fn`.
    ///
    /// A rejected value is a recoverable failure.
    ///
    /// See also [`combinator::verify`].
    #[inline]
    fn verify<F>(self, verify_fn: F) -> impl Parse<I, Parsed = Self::Parsed, Error = Self::Error>
    where
        Self: Sized,
        F: Fn(&Self::Parsed) -> bool,
    {
        combinator::verify(self, verify_fn)
    }

    /// Creates a parser that fails if `self` does not consume all input.
    ///
    /// See also [`combinator::complete`].
    #[inline]
    fn complete(self) -> impl Parse<I, Parsed = Self::Parsed, Error = Self::Error>
    where
        Self: Sized,
    {
        combinator::complete(self)
    }

    /// Creates a parser that succeeds, consuming nothing, only if `self` fails.
    ///
    /// See also [`combinator::not`].
    #[inline]
    fn not(self) -> impl Parse<I, Parsed = (), Error = Self::Error>
    where
        Self: Sized,
    {
        combinator::not(self)
    }

    /// Creates a parser that returns [`None`] instead of failing recoverably.
    ///
    /// See also [`branch::opt`].
    #[inline]
    fn opt(self) -> impl Parse<I, Parsed = Option<Self::Parsed>, Error = Self::Error>
    where
        Self: Sized,
    {
        branch::opt(self)
    }

    /// Creates a parser that returns the default value instead of failing recoverably.
    ///
    /// See also [`branch::optional`].
    #[inline]
    fn optional(self) -> impl Parse<I, Parsed = Self::Parsed, Error = Self::Error>
    where
        Self: Sized,
        Self::Parsed: Default,
    {
        branch::optional(self)
    }

    /// Creates a lookahead parser that never consumes input.
    ///
    /// See also [`branch::peek`].
    #[inline]
    fn peek(self) -> impl Parse<I, Parsed = Self::Parsed, Error = Self::Error>
    where
        Self: Sized,
    {
        branch::peek(self)
    }

    /// Creates a parser that returns a [`Span`] of the input consumed by `self`.
    ///
    /// See also [`branch::recognize`].
    #[inline]
    fn recognize(self) -> impl Parse<I, Parsed = Span<I>, Error = Self::Error>
    where
        Self: Sized,
    {
        branch::recognize(self)
    }

    /// Creates a parser that replaces the parsed value of `self` with `value`.
    ///
    /// See also [`branch::assign`].
    #[inline]
    fn assign<T>(self, value: T) -> impl Parse<I, Parsed = T, Error = Self::Error>
    where
        Self: Sized,
        T: Clone,
    {
        branch::assign(value, self)
    }

    /// Borrows this parser as a parser.
    ///
    /// See also [`combinator::by_ref`].
    #[inline]
    fn by_ref<'a>(&'a self) -> impl Parse<I, Parsed = Self::Parsed, Error = Self::Error> + 'a
    where
        Self: Sized,
        I: 'a,
    {
        combinator::by_ref(self)
    }

    /// Creates a parser that applies `self`, then `other`.
    ///
    /// See also [`sequence::pair`].
    ///
    /// # Example
    /// ```
    /// # use knit::prelude::*;
    /// # use knit::character::{alpha1, digit1};
    /// fn ident(input: &str) -> PResult<PairContainer<Span<&str>, Span<&str>>, &str> {
    ///     alpha1.then(digit1).parse(input)
    /// }
    ///
    /// let Success(PairContainer { left, right }, rem) = ident.parse("abc123;").unwrap();
    /// assert_eq!(left, "abc");
    /// assert_eq!(right, "123");
    /// assert_eq!(rem, ";");
    /// ```
    #[inline]
    fn then<P>(
        self,
        other: P,
    ) -> impl Parse<I, Parsed = PairContainer<Self::Parsed, P::Parsed>, Error = Self::Error>
    where
        Self: Sized,
        P: Parse<I, Error = Self::Error>,
    {
        sequence::pair(self, other)
    }

    /// Creates a parser that tries `self`, then `other`, on the same input.
    ///
    /// See also [`branch::either`].
    #[inline]
    fn or<P>(self, other: P) -> impl Parse<I, Parsed = Self::Parsed, Error = Self::Error>
    where
        Self: Sized,
        P: Parse<I, Parsed = Self::Parsed, Error = Self::Error>,
    {
        branch::either(self, other)
    }

    /// Creates a parser that applies `self` exactly `n` times.
    ///
    /// See also [`multi::count`].
    #[inline]
    fn count(self, n: usize) -> impl Parse<I, Parsed = Vec<Self::Parsed>, Error = Self::Error>
    where
        Self: Sized,
    {
        multi::count(self, n)
    }

    /// Creates a parser that applies `self` zero or more times.
    ///
    /// See also [`multi::many0`].
    #[inline]
    fn many0(self) -> impl Parse<I, Parsed = Vec<Self::Parsed>, Error = Self::Error>
    where
        Self: Sized,
    {
        multi::many0(self)
    }

    /// Creates a parser that applies `self` one or more times.
    ///
    /// See also [`multi::many1`].
    #[inline]
    fn many1(self) -> impl Parse<I, Parsed = Vec<Self::Parsed>, Error = Self::Error>
    where
        Self: Sized,
    {
        multi::many1(self)
    }

    /// Creates a parser for zero or more `self` separated by `separator`.
    ///
    /// See also [`multi::separated_list0`].
    #[inline]
    fn separated_list0<S>(
        self,
        separator: S,
    ) -> impl Parse<I, Parsed = Vec<Self::Parsed>, Error = Self::Error>
    where
        Self: Sized,
        S: Parse<I, Error = Self::Error>,
    {
        multi::separated_list0(separator, self)
    }

    /// Creates a parser for one or more `self` separated by `separator`.
    ///
    /// See also [`multi::separated_list1`].
    ///
    /// # Example
    /// ```
    /// # use knit::prelude::*;
    /// # use knit::character::char;
    /// # use knit::number::uint8;
    /// fn octets(input: &str) -> PResult<Vec<u8>, &str> {
    ///     uint8.separated_list1(char('.')).parse(input)
    /// }
    ///
    /// assert_eq!(octets.parse("10.0.0.1 "), Ok(Success(vec![10, 0, 0, 1], " ")));
    /// assert_eq!(octets.parse("10.0."), Ok(Success(vec![10, 0], ".")));
    /// ```
    #[inline]
    fn separated_list1<S>(
        self,
        separator: S,
    ) -> impl Parse<I, Parsed = Vec<Self::Parsed>, Error = Self::Error>
    where
        Self: Sized,
        S: Parse<I, Error = Self::Error>,
    {
        multi::separated_list1(separator, self)
    }
}

mod sealed {
    use super::{Error, Input, PResult};

    pub trait Sealed {}

    impl<T, I: Input, E: Error<I>> Sealed for PResult<T, I, E> {}
}

/// Helpers for building and inspecting a [`PResult`].
pub trait PResultExt: sealed::Sealed {
    type Parsed;
    type Error: Error<Self::Input>;
    type Input: Input;

    fn success(parsed: Self::Parsed, rem: Self::Input) -> Self;

    fn failure(error: Self::Error, rem: Self::Input) -> Self;

    fn remaining(&self) -> &Self::Input;

    fn parsed(&self) -> Option<&Self::Parsed>;

    /// Amount of input consumed relative to `original`, in storage units.
    ///
    /// Always zero for a failure.
    fn consumed(&self, original: &Self::Input) -> usize;

    fn extract(self) -> (Result<Self::Parsed, Self::Error>, Self::Input);

    fn map_parsed<F, R>(self, map_fn: F) -> PResult<R, Self::Input, Self::Error>
    where
        F: FnOnce(Self::Parsed) -> R;
}

impl<T, I: Input, E: Error<I>> PResultExt for PResult<T, I, E> {
    type Parsed = T;
    type Error = E;
    type Input = I;

    fn success(parsed: T, rem: I) -> Self {
        Ok(Success(parsed, rem))
    }

    fn failure(error: E, rem: I) -> Self {
        Err(Failure(error, rem))
    }

    fn remaining(&self) -> &I {
        match self {
            Ok(Success(_, rem)) => rem,
            Err(Failure(_, rem)) => rem,
        }
    }

    fn parsed(&self) -> Option<&Self::Parsed> {
        if let Ok(Success(val, _)) = self {
            Some(val)
        } else {
            None
        }
    }

    fn consumed(&self, original: &I) -> usize {
        match self {
            Ok(Success(_, rem)) => original.len().saturating_sub(rem.len()),
            Err(_) => 0,
        }
    }

    fn extract(self) -> (Result<T, E>, I) {
        match self {
            Ok(Success(val, rem)) => (Ok(val), rem),
            Err(Failure(err, rem)) => (Err(err), rem),
        }
    }

    fn map_parsed<F, R>(self, map_fn: F) -> PResult<R, I, E>
    where
        F: FnOnce(Self::Parsed) -> R,
    {
        self.map(move |succ| succ.map(map_fn))
    }
}

impl<F, T, I, E> Parse<I> for F
where
    F: Fn(I) -> PResult<T, I, E>,
    I: Input,
    E: Error<I>,
{
    type Parsed = T;
    type Error = E;

    fn parse<N>(&self, input: N) -> PResult<T, I, E>
    where
        N: IntoInput<Input = I>,
    {
        (*self)(input.into_input())
    }
}

impl<T, I: Input> Success<T, I> {
    pub fn map<F, R>(self, map_fn: F) -> Success<R, I>
    where
        F: FnOnce(T) -> R,
    {
        let Success(val, rem) = self;
        Success(map_fn(val), rem)
    }
}

impl<T, I> From<Success<T, I>> for (T, I) {
    fn from(Success(t, i): Success<T, I>) -> (T, I) {
        (t, i)
    }
}

impl<T, I> From<(T, I)> for Success<T, I> {
    fn from((t, i): (T, I)) -> Self {
        Self(t, i)
    }
}

impl<T, U: From<T>, I: Input, E: Error<I>> From<Success<T, I>> for PResult<U, I, E> {
    fn from(Success(val, rem): Success<T, I>) -> Self {
        Ok(Success(U::from(val), rem))
    }
}

impl<T, I> From<Failure<T, I>> for (T, I) {
    fn from(Failure(t, i): Failure<T, I>) -> (T, I) {
        (t, i)
    }
}

impl<T, I> From<(T, I)> for Failure<T, I> {
    fn from((t, i): (T, I)) -> Self {
        Self(t, i)
    }
}

impl<I: Input, E: Error<I>> ErrorSeed<I, E> for ErrorKind {
    fn into_error(self, pos: I) -> E {
        match self {
            Self::NeedMoreInput => E::need_more_input(pos),
            Self::ExpectedEof => E::expected_eof(pos),
            Self::Expected(descriptor) => E::expected(pos, descriptor),
        }
    }
}

impl<I, E, C> ErrorSeed<I, E> for C
where
    I: Input,
    E: Error<I>,
    C: core::error::Error + Send + Sync + 'static,
{
    fn into_error(self, pos: I) -> E {
        E::fatal(pos, self)
    }
}

impl<LT, LI, RT, RI> PartialEq<Success<RT, RI>> for Success<LT, LI>
where
    LT: PartialEq<RT>,
    LI: PartialEq<RI>,
{
    fn eq(&self, other: &Success<RT, RI>) -> bool {
        PartialEq::eq(&self.0, &other.0) && PartialEq::eq(&self.1, &other.1)
    }
}

impl<T, I> Eq for Success<T, I>
where
    T: Eq,
    I: Eq,
{
}

impl<LE, LI, RE, RI> PartialEq<Failure<RE, RI>> for Failure<LE, LI>
where
    LE: PartialEq<RE>,
    LI: PartialEq<RI>,
{
    fn eq(&self, other: &Failure<RE, RI>) -> bool {
        PartialEq::eq(&self.0, &other.0) && PartialEq::eq(&self.1, &other.1)
    }
}

impl<T, I> Eq for Failure<T, I>
where
    T: Eq,
    I: Eq,
{
}
