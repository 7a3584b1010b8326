//! Choice, lookahead and value substitution.
//!
//! Alternatives are tried left to right on the same input and the first
//! success wins. A recoverable failure moves on to the next alternative; a
//! fatal failure ends the trial immediately. When every alternative fails
//! recoverably, their errors are combined with [`Error::merge`], so the
//! reported error lists everything that would have been accepted at the
//! furthest position reached.

use crate::{Error, Failure, Input, IntoInput, PResult, Parse, Span, Success};
use core::marker::PhantomData;

/// Creates a parser that returns the result of the first argument to succeed.
///
/// [`alt`] accepts any number of parsers, which must all produce the same
/// value and error types. It expands to nested [`either`] calls.
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::token::token;
/// fn keyword(input: &str) -> PResult<u8, &str> {
///     alt!(
///         token("let").assign(0),
///         token("fn").assign(1),
///         token("if").assign(2),
///     )
///     .parse(input)
/// }
///
/// assert_eq!(keyword.parse("fn main"), Ok(Success(1, " main")));
/// let err = keyword.parse("for").unwrap_err().0;
/// assert_eq!(err.to_string(), "expected Token(let), Token(fn), Token(if)");
/// ```
#[cfg(feature = "macros")]
pub use knit_macros::alt;

#[derive(Debug, Clone)]
struct EitherParser<P, Q, I>(P, Q, PhantomData<fn() -> I>)
where
    P: Parse<I>,
    Q: Parse<I, Parsed = P::Parsed, Error = P::Error>,
    I: Input;

impl<P, Q, I> Parse<I> for EitherParser<P, Q, I>
where
    P: Parse<I>,
    Q: Parse<I, Parsed = P::Parsed, Error = P::Error>,
    I: Input,
{
    type Parsed = P::Parsed;
    type Error = P::Error;

    fn parse<N>(&self, input: N) -> PResult<Self::Parsed, I, Self::Error>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        let first = match self.0.parse(input.clone()) {
            Err(Failure(err, _)) if !err.is_fatal() => err,
            res => return res,
        };
        match self.1.parse(input.clone()) {
            Err(Failure(err, _)) if !err.is_fatal() => Err(Failure(first.merge(err), input)),
            res => res,
        }
    }
}

/// Creates a parser that tries `first`, then `second`.
///
/// `second` only runs if `first` fails recoverably. If both fail recoverably,
/// the errors are merged.
///
/// See also [`Parse::or`] and [`alt`].
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::character::{alpha1, digit1};
/// let word_or_number = either(alpha1, digit1);
/// assert_eq!(word_or_number.parse("abc1").unwrap().0, "abc");
/// assert_eq!(word_or_number.parse("12ab").unwrap().0, "12");
///
/// let err = word_or_number.parse("-").unwrap_err().0;
/// assert_eq!(err.descriptors(), ["alpha", "digit"]);
/// ```
#[inline]
pub const fn either<P, Q, I>(
    first: P,
    second: Q,
) -> impl Parse<I, Parsed = P::Parsed, Error = P::Error>
where
    P: Parse<I>,
    Q: Parse<I, Parsed = P::Parsed, Error = P::Error>,
    I: Input,
{
    EitherParser(first, second, PhantomData)
}

#[derive(Debug, Clone)]
struct AlternativeParser<C, P, I>(C, PhantomData<fn() -> (P, I)>)
where
    C: AsRef<[P]>,
    P: Parse<I>,
    I: Input;

impl<C, P, I> Parse<I> for AlternativeParser<C, P, I>
where
    C: AsRef<[P]>,
    P: Parse<I>,
    I: Input,
{
    type Parsed = P::Parsed;
    type Error = P::Error;

    fn parse<N>(&self, input: N) -> PResult<Self::Parsed, I, Self::Error>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        let mut error: Option<P::Error> = None;
        for parser in self.0.as_ref() {
            match parser.parse(input.clone()) {
                Err(Failure(err, _)) if !err.is_fatal() => {
                    error = Some(match error {
                        Some(prev) => prev.merge(err),
                        None => err,
                    });
                }
                res => return res,
            }
        }
        let error = match error {
            Some(err) => err,
            None => Error::expected(input.clone(), "alternative"),
        };
        Err(Failure(error, input))
    }
}

/// Creates a parser that tries each parser of a homogeneous list in order.
///
/// `parsers` is anything that can be viewed as a slice of parsers of one type.
/// The first success is returned. A fatal failure stops the trial. An empty
/// list always fails recoverably.
///
/// For parsers of different types, use [`alt`].
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::character::char;
/// let sign = alternative([char('+'), char('-')]);
/// assert_eq!(sign.parse("-1"), Ok(Success('-', "1")));
/// assert_eq!(
///     sign.parse("1").unwrap_err().0.to_string(),
///     "expected Char(+), Char(-)"
/// );
/// ```
#[inline]
pub const fn alternative<C, P, I>(
    parsers: C,
) -> impl Parse<I, Parsed = P::Parsed, Error = P::Error>
where
    C: AsRef<[P]>,
    P: Parse<I>,
    I: Input,
{
    AlternativeParser(parsers, PhantomData)
}

#[derive(Debug, Clone)]
struct OptParser<P, I>(P, PhantomData<fn() -> I>)
where
    P: Parse<I>,
    I: Input;

impl<P, I> Parse<I> for OptParser<P, I>
where
    P: Parse<I>,
    I: Input,
{
    type Parsed = Option<P::Parsed>;
    type Error = P::Error;

    fn parse<N>(&self, input: N) -> PResult<Self::Parsed, I, Self::Error>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        match self.0.parse(input.clone()) {
            Ok(Success(val, rem)) => Ok(Success(Some(val), rem)),
            Err(Failure(err, _)) if err.is_fatal() => Err(Failure(err, input)),
            Err(_) => Ok(Success(None, input)),
        }
    }
}

/// Creates a parser that returns [`None`] instead of failing recoverably.
///
/// See also [`optional`] and [`Parse::opt`].
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::character::char;
/// let sign = opt(char('-'));
/// assert_eq!(sign.parse("-1"), Ok(Success(Some('-'), "1")));
/// assert_eq!(sign.parse("1"), Ok(Success(None, "1")));
/// ```
#[inline]
pub const fn opt<P, I>(parser: P) -> impl Parse<I, Parsed = Option<P::Parsed>, Error = P::Error>
where
    P: Parse<I>,
    I: Input,
{
    OptParser(parser, PhantomData)
}

#[derive(Debug, Clone)]
struct OptionalParser<P, I>(P, PhantomData<fn() -> I>)
where
    P: Parse<I>,
    P::Parsed: Default,
    I: Input;

impl<P, I> Parse<I> for OptionalParser<P, I>
where
    P: Parse<I>,
    P::Parsed: Default,
    I: Input,
{
    type Parsed = P::Parsed;
    type Error = P::Error;

    fn parse<N>(&self, input: N) -> PResult<Self::Parsed, I, Self::Error>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        match self.0.parse(input.clone()) {
            Err(Failure(err, _)) if err.is_fatal() => Err(Failure(err, input)),
            Err(_) => Ok(Success(Default::default(), input)),
            succ => succ,
        }
    }
}

/// Creates a parser that succeeds with the default value instead of failing recoverably.
///
/// On a recoverable failure of `parser`, the new parser returns
/// [`Default::default`] and consumes nothing. A fatal failure is returned as is.
///
/// See also [`opt`] and [`Parse::optional`].
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::number::int64;
/// let offset = optional(int64);
/// assert_eq!(offset.parse("-3px"), Ok(Success(-3, "px")));
/// assert_eq!(offset.parse("px"), Ok(Success(0, "px")));
/// // overflow is fatal and is not turned into a zero
/// assert!(offset.parse("99999999999999999999").is_err());
/// ```
#[inline]
pub const fn optional<P, I>(parser: P) -> impl Parse<I, Parsed = P::Parsed, Error = P::Error>
where
    P: Parse<I>,
    P::Parsed: Default,
    I: Input,
{
    OptionalParser(parser, PhantomData)
}

#[derive(Debug, Clone)]
struct PeekParser<P, I>(P, PhantomData<fn() -> I>)
where
    P: Parse<I>,
    I: Input;

impl<P, I> Parse<I> for PeekParser<P, I>
where
    P: Parse<I>,
    I: Input,
{
    type Parsed = P::Parsed;
    type Error = P::Error;

    fn parse<N>(&self, input: N) -> PResult<Self::Parsed, I, Self::Error>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        match self.0.parse(input.clone()) {
            Ok(Success(val, _)) => Ok(Success(val, input)),
            Err(Failure(err, _)) => Err(Failure(err, input)),
        }
    }
}

/// Creates a parser that applies `parser` without consuming input.
///
/// See also [`Parse::peek`].
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::character::digit1;
/// assert_eq!(peek(digit1).parse("42x").unwrap().1, "42x");
/// ```
#[inline]
pub const fn peek<P, I>(parser: P) -> impl Parse<I, Parsed = P::Parsed, Error = P::Error>
where
    P: Parse<I>,
    I: Input,
{
    PeekParser(parser, PhantomData)
}

#[derive(Debug, Clone)]
struct RecognizeParser<P, I>(P, PhantomData<fn() -> I>)
where
    P: Parse<I>,
    I: Input;

impl<P, I> Parse<I> for RecognizeParser<P, I>
where
    P: Parse<I>,
    I: Input,
{
    type Parsed = Span<I>;
    type Error = P::Error;

    fn parse<N>(&self, input: N) -> PResult<Self::Parsed, I, Self::Error>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        match self.0.parse(input.clone()) {
            Ok(Success(_, rem)) => Ok(Success(Span::new(input, rem.clone()), rem)),
            Err(Failure(err, _)) => Err(Failure(err, input)),
        }
    }
}

/// Creates a parser that returns the span of input consumed by `parser`.
///
/// The value `parser` produced is discarded.
///
/// See also [`Parse::recognize`].
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::character::char;
/// # use knit::number::int64;
/// let literal = recognize(separated_pair(int64, char('/'), int64));
/// let Success(text, rem) = literal.parse("3/4 cup").unwrap();
/// assert_eq!(text, "3/4");
/// assert_eq!(rem, " cup");
/// ```
#[inline]
pub const fn recognize<P, I>(parser: P) -> impl Parse<I, Parsed = Span<I>, Error = P::Error>
where
    P: Parse<I>,
    I: Input,
{
    RecognizeParser(parser, PhantomData)
}

#[derive(Debug, Clone)]
struct AssignParser<P, T, I>(T, P, PhantomData<fn() -> I>)
where
    P: Parse<I>,
    T: Clone,
    I: Input;

impl<P, T, I> Parse<I> for AssignParser<P, T, I>
where
    P: Parse<I>,
    T: Clone,
    I: Input,
{
    type Parsed = T;
    type Error = P::Error;

    fn parse<N>(&self, input: N) -> PResult<T, I, Self::Error>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        match self.1.parse(input.clone()) {
            Ok(Success(_, rem)) => Ok(Success(self.0.clone(), rem)),
            Err(Failure(err, _)) => Err(Failure(err, input)),
        }
    }
}

/// Creates a parser that replaces the value of `parser` with `value`.
///
/// See also [`Parse::assign`].
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::token::token;
/// let yes = assign(true, token("yes"));
/// assert_eq!(yes.parse("yes!"), Ok(Success(true, "!")));
/// assert!(yes.parse("no").is_err());
/// ```
#[inline]
pub const fn assign<T, P, I>(value: T, parser: P) -> impl Parse<I, Parsed = T, Error = P::Error>
where
    P: Parse<I>,
    T: Clone,
    I: Input,
{
    AssignParser(value, parser, PhantomData)
}
