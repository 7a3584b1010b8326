//! Value transformations and general purpose combinators.
//!
//! Every combinator here works with any input and error type. Most are also
//! available as methods on the [`Parse`] trait.

use crate::{Error, ErrorSeed, Failure, Input, IntoInput, PResult, PResultExt, Parse, Success};
use core::marker::PhantomData;

#[derive(Debug, Clone)]
struct MapParser<P, F, R, I>(P, F, PhantomData<fn() -> (R, I)>)
where
    P: Parse<I>,
    I: Input,
    F: Fn(P::Parsed) -> R;

impl<P, F, R, I> Parse<I> for MapParser<P, F, R, I>
where
    P: Parse<I>,
    I: Input,
    F: Fn(P::Parsed) -> R,
{
    type Parsed = R;
    type Error = P::Error;

    fn parse<N>(&self, input: N) -> PResult<R, I, Self::Error>
    where
        N: IntoInput<Input = I>,
    {
        self.0.parse(input.into_input()).map_parsed(&self.1)
    }
}

/// Creates a parser whose parsed result is transformed by an infallible function.
///
/// For a transformation that can reject the value, use [`try_map`].
///
/// See also [`Parse::map`].
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::character::digit1;
/// fn width(input: &str) -> PResult<usize, &str> {
///     map(digit1, |digits: Span<&str>| digits.len()).parse(input)
/// }
///
/// assert_eq!(width.parse("0042px"), Ok(Success(4, "px")));
/// ```
#[inline]
pub const fn map<P, F, R, I>(parser: P, map_fn: F) -> impl Parse<I, Parsed = R, Error = P::Error>
where
    P: Parse<I>,
    I: Input,
    F: Fn(P::Parsed) -> R,
{
    MapParser(parser, map_fn, PhantomData)
}

#[derive(Debug, Clone)]
struct TryMapParser<P, F, R, S, I>(P, F, PhantomData<fn() -> (R, S, I)>)
where
    P: Parse<I>,
    I: Input,
    S: ErrorSeed<I, P::Error>,
    F: Fn(P::Parsed) -> Result<R, S>;

impl<P, F, R, S, I> Parse<I> for TryMapParser<P, F, R, S, I>
where
    P: Parse<I>,
    I: Input,
    S: ErrorSeed<I, P::Error>,
    F: Fn(P::Parsed) -> Result<R, S>,
{
    type Parsed = R;
    type Error = P::Error;

    fn parse<N>(&self, input: N) -> PResult<R, I, Self::Error>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        match self.0.parse(input.clone()).map_parsed(&self.1) {
            Ok(Success(Ok(val), rem)) => Ok(Success(val, rem)),
            Ok(Success(Err(seed), _)) => Err(Failure(seed.into_error(input.clone()), input)),
            Err(Failure(err, _)) => Err(Failure(err, input)),
        }
    }
}

/// Creates a parser whose parsed result is fallibly transformed.
///
/// When `parser` succeeds, its value is passed to `try_map_fn`. An [`Ok`]
/// becomes the new parsed value. An [`Err`] makes the new parser fail at the
/// original input, with the error built from the returned [`ErrorSeed`]. Any
/// [`core::error::Error`] seeds a fatal error, so a rejected transformation stops
/// enclosing alternatives and repetitions.
///
/// See also [`Parse::try_map`].
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::character::digit1;
/// fn port(input: &str) -> PResult<u16, &str> {
///     try_map(digit1, |digits: Span<&str>| {
///         let digits: &str = digits.into();
///         digits.parse::<u16>()
///     })
///     .parse(input)
/// }
///
/// assert_eq!(port.parse("8080/"), Ok(Success(8080, "/")));
/// let Failure(err, rem) = port.parse("65536").unwrap_err();
/// assert!(err.is_fatal());
/// assert_eq!(rem, "65536");
/// ```
#[inline]
pub const fn try_map<P, F, R, S, I>(
    parser: P,
    try_map_fn: F,
) -> impl Parse<I, Parsed = R, Error = P::Error>
where
    P: Parse<I>,
    I: Input,
    S: ErrorSeed<I, P::Error>,
    F: Fn(P::Parsed) -> Result<R, S>,
{
    TryMapParser(parser, try_map_fn, PhantomData)
}

#[derive(Debug, Clone)]
struct MapErrParser<P, F, R, I>(P, F, PhantomData<fn() -> (R, I)>)
where
    P: Parse<I>,
    I: Input,
    F: Fn(P::Error) -> R,
    R: Error<I>;

impl<P, F, R, I> Parse<I> for MapErrParser<P, F, R, I>
where
    P: Parse<I>,
    I: Input,
    F: Fn(P::Error) -> R,
    R: Error<I>,
{
    type Parsed = P::Parsed;
    type Error = R;

    fn parse<N>(&self, input: N) -> PResult<Self::Parsed, I, R>
    where
        N: IntoInput<Input = I>,
    {
        match self.0.parse(input.into_input()) {
            Ok(succ) => Ok(succ),
            Err(Failure(err, rem)) => Err(Failure((self.1)(err), rem)),
        }
    }
}

/// Creates a parser that transforms a parsing error.
///
/// This is mostly useful to convert between error types.
///
/// See also [`Parse::map_err`].
#[inline]
pub const fn map_err<P, F, R, I>(
    parser: P,
    map_err_fn: F,
) -> impl Parse<I, Parsed = P::Parsed, Error = R>
where
    P: Parse<I>,
    I: Input,
    F: Fn(P::Error) -> R,
    R: Error<I>,
{
    MapErrParser(parser, map_err_fn, PhantomData)
}

#[derive(Debug, Clone)]
struct ExpectParser<P, I>(P, &'static str, PhantomData<fn() -> I>)
where
    P: Parse<I>,
    I: Input;

impl<P, I> Parse<I> for ExpectParser<P, I>
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
        match self.0.parse(input.into_input()) {
            Err(Failure(err, rem)) if !err.is_fatal() => {
                let pos = err.position().clone();
                Err(Failure(<P::Error as Error<I>>::expected(pos, self.1), rem))
            }
            res => res,
        }
    }
}

/// Creates a parser that reports `descriptor` as the only expectation when
/// `parser` fails recoverably.
///
/// Fatal errors pass through untouched.
///
/// See also [`Parse::expect`].
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::character::{char, digit1};
/// fn version(input: &str) -> PResult<Span<&str>, &str> {
///     expect(preceded(char('v'), digit1), "version").parse(input)
/// }
///
/// let err = version.parse("x1").unwrap_err().0;
/// assert_eq!(err.to_string(), "expected version");
/// ```
#[inline]
pub const fn expect<P, I>(
    parser: P,
    descriptor: &'static str,
) -> impl Parse<I, Parsed = P::Parsed, Error = P::Error>
where
    P: Parse<I>,
    I: Input,
{
    ExpectParser(parser, descriptor, PhantomData)
}

#[derive(Debug, Clone)]
struct VerifyParser<P, F, I>(P, F, PhantomData<fn() -> I>)
where
    P: Parse<I>,
    I: Input,
    F: Fn(&P::Parsed) -> bool;

impl<P, F, I> Parse<I> for VerifyParser<P, F, I>
where
    P: Parse<I>,
    I: Input,
    F: Fn(&P::Parsed) -> bool,
{
    type Parsed = P::Parsed;
    type Error = P::Error;

    fn parse<N>(&self, input: N) -> PResult<Self::Parsed, I, Self::Error>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        match self.0.parse(input.clone()) {
            Ok(Success(val, rem)) if (self.1)(&val) => Ok(Success(val, rem)),
            Ok(_) => Err(Failure(Error::expected(input.clone(), "verify"), input)),
            Err(Failure(err, _)) => Err(Failure(err, input)),
        }
    }
}

/// Creates a parser that succeeds only if the parsed value passes `verify_fn`.
///
/// A rejected value is a recoverable failure at the original input.
///
/// See also [`Parse::verify`].
#[inline]
pub const fn verify<P, F, I>(
    parser: P,
    verify_fn: F,
) -> impl Parse<I, Parsed = P::Parsed, Error = P::Error>
where
    P: Parse<I>,
    I: Input,
    F: Fn(&P::Parsed) -> bool,
{
    VerifyParser(parser, verify_fn, PhantomData)
}

/// Parser that succeeds only at the end of input.
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::ParseError;
/// assert!(eof::<_, ParseError<&str>>.parse("").is_ok());
/// assert!(eof::<_, ParseError<&str>>.parse("x").is_err());
/// ```
pub fn eof<I: Input, E: Error<I>>(input: I) -> PResult<(), I, E> {
    if input.is_empty() {
        Ok(Success((), input))
    } else {
        Err(Failure(E::expected_eof(input.clone()), input))
    }
}

#[derive(Debug, Clone)]
struct CompleteParser<P, I>(P, PhantomData<fn() -> I>)
where
    P: Parse<I>,
    I: Input;

impl<P, I> Parse<I> for CompleteParser<P, I>
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
        let Success(val, rem) = self.0.parse(input.clone())?;
        if rem.is_empty() {
            Ok(Success(val, rem))
        } else {
            Err(Failure(Error::expected_eof(rem), input))
        }
    }
}

/// Creates a parser that fails unless `parser` consumes the entire input.
///
/// See also [`Parse::complete`].
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::number::int64;
/// assert_eq!(complete(int64).parse("-12"), Ok(Success(-12, "")));
/// assert!(complete(int64).parse("-12 ").is_err());
/// ```
#[inline]
pub const fn complete<P, I>(parser: P) -> impl Parse<I, Parsed = P::Parsed, Error = P::Error>
where
    P: Parse<I>,
    I: Input,
{
    CompleteParser(parser, PhantomData)
}

#[derive(Debug, Clone)]
struct ConstantParser<F, T, I, E>(F, PhantomData<fn() -> (T, I, E)>)
where
    F: Fn() -> T,
    I: Input,
    E: Error<I>;

impl<F, T, I, E> Parse<I> for ConstantParser<F, T, I, E>
where
    F: Fn() -> T,
    I: Input,
    E: Error<I>,
{
    type Parsed = T;
    type Error = E;

    fn parse<N>(&self, input: N) -> PResult<T, I, E>
    where
        N: IntoInput<Input = I>,
    {
        Ok(Success((self.0)(), input.into_input()))
    }
}

/// Creates a parser that always succeeds with the value of `const_fn`, consuming nothing.
#[inline]
pub const fn constant<F, T, I, E>(const_fn: F) -> impl Parse<I, Parsed = T, Error = E>
where
    F: Fn() -> T,
    I: Input,
    E: Error<I>,
{
    ConstantParser(const_fn, PhantomData)
}

#[derive(Debug, Clone)]
struct FailParser<T, I, E>(&'static str, PhantomData<fn() -> (T, I, E)>)
where
    I: Input,
    E: Error<I>;

impl<T, I, E> Parse<I> for FailParser<T, I, E>
where
    I: Input,
    E: Error<I>,
{
    type Parsed = T;
    type Error = E;

    fn parse<N>(&self, input: N) -> PResult<T, I, E>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        Err(Failure(E::expected(input.clone(), self.0), input))
    }
}

/// Creates a parser that always fails recoverably, expecting `descriptor`.
#[inline]
pub const fn fail<T, I, E>(descriptor: &'static str) -> impl Parse<I, Parsed = T, Error = E>
where
    I: Input,
    E: Error<I>,
{
    FailParser(descriptor, PhantomData)
}

#[derive(Debug, Clone)]
struct NotParser<P, I>(P, PhantomData<fn() -> I>)
where
    P: Parse<I>,
    I: Input;

impl<P, I> Parse<I> for NotParser<P, I>
where
    P: Parse<I>,
    I: Input,
{
    type Parsed = ();
    type Error = P::Error;

    fn parse<N>(&self, input: N) -> PResult<(), I, Self::Error>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        match self.0.parse(input.clone()) {
            Ok(_) => Err(Failure(Error::expected(input.clone(), "not"), input)),
            Err(Failure(err, _)) if err.is_fatal() => Err(Failure(err, input)),
            Err(_) => Ok(Success((), input)),
        }
    }
}

/// Creates a parser that succeeds without consuming input only if `parser` fails.
///
/// A fatal failure of `parser` is still a failure.
///
/// See also [`Parse::not`].
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::character::{alpha1, char};
/// fn bare_word(input: &str) -> PResult<Span<&str>, &str> {
///     preceded(char('"').not(), alpha1).parse(input)
/// }
///
/// assert!(bare_word.parse("word").is_ok());
/// assert!(bare_word.parse("\"word\"").is_err());
/// ```
#[inline]
pub const fn not<P, I>(parser: P) -> impl Parse<I, Parsed = (), Error = P::Error>
where
    P: Parse<I>,
    I: Input,
{
    NotParser(parser, PhantomData)
}

#[derive(Debug, Clone)]
struct ByRefParser<'a, P, I>(&'a P, PhantomData<fn() -> I>)
where
    P: Parse<I>,
    I: Input;

impl<P, I> Parse<I> for ByRefParser<'_, P, I>
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
        self.0.parse(input.into_input())
    }
}

/// Creates a parser out of a reference to another parser.
///
/// [`Parse`] is not implemented for references, so this is how one parser is
/// shared by several combinators without cloning it.
///
/// See also [`Parse::by_ref`].
#[inline]
pub const fn by_ref<'a, P, I>(
    parser: &'a P,
) -> impl Parse<I, Parsed = P::Parsed, Error = P::Error> + 'a
where
    P: Parse<I>,
    I: Input + 'a,
{
    ByRefParser(parser, PhantomData)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::character::{alpha1, char, digit1};
    use crate::sequence::preceded;
    use crate::{ErrorKind, ParseError, Span};

    #[test]
    fn map_keeps_remaining() {
        let parser = map(digit1, |digits: Span<&str>| digits.len());
        assert_eq!(parser.parse("123abc"), Ok(Success(3, "abc")));
        let Failure(err, rem) = parser.parse("abc").unwrap_err();
        assert_eq!(rem, "abc");
        assert!(!err.is_fatal());
    }

    #[test]
    fn try_map_rejection_is_anchored_at_start() {
        let parser = try_map(preceded(char('#'), alpha1), |word: Span<&str>| {
            if word == "red" {
                Ok(0xff0000u32)
            } else {
                Err(ErrorKind::Expected("color name"))
            }
        });
        assert_eq!(parser.parse("#red;"), Ok(Success(0xff0000, ";")));
        let Failure(err, rem) = parser.parse("#blue;").unwrap_err();
        assert_eq!(rem, "#blue;");
        assert_eq!(err, ParseError::new("#blue;", ["color name"]));
    }

    #[test]
    fn try_map_core_error_is_fatal() {
        let parser = try_map(digit1, |digits: Span<&str>| {
            let digits: &str = digits.into();
            digits.parse::<u8>()
        });
        let Failure(err, rem) = parser.parse("300").unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(rem, "300");
    }

    #[test]
    fn map_err_rewrites_failure() {
        let parser = map_err(digit1, |err: ParseError<&str>| {
            ParseError::new(*err.input(), ["port"])
        });
        assert_eq!(parser.parse("80/").unwrap().1, "/");
        let Failure(err, rem) = parser.parse("http").unwrap_err();
        assert_eq!(rem, "http");
        assert_eq!(err.descriptors(), ["port"]);

        let parser =
            alpha1.map_err(|err: ParseError<&str>| ParseError::new(*err.input(), ["scheme"]));
        assert_eq!(parser.parse("80").unwrap_err().0.descriptors(), ["scheme"]);
    }

    #[test]
    fn ok_into_converts_parsed() {
        let parser = alpha1.ok_into::<&str>();
        assert_eq!(parser.parse("abc1"), Ok(Success("abc", "1")));
        assert_eq!(parser.parse("1").unwrap_err().1, "1");
    }

    #[test]
    fn expect_replaces_descriptors() {
        let parser = expect(digit1, "number");
        let err = parser.parse("x").unwrap_err().0;
        assert_eq!(err.descriptors(), ["number"]);
    }

    #[test]
    fn expect_keeps_fatal() {
        let parser = expect(
            try_map(digit1, |digits: Span<&str>| {
                let digits: &str = digits.into();
                digits.parse::<u8>()
            }),
            "byte",
        );
        let err = parser.parse("999").unwrap_err().0;
        assert!(err.is_fatal());
        assert!(err.descriptors().is_empty());
    }

    #[test]
    fn verify_rejects() {
        let parser = verify(digit1, |digits: &Span<&str>| digits.len() == 2);
        assert!(parser.parse("12").is_ok());
        assert_eq!(parser.parse("123").unwrap_err().1, "123");
    }

    #[test]
    fn complete_requires_end() {
        assert_eq!(complete(alpha1).parse("abc").unwrap().1, "");
        let Failure(err, rem) = complete(alpha1).parse("abc1").unwrap_err();
        assert_eq!(rem, "abc1");
        assert_eq!(*err.input(), "1");
    }

    #[test]
    fn constant_and_fail() {
        let zero = constant::<_, _, &str, ParseError<&str>>(|| 0u8);
        assert_eq!(zero.parse("abc"), Ok(Success(0, "abc")));
        let nothing = fail::<u8, &str, ParseError<&str>>("nothing");
        assert_eq!(
            nothing.parse("abc"),
            Err(Failure(ParseError::new("abc", ["nothing"]), "abc"))
        );
    }

    #[test]
    fn not_inverts() {
        let parser = not(char('a'));
        assert_eq!(parser.parse("bc"), Ok(Success((), "bc")));
        assert!(parser.parse("abc").is_err());
    }

    #[test]
    fn by_ref_shares_parser() {
        let digits = map(digit1, |digits: Span<&str>| digits.len());
        let twice = preceded(digits.by_ref(), preceded(char(','), digits.by_ref()));
        assert_eq!(twice.parse("1,22;"), Ok(Success(2, ";")));
    }
}
