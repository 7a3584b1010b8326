//! Repetition combinators.
//!
//! The open-ended repetitions ([`many0`], [`many1`], [`separated_list0`] and
//! [`separated_list1`]) fail with a dedicated error if an element succeeds
//! without consuming input, since repeating it could never make progress.
//! A fatal element failure always ends the repetition with that error.

use crate::{Error, Failure, Input, IntoInput, PResult, Parse, Success};
use alloc::vec::Vec;
use core::marker::PhantomData;

#[derive(Debug, Clone)]
struct CountParser<P, I>(P, usize, PhantomData<fn() -> I>)
where
    P: Parse<I>,
    I: Input;

impl<P, I> Parse<I> for CountParser<P, I>
where
    P: Parse<I>,
    I: Input,
{
    type Parsed = Vec<P::Parsed>;
    type Error = P::Error;

    fn parse<N>(&self, input: N) -> PResult<Self::Parsed, I, Self::Error>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        if self.1 == 0 || input.is_empty() {
            return Err(Failure(Error::expected(input.clone(), "Count"), input));
        }
        let mut values = Vec::new();
        let mut rem = input.clone();
        for _ in 0..self.1 {
            match self.0.parse(rem) {
                Ok(Success(val, next)) => {
                    values.push(val);
                    rem = next;
                }
                Err(Failure(err, _)) => return Err(Failure(err, input)),
            }
        }
        Ok(Success(values, rem))
    }
}

/// Creates a parser that applies `parser` exactly `n` times.
///
/// The new parser fails if any application fails, if `n` is zero, or if the
/// input is empty to begin with.
///
/// See also [`Parse::count`].
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::token::token;
/// let parser = count(token("abc"), 2);
/// let Success(parts, rem) = parser.parse("abcabcabc").unwrap();
/// assert_eq!(parts, ["abc", "abc"]);
/// assert_eq!(rem, "abc");
/// assert_eq!(parser.parse("abc123").unwrap_err().1, "abc123");
/// ```
#[inline]
pub const fn count<P, I>(parser: P, n: usize) -> impl Parse<I, Parsed = Vec<P::Parsed>, Error = P::Error>
where
    P: Parse<I>,
    I: Input,
{
    CountParser(parser, n, PhantomData)
}

// Applies `parser` until it fails recoverably. Returns the collected values and
// the remaining input, or the error that must end the whole repetition.
fn repeat<P, I>(
    parser: &P,
    mut values: Vec<P::Parsed>,
    mut rem: I,
    guard: &'static str,
) -> Result<(Vec<P::Parsed>, I), P::Error>
where
    P: Parse<I>,
    I: Input,
{
    loop {
        match parser.parse(rem.clone()) {
            Ok(Success(val, next)) => {
                if next.len() >= rem.len() {
                    return Err(Error::expected(rem, guard));
                }
                values.push(val);
                rem = next;
            }
            Err(Failure(err, _)) if err.is_fatal() => return Err(err),
            Err(_) => return Ok((values, rem)),
        }
    }
}

#[derive(Debug, Clone)]
struct Many0Parser<P, I>(P, PhantomData<fn() -> I>)
where
    P: Parse<I>,
    I: Input;

impl<P, I> Parse<I> for Many0Parser<P, I>
where
    P: Parse<I>,
    I: Input,
{
    type Parsed = Vec<P::Parsed>;
    type Error = P::Error;

    fn parse<N>(&self, input: N) -> PResult<Self::Parsed, I, Self::Error>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        match repeat(&self.0, Vec::new(), input.clone(), "Many0") {
            Ok((values, rem)) => Ok(Success(values, rem)),
            Err(err) => Err(Failure(err, input)),
        }
    }
}

/// Creates a parser that applies `parser` zero or more times.
///
/// Zero matches is a success with an empty [`Vec`].
///
/// See also [`Parse::many0`].
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::character::{char, digit0};
/// let hashes = many0(char('#'));
/// assert_eq!(hashes.parse("##x"), Ok(Success(vec!['#', '#'], "x")));
/// assert_eq!(hashes.parse("x"), Ok(Success(vec![], "x")));
///
/// // `digit0` can succeed without consuming anything
/// let err = many0(digit0).parse("abc").unwrap_err().0;
/// assert_eq!(err.descriptors(), ["Many0"]);
/// ```
#[inline]
pub const fn many0<P, I>(parser: P) -> impl Parse<I, Parsed = Vec<P::Parsed>, Error = P::Error>
where
    P: Parse<I>,
    I: Input,
{
    Many0Parser(parser, PhantomData)
}

#[derive(Debug, Clone)]
struct Many1Parser<P, I>(P, PhantomData<fn() -> I>)
where
    P: Parse<I>,
    I: Input;

impl<P, I> Parse<I> for Many1Parser<P, I>
where
    P: Parse<I>,
    I: Input,
{
    type Parsed = Vec<P::Parsed>;
    type Error = P::Error;

    fn parse<N>(&self, input: N) -> PResult<Self::Parsed, I, Self::Error>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        let (first, rem) = match self.0.parse(input.clone()) {
            Ok(Success(val, rem)) => (val, rem),
            Err(Failure(err, _)) => return Err(Failure(err, input)),
        };
        if rem.len() >= input.len() {
            return Err(Failure(Error::expected(input.clone(), "Many1"), input));
        }
        let mut values = Vec::new();
        values.push(first);
        match repeat(&self.0, values, rem, "Many1") {
            Ok((values, rem)) => Ok(Success(values, rem)),
            Err(err) => Err(Failure(err, input)),
        }
    }
}

/// Creates a parser that applies `parser` one or more times.
///
/// See also [`Parse::many1`].
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::character::char;
/// let hashes = many1(char('#'));
/// assert_eq!(hashes.parse("###"), Ok(Success(vec!['#', '#', '#'], "")));
/// assert!(hashes.parse("abc").is_err());
/// ```
#[inline]
pub const fn many1<P, I>(parser: P) -> impl Parse<I, Parsed = Vec<P::Parsed>, Error = P::Error>
where
    P: Parse<I>,
    I: Input,
{
    Many1Parser(parser, PhantomData)
}

#[derive(Debug, Clone)]
struct SeparatedListParser<S, P, I>(S, P, bool, PhantomData<fn() -> I>)
where
    S: Parse<I>,
    P: Parse<I, Error = S::Error>,
    I: Input;

impl<S, P, I> SeparatedListParser<S, P, I>
where
    S: Parse<I>,
    P: Parse<I, Error = S::Error>,
    I: Input,
{
    fn guard(&self) -> &'static str {
        if self.2 {
            "SeparatedList1"
        } else {
            "SeparatedList0"
        }
    }

    fn element(&self, rem: I) -> Result<Option<Success<P::Parsed, I>>, S::Error> {
        match self.1.parse(rem.clone()) {
            Ok(Success(val, next)) => {
                if next.len() >= rem.len() {
                    Err(Error::expected(rem, self.guard()))
                } else {
                    Ok(Some(Success(val, next)))
                }
            }
            Err(Failure(err, _)) if err.is_fatal() => Err(err),
            Err(Failure(err, _)) if self.2 => Err(err),
            Err(_) => Ok(None),
        }
    }
}

impl<S, P, I> Parse<I> for SeparatedListParser<S, P, I>
where
    S: Parse<I>,
    P: Parse<I, Error = S::Error>,
    I: Input,
{
    type Parsed = Vec<P::Parsed>;
    type Error = S::Error;

    fn parse<N>(&self, input: N) -> PResult<Self::Parsed, I, Self::Error>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        let mut values = Vec::new();
        let mut rem = match self.element(input.clone()) {
            Ok(Some(Success(val, rem))) => {
                values.push(val);
                rem
            }
            Ok(None) => return Ok(Success(values, input)),
            Err(err) => return Err(Failure(err, input)),
        };
        loop {
            let after_sep = match self.0.parse(rem.clone()) {
                Ok(Success(_, next)) => next,
                Err(Failure(err, _)) if err.is_fatal() => return Err(Failure(err, input)),
                Err(_) => break,
            };
            match self.1.parse(after_sep.clone()) {
                Ok(Success(val, next)) => {
                    if next.len() >= after_sep.len() {
                        return Err(Failure(Error::expected(after_sep, self.guard()), input));
                    }
                    values.push(val);
                    rem = next;
                }
                Err(Failure(err, _)) if err.is_fatal() => return Err(Failure(err, input)),
                Err(_) => break,
            }
        }
        Ok(Success(values, rem))
    }
}

/// Creates a parser for zero or more `element`s separated by `separator`.
///
/// A separator that is not followed by an element ends the list, and the
/// remaining input starts at that separator. Zero elements is a success that
/// consumes nothing.
///
/// See also [`Parse::separated_list0`].
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::character::char;
/// # use knit::number::int64;
/// let list = separated_list0(char(','), int64);
/// assert_eq!(list.parse("1,-2,3]"), Ok(Success(vec![1, -2, 3], "]")));
/// assert_eq!(list.parse("1,2,]"), Ok(Success(vec![1, 2], ",]")));
/// assert_eq!(list.parse("]"), Ok(Success(vec![], "]")));
/// ```
#[inline]
pub const fn separated_list0<S, P, I>(
    separator: S,
    element: P,
) -> impl Parse<I, Parsed = Vec<P::Parsed>, Error = S::Error>
where
    S: Parse<I>,
    P: Parse<I, Error = S::Error>,
    I: Input,
{
    SeparatedListParser(separator, element, false, PhantomData)
}

/// Creates a parser for one or more `element`s separated by `separator`.
///
/// Like [`separated_list0`], but fails if the first element fails.
///
/// See also [`Parse::separated_list1`].
#[inline]
pub const fn separated_list1<S, P, I>(
    separator: S,
    element: P,
) -> impl Parse<I, Parsed = Vec<P::Parsed>, Error = S::Error>
where
    S: Parse<I>,
    P: Parse<I, Error = S::Error>,
    I: Input,
{
    SeparatedListParser(separator, element, true, PhantomData)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::character::{alpha0, alpha1, char, digit0, digit1, space};
    use crate::number::int64;
    use crate::sequence::preceded;
    use crate::token::token;
    use crate::{ParseError, Span};
    use alloc::vec;

    #[test]
    fn count_exact() {
        let parser = count(char('a'), 3);
        assert_eq!(parser.parse("aaaa"), Ok(Success(vec!['a'; 3], "a")));
        assert_eq!(parser.parse("aab").unwrap_err().1, "aab");
    }

    #[test]
    fn count_larger_than_input_fails() {
        let Failure(err, rem) = count(char('a'), usize::MAX).parse("aaa").unwrap_err();
        assert_eq!(rem, "aaa");
        assert!(!err.is_fatal());
        assert_eq!(count(char('a'), 1 << 60).parse("aaa").unwrap_err().1, "aaa");
    }

    #[test]
    fn count_rejects_zero_and_empty() {
        let Failure(err, rem) = count(char('a'), 0).parse("aaa").unwrap_err();
        assert_eq!(rem, "aaa");
        assert_eq!(err, ParseError::new("aaa", ["Count"]));
        assert!(count(char('a'), 2).parse("").is_err());
    }

    #[test]
    fn many0_guard_trips() {
        let Failure(err, rem) = many0(digit0).parse("abcdef").unwrap_err();
        assert_eq!(rem, "abcdef");
        assert_eq!(err.descriptors(), ["Many0"]);
        assert!(!err.is_fatal());
    }

    #[test]
    fn many0_guard_after_progress() {
        // consumes "12", then succeeds on "" without progress
        let Failure(err, rem) = many0(digit0).parse("12").unwrap_err();
        assert_eq!(rem, "12");
        assert_eq!(*err.input(), "");
    }

    #[test]
    fn many1_guard_trips() {
        let err = many1(alpha0).parse("123").unwrap_err().0;
        assert_eq!(err.descriptors(), ["Many1"]);
    }

    #[test]
    fn many1_needs_one() {
        let Failure(err, rem) = many1(digit1).parse("x").unwrap_err();
        assert_eq!(rem, "x");
        assert_eq!(err.descriptors(), ["digit"]);
    }

    #[test]
    fn many_propagates_fatal() {
        let parser = many0(preceded(space, int64));
        assert_eq!(parser.parse(" 1 2x"), Ok(Success(vec![1, 2], "x")));
        let Failure(err, rem) = parser.parse(" 1 -x").unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(rem, " 1 -x");
    }

    #[test]
    fn separated_list_rewinds_before_trailing_separator() {
        let parser = separated_list1(char(','), alpha1);
        let Success(words, rem) = parser.parse("a,bc,1").unwrap();
        assert_eq!(words, ["a", "bc"]);
        assert_eq!(rem, ",1");
    }

    #[test]
    fn separated_list_on_empty_input() {
        assert_eq!(
            separated_list0(char(','), digit1).parse(""),
            Ok(Success(Vec::<Span<&str>>::new(), ""))
        );
        let Failure(err, rem) = separated_list1(char(','), digit1).parse("").unwrap_err();
        assert_eq!(rem, "");
        assert_eq!(err.descriptors(), ["digit"]);
    }

    #[test]
    fn separated_list_guard_trips() {
        let err = separated_list0(char(','), digit0).parse("1,,2").unwrap_err().0;
        assert_eq!(err.descriptors(), ["SeparatedList0"]);
        let err = separated_list1(char(','), alpha0).parse("1").unwrap_err().0;
        assert_eq!(err.descriptors(), ["SeparatedList1"]);
    }

    #[test]
    fn separated_list_with_token_separator() {
        let parser = separated_list0(token(", "), int64);
        assert_eq!(parser.parse("1, 2, 3"), Ok(Success(vec![1, 2, 3], "")));
        assert_eq!(parser.parse("1,2"), Ok(Success(vec![1], ",2")));
    }

    #[test]
    fn method_forms() {
        let parser = char('x').many1();
        assert_eq!(parser.parse("xxy").unwrap().0.len(), 2);
        let parser = digit1.separated_list0(char(';'));
        assert_eq!(parser.parse("1;22").unwrap().0.len(), 2);
        let parser = char('z').count(2);
        assert!(parser.parse("zz").is_ok());
    }
}
