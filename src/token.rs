//! Span matchers: literal tokens, fixed counts and predicate-bounded runs.
//!
//! Every parser in this module produces a [`Span`] of the matched input.

use crate::{Error, Failure, Input, IntoInput, PResult, Parse, ParseError, Span, Success, Symbol};
use alloc::format;
use alloc::string::String;
use core::marker::PhantomData;

#[derive(Debug, Clone)]
struct TokenParser<P, I>(P, PhantomData<fn() -> I>)
where
    P: Input,
    I: Input,
    I::Symbol: PartialEq<P::Symbol>;

impl<P, I> TokenParser<P, I>
where
    P: Input,
    I: Input,
    I::Symbol: PartialEq<P::Symbol>,
{
    fn descriptor(&self) -> String {
        let mut pattern = self.0.clone();
        let mut text = String::with_capacity(pattern.len());
        while let Some(symb) = pattern.next() {
            text.push(symb.to_char());
        }
        format!("Token({text})")
    }
}

impl<P, I> Parse<I> for TokenParser<P, I>
where
    P: Input,
    I: Input,
    I::Symbol: PartialEq<P::Symbol>,
{
    type Parsed = Span<I>;
    type Error = ParseError<I>;

    fn parse<N>(&self, input: N) -> PResult<Span<I>, I>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        let mut pattern = self.0.clone();
        let mut rem = input.clone();
        while let Some(expected) = pattern.next() {
            match rem.next() {
                Some(symb) if symb == expected => {}
                _ => {
                    return Err(Failure(
                        ParseError::expected(input.clone(), self.descriptor()),
                        input,
                    ))
                }
            }
        }
        Ok(Success(Span::new(input, rem.clone()), rem))
    }
}

/// Creates a parser that matches a literal sequence of symbols.
///
/// The new parser succeeds if the input starts with `pattern`, and consumes
/// exactly that prefix. Otherwise it fails with the descriptor
/// `Token(<pattern>)`. An empty pattern always succeeds without consuming.
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::token::token;
/// let Success(hello, rem) = token("Hello").parse("Hello world").unwrap();
/// assert_eq!(hello, "Hello");
/// assert_eq!(rem, " world");
///
/// let Failure(err, rem) = token("Bonjour").parse("Hello tout le monde").unwrap_err();
/// assert_eq!(rem, "Hello tout le monde");
/// assert_eq!(err.to_string(), "expected Token(Bonjour)");
/// ```
///
/// Byte inputs work the same way.
/// ```
/// # use knit::prelude::*;
/// # use knit::token::token;
/// let magic = token(&b"\x89PNG"[..]);
/// assert_eq!(magic.parse(b"\x89PNG\r\n").unwrap().1, b"\r\n");
/// ```
#[inline]
pub const fn token<P, I>(pattern: P) -> impl Parse<I, Parsed = Span<I>, Error = ParseError<I>>
where
    P: Input,
    I: Input,
    I::Symbol: PartialEq<P::Symbol>,
{
    TokenParser(pattern, PhantomData)
}

#[derive(Debug, Clone)]
struct TakeParser<I>(usize, PhantomData<fn() -> I>)
where
    I: Input;

impl<I> Parse<I> for TakeParser<I>
where
    I: Input,
{
    type Parsed = Span<I>;
    type Error = ParseError<I>;

    fn parse<N>(&self, input: N) -> PResult<Span<I>, I>
    where
        N: IntoInput<Input = I>,
    {
        let mut input = input.into_input();
        let begin = input.clone();
        if input.advance_by(self.0) != self.0 {
            Err(Failure(ParseError::need_more_input(input), begin))
        } else {
            Ok(Success(Span::new(begin, input.clone()), input))
        }
    }
}

/// Creates a parser that takes exactly `count` symbols from the input.
///
/// If fewer than `count` symbols remain, the new parser fails with an error
/// constructed by [`Error::need_more_input`].
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::token::take;
/// fn five(input: &str) -> PResult<&str, &str> {
///     take(5).ok_into().parse(input)
/// }
///
/// assert_eq!(five.parse("hello world"), Ok(Success("hello", " world")));
/// assert_eq!(five.parse("hi").unwrap_err().1, "hi");
/// ```
#[inline]
pub const fn take<I>(count: usize) -> impl Parse<I, Parsed = Span<I>, Error = ParseError<I>>
where
    I: Input,
{
    TakeParser(count, PhantomData)
}

#[derive(Debug, Clone)]
struct TakeWhileParser<F, I>(usize, usize, F, PhantomData<fn() -> I>)
where
    F: Fn(I::Symbol) -> bool,
    I: Input;

impl<F, I> Parse<I> for TakeWhileParser<F, I>
where
    F: Fn(I::Symbol) -> bool,
    I: Input,
{
    type Parsed = Span<I>;
    type Error = ParseError<I>;

    fn parse<N>(&self, input: N) -> PResult<Span<I>, I>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        let mut rem = input.clone();
        let mut taken = 0;
        while taken < self.1 {
            let mut next = rem.clone();
            match next.next() {
                Some(symb) if (self.2)(symb) => {
                    rem = next;
                    taken += 1;
                }
                _ => break,
            }
        }
        if taken < self.0 {
            return Err(Failure(ParseError::expected(input.clone(), "TakeWhileMN"), input));
        }
        Ok(Success(Span::new(input, rem.clone()), rem))
    }
}

/// Creates a parser that takes between `min` and `max` symbols satisfying `predicate`.
///
/// Symbols are taken greedily, stopping at the first one that fails the
/// predicate or once `max` symbols were taken. The new parser fails if fewer
/// than `min` symbols matched.
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::character::is_alpha;
/// # use knit::token::take_while_m_n;
/// let word = take_while_m_n(3, 6, is_alpha);
/// assert_eq!(word.parse("latin123").unwrap().1, "123");
/// assert_eq!(word.parse("lengthy").unwrap().0, "length");
/// assert_eq!(word.parse("ed").unwrap_err().1, "ed");
/// ```
#[inline]
pub const fn take_while_m_n<F, I>(
    min: usize,
    max: usize,
    predicate: F,
) -> impl Parse<I, Parsed = Span<I>, Error = ParseError<I>>
where
    F: Fn(I::Symbol) -> bool,
    I: Input,
{
    TakeWhileParser(min, max, predicate, PhantomData)
}

/// Creates a parser that takes zero or more symbols satisfying `predicate`.
///
/// Never fails.
#[inline]
pub const fn take_while0<F, I>(predicate: F) -> impl Parse<I, Parsed = Span<I>, Error = ParseError<I>>
where
    F: Fn(I::Symbol) -> bool,
    I: Input,
{
    TakeWhileParser(0, usize::MAX, predicate, PhantomData)
}

/// Creates a parser that takes one or more symbols satisfying `predicate`.
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::token::take_while1;
/// let lower = take_while1(|ch: char| ch.is_ascii_lowercase());
/// assert_eq!(lower.parse("abcDEF").unwrap().1, "DEF");
/// assert!(lower.parse("DEF").is_err());
/// ```
#[inline]
pub const fn take_while1<F, I>(predicate: F) -> impl Parse<I, Parsed = Span<I>, Error = ParseError<I>>
where
    F: Fn(I::Symbol) -> bool,
    I: Input,
{
    TakeWhileParser(1, usize::MAX, predicate, PhantomData)
}

#[derive(Debug, Clone)]
struct TakeUntilParser<P, I>(P, PhantomData<fn() -> I>)
where
    P: Parse<I>,
    I: Input;

impl<P, I> Parse<I> for TakeUntilParser<P, I>
where
    P: Parse<I>,
    I: Input,
{
    type Parsed = Span<I>;
    type Error = P::Error;

    fn parse<N>(&self, input: N) -> PResult<Span<I>, I, P::Error>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        let mut rem = input.clone();
        while !rem.is_empty() {
            match self.0.parse(rem.clone()) {
                Ok(_) => return Ok(Success(Span::new(input, rem.clone()), rem)),
                Err(Failure(err, _)) if err.is_fatal() => return Err(Failure(err, input)),
                Err(_) => {
                    rem.next();
                }
            }
        }
        Err(Failure(Error::expected(input.clone(), "TakeUntil"), input))
    }
}

/// Creates a parser that takes symbols until `parser` succeeds.
///
/// `parser` is tried at every position, starting with the first. The symbols
/// before the first match are returned and the match itself is left in the
/// remaining input. The new parser fails on empty input, or when `parser`
/// never matches before the end of input.
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::character::crlf;
/// # use knit::token::take_until;
/// let line = take_until(crlf);
/// let Success(text, rem) = line.parse("OK\r\nmore").unwrap();
/// assert_eq!(text, "OK");
/// assert_eq!(rem, "\r\nmore");
/// assert!(line.parse("no line ending").is_err());
/// ```
#[inline]
pub const fn take_until<P, I>(parser: P) -> impl Parse<I, Parsed = Span<I>, Error = P::Error>
where
    P: Parse<I>,
    I: Input,
{
    TakeUntilParser(parser, PhantomData)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::character::{digit1, is_alpha, is_digit};
    use crate::number::int64;
    use crate::sequence::preceded;

    #[test]
    fn token_anchors_failure_at_start() {
        let Failure(err, rem) = token("abc").parse("abx").unwrap_err();
        assert_eq!(rem, "abx");
        assert_eq!(err, ParseError::new("abx", ["Token(abc)"]));
        assert!(token("abc").parse("").is_err());
        assert!(token("abc").parse("ab").is_err());
    }

    #[test]
    fn token_consumes_pattern() {
        let Success(span, rem) = token("let").parse("let x").unwrap();
        assert_eq!(span, "let");
        assert_eq!(rem, " x");
    }

    #[test]
    fn take_counts_symbols() {
        let Success(span, rem) = take(2).parse("éab").unwrap();
        assert_eq!(span, "éa");
        assert_eq!(rem, "b");
        let Failure(err, rem) = take(4).parse("abc").unwrap_err();
        assert_eq!(rem, "abc");
        assert_eq!(err.descriptors(), ["more input"]);
    }

    #[test]
    fn take_while_m_n_bounds() {
        let parser = take_while_m_n(3, 6, is_alpha);
        assert_eq!(parser.parse("latin123"), Ok(Success(Span::new("latin123", "123"), "123")));
        assert_eq!(parser.parse("lengthy").unwrap().1, "y");
        assert_eq!(parser.parse("ed").unwrap_err().1, "ed");
        assert!(parser.parse("").is_err());
        assert!(parser.parse("12345").is_err());
    }

    #[test]
    fn take_while_on_bytes() {
        let input = &b"42 rest"[..];
        let Success(span, rem) = take_while1(is_digit).parse(input).unwrap();
        assert_eq!(span, b"42");
        assert_eq!(rem, b" rest");
    }

    #[test]
    fn take_while0_accepts_empty() {
        let Success(span, rem) = take_while0(is_digit).parse("abc").unwrap();
        assert!(span.is_empty());
        assert_eq!(rem, "abc");
        assert!(take_while0(is_digit).parse("").is_ok());
    }

    #[test]
    fn take_until_stops_before_match() {
        let Success(span, rem) = take_until(digit1).parse("123").unwrap();
        assert!(span.is_empty());
        assert_eq!(rem, "123");

        let Success(span, rem) = take_until(digit1).parse("ab12").unwrap();
        assert_eq!(span, "ab");
        assert_eq!(rem, "12");
    }

    #[test]
    fn take_until_fails() {
        let Failure(err, rem) = take_until(digit1).parse("abcdef").unwrap_err();
        assert_eq!(rem, "abcdef");
        assert_eq!(err.descriptors(), ["TakeUntil"]);
        assert!(take_until(digit1).parse("").is_err());
    }

    #[test]
    fn take_until_propagates_fatal() {
        let Failure(err, rem) = take_until(preceded(token("#"), int64)).parse("ab#-z").unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(rem, "ab#-z");
    }
}
