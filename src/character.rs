//! Single-symbol matchers and character classes.
//!
//! Classification is ASCII only. A symbol belongs to a class if it converts to
//! an [`AsciiChar`](ascii::AsciiChar) with that property, so non-ASCII
//! characters never match `alpha`, `digit`, etc.
//!
//! The `*0` class parsers always succeed, possibly with an empty [`Span`].
//! The `*1` class parsers fail unless at least one symbol matches.

use crate::branch::{either, recognize};
use crate::sequence::pair;
use crate::token::{take_while0, take_while_m_n};
use crate::{Error, Failure, Input, IntoInput, PResult, Parse, ParseError, Span, Success, Symbol};
use alloc::format;
use alloc::string::String;
use core::marker::PhantomData;

/// Returns `true` if `symb` is an ASCII letter.
#[inline]
pub fn is_alpha<S: Symbol>(symb: S) -> bool {
    symb.ascii().is_some_and(|ch| ch.is_alphabetic())
}

/// Returns `true` if `symb` is an ASCII decimal digit.
#[inline]
pub fn is_digit<S: Symbol>(symb: S) -> bool {
    symb.ascii().is_some_and(|ch| ch.is_ascii_digit())
}

/// Returns `true` if `symb` is an ASCII letter or decimal digit.
#[inline]
pub fn is_alphanumeric<S: Symbol>(symb: S) -> bool {
    symb.ascii().is_some_and(|ch| ch.is_alphanumeric())
}

/// Returns `true` if `symb` is an ASCII hexadecimal digit, in either case.
#[inline]
pub fn is_hex_digit<S: Symbol>(symb: S) -> bool {
    symb.ascii().is_some_and(|ch| ch.is_ascii_hexdigit())
}

/// Returns `true` if `symb` is ASCII whitespace: space, tab, LF, FF or CR.
#[inline]
pub fn is_whitespace<S: Symbol>(symb: S) -> bool {
    symb.ascii().is_some_and(|ch| ch.is_ascii_whitespace())
}

fn describe<S: Input>(name: &str, set: &S) -> String {
    let mut set = set.clone();
    let mut text = String::with_capacity(set.len());
    while let Some(symb) = set.next() {
        text.push(symb.to_char());
    }
    format!("{name}({text})")
}

#[derive(Debug, Clone)]
struct CharParser<C, I>(C, PhantomData<fn() -> I>)
where
    C: Symbol,
    I: Input,
    I::Symbol: PartialEq<C>;

impl<C, I> Parse<I> for CharParser<C, I>
where
    C: Symbol,
    I: Input,
    I::Symbol: PartialEq<C>,
{
    type Parsed = I::Symbol;
    type Error = ParseError<I>;

    fn parse<N>(&self, input: N) -> PResult<I::Symbol, I>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        let mut rem = input.clone();
        match rem.next() {
            Some(symb) if symb == self.0 => Ok(Success(symb, rem)),
            _ => {
                let descriptor = format!("Char({})", self.0.to_char());
                Err(Failure(ParseError::expected(input.clone(), descriptor), input))
            }
        }
    }
}

/// Creates a parser that matches the single symbol `c`.
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::character::char;
/// assert_eq!(char('a').parse("abc"), Ok(Success('a', "bc")));
///
/// let Failure(err, rem) = char('a').parse("xyz").unwrap_err();
/// assert_eq!(rem, "xyz");
/// assert_eq!(err.to_string(), "expected Char(a)");
///
/// assert_eq!(char(b'{').parse(b"{}"), Ok(Success(b'{', &b"}"[..])));
/// ```
#[inline]
pub const fn char<C, I>(c: C) -> impl Parse<I, Parsed = I::Symbol, Error = ParseError<I>>
where
    C: Symbol,
    I: Input,
    I::Symbol: PartialEq<C>,
{
    CharParser(c, PhantomData)
}

/// Parses any single symbol.
///
/// Fails only on empty input, with an error constructed by
/// [`Error::need_more_input`].
///
/// ```
/// # use knit::prelude::*;
/// # use knit::character::any_char;
/// assert_eq!(any_char.parse("é!"), Ok(Success('é', "!")));
/// assert!(any_char.parse("").is_err());
/// ```
pub fn any_char<I: Input>(input: I) -> PResult<I::Symbol, I> {
    let mut rem = input.clone();
    match rem.next() {
        Some(symb) => Ok(Success(symb, rem)),
        None => Err(Failure(ParseError::need_more_input(input.clone()), input)),
    }
}

#[derive(Debug, Clone)]
struct OneOfParser<S, I>(S, bool, PhantomData<fn() -> I>)
where
    S: Input,
    I: Input,
    I::Symbol: PartialEq<S::Symbol>;

impl<S, I> Parse<I> for OneOfParser<S, I>
where
    S: Input,
    I: Input,
    I::Symbol: PartialEq<S::Symbol>,
{
    type Parsed = I::Symbol;
    type Error = ParseError<I>;

    fn parse<N>(&self, input: N) -> PResult<I::Symbol, I>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        let mut rem = input.clone();
        if let Some(symb) = rem.next() {
            let mut set = self.0.clone();
            let mut found = false;
            while let Some(member) = set.next() {
                if symb == member {
                    found = true;
                    break;
                }
            }
            if found != self.1 {
                return Ok(Success(symb, rem));
            }
        }
        let name = if self.1 { "NoneOf" } else { "OneOf" };
        Err(Failure(ParseError::expected(input.clone(), describe(name, &self.0)), input))
    }
}

/// Creates a parser that matches any one symbol contained in `set`.
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::character::one_of;
/// let sign = one_of("+-");
/// assert_eq!(sign.parse("-1"), Ok(Success('-', "1")));
/// assert_eq!(sign.parse("1").unwrap_err().0.to_string(), "expected OneOf(+-)");
/// ```
#[inline]
pub const fn one_of<S, I>(set: S) -> impl Parse<I, Parsed = I::Symbol, Error = ParseError<I>>
where
    S: Input,
    I: Input,
    I::Symbol: PartialEq<S::Symbol>,
{
    OneOfParser(set, false, PhantomData)
}

/// Creates a parser that matches any one symbol not contained in `set`.
///
/// Fails on empty input.
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::character::none_of;
/// let plain = none_of("\"\\");
/// assert_eq!(plain.parse("a\""), Ok(Success('a', "\"")));
/// assert!(plain.parse("\"").is_err());
/// ```
#[inline]
pub const fn none_of<S, I>(set: S) -> impl Parse<I, Parsed = I::Symbol, Error = ParseError<I>>
where
    S: Input,
    I: Input,
    I::Symbol: PartialEq<S::Symbol>,
{
    OneOfParser(set, true, PhantomData)
}

#[derive(Debug, Clone)]
struct SatisfyParser<F, I>(F, PhantomData<fn() -> I>)
where
    F: Fn(I::Symbol) -> bool,
    I: Input;

impl<F, I> Parse<I> for SatisfyParser<F, I>
where
    F: Fn(I::Symbol) -> bool,
    I: Input,
{
    type Parsed = I::Symbol;
    type Error = ParseError<I>;

    fn parse<N>(&self, input: N) -> PResult<I::Symbol, I>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        let mut rem = input.clone();
        match rem.next() {
            Some(symb) if (self.0)(symb) => Ok(Success(symb, rem)),
            _ => Err(Failure(ParseError::expected(input.clone(), "Satisfy"), input)),
        }
    }
}

/// Creates a parser that matches one symbol satisfying `predicate`.
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::character::{is_hex_digit, satisfy};
/// let nibble = satisfy(is_hex_digit);
/// assert_eq!(nibble.parse("f0"), Ok(Success('f', "0")));
/// assert!(nibble.parse("g0").is_err());
/// ```
#[inline]
pub const fn satisfy<F, I>(predicate: F) -> impl Parse<I, Parsed = I::Symbol, Error = ParseError<I>>
where
    F: Fn(I::Symbol) -> bool,
    I: Input,
{
    SatisfyParser(predicate, PhantomData)
}

fn symbol<I: Input>(input: I, ch: char, descriptor: &'static str) -> PResult<I::Symbol, I> {
    satisfy(|symb: I::Symbol| symb.to_char() == ch)
        .expect(descriptor)
        .parse(input)
}

/// Parses a line feed, `\n`.
pub fn lf<I: Input>(input: I) -> PResult<I::Symbol, I> {
    symbol(input, '\n', "LF")
}

/// Parses a carriage return, `\r`.
pub fn cr<I: Input>(input: I) -> PResult<I::Symbol, I> {
    symbol(input, '\r', "CR")
}

/// Parses the two symbol sequence `\r\n`.
///
/// ```
/// # use knit::prelude::*;
/// # use knit::character::crlf;
/// assert_eq!(crlf.parse("\r\nx").unwrap().1, "x");
/// assert_eq!(crlf.parse("\n").unwrap_err().0.descriptors(), ["CRLF"]);
/// ```
pub fn crlf<I: Input>(input: I) -> PResult<Span<I>, I> {
    recognize(pair(cr, lf)).expect("CRLF").parse(input)
}

/// Parses a line ending, either `\n` or `\r\n`.
///
/// ```
/// # use knit::prelude::*;
/// # use knit::character::newline;
/// assert_eq!(newline.parse("\nx").unwrap().0, "\n");
/// assert_eq!(newline.parse("\r\nx").unwrap().0, "\r\n");
/// assert!(newline.parse("\rx").is_err());
/// ```
pub fn newline<I: Input>(input: I) -> PResult<Span<I>, I> {
    either(recognize(lf), crlf).expect("newline").parse(input)
}

/// Parses a single space, ` `.
pub fn space<I: Input>(input: I) -> PResult<I::Symbol, I> {
    symbol(input, ' ', "space")
}

/// Parses a single horizontal tab, `\t`.
pub fn tab<I: Input>(input: I) -> PResult<I::Symbol, I> {
    symbol(input, '\t', "tab")
}

/// Parses zero or more ASCII letters.
pub fn alpha0<I: Input>(input: I) -> PResult<Span<I>, I> {
    take_while0(is_alpha::<I::Symbol>).parse(input)
}

/// Parses one or more ASCII letters.
///
/// ```
/// # use knit::prelude::*;
/// # use knit::character::alpha1;
/// assert_eq!(alpha1.parse("abc123").unwrap().1, "123");
/// assert_eq!(alpha1.parse("123").unwrap_err().0.descriptors(), ["alpha"]);
/// ```
pub fn alpha1<I: Input>(input: I) -> PResult<Span<I>, I> {
    take_while_m_n(1, usize::MAX, is_alpha::<I::Symbol>)
        .expect("alpha")
        .parse(input)
}

/// Parses zero or more ASCII decimal digits.
pub fn digit0<I: Input>(input: I) -> PResult<Span<I>, I> {
    take_while0(is_digit::<I::Symbol>).parse(input)
}

/// Parses one or more ASCII decimal digits.
pub fn digit1<I: Input>(input: I) -> PResult<Span<I>, I> {
    take_while_m_n(1, usize::MAX, is_digit::<I::Symbol>)
        .expect("digit")
        .parse(input)
}

/// Parses zero or more ASCII letters and digits.
pub fn alphanumeric0<I: Input>(input: I) -> PResult<Span<I>, I> {
    take_while0(is_alphanumeric::<I::Symbol>).parse(input)
}

/// Parses one or more ASCII letters and digits.
pub fn alphanumeric1<I: Input>(input: I) -> PResult<Span<I>, I> {
    take_while_m_n(1, usize::MAX, is_alphanumeric::<I::Symbol>)
        .expect("alphanumeric")
        .parse(input)
}

/// Parses zero or more ASCII hexadecimal digits.
pub fn hex_digit0<I: Input>(input: I) -> PResult<Span<I>, I> {
    take_while0(is_hex_digit::<I::Symbol>).parse(input)
}

/// Parses one or more ASCII hexadecimal digits.
///
/// ```
/// # use knit::prelude::*;
/// # use knit::character::hex_digit1;
/// assert_eq!(hex_digit1.parse("c0ffee!").unwrap().0, "c0ffee");
/// ```
pub fn hex_digit1<I: Input>(input: I) -> PResult<Span<I>, I> {
    take_while_m_n(1, usize::MAX, is_hex_digit::<I::Symbol>)
        .expect("hex digit")
        .parse(input)
}

/// Parses zero or more ASCII whitespace symbols.
pub fn whitespace0<I: Input>(input: I) -> PResult<Span<I>, I> {
    take_while0(is_whitespace::<I::Symbol>).parse(input)
}

/// Parses one or more ASCII whitespace symbols.
pub fn whitespace1<I: Input>(input: I) -> PResult<Span<I>, I> {
    take_while_m_n(1, usize::MAX, is_whitespace::<I::Symbol>)
        .expect("whitespace")
        .parse(input)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sequence::delimited;
    use ascii::{AsciiChar, AsciiStr};

    #[test]
    fn char_matches_first_symbol() {
        assert_eq!(char('a').parse("abc"), Ok(Success('a', "bc")));
        let Failure(err, rem) = char('a').parse("").unwrap_err();
        assert_eq!(rem, "");
        assert_eq!(err, ParseError::new("", ["Char(a)"]));
    }

    #[test]
    fn char_on_ascii_input() {
        let text = AsciiStr::from_ascii("ok").unwrap();
        let Success(ch, rem) = char(AsciiChar::o).parse(text).unwrap();
        assert_eq!(ch, AsciiChar::o);
        assert_eq!(rem.as_str(), "k");
    }

    #[test]
    fn classes_are_ascii_only() {
        assert!(alpha1.parse("é").is_err());
        assert!(is_alpha('Z'));
        assert!(!is_digit('٣'));
        assert!(is_hex_digit(b'F'));
        assert!(!is_hex_digit('g'));
        assert!(is_whitespace('\r'));
        assert!(is_alphanumeric(AsciiChar::_0));
    }

    #[test]
    fn zero_variants_always_succeed() {
        let parsers: [fn(&'static str) -> PResult<Span<&'static str>, &'static str>; 5] =
            [alpha0, digit0, alphanumeric0, hex_digit0, whitespace0];
        for parser in parsers {
            let Success(span, rem) = parser("!rest").unwrap();
            assert!(span.is_empty());
            assert_eq!(rem, "!rest");
            assert!(parser("").is_ok());
        }
    }

    #[test]
    fn one_variants_describe_class() {
        let cases: [(fn(&'static str) -> PResult<Span<&'static str>, &'static str>, &str); 5] = [
            (alpha1, "alpha"),
            (digit1, "digit"),
            (alphanumeric1, "alphanumeric"),
            (hex_digit1, "hex digit"),
            (whitespace1, "whitespace"),
        ];
        for (parser, descriptor) in cases {
            let Failure(err, rem) = parser("!rest").unwrap_err();
            assert_eq!(rem, "!rest");
            assert_eq!(err.descriptors(), [descriptor]);
            assert!(parser("").is_err());
        }
    }

    #[test]
    fn whitespace_runs() {
        let Success(span, rem) = whitespace1.parse(" \t\r\n x").unwrap();
        assert_eq!(span, " \t\r\n ");
        assert_eq!(rem, "x");
    }

    #[test]
    fn line_endings() {
        assert_eq!(lf.parse("\n"), Ok(Success('\n', "")));
        assert_eq!(cr.parse("\r\n"), Ok(Success('\r', "\n")));
        assert_eq!(crlf.parse("\r\n").unwrap().1, "");
        let Failure(err, rem) = crlf.parse("\rx").unwrap_err();
        assert_eq!(rem, "\rx");
        assert_eq!(err.descriptors(), ["CRLF"]);
        assert_eq!(newline.parse(&b"\r\nabc"[..]).unwrap().1, b"abc");
    }

    #[test]
    fn delimited_by_crlf() {
        let parser = delimited(char('+'), digit1, crlf);
        let Success(digits, rem) = parser.parse("+1\r\n").unwrap();
        assert_eq!(digits, "1");
        assert_eq!(rem, "");
        assert_eq!(parser.parse("+1").unwrap_err().1, "+1");
    }

    #[test]
    fn space_and_tab() {
        assert_eq!(space.parse(" a"), Ok(Success(' ', "a")));
        assert_eq!(tab.parse("\ta"), Ok(Success('\t', "a")));
        assert_eq!(space.parse("\t").unwrap_err().0.descriptors(), ["space"]);
    }

    #[test]
    fn one_of_and_none_of() {
        assert_eq!(one_of("abc").parse("cab"), Ok(Success('c', "ab")));
        assert_eq!(one_of(&b"xy"[..]).parse(b"yz"), Ok(Success(b'y', &b"z"[..])));
        assert!(one_of("abc").parse("").is_err());
        assert_eq!(
            none_of("abc").parse("a").unwrap_err().0.descriptors(),
            ["NoneOf(abc)"]
        );
        assert!(none_of("abc").parse("").is_err());
        assert_eq!(none_of("abc").parse("da"), Ok(Success('d', "a")));
    }

    #[test]
    fn any_char_needs_input() {
        assert_eq!(any_char.parse(&b"\xff"[..]), Ok(Success(0xff, &b""[..])));
        let Failure(err, rem) = any_char.parse("").unwrap_err();
        assert_eq!(rem, "");
        assert_eq!(err.descriptors(), ["more input"]);
    }
}
