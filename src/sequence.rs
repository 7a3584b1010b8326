//! Combinators that apply parsers one after another.
//!
//! Children run strictly left to right, each seeing only the input its
//! predecessor left behind. If any child fails, the whole sequence fails with
//! that child's error, anchored at the input the sequence was given.

use crate::{Failure, Input, IntoInput, PResult, PairContainer, Parse, Success};
use alloc::vec::Vec;
use core::marker::PhantomData;

/// Creates a parser that applies each of its arguments in order.
///
/// [`seq`] accepts any number of parsers. On success, their values are
/// returned in a tuple in the order the parsers were given. It expands to nested
/// [`pair`]s, so the parsers may all produce different types.
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::character::{alpha1, char};
/// # use knit::number::int64;
/// fn assignment(input: &str) -> PResult<(Span<&str>, char, i64), &str> {
///     seq!(alpha1, char('='), int64).parse(input)
/// }
///
/// let Success((name, eq, value), rem) = assignment.parse("x=-4;").unwrap();
/// assert_eq!(name, "x");
/// assert_eq!(eq, '=');
/// assert_eq!(value, -4);
/// assert_eq!(rem, ";");
/// ```
#[cfg(feature = "macros")]
pub use knit_macros::seq;

#[derive(Debug, Clone)]
struct PairParser<P, Q, I>(P, Q, PhantomData<fn() -> I>)
where
    P: Parse<I>,
    Q: Parse<I, Error = P::Error>,
    I: Input;

impl<P, Q, I> Parse<I> for PairParser<P, Q, I>
where
    P: Parse<I>,
    Q: Parse<I, Error = P::Error>,
    I: Input,
{
    type Parsed = PairContainer<P::Parsed, Q::Parsed>;
    type Error = P::Error;

    fn parse<N>(&self, input: N) -> PResult<Self::Parsed, I, Self::Error>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        match self.0.parse(input.clone()) {
            Ok(Success(left, rem)) => match self.1.parse(rem) {
                Ok(Success(right, rem)) => Ok(Success(PairContainer { left, right }, rem)),
                Err(Failure(e, _)) => Err(Failure(e, input)),
            },
            Err(Failure(e, _)) => Err(Failure(e, input)),
        }
    }
}

/// Creates a parser that applies `first` and then `second`.
///
/// Both values are returned in a [`PairContainer`].
///
/// See also [`Parse::then`] and [`seq`].
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::character::{char, digit1};
/// let parser = pair(char('#'), digit1);
/// let Success(PairContainer { left, right }, rem) = parser.parse("#42!").unwrap();
/// assert_eq!(left, '#');
/// assert_eq!(right, "42");
/// assert_eq!(rem, "!");
///
/// // the failure is anchored where the pair started
/// assert_eq!(parser.parse("#x").unwrap_err().1, "#x");
/// ```
#[inline]
pub const fn pair<P, Q, I>(
    first: P,
    second: Q,
) -> impl Parse<I, Parsed = PairContainer<P::Parsed, Q::Parsed>, Error = P::Error>
where
    P: Parse<I>,
    Q: Parse<I, Error = P::Error>,
    I: Input,
{
    PairParser(first, second, PhantomData)
}

#[derive(Debug, Clone)]
struct SeparatedPairParser<P, S, Q, I>(P, S, Q, PhantomData<fn() -> I>)
where
    P: Parse<I>,
    S: Parse<I, Error = P::Error>,
    Q: Parse<I, Error = P::Error>,
    I: Input;

impl<P, S, Q, I> Parse<I> for SeparatedPairParser<P, S, Q, I>
where
    P: Parse<I>,
    S: Parse<I, Error = P::Error>,
    Q: Parse<I, Error = P::Error>,
    I: Input,
{
    type Parsed = PairContainer<P::Parsed, Q::Parsed>;
    type Error = P::Error;

    fn parse<N>(&self, input: N) -> PResult<Self::Parsed, I, Self::Error>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        match self.0.parse(input.clone()) {
            Ok(Success(left, rem)) => match self.1.parse(rem) {
                Ok(Success(_, rem)) => match self.2.parse(rem) {
                    Ok(Success(right, rem)) => Ok(Success(PairContainer { left, right }, rem)),
                    Err(Failure(e, _)) => Err(Failure(e, input)),
                },
                Err(Failure(e, _)) => Err(Failure(e, input)),
            },
            Err(Failure(e, _)) => Err(Failure(e, input)),
        }
    }
}

/// Creates a parser for `left`, then `separator`, then `right`.
///
/// The separator's value is discarded.
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::character::char;
/// # use knit::number::int64;
/// let point = separated_pair(int64, char(','), int64);
/// assert_eq!(
///     point.parse("3,-7)"),
///     Ok(Success(PairContainer { left: 3, right: -7 }, ")"))
/// );
/// ```
#[inline]
pub const fn separated_pair<P, S, Q, I>(
    left: P,
    separator: S,
    right: Q,
) -> impl Parse<I, Parsed = PairContainer<P::Parsed, Q::Parsed>, Error = P::Error>
where
    P: Parse<I>,
    S: Parse<I, Error = P::Error>,
    Q: Parse<I, Error = P::Error>,
    I: Input,
{
    SeparatedPairParser(left, separator, right, PhantomData)
}

#[derive(Debug, Clone)]
struct PrecededParser<P, Q, I>(P, Q, PhantomData<fn() -> I>)
where
    P: Parse<I>,
    Q: Parse<I, Error = P::Error>,
    I: Input;

impl<P, Q, I> Parse<I> for PrecededParser<P, Q, I>
where
    P: Parse<I>,
    Q: Parse<I, Error = P::Error>,
    I: Input,
{
    type Parsed = Q::Parsed;
    type Error = P::Error;

    fn parse<N>(&self, input: N) -> PResult<Self::Parsed, I, Self::Error>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        match self.0.parse(input.clone()) {
            Ok(Success(_, rem)) => match self.1.parse(rem) {
                Ok(succ) => Ok(succ),
                Err(Failure(e, _)) => Err(Failure(e, input)),
            },
            Err(Failure(e, _)) => Err(Failure(e, input)),
        }
    }
}

/// Creates a parser for `prefix` followed by `parser`, keeping only the value of `parser`.
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::character::{char, alpha1};
/// let variable = preceded(char('$'), alpha1);
/// assert_eq!(variable.parse("$home/").unwrap().0, "home");
/// ```
#[inline]
pub const fn preceded<P, Q, I>(
    prefix: P,
    parser: Q,
) -> impl Parse<I, Parsed = Q::Parsed, Error = P::Error>
where
    P: Parse<I>,
    Q: Parse<I, Error = P::Error>,
    I: Input,
{
    PrecededParser(prefix, parser, PhantomData)
}

#[derive(Debug, Clone)]
struct TerminatedParser<P, Q, I>(P, Q, PhantomData<fn() -> I>)
where
    P: Parse<I>,
    Q: Parse<I, Error = P::Error>,
    I: Input;

impl<P, Q, I> Parse<I> for TerminatedParser<P, Q, I>
where
    P: Parse<I>,
    Q: Parse<I, Error = P::Error>,
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
            Ok(Success(val, rem)) => match self.1.parse(rem) {
                Ok(Success(_, rem)) => Ok(Success(val, rem)),
                Err(Failure(e, _)) => Err(Failure(e, input)),
            },
            Err(Failure(e, _)) => Err(Failure(e, input)),
        }
    }
}

/// Creates a parser for `parser` followed by `suffix`, keeping only the value of `parser`.
#[inline]
pub const fn terminated<P, Q, I>(
    parser: P,
    suffix: Q,
) -> impl Parse<I, Parsed = P::Parsed, Error = P::Error>
where
    P: Parse<I>,
    Q: Parse<I, Error = P::Error>,
    I: Input,
{
    TerminatedParser(parser, suffix, PhantomData)
}

#[derive(Debug, Clone)]
struct DelimitedParser<P, Q, S, I>(P, Q, S, PhantomData<fn() -> I>)
where
    P: Parse<I>,
    Q: Parse<I, Error = P::Error>,
    S: Parse<I, Error = P::Error>,
    I: Input;

impl<P, Q, S, I> Parse<I> for DelimitedParser<P, Q, S, I>
where
    P: Parse<I>,
    Q: Parse<I, Error = P::Error>,
    S: Parse<I, Error = P::Error>,
    I: Input,
{
    type Parsed = Q::Parsed;
    type Error = P::Error;

    fn parse<N>(&self, input: N) -> PResult<Self::Parsed, I, Self::Error>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        match self.0.parse(input.clone()) {
            Ok(Success(_, rem)) => match self.1.parse(rem) {
                Ok(Success(val, rem)) => match self.2.parse(rem) {
                    Ok(Success(_, rem)) => Ok(Success(val, rem)),
                    Err(Failure(e, _)) => Err(Failure(e, input)),
                },
                Err(Failure(e, _)) => Err(Failure(e, input)),
            },
            Err(Failure(e, _)) => Err(Failure(e, input)),
        }
    }
}

/// Creates a parser for `parser` surrounded by `prefix` and `suffix`.
///
/// Only the value of `parser` is kept.
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::character::{char, alpha1};
/// let quoted = delimited(char('"'), alpha1, char('"'));
/// assert_eq!(quoted.parse("\"abc\" rest").unwrap().0, "abc");
/// assert!(quoted.parse("\"abc").is_err());
/// ```
#[inline]
pub const fn delimited<P, Q, S, I>(
    prefix: P,
    parser: Q,
    suffix: S,
) -> impl Parse<I, Parsed = Q::Parsed, Error = P::Error>
where
    P: Parse<I>,
    Q: Parse<I, Error = P::Error>,
    S: Parse<I, Error = P::Error>,
    I: Input,
{
    DelimitedParser(prefix, parser, suffix, PhantomData)
}

#[derive(Debug, Clone)]
struct SequenceParser<C, P, I>(C, PhantomData<fn() -> (P, I)>)
where
    C: AsRef<[P]>,
    P: Parse<I>,
    I: Input;

impl<C, P, I> Parse<I> for SequenceParser<C, P, I>
where
    C: AsRef<[P]>,
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
        let parsers = self.0.as_ref();
        let mut values = Vec::with_capacity(parsers.len());
        let mut rem = input.clone();
        for parser in parsers {
            match parser.parse(rem) {
                Ok(Success(val, next)) => {
                    values.push(val);
                    rem = next;
                }
                Err(Failure(e, _)) => return Err(Failure(e, input)),
            }
        }
        Ok(Success(values, rem))
    }
}

/// Creates a parser that applies a homogeneous list of parsers in order.
///
/// `parsers` is anything that can be viewed as a slice of parsers of one type,
/// such as an array or a [`Vec`]. The values are returned in order. An empty
/// list succeeds without consuming input.
///
/// For parsers of different types, use [`seq`].
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::token::token;
/// let parser = sequence([token("GET"), token(" "), token("/")]);
/// let Success(parts, rem) = parser.parse("GET /index").unwrap();
/// assert_eq!(parts, ["GET", " ", "/"]);
/// assert_eq!(rem, "index");
/// ```
#[inline]
pub const fn sequence<C, P, I>(
    parsers: C,
) -> impl Parse<I, Parsed = Vec<P::Parsed>, Error = P::Error>
where
    C: AsRef<[P]>,
    P: Parse<I>,
    I: Input,
{
    SequenceParser(parsers, PhantomData)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::character::{alpha1, char, digit1};
    use crate::number::int64;
    use crate::token::token;
    use crate::Span;

    #[test]
    fn pair_failure_is_anchored() {
        let parser = pair(alpha1, digit1);
        let Failure(err, rem) = parser.parse("abc;").unwrap_err();
        assert_eq!(rem, "abc;");
        assert_eq!(*err.input(), ";");
    }

    #[test]
    fn separated_pair_discards_separator() {
        let parser = separated_pair(alpha1, char('='), digit1);
        let Success(PairContainer { left, right }, rem) = parser.parse("key=42\n").unwrap();
        assert_eq!(left, "key");
        assert_eq!(right, "42");
        assert_eq!(rem, "\n");
        assert_eq!(parser.parse("key42").unwrap_err().1, "key42");
    }

    #[test]
    fn preceded_and_terminated() {
        assert_eq!(preceded(char('-'), int64).parse("--5"), Ok(Success(-5, "")));
        assert_eq!(terminated(int64, char(';')).parse("12;x"), Ok(Success(12, "x")));
        assert_eq!(terminated(int64, char(';')).parse("12x").unwrap_err().1, "12x");
    }

    #[test]
    fn delimited_failure_in_suffix() {
        let parser = delimited(char('('), int64, char(')'));
        assert_eq!(parser.parse("(7)"), Ok(Success(7, "")));
        let Failure(err, rem) = parser.parse("(7]").unwrap_err();
        assert_eq!(rem, "(7]");
        assert_eq!(err.descriptors(), ["Char())"]);
    }

    #[test]
    fn sequence_of_tokens() {
        let parser = sequence([token("ab"), token("cd")]);
        let Success(parts, rem) = parser.parse("abcdef").unwrap();
        assert_eq!(parts, ["ab", "cd"]);
        assert_eq!(rem, "ef");
        assert_eq!(parser.parse("abce").unwrap_err().1, "abce");
    }

    #[test]
    fn empty_sequence_consumes_nothing() {
        let parsers: [fn(&str) -> PResult<Span<&str>, &str>; 0] = [];
        assert_eq!(sequence(parsers).parse("abc").unwrap().1, "abc");
    }

    #[cfg(feature = "macros")]
    #[test]
    fn seq_macro_flattens() {
        let parser = seq!(char('a'), char('b'), char('c'), char('d'), char('e'));
        assert_eq!(
            parser.parse("abcdef"),
            Ok(Success(('a', 'b', 'c', 'd', 'e'), "f"))
        );
        assert!(parser.parse("abcdx").is_err());
    }
}
