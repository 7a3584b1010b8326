//! Numeric literal parsers.
//!
//! An integer literal is an optional `-` followed by one or more ASCII digits.
//! A floating point literal may additionally carry a fractional part, a `.`
//! followed by one or more digits. The matched text is converted with
//! [`str::parse`].
//!
//! Two situations are fatal rather than recoverable, since the input has
//! committed to being a number:
//! * a `-` that is not followed by a digit
//! * a literal that does not fit the target type
//!
//! ```
//! # use knit::prelude::*;
//! # use knit::number::{int8, int64};
//! assert_eq!(int64.parse("-123abc"), Ok(Success(-123, "abc")));
//! assert!(int64.parse("abc").unwrap_err().0.descriptors() == ["integer"]);
//! assert!(int8.parse("200").unwrap_err().0.is_fatal());
//! ```

use crate::character::digit1;
use crate::{Error, Failure, Input, IntoInput, PResult, Parse, ParseError, Span, Success, Symbol};
use alloc::string::String;
use core::marker::PhantomData;
use core::str::FromStr;

fn lex<I: Input>(input: I, descriptor: &'static str, fraction: bool) -> PResult<Span<I>, I> {
    let mut rem = input.clone();
    let signed = rem.peek().is_some_and(|symb| symb.to_char() == '-');
    if signed {
        rem.next();
    }
    rem = match digit1(rem) {
        Ok(Success(_, rem)) => rem,
        Err(Failure(err, _)) if signed => {
            let pos = err.input().clone();
            let err = ParseError::new_fatal(pos, "no digits after '-'", ["digit"]);
            return Err(Failure(err, input));
        }
        Err(_) => return Err(Failure(ParseError::expected(input.clone(), descriptor), input)),
    };
    if fraction {
        let mut frac = rem.clone();
        if frac.next().is_some_and(|symb| symb.to_char() == '.') {
            if let Ok(Success(_, after)) = digit1(frac) {
                rem = after;
            }
        }
    }
    Ok(Success(Span::new(input, rem.clone()), rem))
}

fn convert<T, I>(literal: Success<Span<I>, I>, input: I) -> PResult<T, I>
where
    T: FromStr,
    T::Err: core::error::Error + Send + Sync + 'static,
    I: Input,
{
    let Success(span, rem) = literal;
    let text: String = Iterator::map(span, Symbol::to_char).collect();
    match text.parse() {
        Ok(val) => Ok(Success(val, rem)),
        Err(err) => Err(Failure(ParseError::fatal(input.clone(), err), input)),
    }
}

#[derive(Debug, Clone)]
struct IntegerParser<T, I>(PhantomData<fn() -> (T, I)>)
where
    T: FromStr,
    T::Err: core::error::Error + Send + Sync + 'static,
    I: Input;

impl<T, I> Parse<I> for IntegerParser<T, I>
where
    T: FromStr,
    T::Err: core::error::Error + Send + Sync + 'static,
    I: Input,
{
    type Parsed = T;
    type Error = ParseError<I>;

    fn parse<N>(&self, input: N) -> PResult<T, I>
    where
        N: IntoInput<Input = I>,
    {
        let input = input.into_input();
        let literal = lex(input.clone(), "integer", false)?;
        convert(literal, input)
    }
}

/// Creates a parser for a decimal integer literal of type `T`.
///
/// `T` is typically one of the primitive integer types. Overflow of `T`, and a
/// `-` sign on an unsigned `T`, are fatal errors whose cause is the
/// [`FromStr`] error.
///
/// # Example
/// ```
/// # use knit::prelude::*;
/// # use knit::number::integer;
/// let port = integer::<u16, _>();
/// assert_eq!(port.parse("8080/"), Ok(Success(8080, "/")));
///
/// let err = port.parse("65536").unwrap_err().0;
/// assert!(err.is_fatal());
/// assert!(err.cause().is_some());
/// ```
#[inline]
pub const fn integer<T, I>() -> impl Parse<I, Parsed = T, Error = ParseError<I>>
where
    T: FromStr,
    T::Err: core::error::Error + Send + Sync + 'static,
    I: Input,
{
    IntegerParser(PhantomData)
}

/// Parses a signed 64 bit integer.
pub fn int64<I: Input>(input: I) -> PResult<i64, I> {
    integer::<i64, I>().parse(input)
}

/// Parses a signed 8 bit integer.
pub fn int8<I: Input>(input: I) -> PResult<i8, I> {
    integer::<i8, I>().parse(input)
}

/// Parses an unsigned 8 bit integer.
///
/// ```
/// # use knit::prelude::*;
/// # use knit::number::uint8;
/// assert_eq!(uint8.parse("253abc"), Ok(Success(253, "abc")));
/// assert!(uint8.parse("256").unwrap_err().0.is_fatal());
/// ```
pub fn uint8<I: Input>(input: I) -> PResult<u8, I> {
    integer::<u8, I>().parse(input)
}

/// Parses a floating point literal as an [`f64`].
///
/// A `.` that is not followed by a digit is not part of the literal.
///
/// ```
/// # use knit::prelude::*;
/// # use knit::number::number;
/// assert_eq!(number.parse("-123.456"), Ok(Success(-123.456, "")));
/// assert_eq!(number.parse("42.x"), Ok(Success(42.0, ".x")));
/// ```
pub fn number<I: Input>(input: I) -> PResult<f64, I> {
    let literal = lex(input.clone(), "number", true)?;
    convert(literal, input)
}
