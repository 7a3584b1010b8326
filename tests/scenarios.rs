use knit::character::{char, digit0, digit1, crlf, is_alpha};
use knit::prelude::*;
use knit::token::{take_while_m_n, token};

#[test]
fn single_char() {
    assert_eq!(char('a').parse("abc"), Ok(Success('a', "bc")));
}

#[test]
fn token_mismatch_keeps_input() {
    let Failure(err, rem) = token("Bonjour").parse("Hello tout le monde").unwrap_err();
    assert_eq!(rem, "Hello tout le monde");
    assert!(!err.is_fatal());
}

#[test]
fn bounded_take_while() {
    let parser = take_while_m_n(3, 6, is_alpha);
    let Success(word, rem) = parser.parse("latin123").unwrap();
    assert_eq!(word, "latin");
    assert_eq!(rem, "123");
    assert_eq!(parser.parse("ed").unwrap_err().1, "ed");
}

#[test]
fn many1_chars() {
    let parser = many1(char('#'));
    assert_eq!(parser.parse("###"), Ok(Success(vec!['#'; 3], "")));
    assert_eq!(parser.parse("abc").unwrap_err().1, "abc");
}

#[test]
fn count_tokens() {
    let Success(parts, rem) = count(token("abc"), 2).parse("abcabcabc").unwrap();
    assert_eq!(parts, ["abc", "abc"]);
    assert_eq!(rem, "abc");
}

#[test]
fn delimited_message() {
    let parser = delimited(char('+'), digit1, crlf);
    let Success(digits, rem) = parser.parse("+1\r\n").unwrap();
    assert_eq!(digits, "1");
    assert_eq!(rem, "");
    assert_eq!(parser.parse("+1").unwrap_err().1, "+1");
}

#[test]
fn many0_of_zero_width_parser_fails() {
    let Failure(err, rem) = many0(digit0).parse("abcdef").unwrap_err();
    assert_eq!(rem, "abcdef");
    assert_eq!(err.descriptors(), ["Many0"]);
}

#[test]
fn consumed_matches_length_difference() {
    let text = "1234abc";
    let res = digit1.parse(text);
    assert_eq!(res.consumed(&text), 4);
    assert_eq!(res.remaining().len(), 3);
    assert_eq!(digit1.parse("abc").consumed(&"abc"), 0);
}

#[test]
fn error_offset_from_original() {
    let text = "ab+c";
    let parser = seq_of_two(text);
    let Failure(err, rem) = parser.unwrap_err();
    assert_eq!(rem, text);
    assert_eq!(err.offset(&text), 2);
    assert_eq!(err.at(&text).to_string(), "char at position 3, expected Char(-)");
}

fn seq_of_two(text: &str) -> PResult<char, &str> {
    preceded(token("ab"), char('-')).parse(text)
}
