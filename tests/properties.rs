use knit::character::{alpha1, char, digit0, digit1, whitespace0};
use knit::number::{int64, number};
use knit::prelude::*;
use knit::token::{take_until, token};
use proptest::prelude::*;

const TEXT: &str = "[a-c0-9,.# \\-]{0,16}";

/// Checks the success and failure contract of `parser` on `input`.
fn check_contract<'a, P>(parser: &P, input: &'a str) -> Result<(), TestCaseError>
where
    P: Parse<&'a str>,
{
    match parser.parse(input) {
        Ok(Success(_, rem)) => {
            prop_assert!(rem.len() <= input.len());
            prop_assert!(input.ends_with(rem));
        }
        Err(Failure(_, rem)) => {
            prop_assert_eq!(rem, input);
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn remaining_is_suffix_or_untouched(s in TEXT) {
        check_contract(&char('a'), &s)?;
        check_contract(&token("ab"), &s)?;
        check_contract(&alpha1, &s)?;
        check_contract(&digit0, &s)?;
        check_contract(&number, &s)?;
        check_contract(&take_until(char('#')), &s)?;
        check_contract(&many0(char('a')), &s)?;
        check_contract(&many1(digit1), &s)?;
        check_contract(&count(alpha1, 2), &s)?;
        check_contract(&separated_list0(char(','), int64), &s)?;
        check_contract(&separated_list1(char(','), whitespace0), &s)?;
        check_contract(&pair(digit1, char('.')), &s)?;
        check_contract(&delimited(char('#'), alpha1, char('#')), &s)?;
        check_contract(&either(int64.recognize(), alpha1), &s)?;
        check_contract(&optional(int64), &s)?;
        check_contract(&peek(alpha1), &s)?;
    }

    #[test]
    fn recognize_is_consumed_prefix(s in TEXT) {
        let parser = recognize(separated_list1(char(','), either(digit1, alpha1)));
        if let Ok(Success(span, rem)) = parser.parse(s.as_str()) {
            let consumed = s.len() - rem.len();
            prop_assert_eq!(span.len(), consumed);
            prop_assert!(span == &s[..consumed]);
        }
    }

    #[test]
    fn many0_is_optional_many1(s in TEXT) {
        let many = many0(char('a'));
        let optional_many = opt(many1(char('a'))).map(Option::unwrap_or_default);
        prop_assert_eq!(many.parse(s.as_str()), optional_many.parse(s.as_str()));

        let many = many0(digit1.recognize()).map(|spans| spans.len());
        prop_assert!(many.parse(s.as_str()).is_ok());
    }

    #[test]
    fn optional_is_idempotent(s in TEXT) {
        let once = optional(number);
        let twice = optional(optional(number));
        prop_assert_eq!(once.parse(s.as_str()), twice.parse(s.as_str()));
    }

    #[test]
    fn first_success_wins(s in TEXT) {
        let left = either(digit1, digit0);
        if let Ok(Success(span, rem)) = digit1.parse(s.as_str()) {
            let Success(chosen, chosen_rem) = left.parse(s.as_str()).unwrap();
            prop_assert!(chosen == span);
            prop_assert_eq!(chosen_rem, rem);
        }
    }
}

#[test]
fn separated_lists_on_empty_input() {
    let Success(items, rem) = separated_list0(char(','), digit1).parse("").unwrap();
    assert!(items.is_empty());
    assert_eq!(rem, "");
    assert_eq!(separated_list1(char(','), digit1).parse("").unwrap_err().1, "");
}
