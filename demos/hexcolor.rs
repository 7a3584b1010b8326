//! This example implements a parser for CSS-style hex colors.
//!
//! When the program is run, there will be a prompt. Enter a color such as
//! `#2F14DF`, and its red, green and blue components will be printed. On
//! invalid input, the position of the error is reported instead.

use knit::character::{char, is_hex_digit};
use knit::prelude::*;
use knit::token::take_while_m_n;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

fn hex_byte(input: &str) -> PResult<u8, &str> {
    take_while_m_n(2, 2, is_hex_digit)
        .try_map(|digits: Span<&str>| u8::from_str_radix(digits.into(), 16))
        .parse(input)
}

fn hex_color(input: &str) -> PResult<Color, &str> {
    preceded(char('#'), count(hex_byte, 3))
        .map(|rgb| Color {
            red: rgb[0],
            green: rgb[1],
            blue: rgb[2],
        })
        .complete()
        .parse(input)
}

fn main() -> std::io::Result<()> {
    use std::io::BufRead;
    use std::io::Write;

    let mut out = std::io::stdout();
    writeln!(out, "Enter 'q', 'quit', or 'exit' to exit.")?;
    write!(out, "> ")?;
    out.flush()?;

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let input = line.trim();

        if input == "q" || input == "quit" || input == "exit" {
            break;
        }

        if !input.is_empty() {
            match hex_color.parse(input) {
                Ok(Success(color, _)) => writeln!(
                    out,
                    "red: {}, green: {}, blue: {}",
                    color.red, color.green, color.blue
                )?,
                Err(Failure(err, _)) => writeln!(out, "{}", err.at(&input))?,
            }
        }

        write!(out, "> ")?;
        out.flush()?;
    }

    Ok(())
}
