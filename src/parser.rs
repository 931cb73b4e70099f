use std::str::FromStr;

use rust_decimal::Decimal;

use crate::models::Record;

/// Parse free-form text into records, one per well-formed line
///
/// Each line holds a date and an amount separated by whitespace, `,` or `;`.
/// Lines without a date or with an amount that is not a number are dropped
/// silently; callers learn about bad input only when nothing survives.
/// A line starting with a separator has an empty date and is dropped too.
///
/// Amounts must fit a `Decimal`: finite numbers beyond roughly ±7.9e28 are
/// treated as unparseable and their lines are dropped.
pub fn parse(text: &str) -> Vec<Record> {
    text.split(|c: char| c == '\n' || c == '\r')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(parse_line)
        .collect()
}

/// Parse a single line
pub fn parse_line(line: &str) -> Option<Record> {
    let mut tokens = tokenize(line.trim()).into_iter();
    let date = tokens.next()?;
    let amount = parse_amount(&tokens.next()?)?;

    if date.is_empty() {
        return None;
    }

    Some(Record::new(date, amount))
}

/// Parse an amount, accepting a decimal comma in place of the decimal point
pub fn parse_amount(token: &str) -> Option<Decimal> {
    let normalized = token.replace(',', ".");

    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
}

/// Split a line on runs of whitespace, `,` and `;`
///
/// A separator at the very start yields an empty first token, the same as
/// splitting on separator runs would.
///
/// A comma between two digits of the second token is a decimal comma and
/// stays in the token, so `2024-12-05; 99,30` yields `99,30` as the amount.
fn tokenize(line: &str) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        let is_separator = match c {
            ';' => true,
            ',' => {
                let in_amount = tokens.len() == 1;
                let after_digit = current.chars().last().is_some_and(|p| p.is_ascii_digit());
                let before_digit = chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
                !(in_amount && after_digit && before_digit)
            }
            c => c.is_whitespace(),
        };

        if is_separator {
            if !current.is_empty() || i == 0 {
                tokens.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
