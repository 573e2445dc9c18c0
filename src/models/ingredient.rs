//! Free-text ingredient parsing
//!
//! Turns lines like `"2 1/2 cups flour"` or `"1 (15 oz) can beans"` into a
//! structured [`IngredientLine`]. Parsing never fails: anything that is not a
//! recognizable quantity or unit stays in the ingredient name.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use super::units::{self, CanonicalUnit};

/// A parsed ingredient: optional quantity, optional canonical unit, and a name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    /// `None` when the line has no leading amount ("salt to taste")
    pub quantity: Option<f64>,
    pub unit: Option<CanonicalUnit>,
    pub name: String,
}

impl IngredientLine {
    /// Canonical unit spelling, or `""` when the line has no unit
    pub fn unit_str(&self) -> &'static str {
        self.unit.map(|unit| unit.as_str()).unwrap_or("")
    }

    /// True only for blank input lines, the single case where `name` is empty
    pub fn is_degenerate(&self) -> bool {
        self.name.is_empty()
    }
}

impl fmt::Display for IngredientLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(3);

        if let Some(quantity) = self.quantity {
            parts.push(format_quantity(quantity));
        }
        if let Some(unit) = self.unit {
            parts.push(unit.as_str().to_string());
        }
        parts.push(self.name.clone());

        f.write_str(&parts.join(" "))
    }
}

/// Parse a single free-text ingredient line
///
/// Parenthetical and bracketed asides are discarded, tokens are lowercased,
/// then a leading quantity and unit are consumed if present. The rest is the
/// name. A line that is nothing but quantity and unit keeps its full text as
/// the name with no quantity or unit.
pub fn parse(line: &str) -> IngredientLine {
    let cleaned = strip_asides(line);
    let tokens: Vec<String> = cleaned.split_whitespace().map(str::to_lowercase).collect();

    if tokens.is_empty() {
        return IngredientLine {
            quantity: None,
            unit: None,
            name: String::new(),
        };
    }

    let (quantity, consumed) = match leading_quantity(&tokens) {
        Some((value, used)) => (Some(value), used),
        None => (None, 0),
    };
    let rest = &tokens[consumed..];

    let (unit, rest) = match rest.first().and_then(|token| units::normalize(token)) {
        Some(unit) => (Some(unit), &rest[1..]),
        None => (None, rest),
    };

    if rest.is_empty() {
        debug!("Ingredient line {:?} has no name, keeping it whole", line);
        return IngredientLine {
            quantity: None,
            unit: None,
            name: tokens.join(" "),
        };
    }

    IngredientLine {
        quantity,
        unit,
        name: rest.join(" "),
    }
}

/// Remove `( ... )` and `[ ... ]` asides, including nested ones
///
/// An unclosed opener discards the remainder of the line.
fn strip_asides(line: &str) -> String {
    let mut output = String::with_capacity(line.len());
    let mut depth = 0usize;

    for ch in line.chars() {
        match ch {
            '(' | '[' => {
                depth += 1;
                output.push(' ');
            }
            ')' | ']' if depth > 0 => depth -= 1,
            _ if depth == 0 => output.push(ch),
            _ => {}
        }
    }

    output
}

/// A single numeric token and how it was written
#[derive(Debug, Clone, Copy, PartialEq)]
enum Amount {
    /// "2"
    Whole(f64),
    /// "1/2" or "½"
    Fraction(f64),
    /// "1.5", "1½", "1-1/2"
    Mixed(f64),
}

impl Amount {
    fn value(self) -> f64 {
        match self {
            Amount::Whole(value) | Amount::Fraction(value) | Amount::Mixed(value) => value,
        }
    }
}

/// Consume a leading quantity: one numeric token, or a whole number followed
/// by a fraction token ("2 1/2", "1 ½")
fn leading_quantity(tokens: &[String]) -> Option<(f64, usize)> {
    let first = parse_amount(tokens.first()?)?;

    if let Amount::Whole(whole) = first {
        if let Some(Amount::Fraction(fraction)) = tokens.get(1).and_then(|t| parse_amount(t)) {
            return Some((whole + fraction, 2));
        }
    }

    Some((first.value(), 1))
}

fn parse_amount(token: &str) -> Option<Amount> {
    let mut chars = token.chars();
    let last = chars.next_back()?;

    // "½" or "1½"
    if let Some(fraction) = vulgar_fraction(last) {
        let head = chars.as_str();
        if head.is_empty() {
            return Some(Amount::Fraction(fraction));
        }
        return parse_whole(head).map(|whole| Amount::Mixed(whole + fraction));
    }

    // "1-1/2"
    if let Some((head, tail)) = token.split_once('-') {
        let whole = parse_whole(head)?;
        let fraction = parse_fraction(tail)?;
        return Some(Amount::Mixed(whole + fraction));
    }

    if token.contains('/') {
        return parse_fraction(token).map(Amount::Fraction);
    }

    if let Some(whole) = parse_whole(token) {
        return Some(Amount::Whole(whole));
    }

    parse_decimal(token).map(Amount::Mixed)
}

fn parse_whole(token: &str) -> Option<f64> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse::<f64>().ok()
}

fn parse_decimal(token: &str) -> Option<f64> {
    let digits = token.chars().filter(|c| c.is_ascii_digit()).count();
    let dots = token.chars().filter(|c| *c == '.').count();

    if digits == 0 || dots != 1 || digits + dots != token.chars().count() {
        return None;
    }
    token.parse::<f64>().ok()
}

fn parse_fraction(token: &str) -> Option<f64> {
    let (numerator, denominator) = token.split_once('/')?;
    let numerator = parse_whole(numerator)?;
    let denominator = parse_whole(denominator)?;

    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

fn vulgar_fraction(ch: char) -> Option<f64> {
    let value = match ch {
        '¼' => 1.0 / 4.0,
        '½' => 1.0 / 2.0,
        '¾' => 3.0 / 4.0,
        '⅐' => 1.0 / 7.0,
        '⅑' => 1.0 / 9.0,
        '⅒' => 1.0 / 10.0,
        '⅓' => 1.0 / 3.0,
        '⅔' => 2.0 / 3.0,
        '⅕' => 1.0 / 5.0,
        '⅖' => 2.0 / 5.0,
        '⅗' => 3.0 / 5.0,
        '⅘' => 4.0 / 5.0,
        '⅙' => 1.0 / 6.0,
        '⅚' => 5.0 / 6.0,
        '⅛' => 1.0 / 8.0,
        '⅜' => 3.0 / 8.0,
        '⅝' => 5.0 / 8.0,
        '⅞' => 7.0 / 8.0,
        _ => return None,
    };
    Some(value)
}

/// Render a quantity the way a cook reads it: "2 1/2", "1/3", "0.15"
///
/// Values within 0.01 of a half, third, quarter or eighth are shown as mixed
/// fractions; anything else falls back to at most two decimals.
pub fn format_quantity(quantity: f64) -> String {
    const TOLERANCE: f64 = 0.01;

    let rounded = quantity.round();
    if (quantity - rounded).abs() < TOLERANCE {
        return format!("{}", rounded as i64);
    }

    let whole = quantity.trunc();
    let fraction = quantity - whole;

    for denominator in [2u32, 3, 4, 8] {
        let numerator = (fraction * denominator as f64).round() as u32;
        if numerator == 0 || numerator >= denominator {
            continue;
        }
        if (fraction - numerator as f64 / denominator as f64).abs() < TOLERANCE {
            return if whole == 0.0 {
                format!("{}/{}", numerator, denominator)
            } else {
                format!("{} {}/{}", whole as i64, numerator, denominator)
            };
        }
    }

    let decimal = format!("{:.2}", quantity);
    decimal.trim_end_matches('0').trim_end_matches('.').to_string()
}
