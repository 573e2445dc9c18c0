use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical measurement units recognized in ingredient lines
///
/// Every accepted spelling, abbreviation and plural maps to exactly one
/// variant through [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalUnit {
    Teaspoon,
    Tablespoon,
    Cup,
    Pint,
    Quart,
    Gallon,
    Milliliter,
    Liter,
    Ounce,
    Pound,
    Gram,
    Kilogram,
    Pinch,
    Dash,
    Clove,
    Can,
    Package,
    Stick,
    Slice,
}

impl CanonicalUnit {
    /// The single spelling used for this unit everywhere downstream
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalUnit::Teaspoon => "tsp",
            CanonicalUnit::Tablespoon => "tbsp",
            CanonicalUnit::Cup => "cup",
            CanonicalUnit::Pint => "pt",
            CanonicalUnit::Quart => "qt",
            CanonicalUnit::Gallon => "gal",
            CanonicalUnit::Milliliter => "ml",
            CanonicalUnit::Liter => "l",
            CanonicalUnit::Ounce => "oz",
            CanonicalUnit::Pound => "lb",
            CanonicalUnit::Gram => "g",
            CanonicalUnit::Kilogram => "kg",
            CanonicalUnit::Pinch => "pinch",
            CanonicalUnit::Dash => "dash",
            CanonicalUnit::Clove => "clove",
            CanonicalUnit::Can => "can",
            CanonicalUnit::Package => "pkg",
            CanonicalUnit::Stick => "stick",
            CanonicalUnit::Slice => "slice",
        }
    }
}

impl fmt::Display for CanonicalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const UNIT_SPELLINGS: &[(&str, CanonicalUnit)] = &[
    ("tsp", CanonicalUnit::Teaspoon),
    ("tsps", CanonicalUnit::Teaspoon),
    ("teaspoon", CanonicalUnit::Teaspoon),
    ("teaspoons", CanonicalUnit::Teaspoon),
    ("tbsp", CanonicalUnit::Tablespoon),
    ("tbsps", CanonicalUnit::Tablespoon),
    ("tbs", CanonicalUnit::Tablespoon),
    ("tbl", CanonicalUnit::Tablespoon),
    ("tablespoon", CanonicalUnit::Tablespoon),
    ("tablespoons", CanonicalUnit::Tablespoon),
    ("cup", CanonicalUnit::Cup),
    ("cups", CanonicalUnit::Cup),
    ("pt", CanonicalUnit::Pint),
    ("pint", CanonicalUnit::Pint),
    ("pints", CanonicalUnit::Pint),
    ("qt", CanonicalUnit::Quart),
    ("quart", CanonicalUnit::Quart),
    ("quarts", CanonicalUnit::Quart),
    ("gal", CanonicalUnit::Gallon),
    ("gallon", CanonicalUnit::Gallon),
    ("gallons", CanonicalUnit::Gallon),
    ("ml", CanonicalUnit::Milliliter),
    ("milliliter", CanonicalUnit::Milliliter),
    ("milliliters", CanonicalUnit::Milliliter),
    ("millilitre", CanonicalUnit::Milliliter),
    ("millilitres", CanonicalUnit::Milliliter),
    ("l", CanonicalUnit::Liter),
    ("liter", CanonicalUnit::Liter),
    ("liters", CanonicalUnit::Liter),
    ("litre", CanonicalUnit::Liter),
    ("litres", CanonicalUnit::Liter),
    ("oz", CanonicalUnit::Ounce),
    ("ounce", CanonicalUnit::Ounce),
    ("ounces", CanonicalUnit::Ounce),
    ("lb", CanonicalUnit::Pound),
    ("lbs", CanonicalUnit::Pound),
    ("pound", CanonicalUnit::Pound),
    ("pounds", CanonicalUnit::Pound),
    ("g", CanonicalUnit::Gram),
    ("gr", CanonicalUnit::Gram),
    ("gram", CanonicalUnit::Gram),
    ("grams", CanonicalUnit::Gram),
    ("kg", CanonicalUnit::Kilogram),
    ("kgs", CanonicalUnit::Kilogram),
    ("kilogram", CanonicalUnit::Kilogram),
    ("kilograms", CanonicalUnit::Kilogram),
    ("pinch", CanonicalUnit::Pinch),
    ("pinches", CanonicalUnit::Pinch),
    ("dash", CanonicalUnit::Dash),
    ("dashes", CanonicalUnit::Dash),
    ("clove", CanonicalUnit::Clove),
    ("cloves", CanonicalUnit::Clove),
    ("can", CanonicalUnit::Can),
    ("cans", CanonicalUnit::Can),
    ("pkg", CanonicalUnit::Package),
    ("pkgs", CanonicalUnit::Package),
    ("package", CanonicalUnit::Package),
    ("packages", CanonicalUnit::Package),
    ("stick", CanonicalUnit::Stick),
    ("sticks", CanonicalUnit::Stick),
    ("slice", CanonicalUnit::Slice),
    ("slices", CanonicalUnit::Slice),
];

/// Map a raw unit token to its canonical unit
///
/// Matching is case-insensitive and ignores a trailing period ("Tbsp." is a
/// tablespoon). Unknown tokens return `None`, which callers treat as "not a unit".
pub fn normalize(token: &str) -> Option<CanonicalUnit> {
    let token = token.trim().trim_end_matches('.').to_lowercase();
    if token.is_empty() {
        return None;
    }

    UNIT_SPELLINGS
        .iter()
        .find(|(spelling, _)| *spelling == token)
        .map(|(_, unit)| *unit)
}
