//! Integer-to-numeral conversion for heading serial numbers.
//!
//! Supports seven numbering systems: arabic digits, roman numerals (both
//! cases), latin letters (both cases), and Chinese numerals (ordinary and
//! financial digit sets). All conversions are pure and deterministic, and
//! every system is injective within its valid range.
//!
//! Valid ranges:
//! - `number`: any integer (identity stringification)
//! - `roman_*`: 1..=3999
//! - `alphabet_*`: 1..=26
//! - `chinese_*`: 0..=9999

use serde::{Deserialize, Serialize};

use docstitch_shared::{DocstitchError, Result};

// ---------------------------------------------------------------------------
// NumeralSystem
// ---------------------------------------------------------------------------

/// A numbering system for heading serials.
///
/// The serde names match the values accepted in level-config JSON files
/// (`"number"`, `"roman_lower_case"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumeralSystem {
    /// Arabic digits: `0`, `1`, `2`, ...
    #[default]
    Number,
    /// Lowercase roman numerals: `i`, `ii`, `iii`, ...
    RomanLowerCase,
    /// Uppercase roman numerals: `I`, `II`, `III`, ...
    RomanUpperCase,
    /// Lowercase letters: `a`..`z`.
    AlphabetLowerCase,
    /// Uppercase letters: `A`..`Z`.
    AlphabetUpperCase,
    /// Ordinary Chinese numerals: `〇`, `一`, `二`, ...
    ChineseLowerCase,
    /// Financial ("banker's") Chinese numerals: `零`, `壹`, `贰`, ...
    ChineseUpperCase,
}

impl std::fmt::Display for NumeralSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Number => "number",
            Self::RomanLowerCase => "roman_lower_case",
            Self::RomanUpperCase => "roman_upper_case",
            Self::AlphabetLowerCase => "alphabet_lower_case",
            Self::AlphabetUpperCase => "alphabet_upper_case",
            Self::ChineseLowerCase => "chinese_lower_case",
            Self::ChineseUpperCase => "chinese_upper_case",
        };
        f.write_str(name)
    }
}

impl NumeralSystem {
    /// Convert `n` to a numeral string under this system.
    ///
    /// Returns [`DocstitchError::NumeralOutOfRange`] when `n` falls outside
    /// the system's valid range; the value is never clamped.
    pub fn convert(self, n: i64) -> Result<String> {
        match self {
            Self::Number => Ok(n.to_string()),
            Self::RomanLowerCase => Ok(self.checked(n, to_roman)?.to_lowercase()),
            Self::RomanUpperCase => self.checked(n, to_roman),
            Self::AlphabetLowerCase => self.checked(n, |n| to_alphabet(n, b'a')),
            Self::AlphabetUpperCase => self.checked(n, |n| to_alphabet(n, b'A')),
            Self::ChineseLowerCase => {
                self.checked(n, |n| to_chinese(n, &CHINESE_DIGITS, &CHINESE_UNITS))
            }
            Self::ChineseUpperCase => self.checked(
                n,
                |n| to_chinese(n, &CHINESE_FINANCIAL_DIGITS, &CHINESE_FINANCIAL_UNITS),
            ),
        }
    }

    fn checked(self, n: i64, f: impl Fn(i64) -> Option<String>) -> Result<String> {
        f(n).ok_or_else(|| DocstitchError::NumeralOutOfRange {
            system: self.to_string(),
            value: n,
        })
    }
}

// ---------------------------------------------------------------------------
// Roman numerals
// ---------------------------------------------------------------------------

/// Subtractive-notation table, consumed greedily from the largest value.
const ROMAN_NUMERALS: [(&str, i64); 13] = [
    ("M", 1000),
    ("CM", 900),
    ("D", 500),
    ("CD", 400),
    ("C", 100),
    ("XC", 90),
    ("L", 50),
    ("XL", 40),
    ("X", 10),
    ("IX", 9),
    ("V", 5),
    ("IV", 4),
    ("I", 1),
];

fn to_roman(n: i64) -> Option<String> {
    if !(1..=3999).contains(&n) {
        return None;
    }

    let mut remaining = n;
    let mut result = String::new();
    for (glyph, value) in ROMAN_NUMERALS {
        while remaining >= value {
            result.push_str(glyph);
            remaining -= value;
        }
    }
    Some(result)
}

// ---------------------------------------------------------------------------
// Alphabet
// ---------------------------------------------------------------------------

fn to_alphabet(n: i64, base: u8) -> Option<String> {
    if !(1..=26).contains(&n) {
        return None;
    }
    Some(((base + n as u8 - 1) as char).to_string())
}

// ---------------------------------------------------------------------------
// Chinese numerals
// ---------------------------------------------------------------------------

const CHINESE_DIGITS: [&str; 10] = ["〇", "一", "二", "三", "四", "五", "六", "七", "八", "九"];
const CHINESE_UNITS: [&str; 4] = ["", "十", "百", "千"];

const CHINESE_FINANCIAL_DIGITS: [&str; 10] =
    ["零", "壹", "贰", "叁", "肆", "伍", "陆", "柒", "捌", "玖"];
const CHINESE_FINANCIAL_UNITS: [&str; 4] = ["", "拾", "佰", "仟"];

/// Positional composition by thousands/hundreds/tens/units with the customary
/// elisions: a run of internal zero digits is rendered as a single zero, a
/// leading zero is suppressed entirely, and a leading "one-ten" contracts to
/// "ten" (十一 for 11, not 一十一).
fn to_chinese(n: i64, digits: &[&str; 10], units: &[&str; 4]) -> Option<String> {
    if !(0..=9999).contains(&n) {
        return None;
    }
    if n == 0 {
        return Some(digits[0].to_string());
    }

    let mut result = String::new();
    let mut zero_pending = false;
    for pos in (0..4).rev() {
        let digit = (n / 10_i64.pow(pos)) % 10;
        if digit == 0 {
            // Only becomes visible if a nonzero digit follows.
            zero_pending = !result.is_empty();
            continue;
        }
        if zero_pending {
            result.push_str(digits[0]);
            zero_pending = false;
        }
        result.push_str(digits[digit as usize]);
        result.push_str(units[pos as usize]);
    }

    let one_ten = format!("{}{}", digits[1], units[1]);
    if let Some(rest) = result.strip_prefix(&one_ten) {
        result = format!("{}{rest}", units[1]);
    }

    Some(result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
