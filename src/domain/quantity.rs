use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of notes of one denomination.
pub type Quantity = u32;

/// Longest digit string a bounded field accepts.
pub const MAX_QUANTITY_DIGITS: usize = 5;

/// Largest quantity a bounded field accepts.
pub const MAX_QUANTITY: Quantity = 99_999;

/// What happens to a bounded field when more digits are typed than it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowMode {
    /// Keep the leading digits, as a length-limited text field does.
    #[default]
    Truncate,
    /// Keep the whole number and cap it at the maximum.
    Clamp,
}

/// Rules applied to raw text typed into a quantity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityPolicy {
    Bounded {
        max_digits: usize,
        max_value: Quantity,
        overflow: OverflowMode,
    },
    Unbounded,
}

impl QuantityPolicy {
    /// 5 digits, at most 99999, extra digits dropped.
    pub fn strict() -> Self {
        QuantityPolicy::Bounded {
            max_digits: MAX_QUANTITY_DIGITS,
            max_value: MAX_QUANTITY,
            overflow: OverflowMode::Truncate,
        }
    }

    pub fn with_overflow(self, mode: OverflowMode) -> Self {
        match self {
            QuantityPolicy::Bounded {
                max_digits,
                max_value,
                ..
            } => QuantityPolicy::Bounded {
                max_digits,
                max_value,
                overflow: mode,
            },
            QuantityPolicy::Unbounded => QuantityPolicy::Unbounded,
        }
    }
}

impl Default for QuantityPolicy {
    fn default() -> Self {
        Self::strict()
    }
}

/// How an idle (zero) quantity field is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroDisplay {
    /// Empty field.
    #[default]
    Blank,
    /// Literal "0".
    Zero,
}

impl ZeroDisplay {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZeroDisplay::Blank => "blank",
            ZeroDisplay::Zero => "zero",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "blank" | "empty" => Some(ZeroDisplay::Blank),
            "zero" | "0" => Some(ZeroDisplay::Zero),
            _ => None,
        }
    }

    /// Field text for a zero quantity.
    pub fn text(&self) -> &'static str {
        match self {
            ZeroDisplay::Blank => "",
            ZeroDisplay::Zero => "0",
        }
    }
}

impl fmt::Display for ZeroDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A quantity coerced into range, with the text to write back into the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedQuantity {
    pub quantity: Quantity,
    pub text: String,
}

impl SanitizedQuantity {
    pub fn new(quantity: Quantity, zero: ZeroDisplay) -> Self {
        let text = if quantity == 0 {
            zero.text().to_string()
        } else {
            quantity.to_string()
        };
        Self { quantity, text }
    }
}

/// Coerce raw field text into a valid quantity.
///
/// Every non-digit is dropped and an empty result means zero. Bounded policies
/// then either keep the leading `max_digits` digits (`Truncate`) or cap the full
/// number (`Clamp`) and never exceed `max_value`. Unbounded values saturate at
/// `Quantity::MAX`. Applying this to its own `text` yields the same result.
pub fn sanitize(raw: &str, policy: QuantityPolicy, zero: ZeroDisplay) -> SanitizedQuantity {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    let quantity = match policy {
        QuantityPolicy::Bounded {
            max_digits,
            max_value,
            overflow,
        } => {
            let kept = match overflow {
                OverflowMode::Truncate => &digits[..digits.len().min(max_digits)],
                OverflowMode::Clamp => digits.as_str(),
            };
            parse_saturating(kept).min(max_value)
        }
        QuantityPolicy::Unbounded => parse_saturating(&digits),
    };

    SanitizedQuantity::new(quantity, zero)
}

fn parse_saturating(digits: &str) -> Quantity {
    digits.bytes().fold(0, |acc: Quantity, b| {
        acc.saturating_mul(10)
            .saturating_add(Quantity::from(b - b'0'))
    })
}
