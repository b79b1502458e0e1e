use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Amount, LedgerError};

/// Face value of a single note or coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Denomination(u32);

/// Notes counted when nothing else is configured, largest first.
pub const DEFAULT_DENOMINATIONS: [u32; 7] = [5000, 2000, 1000, 500, 100, 50, 20];

impl Denomination {
    /// A face value must be positive.
    pub fn new(value: u32) -> Result<Self, LedgerError> {
        if value == 0 {
            return Err(LedgerError::InvalidDenomination("0".into()));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Value of `quantity` notes of this denomination.
    pub fn times(&self, quantity: u32) -> Amount {
        Amount::from(self.0) * Amount::from(quantity)
    }

    pub fn defaults() -> Vec<Self> {
        DEFAULT_DENOMINATIONS.iter().map(|&v| Self(v)).collect()
    }
}

impl TryFrom<u32> for Denomination {
    type Error = LedgerError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Denomination> for u32 {
    fn from(denomination: Denomination) -> Self {
        denomination.0
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Denomination {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: u32 = trimmed
            .parse()
            .map_err(|_| LedgerError::InvalidDenomination(trimmed.to_string()))?;
        Self::new(value)
    }
}

/// Parse a comma or whitespace separated list of face values.
/// Example: "5000, 2000,1000" -> [5000, 2000, 1000]
pub fn parse_denominations(input: &str) -> Result<Vec<Denomination>, LedgerError> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect()
}
