//! Physical and token units stored as scaled integers.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Raw on-chain balance type.
pub type Balance = u128;

/// Number of implied decimal places in a token amount.
pub const TOKEN_DECIMALS: u32 = 12;

/// Symbol printed after token amounts.
pub const TOKEN_SYMBOL: &str = "ATHL";

/// A height internally stored as an integer number of millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Height {
    pub millimeters: u32,
}

impl Height {
    pub fn from_millimeters(millimeters: u32) -> Self {
        Self { millimeters }
    }

    pub fn to_centimeters(&self) -> f64 {
        self.millimeters as f64 / 10.0
    }

    pub fn to_meters(&self) -> f64 {
        self.millimeters as f64 / 1000.0
    }

    pub fn to_inches(&self) -> f64 {
        self.millimeters as f64 / 25.4
    }

    pub fn to_feet(&self) -> f64 {
        self.to_inches() / 12.0
    }
}

/// A weight internally stored as an integer number of grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weight {
    pub grams: u32,
}

impl Weight {
    pub fn from_grams(grams: u32) -> Self {
        Self { grams }
    }

    pub fn to_kilograms(&self) -> f64 {
        self.grams as f64 / 1000.0
    }

    pub fn to_pounds(&self) -> f64 {
        self.grams as f64 / 453.592
    }
}

/// A token value with [`TOKEN_DECIMALS`] implied decimal places.
///
/// Displays exactly, without going through floating point:
/// `1_500_000_000_000` renders as `1.5`, `3_000_000_000_000` as `3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TokenAmount(pub Balance);

impl TokenAmount {
    /// One whole token in raw units.
    pub const UNIT: Balance = 10u128.pow(TOKEN_DECIMALS);

    pub fn from_raw(raw: Balance) -> Self {
        Self(raw)
    }

    pub fn from_tokens(tokens: u64) -> Self {
        Self(tokens as Balance * Self::UNIT)
    }

    pub fn raw(&self) -> Balance {
        self.0
    }

    /// Lossy conversion to whole tokens (`raw / 10^12`).
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / Self::UNIT as f64
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / Self::UNIT;
        let frac = self.0 % Self::UNIT;
        if frac == 0 {
            return write!(f, "{}", whole);
        }
        let digits = format!("{:0width$}", frac, width = TOKEN_DECIMALS as usize);
        write!(f, "{}.{}", whole, digits.trim_end_matches('0'))
    }
}

// Amounts are written as decimal strings. On input, JSON numbers are only
// accepted up to u64::MAX; larger balances must arrive as a decimal or
// `0x` hex string.
impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl Visitor<'_> for AmountVisitor {
            type Value = TokenAmount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative integer or decimal string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(TokenAmount(v as Balance))
            }

            fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
                Ok(TokenAmount(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Balance::try_from(v)
                    .map(TokenAmount)
                    .map_err(|_| E::custom(format!("negative token amount: {}", v)))
            }

            // serde_json hands integers past u64::MAX over as floats.
            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Err(E::custom(format!(
                    "token amount {} is not an exact integer; send amounts above {} as a string",
                    v,
                    u64::MAX
                )))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                let digits = v.strip_prefix("0x");
                let parsed = match digits {
                    Some(hex) => Balance::from_str_radix(hex, 16),
                    None => v.parse::<Balance>(),
                };
                parsed
                    .map(TokenAmount)
                    .map_err(|e| E::custom(format!("invalid token amount '{}': {}", v, e)))
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}
