//! Core type definitions for the swap router

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::RouteError;

/// Token contract address.
///
/// Addresses compare case-insensitively: the identifier is trimmed and
/// ASCII-lowercased on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TokenAddress(String);

impl TokenAddress {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for TokenAddress {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<&str> for TokenAddress {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<TokenAddress> for String {
    fn from(addr: TokenAddress) -> Self {
        addr.0
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Liquidity pair contract address
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PairAddress(String);

impl PairAddress {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PairAddress {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<&str> for PairAddress {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<PairAddress> for String {
    fn from(addr: PairAddress) -> Self {
        addr.0
    }
}

impl fmt::Display for PairAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Token quantity in base units (before decimal scaling).
///
/// Serialized as a decimal integer string so values above 2^53 survive JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Amount(BigUint);

impl Amount {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn into_biguint(self) -> BigUint {
        self.0
    }
}

impl From<BigUint> for Amount {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(BigUint::from(value))
    }
}

impl FromStr for Amount {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RouteError::InvalidParameter {
                message: format!("amount must be a base-unit integer, got {:?}", s),
            });
        }
        BigUint::from_str(trimmed)
            .map(Self)
            .map_err(|e| RouteError::InvalidParameter {
                message: format!("invalid amount {:?}: {}", s, e),
            })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Which side of a swap is fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapDirection {
    /// Input amount is fixed; quote the resulting output
    ExactIn,
    /// Output amount is fixed; quote the required input
    ExactOut,
}

impl SwapDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExactIn => "exact_in",
            Self::ExactOut => "exact_out",
        }
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A simple token path from source to destination
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<TokenAddress>);

impl Path {
    pub fn new(tokens: Vec<TokenAddress>) -> Self {
        Self(tokens)
    }

    pub fn tokens(&self) -> &[TokenAddress] {
        &self.0
    }

    /// Number of pairs traversed
    pub fn hops(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn source(&self) -> Option<&TokenAddress> {
        self.0.first()
    }

    pub fn destination(&self) -> Option<&TokenAddress> {
        self.0.last()
    }

    /// True when no token appears twice
    pub fn is_simple(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.0.len());
        self.0.iter().all(|t| seen.insert(t))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.0.iter().map(|t| t.as_str()).collect();
        write!(f, "{}", labels.join(" -> "))
    }
}

/// A path with one oracle-quoted amount per hop boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotedPath {
    pub path: Path,
    pub amounts: Vec<Amount>,
}

impl QuotedPath {
    pub fn amount_in(&self) -> Option<&Amount> {
        self.amounts.first()
    }

    pub fn amount_out(&self) -> Option<&Amount> {
        self.amounts.last()
    }

    pub fn hops(&self) -> usize {
        self.path.hops()
    }
}

/// A pair as reported by the pair registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairListing {
    pub pair: PairAddress,
    pub token0: TokenAddress,
    pub token1: TokenAddress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_address_is_case_insensitive() {
        let a = TokenAddress::new("0xABCdef");
        let b = TokenAddress::new(" 0xabcDEF ");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "0xabcdef");
    }

    #[test]
    fn test_amount_parse() {
        let amount: Amount = "1000000000000000000000000".parse().unwrap();
        assert_eq!(amount.to_string(), "1000000000000000000000000");

        assert!("".parse::<Amount>().is_err());
        assert!("-5".parse::<Amount>().is_err());
        assert!("1.5".parse::<Amount>().is_err());
        assert!("12abc".parse::<Amount>().is_err());
    }

    #[test]
    fn test_amount_serializes_as_string() {
        let amount = Amount::from(42u64);
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"42\"");
        let parsed: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, amount);
    }

    #[test]
    fn test_path_helpers() {
        let path = Path::new(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(path.hops(), 2);
        assert!(path.is_simple());
        assert_eq!(path.to_string(), "a -> b -> c");

        let looped = Path::new(vec!["a".into(), "b".into(), "a".into()]);
        assert!(!looped.is_simple());
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(SwapDirection::ExactIn.as_str(), "exact_in");
        assert_eq!(SwapDirection::ExactOut.to_string(), "exact_out");
    }
}
