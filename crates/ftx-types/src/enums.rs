//! Method, Scope, validated parameter and order enums

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ArgumentError;

/// HTTP verbs used by the REST API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    /// Uppercase verb as it appears on the request line and in the signed payload
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }

    /// Returns true if parameters travel in the query string rather than a JSON body
    pub fn uses_query_string(&self) -> bool {
        matches!(self, Self::Get)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a request must be authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    #[default]
    Public,
    Private,
}

impl Scope {
    /// Returns true for authenticated requests
    pub fn is_private(&self) -> bool {
        matches!(self, Self::Private)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candle resolution, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Resolution {
    S15 = 15,
    M1 = 60,
    M5 = 300,
    M15 = 900,
    H1 = 3600,
    #[default]
    H4 = 14400,
    D1 = 86400,
}

impl Resolution {
    /// Every resolution the exchange accepts
    pub const ALL: [Resolution; 7] = [
        Self::S15,
        Self::M1,
        Self::M5,
        Self::M15,
        Self::H1,
        Self::H4,
        Self::D1,
    ];

    /// Window length in seconds
    pub fn seconds(&self) -> u32 {
        *self as u32
    }
}

impl TryFrom<u32> for Resolution {
    type Error = ArgumentError;

    fn try_from(seconds: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|r| r.seconds() == seconds)
            .ok_or_else(|| {
                ArgumentError::new(
                    "resolution",
                    format!("must be one of 15, 60, 300, 900, 3600, 14400, 86400 (got {seconds})"),
                )
            })
    }
}

impl From<Resolution> for u32 {
    fn from(resolution: Resolution) -> Self {
        resolution.seconds()
    }
}

/// Orderbook depth, 20 to 100 price levels per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Depth(u32);

impl Depth {
    pub const MIN: u32 = 20;
    pub const MAX: u32 = 100;

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for Depth {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u32> for Depth {
    type Error = ArgumentError;

    fn try_from(levels: u32) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&levels) {
            Ok(Self(levels))
        } else {
            Err(ArgumentError::new(
                "depth",
                format!("must be between {} and {} (got {levels})", Self::MIN, Self::MAX),
            ))
        }
    }
}

/// Deposit chain for multi-chain coins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Omni,
    Erc20,
    Trx,
    Sol,
    Bep2,
}

impl Chain {
    pub const ALL: [Chain; 5] = [Self::Omni, Self::Erc20, Self::Trx, Self::Sol, Self::Bep2];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Omni => "omni",
            Self::Erc20 => "erc20",
            Self::Trx => "trx",
            Self::Sol => "sol",
            Self::Bep2 => "bep2",
        }
    }
}

impl FromStr for Chain {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                ArgumentError::new(
                    "chain",
                    format!("must be one of omni, erc20, trx, sol, bep2 (got {s:?})"),
                )
            })
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort order accepted by the fills endpoint
///
/// Ascending is the only explicit order; leaving it unset means newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillsOrder {
    Asc,
}

impl FillsOrder {
    pub fn as_str(&self) -> &'static str {
        "asc"
    }
}

impl FromStr for FillsOrder {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            other => Err(ArgumentError::new(
                "order",
                format!("only \"asc\" is accepted (got {other:?})"),
            )),
        }
    }
}

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plain order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Limit,
    Market,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Limit => "limit",
            Self::Market => "market",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conditional (trigger) order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TriggerType {
    #[default]
    Stop,
    TrailingStop,
    TakeProfit,
}

impl TriggerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::TrailingStop => "trailingStop",
            Self::TakeProfit => "takeProfit",
        }
    }

    /// Trailing stops are driven by a trail value instead of a trigger price
    pub fn is_trailing(&self) -> bool {
        matches!(self, Self::TrailingStop)
    }
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
