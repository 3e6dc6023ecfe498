// duka/src/models/price.rs

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A monetary amount as the backend supplies it.
///
/// Upstream endpoints are inconsistent about whether prices are JSON
/// numbers or numeric strings; both deserialize into this newtype, and it
/// always serializes back out as a number. Math is plain `f64`;
/// two-decimal rounding happens at display time only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price(f64);

impl Price {
  pub fn new(amount: f64) -> Self {
    Price(amount)
  }

  pub fn get(&self) -> f64 {
    self.0
  }
}

impl From<f64> for Price {
  fn from(amount: f64) -> Self {
    Price(amount)
  }
}

impl FromStr for Price {
  type Err = std::num::ParseFloatError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    s.trim().parse::<f64>().map(Price)
  }
}

impl fmt::Display for Price {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:.2}", self.0)
  }
}

impl Serialize for Price {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(self.0)
  }
}

impl<'de> Deserialize<'de> for Price {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
      Number(f64),
      Text(String),
    }

    match Raw::deserialize(deserializer)? {
      Raw::Number(n) => Ok(Price(n)),
      Raw::Text(s) => s
        .trim()
        .parse::<f64>()
        .map(Price)
        .map_err(|_| de::Error::custom(format!("invalid numeric price string {s:?}"))),
    }
  }
}
