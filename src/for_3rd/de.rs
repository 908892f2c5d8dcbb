//! Deserialization of Decimal.

use core::fmt::Formatter;

use crate::num::Decimal;
use serde::de::Error;
use serde::de::Visitor;
use serde::{Deserialize, Deserializer};

pub struct DecimalVisitor {}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DecimalVisitor {})
    }
}

impl<'de> Visitor<'de> for DecimalVisitor {
    type Value = Decimal;

    fn expecting(&self, formatter: &mut Formatter) -> core::fmt::Result {
        write!(formatter, "a decimal number or a string holding one")
    }

    fn visit_u64<E: Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Decimal::from_u64(v))
    }

    fn visit_i64<E: Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Decimal::from_i64(v))
    }

    // shortest representation which reads back as the same f64
    fn visit_f64<E: Error>(self, v: f64) -> Result<Self::Value, E> {
        self.visit_str(&format!("{v:e}"))
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse::<Decimal>().map_err(|e| Error::custom(format!("{e}")))
    }

    fn visit_string<E: Error>(self, v: String) -> Result<Self::Value, E> {
        self.visit_str(&v)
    }
}

#[cfg(test)]
mod tests {

    use serde_json::from_str;

    use crate::num::Decimal;

    #[test]
    fn from_json() {
        assert_eq!(from_str::<Decimal>("\"3.14159\"").unwrap(), "3.14159".parse().unwrap());
        assert_eq!(from_str::<Decimal>("12").unwrap(), Decimal::from_u64(12));
        assert_eq!(from_str::<Decimal>("-7").unwrap(), Decimal::from_i64(-7));
        assert_eq!(from_str::<Decimal>("0.25").unwrap(), "0.25".parse().unwrap());
        assert_eq!(from_str::<Decimal>("1.5e-10").unwrap(), "0.00000000015".parse().unwrap());
        assert!(from_str::<Decimal>("\"abc\"").is_err());
        assert!(from_str::<Decimal>("true").is_err());
    }
}
