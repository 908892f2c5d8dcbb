//! Serialization of Decimal.
//! A number is serialized as its plain decimal string.

use crate::num::Decimal;
use serde::{Serialize, Serializer};

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
