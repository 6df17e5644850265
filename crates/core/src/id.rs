//! Strongly-typed identifiers used across the catalog.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Identifier of a product (`s_articles.id`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

/// Identifier of a variant (`s_articles_details.id`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(i64);

macro_rules! impl_row_id_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap a database row id. Ids are positive auto-increment values.
            pub fn new(id: i64) -> DomainResult<Self> {
                if id <= 0 {
                    return Err(DomainError::invalid_id(format!("{}: {}", $name, id)));
                }
                Ok(Self(id))
            }

            pub fn get(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let id = i64::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Self::new(id)
            }
        }
    };
}

impl_row_id_newtype!(ProductId, "ProductId");
impl_row_id_newtype!(VariantId, "VariantId");

/// Order number of a variant (`s_articles_details.ordernumber`).
///
/// This is the public lookup key of the mini product read side. Leading and
/// trailing whitespace is not significant and is trimmed on construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    pub fn new(number: impl Into<String>) -> DomainResult<Self> {
        let number = number.into();
        let trimmed = number.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("order number must not be blank"));
        }
        if trimmed.len() == number.len() {
            Ok(Self(number))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for OrderNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for OrderNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_number_is_trimmed() {
        let number = OrderNumber::new("  SW1000 ").unwrap();
        assert_eq!(number.as_str(), "SW1000");
    }

    #[test]
    fn blank_order_number_is_rejected() {
        let err = OrderNumber::new("   ").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn row_ids_must_be_positive() {
        assert!(ProductId::new(0).is_err());
        assert!(VariantId::new(-3).is_err());
        assert_eq!(VariantId::new(42).unwrap().get(), 42);
    }

    #[test]
    fn row_id_parses_from_str() {
        let id: ProductId = "17".parse().unwrap();
        assert_eq!(i64::from(id), 17);

        let err = "abc".parse::<ProductId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }
}
