use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{Currency, SecurityType};

/// A security description from the security list (`<STOCKINFO>`, `<MFINFO>`, ...).
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Security {
    pub security_type: SecurityType,
    pub unique_id: String,
    /// Usually `CUSIP` or `ISIN`.
    pub unique_id_type: String,
    pub name: String,
    pub ticker: String,
    pub fi_id: String,
    pub rating: String,
    pub unit_price: Decimal,
    pub as_of: Option<OffsetDateTime>,
    pub currency: Currency,
    pub memo: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SecurityList {
    pub securities: Vec<Security>,
}

impl SecurityList {
    pub fn push(&mut self, security: Security) {
        self.securities.push(security);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Security> {
        self.securities.iter()
    }

    pub fn len(&self) -> usize {
        self.securities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.securities.is_empty()
    }

    /// Finds a security by its unique identifier.
    pub fn get(&self, unique_id: &str) -> Option<&Security> {
        self.securities.iter().find(|s| s.unique_id == unique_id)
    }
}

impl<'a> IntoIterator for &'a SecurityList {
    type Item = &'a Security;
    type IntoIter = std::slice::Iter<'a, Security>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
