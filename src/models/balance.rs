use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Statement balances.
///
/// For bank and credit card statements `ledger` and `available` come from `<LEDGERBAL>` and
/// `<AVAILBAL>`. For investment statements they come from `<AVAILCASH>` and `<BUYPOWER>` of
/// `<INVBAL>`, which also supplies `margin` and `short`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Balance {
    pub ledger: Decimal,
    pub available: Decimal,
    pub margin: Decimal,
    pub short: Decimal,
    pub as_of: Option<OffsetDateTime>,
}
