use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{Currency, PositionAccountType, PositionType, SecurityType};

/// A holding from an investment statement (`<POSSTOCK>`, `<POSMF>`, ...).
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Position {
    pub security_type: SecurityType,
    pub unique_id: String,
    pub unique_id_type: String,
    pub held_in_account: PositionAccountType,
    pub position_type: PositionType,
    pub units: Decimal,
    pub unit_price: Decimal,
    pub market_value: Decimal,
    pub price_as_of: Option<OffsetDateTime>,
    pub currency: Currency,
    pub memo: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PositionList {
    pub positions: Vec<Position>,
}

impl PositionList {
    pub fn push(&mut self, position: Position) {
        self.positions.push(position);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Position> {
        self.positions.iter()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Total market value of all positions.
    pub fn market_value(&self) -> Decimal {
        self.positions.iter().map(|p| p.market_value).sum()
    }
}

impl<'a> IntoIterator for &'a PositionList {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
