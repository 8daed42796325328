use rust_decimal::Decimal;

use super::{date, decimal, search, PropertyConverter};
use crate::models::Balance;
use crate::ofx::Property;

/// Reads a [`Balance`] from the `<LEDGERBAL>` of a banking statement or, failing that, the
/// `<INVBAL>` of an investment statement.
///
/// A statement's `<AVAILBAL>` sets the available amount, which otherwise equals the ledger.
#[derive(Clone, Copy, Debug, Default)]
pub struct BalanceConverter;

impl PropertyConverter for BalanceConverter {
    type Output = Balance;

    fn convert(&self, root: &Property) -> Option<Balance> {
        search(root, &["LEDGERBAL", "INVBAL"], |node| {
            if node.is_named("INVBAL") {
                return Some(Balance {
                    ledger: decimal(node, "AVAILCASH"),
                    available: decimal(node, "AVAILCASH"),
                    margin: decimal(node, "MARGINBALANCE"),
                    short: decimal(node, "SHORTBALANCE"),
                    as_of: None,
                });
            }

            let amount = node.get("BALAMT")?.as_decimal(Decimal::ZERO);
            let available = root
                .find("AVAILBAL")
                .map_or(amount, |p| decimal(p, "BALAMT"));
            Some(Balance {
                ledger: amount,
                available,
                as_of: date(node, "DTASOF"),
                ..Default::default()
            })
        })
    }
}
