use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{Currency, InvestmentTransactionType, PositionAccountType, Transaction};

/// A trade, income event or cash movement from an investment statement.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct InvestmentTransaction {
    pub kind: InvestmentTransactionType,
    pub fit_id: String,
    pub trade_date: Option<OffsetDateTime>,
    pub settle_date: Option<OffsetDateTime>,
    pub memo: String,
    pub unique_id: String,
    pub unique_id_type: String,
    pub units: Decimal,
    pub unit_price: Decimal,
    pub commission: Decimal,
    pub fees: Decimal,
    pub total: Decimal,
    /// The qualifier of the trade: `<BUYTYPE>`, `<SELLTYPE>`, `<INCOMETYPE>`, `<OPTACTION>` or
    /// `<TFERACTION>`, whichever is present.
    pub action: String,
    pub sub_account_security: PositionAccountType,
    pub sub_account_fund: PositionAccountType,
    pub currency: Currency,
    /// The cash transaction wrapped by `<INVBANKTRAN>`.
    pub bank_transaction: Option<Transaction>,
}

/// The transactions of an investment statement (`<INVTRANLIST>`) with the period they cover.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct InvestmentTransactionList {
    pub start: Option<OffsetDateTime>,
    pub end: Option<OffsetDateTime>,
    pub transactions: Vec<InvestmentTransaction>,
}

impl InvestmentTransactionList {
    pub fn push(&mut self, transaction: InvestmentTransaction) {
        self.transactions.push(transaction);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InvestmentTransaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl<'a> IntoIterator for &'a InvestmentTransactionList {
    type Item = &'a InvestmentTransaction;
    type IntoIter = std::slice::Iter<'a, InvestmentTransaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
