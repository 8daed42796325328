use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{Currency, TransactionType};

/// A banking or credit card transaction (`<STMTTRN>`).
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Transaction {
    pub transaction_type: TransactionType,
    pub fit_id: String,
    pub date_posted: Option<OffsetDateTime>,
    pub date_user: Option<OffsetDateTime>,
    pub date_available: Option<OffsetDateTime>,
    pub amount: Decimal,
    pub check_number: String,
    pub reference_number: String,
    pub payee_id: String,
    pub name: String,
    pub memo: String,
    pub currency: Currency,
}

/// The transactions of a statement (`<BANKTRANLIST>`) with the period they cover.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TransactionList {
    pub start: Option<OffsetDateTime>,
    pub end: Option<OffsetDateTime>,
    pub transactions: Vec<Transaction>,
}

impl TransactionList {
    pub fn push(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Sum of all transaction amounts.
    pub fn total(&self) -> Decimal {
        self.transactions.iter().map(|t| t.amount).sum()
    }
}

impl<'a> IntoIterator for &'a TransactionList {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
