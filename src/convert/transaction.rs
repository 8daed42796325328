use super::{convert_children, currency, date, decimal, search, text, PropertyConverter};
use crate::models::{Transaction, TransactionList};
use crate::ofx::Property;

/// Reads a banking [`Transaction`] from a `<STMTTRN>` holding a `<FITID>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TransactionConverter;

impl PropertyConverter for TransactionConverter {
    type Output = Transaction;

    fn convert(&self, root: &Property) -> Option<Transaction> {
        search(root, &["STMTTRN"], |node| {
            let fit_id = node.get("FITID")?;
            if fit_id.value.is_empty() {
                return None;
            }
            Some(Transaction {
                transaction_type: node.child("TRNTYPE").as_transaction_type(),
                fit_id: fit_id.value.clone(),
                date_posted: date(node, "DTPOSTED"),
                date_user: date(node, "DTUSER"),
                date_available: date(node, "DTAVAIL"),
                amount: decimal(node, "TRNAMT"),
                check_number: text(node, "CHECKNUM"),
                reference_number: text(node, "REFNUM"),
                payee_id: text(node, "PAYEEID"),
                name: text(node, "NAME"),
                memo: text(node, "MEMO"),
                currency: currency(node),
            })
        })
    }
}

/// Reads the first `<BANKTRANLIST>` with its date range.
#[derive(Clone, Copy, Debug, Default)]
pub struct TransactionListConverter;

impl PropertyConverter for TransactionListConverter {
    type Output = TransactionList;

    fn convert(&self, root: &Property) -> Option<TransactionList> {
        let (list, transactions) = convert_children(root, "BANKTRANLIST", &TransactionConverter)?;
        Some(TransactionList {
            start: date(list, "DTSTART"),
            end: date(list, "DTEND"),
            transactions,
        })
    }
}

#[allow(non_snake_case)]
#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use time::macros::datetime;

    use super::*;
    use crate::models::TransactionType;

    fn transaction(fit_id: &str, kind: &str, amount: &str) -> Property {
        Property::new("STMTTRN")
            .with_child(Property::leaf("TRNTYPE", kind))
            .with_child(Property::leaf("DTPOSTED", "20240105120000[-5:EST]"))
            .with_child(Property::leaf("TRNAMT", amount))
            .with_child(Property::leaf("FITID", fit_id))
            .with_child(Property::leaf("NAME", "Coffee"))
    }

    #[test]
    fn transaction_converter__convert() {
        let transaction = TransactionConverter
            .convert(&transaction("T1", "debit", "-3.75"))
            .unwrap();

        assert_eq!(transaction.transaction_type, TransactionType::Debit);
        assert_eq!(transaction.fit_id, "T1");
        assert_eq!(transaction.date_posted, Some(datetime!(2024-01-05 07:00:00 UTC)));
        assert_eq!(transaction.date_user, None);
        assert_eq!(transaction.amount, Decimal::new(-375, 2));
        assert_eq!(transaction.name, "Coffee");
    }

    #[test]
    fn transaction_converter__requires_fit_id() {
        assert_eq!(TransactionConverter.convert(&transaction("", "DEBIT", "1")), None);
    }

    #[test]
    fn transaction_list_converter__convert() {
        let list = Property::new("BANKTRANLIST")
            .with_child(Property::leaf("DTSTART", "20240101"))
            .with_child(Property::leaf("DTEND", "20240131"))
            .with_child(transaction("T1", "DEBIT", "-10"))
            .with_child(transaction("", "DEBIT", "-99"))
            .with_child(transaction("T2", "CREDIT", "25.5"));
        let root = Property::new("STMTRS").with_child(list);

        let transactions = TransactionListConverter.convert(&root).unwrap();
        assert_eq!(transactions.start, Some(datetime!(2024-01-01 00:00:00 UTC)));
        assert_eq!(transactions.end, Some(datetime!(2024-01-31 00:00:00 UTC)));
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions.total(), Decimal::new(155, 1));
    }

    #[test]
    fn transaction_list_converter__missing_list() {
        assert_eq!(TransactionListConverter.convert(&transaction("T1", "DEBIT", "1")), None);
    }
}
