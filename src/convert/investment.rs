use rust_decimal::Decimal;

use super::{
    convert_children, currency, date, search_table, security_id, text, PropertyConverter,
    TransactionConverter,
};
use crate::models::{
    Currency, InvestmentTransaction, InvestmentTransactionList,
    InvestmentTransactionType as Kind, PositionAccountType,
};
use crate::ofx::Property;

/// Investment transaction aggregates of an `<INVTRANLIST>`.
const TRANSACTIONS: [(&str, Kind); 21] = [
    ("BUYDEBT", Kind::BuyDebt),
    ("BUYMF", Kind::BuyMutualFund),
    ("BUYOPT", Kind::BuyOption),
    ("BUYOTHER", Kind::BuyOther),
    ("BUYSTOCK", Kind::BuyStock),
    ("CLOSUREOPT", Kind::ClosureOption),
    ("INCOME", Kind::Income),
    ("INVEXPENSE", Kind::InvestmentExpense),
    ("JRNLFUND", Kind::JournalFund),
    ("JRNLSEC", Kind::JournalSecurity),
    ("MARGININTEREST", Kind::MarginInterest),
    ("REINVEST", Kind::Reinvest),
    ("RETOFCAP", Kind::ReturnOfCapital),
    ("SELLDEBT", Kind::SellDebt),
    ("SELLMF", Kind::SellMutualFund),
    ("SELLOPT", Kind::SellOption),
    ("SELLOTHER", Kind::SellOther),
    ("SELLSTOCK", Kind::SellStock),
    ("SPLIT", Kind::Split),
    ("TRANSFER", Kind::Transfer),
    ("INVBANKTRAN", Kind::BankTransaction),
];

/// Elements naming what a transaction did, such as `<BUYTYPE>BUYTOCOVER`.
const ACTIONS: [&str; 7] = [
    "BUYTYPE",
    "SELLTYPE",
    "INCOMETYPE",
    "TFERACTION",
    "OPTACTION",
    "OPTBUYTYPE",
    "OPTSELLTYPE",
];

fn found_decimal(node: &Property, name: &str) -> Decimal {
    node.find(name)
        .map_or(Decimal::ZERO, |p| p.as_decimal(Decimal::ZERO))
}

fn found_sub_account(node: &Property, name: &str) -> PositionAccountType {
    node.find(name)
        .map_or(PositionAccountType::default(), Property::as_position_account_type)
}

fn bank_transaction(node: &Property) -> Option<InvestmentTransaction> {
    let transaction = TransactionConverter.convert(node.get("STMTTRN")?)?;
    Some(InvestmentTransaction {
        kind: Kind::BankTransaction,
        fit_id: transaction.fit_id.clone(),
        trade_date: transaction.date_posted,
        memo: transaction.memo.clone(),
        total: transaction.amount,
        sub_account_fund: found_sub_account(node, "SUBACCTFUND"),
        currency: transaction.currency,
        bank_transaction: Some(transaction),
        ..Default::default()
    })
}

/// Reads an [`InvestmentTransaction`] from a transaction aggregate whose `<INVTRAN>` holds a
/// `<FITID>`, or from an `<INVBANKTRAN>` holding a banking transaction.
///
/// Amounts are looked up anywhere inside the aggregate, so `<BUYSTOCK><INVBUY>...` and flat
/// aggregates such as `<INCOME>` read the same way.
#[derive(Clone, Copy, Debug, Default)]
pub struct InvestmentTransactionConverter;

impl PropertyConverter for InvestmentTransactionConverter {
    type Output = InvestmentTransaction;

    fn convert(&self, root: &Property) -> Option<InvestmentTransaction> {
        search_table(root, &TRANSACTIONS, |node, kind| {
            if kind == Kind::BankTransaction {
                return bank_transaction(node);
            }

            let invtran = node.find("INVTRAN")?;
            let fit_id = invtran.get("FITID")?;
            if fit_id.value.is_empty() {
                return None;
            }
            let (unique_id, unique_id_type) = node
                .find("SECID")
                .and_then(security_id)
                .unwrap_or_default();
            let action = ACTIONS
                .iter()
                .find_map(|name| node.find(name))
                .map(|p| p.value.clone())
                .unwrap_or_default();
            let holder = node
                .descendants()
                .find(|p| p.get("CURRENCY").is_some() || p.get("ORIGCURRENCY").is_some());

            Some(InvestmentTransaction {
                kind,
                fit_id: fit_id.value.clone(),
                trade_date: date(invtran, "DTTRADE"),
                settle_date: date(invtran, "DTSETTLE"),
                memo: text(invtran, "MEMO"),
                unique_id,
                unique_id_type,
                units: found_decimal(node, "UNITS"),
                unit_price: found_decimal(node, "UNITPRICE"),
                commission: found_decimal(node, "COMMISSION"),
                fees: found_decimal(node, "FEES"),
                total: found_decimal(node, "TOTAL"),
                action,
                sub_account_security: found_sub_account(node, "SUBACCTSEC"),
                sub_account_fund: found_sub_account(node, "SUBACCTFUND"),
                currency: holder.map_or(Currency::default(), currency),
                bank_transaction: None,
            })
        })
    }
}

/// Reads the first `<INVTRANLIST>` with its date range.
#[derive(Clone, Copy, Debug, Default)]
pub struct InvestmentTransactionListConverter;

impl PropertyConverter for InvestmentTransactionListConverter {
    type Output = InvestmentTransactionList;

    fn convert(&self, root: &Property) -> Option<InvestmentTransactionList> {
        let (list, transactions) =
            convert_children(root, "INVTRANLIST", &InvestmentTransactionConverter)?;
        Some(InvestmentTransactionList {
            start: date(list, "DTSTART"),
            end: date(list, "DTEND"),
            transactions,
        })
    }
}
