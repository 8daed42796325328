use super::{search_table, text, PropertyConverter};
use crate::models::{Account, AccountType};
use crate::ofx::Property;

/// Account aggregates, and the account type each implies when it has no `<ACCTTYPE>`.
const ACCOUNTS: [(&str, AccountType); 6] = [
    ("INVACCTFROM", AccountType::Investment),
    ("INVACCTTO", AccountType::Investment),
    ("BANKACCTFROM", AccountType::Unknown),
    ("BANKACCTTO", AccountType::Unknown),
    ("CCACCTFROM", AccountType::CreditCard),
    ("CCACCTTO", AccountType::CreditCard),
];

/// Reads an [`Account`] from the first account aggregate holding an `<ACCTID>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AccountConverter;

impl PropertyConverter for AccountConverter {
    type Output = Account;

    fn convert(&self, root: &Property) -> Option<Account> {
        search_table(root, &ACCOUNTS, |node, implied| {
            let account_id = node.get("ACCTID")?;
            if account_id.value.is_empty() {
                return None;
            }
            let account_type = match node.get("ACCTTYPE") {
                Some(p) => p.as_account_type(),
                None => implied,
            };
            Some(Account {
                account_type,
                account_id: account_id.value.clone(),
                bank_id: text(node, "BANKID"),
                branch_id: text(node, "BRANCHID"),
                broker_id: text(node, "BROKERID"),
                account_key: text(node, "ACCTKEY"),
            })
        })
    }
}
