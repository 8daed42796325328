use serde::{Deserialize, Serialize};

use super::AccountType;

/// A bank, credit card or brokerage account (`<BANKACCTFROM>`, `<CCACCTFROM>`, `<INVACCTFROM>`
/// and their `TO` counterparts).
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Account {
    pub account_type: AccountType,
    pub account_id: String,
    /// Routing number; bank accounts only.
    pub bank_id: String,
    pub branch_id: String,
    /// Brokerage identifier; investment accounts only.
    pub broker_id: String,
    pub account_key: String,
}
