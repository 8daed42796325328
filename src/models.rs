//! Financial entities extracted from, or written into, OFX property trees.

pub use self::account::Account;
pub use self::balance::Balance;
pub use self::institution::Institution;
pub use self::investment::{InvestmentTransaction, InvestmentTransactionList};
pub use self::position::{Position, PositionList};
pub use self::security::{Security, SecurityList};
pub use self::transaction::{Transaction, TransactionList};

pub mod account;
pub mod balance;
pub mod institution;
pub mod investment;
pub mod position;
pub mod security;
pub mod transaction;

ofx_enum! {
    /// ISO 4217 currency codes.
    pub enum Currency {
        Aud = "AUD",
        Brl = "BRL",
        Cad = "CAD",
        Chf = "CHF",
        Cny = "CNY",
        Czk = "CZK",
        Dkk = "DKK",
        Eur = "EUR",
        Gbp = "GBP",
        Hkd = "HKD",
        Huf = "HUF",
        Ils = "ILS",
        Inr = "INR",
        Jpy = "JPY",
        Krw = "KRW",
        Mxn = "MXN",
        Nok = "NOK",
        Nzd = "NZD",
        Pln = "PLN",
        Sek = "SEK",
        Sgd = "SGD",
        #[default]
        Usd = "USD",
        Zar = "ZAR",
    }
}

ofx_enum! {
    /// The `<TRNTYPE>` of a banking transaction.
    pub enum TransactionType {
        Credit = "CREDIT",
        Debit = "DEBIT",
        Int = "INT",
        Div = "DIV",
        Fee = "FEE",
        SrvChg = "SRVCHG",
        Dep = "DEP",
        Atm = "ATM",
        Pos = "POS",
        Xfer = "XFER",
        Check = "CHECK",
        Payment = "PAYMENT",
        Cash = "CASH",
        DirectDep = "DIRECTDEP",
        DirectDebit = "DIRECTDEBIT",
        RepeatPmt = "REPEATPMT",
        Hold = "HOLD",
        #[default]
        Other = "OTHER",
    }
}

ofx_enum! {
    pub enum AccountType {
        Checking = "CHECKING",
        Savings = "SAVINGS",
        MoneyMarket = "MONEYMRKT",
        CreditLine = "CREDITLINE",
        Cd = "CD",
        CreditCard = "CREDITCARD",
        Investment = "INVESTMENT",
        #[default]
        Unknown = "UNKNOWN",
    }
}

ofx_enum! {
    /// Whether a position is held long or short (`<POSTYPE>`).
    pub enum PositionType {
        Long = "LONG",
        Short = "SHORT",
        #[default]
        Unknown = "UNKNOWN",
    }
}

ofx_enum! {
    /// The sub-account a position or trade belongs to (`<HELDINACCT>`, `<SUBACCTSEC>`).
    pub enum PositionAccountType {
        Cash = "CASH",
        Margin = "MARGIN",
        Short = "SHORT",
        #[default]
        Other = "OTHER",
    }
}

ofx_enum! {
    /// ISO 639 language codes used by `<LANGUAGE>`.
    pub enum Language {
        Deu = "DEU",
        Eng = "ENG",
        Fra = "FRA",
        Ita = "ITA",
        Jpn = "JPN",
        Nld = "NLD",
        Por = "POR",
        Spa = "SPA",
        Zho = "ZHO",
        #[default]
        Unknown = "UNKNOWN",
    }
}

ofx_enum! {
    pub enum SecurityType {
        Stock = "STOCK",
        MutualFund = "MF",
        Option = "OPT",
        Debt = "DEBT",
        Other = "OTHER",
        #[default]
        Unknown = "UNKNOWN",
    }
}

ofx_enum! {
    /// The kind of an investment transaction, named after its wrapping aggregate.
    pub enum InvestmentTransactionType {
        BuyDebt = "BUYDEBT",
        BuyMutualFund = "BUYMF",
        BuyOption = "BUYOPT",
        BuyOther = "BUYOTHER",
        BuyStock = "BUYSTOCK",
        ClosureOption = "CLOSUREOPT",
        Income = "INCOME",
        InvestmentExpense = "INVEXPENSE",
        JournalFund = "JRNLFUND",
        JournalSecurity = "JRNLSEC",
        MarginInterest = "MARGININTEREST",
        Reinvest = "REINVEST",
        ReturnOfCapital = "RETOFCAP",
        SellDebt = "SELLDEBT",
        SellMutualFund = "SELLMF",
        SellOption = "SELLOPT",
        SellOther = "SELLOTHER",
        SellStock = "SELLSTOCK",
        Split = "SPLIT",
        Transfer = "TRANSFER",
        BankTransaction = "INVBANKTRAN",
        #[default]
        Unknown = "UNKNOWN",
    }
}
