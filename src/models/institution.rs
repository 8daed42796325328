use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Language;

/// The financial institution that produced a document, from `<FI>` and its enclosing `<SONRS>`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Institution {
    /// `<ORG>`
    pub name: String,
    /// `<FID>`
    pub id: String,
    /// Quicken's `<INTU.BID>` bank identifier.
    pub intu_bid: String,
    pub language: Language,
    pub server_date: Option<OffsetDateTime>,
}
