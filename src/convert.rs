//! Extraction of typed entities from property trees, and the reverse.
//!
//! A converter searches a tree in pre-order for the first element named after one of its keys,
//! trying the keys in priority order, and takes the first such element whose structure it
//! accepts. Finding nothing is a normal outcome and yields `None`.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

use rust_decimal::Decimal;
use time::OffsetDateTime;

pub use self::account::AccountConverter;
pub use self::balance::BalanceConverter;
pub use self::institution::InstitutionConverter;
pub use self::investment::{InvestmentTransactionConverter, InvestmentTransactionListConverter};
pub use self::position::{PositionConverter, PositionListConverter};
pub use self::security::{SecurityConverter, SecurityListConverter};
pub use self::transaction::{TransactionConverter, TransactionListConverter};
use crate::error::{Error, Result};
use crate::models::{
    Account, Balance, Currency, Institution, InvestmentTransaction, InvestmentTransactionList,
    Position, PositionList, Security, SecurityList, Transaction, TransactionList,
};
use crate::ofx::{value::format_date, Property};

mod account;
mod balance;
mod institution;
mod investment;
mod position;
mod security;
mod transaction;

/// Reads an entity out of a property tree.
pub trait PropertyConverter {
    type Output;

    /// Returns the first entity found in `root` or below it.
    fn convert(&self, root: &Property) -> Option<Self::Output>;
}

/// Builds the property tree of an entity, for writing outbound documents.
pub trait PropertyWriter: PropertyConverter {
    fn to_property(&self, value: &Self::Output) -> Property;
}

/// Tries each key in order, returning the first element so named that `accept` takes.
fn search<'a, T>(
    root: &'a Property,
    keys: &[&str],
    accept: impl Fn(&'a Property) -> Option<T>,
) -> Option<T> {
    keys.iter().find_map(|key| {
        root.descendants()
            .filter(|p| p.is_named(key))
            .find_map(&accept)
    })
}

/// Like [`search`], over a table of keys paired with what each key means.
fn search_table<'a, K, T>(
    root: &'a Property,
    table: &[(&str, K)],
    accept: impl Fn(&'a Property, K) -> Option<T>,
) -> Option<T>
where
    K: Copy,
{
    table.iter().find_map(|&(key, kind)| {
        root.descendants()
            .filter(|p| p.is_named(key))
            .find_map(|p| accept(p, kind))
    })
}

/// Applies `converter` to every child of the first element named `key`, skipping children it
/// does not accept.
fn convert_children<'a, C>(
    root: &'a Property,
    key: &str,
    converter: &C,
) -> Option<(&'a Property, Vec<C::Output>)>
where
    C: PropertyConverter,
{
    let list = root.find(key)?;
    let items = list
        .children
        .iter()
        .filter_map(|child| converter.convert(child))
        .collect();
    Some((list, items))
}

fn text(node: &Property, name: &str) -> String {
    node.child(name).value.clone()
}

fn decimal(node: &Property, name: &str) -> Decimal {
    node.child(name).as_decimal(Decimal::ZERO)
}

fn date(node: &Property, name: &str) -> Option<OffsetDateTime> {
    node.get(name)?.as_date_opt()
}

/// The `<CURSYM>` of the `<CURRENCY>` or `<ORIGCURRENCY>` aggregate of `node`.
fn currency(node: &Property) -> Currency {
    node.get("CURRENCY")
        .or_else(|| node.get("ORIGCURRENCY"))
        .map(|c| c.child("CURSYM").as_currency())
        .unwrap_or_default()
}

/// The `(UNIQUEID, UNIQUEIDTYPE)` of a `<SECID>` that names a security.
fn security_id(secid: &Property) -> Option<(String, String)> {
    let unique_id = secid.get("UNIQUEID")?;
    if unique_id.value.trim().is_empty() {
        return None;
    }
    Some((unique_id.value.clone(), text(secid, "UNIQUEIDTYPE")))
}

fn push_text(node: &mut Property, name: &str, value: &str) {
    if !value.is_empty() {
        node.push(Property::leaf(name, value));
    }
}

fn push_date(node: &mut Property, name: &str, value: Option<OffsetDateTime>) {
    if let Some(value) = value {
        node.push(Property::leaf(name, format_date(value)));
    }
}

fn secid_property(unique_id: &str, unique_id_type: &str) -> Property {
    Property::new("SECID")
        .with_child(Property::leaf("UNIQUEID", unique_id))
        .with_child(Property::leaf("UNIQUEIDTYPE", unique_id_type))
}

fn push_currency(node: &mut Property, currency: Currency) {
    if currency != Currency::default() {
        node.push(
            Property::new("CURRENCY")
                .with_child(Property::leaf("CURRATE", "1.0"))
                .with_child(Property::leaf("CURSYM", currency.as_str())),
        );
    }
}

/// Converts property trees to any registered entity type.
///
/// [`Default`] registers a converter for every entity in [`crate::models`]; more can be added
/// with [`OfxPropertyConverter::register`].
pub struct OfxPropertyConverter {
    converters: HashMap<TypeId, Box<dyn Any>>,
}

impl OfxPropertyConverter {
    /// A converter with nothing registered.
    pub fn new() -> Self {
        OfxPropertyConverter {
            converters: HashMap::new(),
        }
    }

    /// Registers `converter` for its output type, replacing any converter registered before.
    pub fn register<C>(&mut self, converter: C)
    where
        C: PropertyConverter + 'static,
        C::Output: 'static,
    {
        let converter: Box<dyn PropertyConverter<Output = C::Output>> = Box::new(converter);
        self.converters
            .insert(TypeId::of::<C::Output>(), Box::new(converter));
    }

    pub fn is_registered<T: 'static>(&self) -> bool {
        self.converters.contains_key(&TypeId::of::<T>())
    }

    /// Converts `root` with the converter registered for `T`.
    ///
    /// Fails with [`Error::UnsupportedType`] when none is.
    pub fn convert<T: 'static>(&self, root: &Property) -> Result<Option<T>> {
        let converter = self
            .converters
            .get(&TypeId::of::<T>())
            .and_then(|c| c.downcast_ref::<Box<dyn PropertyConverter<Output = T>>>())
            .ok_or(Error::UnsupportedType(type_name::<T>()))?;
        Ok(converter.convert(root))
    }

    /// Converts `root` with an explicit converter, whether or not one is registered.
    pub fn convert_with<C: PropertyConverter>(&self, converter: &C, root: &Property) -> Option<C::Output> {
        converter.convert(root)
    }

    pub fn get_account(&self, root: &Property) -> Option<Account> {
        AccountConverter.convert(root)
    }

    pub fn get_balance(&self, root: &Property) -> Option<Balance> {
        BalanceConverter.convert(root)
    }

    pub fn get_institution(&self, root: &Property) -> Option<Institution> {
        InstitutionConverter.convert(root)
    }

    pub fn get_position(&self, root: &Property) -> Option<Position> {
        PositionConverter.convert(root)
    }

    pub fn get_position_list(&self, root: &Property) -> Option<PositionList> {
        PositionListConverter.convert(root)
    }

    pub fn get_security(&self, root: &Property) -> Option<Security> {
        SecurityConverter.convert(root)
    }

    pub fn get_security_list(&self, root: &Property) -> Option<SecurityList> {
        SecurityListConverter.convert(root)
    }

    pub fn get_transaction(&self, root: &Property) -> Option<Transaction> {
        TransactionConverter.convert(root)
    }

    pub fn get_transaction_list(&self, root: &Property) -> Option<TransactionList> {
        TransactionListConverter.convert(root)
    }

    pub fn get_investment_transaction(&self, root: &Property) -> Option<InvestmentTransaction> {
        InvestmentTransactionConverter.convert(root)
    }

    pub fn get_investment_transaction_list(
        &self,
        root: &Property,
    ) -> Option<InvestmentTransactionList> {
        InvestmentTransactionListConverter.convert(root)
    }
}

impl Default for OfxPropertyConverter {
    fn default() -> Self {
        let mut converter = Self::new();
        converter.register(AccountConverter);
        converter.register(BalanceConverter);
        converter.register(InstitutionConverter);
        converter.register(PositionConverter);
        converter.register(PositionListConverter);
        converter.register(SecurityConverter);
        converter.register(SecurityListConverter);
        converter.register(TransactionConverter);
        converter.register(TransactionListConverter);
        converter.register(InvestmentTransactionConverter);
        converter.register(InvestmentTransactionListConverter);
        converter
    }
}
