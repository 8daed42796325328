use super::{
    convert_children, currency, date, decimal, push_currency, push_date, push_text,
    search_table, secid_property, security_id, text, PropertyConverter, PropertyWriter,
};
use crate::models::{Position, PositionList, SecurityType};
use crate::ofx::Property;

/// Position aggregates of an `<INVPOSLIST>` and the type of security each holds.
const POSITIONS: [(&str, SecurityType); 5] = [
    ("POSSTOCK", SecurityType::Stock),
    ("POSMF", SecurityType::MutualFund),
    ("POSOPT", SecurityType::Option),
    ("POSDEBT", SecurityType::Debt),
    ("POSOTHER", SecurityType::Other),
];

fn position_tag(security_type: SecurityType) -> &'static str {
    POSITIONS
        .iter()
        .find(|(_, t)| *t == security_type)
        .map_or("POSOTHER", |(tag, _)| *tag)
}

/// Reads a [`Position`] from a position aggregate whose `<INVPOS>` names a security.
#[derive(Clone, Copy, Debug, Default)]
pub struct PositionConverter;

impl PropertyConverter for PositionConverter {
    type Output = Position;

    fn convert(&self, root: &Property) -> Option<Position> {
        search_table(root, &POSITIONS, |node, security_type| {
            let invpos = node.get("INVPOS")?;
            let (unique_id, unique_id_type) = security_id(invpos.get("SECID")?)?;
            Some(Position {
                security_type,
                unique_id,
                unique_id_type,
                held_in_account: invpos.child("HELDINACCT").as_position_account_type(),
                position_type: invpos.child("POSTYPE").as_position_type(),
                units: decimal(invpos, "UNITS"),
                unit_price: decimal(invpos, "UNITPRICE"),
                market_value: decimal(invpos, "MKTVAL"),
                price_as_of: date(invpos, "DTPRICEASOF"),
                currency: currency(invpos),
                memo: text(invpos, "MEMO"),
            })
        })
    }
}

impl PropertyWriter for PositionConverter {
    fn to_property(&self, position: &Position) -> Property {
        let mut invpos = Property::new("INVPOS")
            .with_child(secid_property(&position.unique_id, &position.unique_id_type))
            .with_child(Property::leaf("HELDINACCT", position.held_in_account.as_str()))
            .with_child(Property::leaf("POSTYPE", position.position_type.as_str()))
            .with_child(Property::leaf("UNITS", position.units.to_string()))
            .with_child(Property::leaf("UNITPRICE", position.unit_price.to_string()))
            .with_child(Property::leaf("MKTVAL", position.market_value.to_string()));
        push_date(&mut invpos, "DTPRICEASOF", position.price_as_of);
        push_currency(&mut invpos, position.currency);
        push_text(&mut invpos, "MEMO", &position.memo);

        Property::new(position_tag(position.security_type)).with_child(invpos)
    }
}

/// Reads the positions of the first `<INVPOSLIST>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PositionListConverter;

impl PropertyConverter for PositionListConverter {
    type Output = PositionList;

    fn convert(&self, root: &Property) -> Option<PositionList> {
        let (_, positions) = convert_children(root, "INVPOSLIST", &PositionConverter)?;
        Some(PositionList { positions })
    }
}

impl PropertyWriter for PositionListConverter {
    fn to_property(&self, list: &PositionList) -> Property {
        let mut element = Property::new("INVPOSLIST");
        element.children.extend(
            list.iter()
                .map(|position| PositionConverter.to_property(position)),
        );
        element
    }
}

#[allow(non_snake_case)]
#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use time::macros::datetime;

    use super::*;
    use crate::models::{Currency, PositionAccountType, PositionType};

    fn position(name: &str, secid: Property) -> Property {
        Property::new(name).with_child(
            Property::new("INVPOS")
                .with_child(secid)
                .with_child(Property::leaf("HELDINACCT", "CASH"))
                .with_child(Property::leaf("POSTYPE", "LONG"))
                .with_child(Property::leaf("UNITS", "100"))
                .with_child(Property::leaf("UNITPRICE", "50.5"))
                .with_child(Property::leaf("MKTVAL", "5050"))
                .with_child(Property::leaf("DTPRICEASOF", "20240131")),
        )
    }

    #[test]
    fn position_converter__convert() {
        let expected = Position {
            security_type: SecurityType::Stock,
            unique_id: String::from("037833100"),
            unique_id_type: String::from("CUSIP"),
            held_in_account: PositionAccountType::Cash,
            position_type: PositionType::Long,
            units: Decimal::new(100, 0),
            unit_price: Decimal::new(505, 1),
            market_value: Decimal::new(5050, 0),
            price_as_of: Some(datetime!(2024-01-31 00:00:00 UTC)),
            currency: Currency::Usd,
            memo: String::new(),
        };
        let input = position("POSSTOCK", secid_property("037833100", "CUSIP"));

        assert_eq!(PositionConverter.convert(&input), Some(expected.clone()));
        assert_eq!(
            PositionConverter.convert(&PositionConverter.to_property(&expected)),
            Some(expected)
        );
    }

    #[test]
    fn position_converter__secid_without_unique_id() {
        let secid = Property::new("SECID").with_child(Property::leaf("UNIQUEIDTYPE", "CUSIP"));
        let list = Property::new("INVPOSLIST").with_child(position("POSSTOCK", secid));

        assert_eq!(PositionConverter.convert(&list), None);
        assert_eq!(PositionListConverter.convert(&list), Some(PositionList::default()));
    }

    #[test]
    fn position_list_converter__convert() {
        let list = Property::new("INVPOSLIST")
            .with_child(position("POSMF", secid_property("1", "CUSIP")))
            .with_child(position("POSSTOCK", Property::new("SECID")))
            .with_child(position("POSOPT", secid_property("2", "CUSIP")));
        let root = Property::new("INVSTMTRS").with_child(list);

        let positions = PositionListConverter.convert(&root).unwrap();
        let types: Vec<_> = positions.iter().map(|p| p.security_type).collect();
        assert_eq!(types, vec![SecurityType::MutualFund, SecurityType::Option]);
        assert_eq!(positions.market_value(), Decimal::new(10100, 0));

        let written = PositionListConverter.to_property(&positions);
        assert_eq!(written.name, "INVPOSLIST");
        assert_eq!(PositionListConverter.convert(&written), Some(positions));
    }
}
