use super::{
    convert_children, currency, date, decimal, push_currency, push_date, push_text,
    search_table, secid_property, security_id, text, PropertyConverter, PropertyWriter,
};
use crate::models::{Security, SecurityList, SecurityType};
use crate::ofx::Property;

/// Security aggregates of a `<SECLIST>` and the type each describes.
const SECURITIES: [(&str, SecurityType); 5] = [
    ("STOCKINFO", SecurityType::Stock),
    ("MFINFO", SecurityType::MutualFund),
    ("OPTINFO", SecurityType::Option),
    ("DEBTINFO", SecurityType::Debt),
    ("OTHERINFO", SecurityType::Other),
];

fn info_tag(security_type: SecurityType) -> &'static str {
    SECURITIES
        .iter()
        .find(|(_, t)| *t == security_type)
        .map_or("OTHERINFO", |(tag, _)| *tag)
}

/// Reads a [`Security`] from a security aggregate whose `<SECINFO>` names it.
#[derive(Clone, Copy, Debug, Default)]
pub struct SecurityConverter;

impl PropertyConverter for SecurityConverter {
    type Output = Security;

    fn convert(&self, root: &Property) -> Option<Security> {
        search_table(root, &SECURITIES, |node, security_type| {
            let info = node.get("SECINFO")?;
            let (unique_id, unique_id_type) = security_id(info.get("SECID")?)?;
            Some(Security {
                security_type,
                unique_id,
                unique_id_type,
                name: text(info, "SECNAME"),
                ticker: text(info, "TICKER"),
                fi_id: text(info, "FIID"),
                rating: text(info, "RATING"),
                unit_price: decimal(info, "UNITPRICE"),
                as_of: date(info, "DTASOF"),
                currency: currency(info),
                memo: text(info, "MEMO"),
            })
        })
    }
}

impl PropertyWriter for SecurityConverter {
    fn to_property(&self, security: &Security) -> Property {
        let mut info = Property::new("SECINFO")
            .with_child(secid_property(&security.unique_id, &security.unique_id_type))
            .with_child(Property::leaf("SECNAME", security.name.as_str()));
        push_text(&mut info, "TICKER", &security.ticker);
        push_text(&mut info, "FIID", &security.fi_id);
        push_text(&mut info, "RATING", &security.rating);
        info.push(Property::leaf("UNITPRICE", security.unit_price.to_string()));
        push_date(&mut info, "DTASOF", security.as_of);
        push_currency(&mut info, security.currency);
        push_text(&mut info, "MEMO", &security.memo);

        Property::new(info_tag(security.security_type)).with_child(info)
    }
}

/// Reads the securities of the first `<SECLIST>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SecurityListConverter;

impl PropertyConverter for SecurityListConverter {
    type Output = SecurityList;

    fn convert(&self, root: &Property) -> Option<SecurityList> {
        let (_, securities) = convert_children(root, "SECLIST", &SecurityConverter)?;
        Some(SecurityList { securities })
    }
}

impl PropertyWriter for SecurityListConverter {
    fn to_property(&self, list: &SecurityList) -> Property {
        let mut element = Property::new("SECLIST");
        element.children.extend(
            list.iter()
                .map(|security| SecurityConverter.to_property(security)),
        );
        element
    }
}
