use super::{date, search, text, PropertyConverter};
use crate::models::{Institution, Language};
use crate::ofx::Property;

/// Reads an [`Institution`] from a signon response, or from a bare `<FI>` aggregate.
#[derive(Clone, Copy, Debug, Default)]
pub struct InstitutionConverter;

impl PropertyConverter for InstitutionConverter {
    type Output = Institution;

    fn convert(&self, root: &Property) -> Option<Institution> {
        search(root, &["SONRS", "FI"], |node| {
            let fi = if node.is_named("FI") {
                node
            } else {
                node.get("FI")?
            };
            let institution = Institution {
                name: text(fi, "ORG"),
                id: text(fi, "FID"),
                intu_bid: text(node, "INTU.BID"),
                language: node
                    .get("LANGUAGE")
                    .map_or(Language::default(), Property::as_language),
                server_date: date(node, "DTSERVER"),
            };
            if institution.name.is_empty() && institution.id.is_empty() {
                return None;
            }
            Some(institution)
        })
    }
}

#[allow(non_snake_case)]
#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use time::macros::datetime;

    use super::*;

    fn fi(org: &str, fid: &str) -> Property {
        Property::new("FI")
            .with_child(Property::leaf("ORG", org))
            .with_child(Property::leaf("FID", fid))
    }

    #[test]
    fn institution_converter__signon_response() {
        let root = Property::new("SONRS")
            .with_child(Property::leaf("DTSERVER", "20240131120000"))
            .with_child(Property::leaf("LANGUAGE", "ENG"))
            .with_child(fi("Example Bank", "1234"))
            .with_child(Property::leaf("INTU.BID", "5678"));

        let expected = Institution {
            name: String::from("Example Bank"),
            id: String::from("1234"),
            intu_bid: String::from("5678"),
            language: Language::Eng,
            server_date: Some(datetime!(2024-01-31 12:00:00 UTC)),
        };
        assert_eq!(InstitutionConverter.convert(&root), Some(expected));
    }

    #[test]
    fn institution_converter__bare_fi() {
        let institution = InstitutionConverter.convert(&fi("", "99")).unwrap();

        assert_eq!(institution.id, "99");
        assert_eq!(institution.language, Language::Unknown);
    }

    #[test]
    fn institution_converter__signon_without_fi() {
        let root = Property::new("SONRS").with_child(Property::leaf("LANGUAGE", "ENG"));

        assert_eq!(InstitutionConverter.convert(&root), None);
    }
}
