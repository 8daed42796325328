//! Nodes of the OFX element tree.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A named element of an OFX document.
///
/// A property with children is a container and its `value` is not written; a property without
/// children is a leaf carrying `value`. Names are matched ASCII case-insensitively.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Property {
    pub name: String,
    pub value: String,
    pub children: Vec<Property>,
}

impl Property {
    /// Creates an empty property.
    pub fn new(name: impl Into<String>) -> Self {
        Property {
            name: name.into(),
            value: String::new(),
            children: Vec::new(),
        }
    }

    /// Creates a leaf property holding `value`.
    pub fn leaf(name: impl Into<String>, value: impl Into<String>) -> Self {
        Property {
            name: name.into(),
            value: value.into(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: Property) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: Property) {
        self.children.push(child);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Returns the first child named `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.children.iter().find(|c| c.is_named(name))
    }

    /// Returns the first child named `name`, or an empty property stamped with that name.
    ///
    /// Accessors on the empty property yield their defaults, so lookups chain without checks:
    /// `stmt.child("LEDGERBAL").child("BALAMT").as_decimal(Decimal::ZERO)`.
    pub fn child(&self, name: &str) -> Cow<'_, Property> {
        match self.get(name) {
            Some(child) => Cow::Borrowed(child),
            None => Cow::Owned(Property::new(name)),
        }
    }

    /// Iterates the children named `name`, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Property> {
        self.children.iter().filter(move |c| c.is_named(name))
    }

    /// Iterates this property and all of its descendants, depth-first in pre-order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Returns the first property named `name` in a pre-order search starting at `self`.
    pub fn find(&self, name: &str) -> Option<&Property> {
        self.descendants().find(|p| p.is_named(name))
    }
}

/// Pre-order iterator over a property tree, created by [`Property::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Property>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Property;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

#[allow(non_snake_case)]
#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn tree() -> Property {
        Property::new("A")
            .with_child(
                Property::new("B")
                    .with_child(Property::leaf("C", "1"))
                    .with_child(Property::leaf("D", "2")),
            )
            .with_child(Property::leaf("C", "3"))
    }

    #[test]
    fn property__child__found() {
        let tree = tree();

        assert!(matches!(tree.child("C"), Cow::Borrowed(_)));
        assert_eq!(tree.child("C").value, "3");
        assert_eq!(tree.child("c").value, "3");
    }

    #[test]
    fn property__child__missing_returns_sentinel() {
        let tree = tree();
        let missing = tree.child("NOPE");

        assert_eq!(*missing, Property::new("NOPE"));
        assert_eq!(missing.child("DEEPER").name, "DEEPER");
    }

    #[test]
    fn property__descendants__pre_order() {
        let names: Vec<_> = tree().descendants().map(|p| p.name.clone()).collect();

        assert_eq!(names, vec!["A", "B", "C", "D", "C"]);
    }

    #[test]
    fn property__find__first_in_pre_order() {
        let tree = tree();

        assert_eq!(tree.find("C").map(|p| p.value.as_str()), Some("1"));
        assert_eq!(tree.find("A").map(|p| p.name.as_str()), Some("A"));
        assert_eq!(tree.find("E"), None);
    }

    #[test]
    fn property__children_named() {
        let tree = Property::new("LIST")
            .with_child(Property::leaf("ITEM", "1"))
            .with_child(Property::leaf("OTHER", "x"))
            .with_child(Property::leaf("ITEM", "2"));
        let values: Vec<_> = tree.children_named("ITEM").map(|p| p.value.as_str()).collect();

        assert_eq!(values, vec!["1", "2"]);
    }
}
