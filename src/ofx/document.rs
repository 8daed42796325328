use super::{Headers, MessageSet, MessageSetType, Property};

/// An OFX document: its header block and the message sets of its `<OFX>` element.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Document {
    pub headers: Headers,
    pub message_sets: Vec<MessageSet>,
}

impl Document {
    pub fn new(headers: Headers) -> Self {
        Document {
            headers,
            message_sets: Vec::new(),
        }
    }

    pub fn with_message_set(mut self, set: MessageSet) -> Self {
        self.message_sets.push(set);
        self
    }

    /// Returns the first message set of the given type.
    pub fn message_set(&self, set_type: MessageSetType) -> Option<&MessageSet> {
        self.message_sets.iter().find(|s| s.set_type == set_type)
    }

    /// The whole `<OFX>` element, with message sets in document order.
    pub fn to_property(&self) -> Property {
        let mut root = Property::new("OFX");
        root.children
            .extend(self.message_sets.iter().map(MessageSet::to_property));
        root
    }
}
