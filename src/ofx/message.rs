//! Messages and the message sets grouping them.

use super::{Property, Status};

ofx_enum! {
    /// The functional category of a message set, declared in canonical document order.
    pub enum MessageSetType {
        Signon = "SIGNON",
        Signup = "SIGNUP",
        Bank = "BANK",
        CreditCard = "CREDITCARD",
        Investment = "INVSTMT",
        InterXfer = "INTERXFER",
        WireXfer = "WIREXFER",
        BillPay = "BILLPAY",
        Email = "EMAIL",
        SecList = "SECLIST",
        PresDir = "PRESDIR",
        PresDlv = "PRESDLV",
        Profile = "PROF",
        Loan = "LOAN",
        Tax1099 = "TAX1099",
        #[default]
        Unknown = "UNKNOWN",
    }
}

ofx_enum! {
    pub enum Direction {
        Request = "RQ",
        Response = "RS",
        #[default]
        Unknown = "UNKNOWN",
    }
}

/// A request or response inside a message set, such as `<SONRS>` or `<STMTTRNRS>`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Message {
    /// The client-assigned `<TRNUID>`, empty when absent.
    pub id: String,
    pub name: String,
    pub status: Option<Status>,
    pub properties: Vec<Property>,
}

impl Message {
    pub fn new(name: impl Into<String>) -> Self {
        Message {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Builds a message from its element. `<TRNUID>` and `<STATUS>` populate their fields; all
    /// other children become properties in document order.
    pub fn from_property(element: Property) -> Self {
        let mut message = Message::new(element.name);
        for child in element.children {
            if child.is_named("STATUS") {
                message.status = Some(Status::from_property(&child));
            } else if child.is_named("TRNUID") && child.is_leaf() {
                message.id = child.value;
            } else {
                message.properties.push(child);
            }
        }
        message
    }

    /// Returns the first property named `name` anywhere in the message.
    pub fn find(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find_map(|p| p.find(name))
    }

    /// The message as a single element, with `<TRNUID>` and `<STATUS>` leading.
    pub fn to_property(&self) -> Property {
        let mut element = Property::new(self.name.as_str());
        if !self.id.is_empty() {
            element.push(Property::leaf("TRNUID", self.id.as_str()));
        }
        if let Some(status) = &self.status {
            element.push(status.to_property());
        }
        element.children.extend(self.properties.iter().cloned());
        element
    }
}

/// A versioned group of messages of one category, such as `<BANKMSGSRSV1>`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MessageSet {
    /// The element name as read; used when the set type is not recognized.
    pub name: String,
    pub set_type: MessageSetType,
    pub direction: Direction,
    pub version: u32,
    pub messages: Vec<Message>,
}

impl MessageSet {
    pub fn new(set_type: MessageSetType, direction: Direction, version: u32) -> Self {
        let mut set = MessageSet {
            name: String::new(),
            set_type,
            direction,
            version,
            messages: Vec::new(),
        };
        set.name = set.tag_name();
        set
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// The element name: `<TYPE>MSGS<RQ|RS>V<version>` for recognized sets, otherwise the name
    /// the set was read with.
    ///
    /// A set built with [`Direction::Unknown`] and no name is written `<TYPE>MSGSV<version>`,
    /// which reads back with the same type, direction and version.
    pub fn tag_name(&self) -> String {
        match (self.set_type, self.direction) {
            (MessageSetType::Unknown, _) | (_, Direction::Unknown) if !self.name.is_empty() => {
                self.name.clone()
            }
            (set_type, Direction::Unknown) => format!("{set_type}MSGSV{}", self.version),
            (set_type, direction) => format!("{set_type}MSGS{direction}V{}", self.version),
        }
    }

    /// Returns the first message named `name`.
    pub fn message(&self, name: &str) -> Option<&Message> {
        self.messages
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    pub fn to_property(&self) -> Property {
        let mut element = Property::new(self.tag_name());
        element
            .children
            .extend(self.messages.iter().map(Message::to_property));
        element
    }
}
