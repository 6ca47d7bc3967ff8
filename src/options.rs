//! Menu option records collected beside the markup

use crate::attributes::Attributes;

/// One menu entry recorded by [`Builder::option`](crate::Builder::option).
///
/// `key` identifies the entry (typically the digit a caller presses) and
/// `attributes` carries whatever the application wants to know about it when
/// the caller's choice comes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub key: String,
    pub attributes: Attributes,
}

impl MenuOption {
    pub fn new(key: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            key: key.into(),
            attributes,
        }
    }
}
