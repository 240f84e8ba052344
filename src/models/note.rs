//! Note records.
//!
//! Notes are admin-only annotations attached to a user.

use serde::{Deserialize, Serialize};

use super::{Attributes, Resource, User};

/// A note attached to a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Note {
    attrs: Attributes,
}

impl Resource for Note {
    fn attributes(&self) -> &Attributes {
        &self.attrs
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attrs
    }

    fn from_attributes(attrs: Attributes) -> Self {
        Self { attrs }
    }
}

impl Note {
    /// The rendered note body.
    pub fn html(&self) -> Option<&str> {
        self.attrs.get_str("html")
    }

    /// The user the note is attached to.
    pub fn user(&self) -> Option<User> {
        self.attrs
            .get("user")
            .filter(|v| v.is_object())
            .cloned()
            .map(User::from_value)
    }

    /// Returns the note body or a placeholder.
    pub fn display_content(&self) -> &str {
        self.html().unwrap_or("(No content)")
    }
}
