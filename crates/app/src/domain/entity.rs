//! Domain Entities

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Entity named by a failed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Book,
    Cart,
    CartItem,
    Order,
}

impl Entity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Cart => "cart",
            Self::CartItem => "cart item",
            Self::Order => "order",
        }
    }
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
