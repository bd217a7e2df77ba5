//! Display pricing for minor-unit amounts.

use rusty_money::{
    Money,
    iso::{self, Currency},
};

/// Formats integer minor-unit amounts in the store currency.
#[derive(Debug, Clone, Copy)]
pub struct Pricing {
    currency: &'static Currency,
}

impl Pricing {
    #[must_use]
    pub const fn new(currency: &'static Currency) -> Self {
        Self { currency }
    }

    /// Resolve an ISO 4217 alphabetic code, e.g. `"USD"`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        iso::find(code).map(Self::new)
    }

    #[must_use]
    pub fn currency_code(&self) -> &'static str {
        self.currency.iso_alpha_code
    }

    /// Format an amount such as `450` as `$4.50`.
    #[must_use]
    pub fn display(&self, amount: u64) -> String {
        let minor = i64::try_from(amount).unwrap_or(i64::MAX);

        Money::from_minor(minor, self.currency).to_string()
    }
}

impl Default for Pricing {
    fn default() -> Self {
        Self::new(iso::USD)
    }
}
