//! Storefront data model: catalog items, the order draft and form errors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use weblarek_core::StateError;

/// Price in the store's currency units
pub type Price = u64;

/// A product as delivered by the catalog endpoint
///
/// `price: None` marks a "priceless" item: it is shown and can sit in the
/// basket, but it is never purchased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub image: String,
    pub price: Option<Price>,
}

impl CatalogItem {
    /// Whether this item can be part of a submitted order
    pub fn is_purchasable(&self) -> bool {
        self.price.is_some()
    }
}

/// Fields of the two-step order form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderField {
    Payment,
    Address,
    Email,
    Phone,
}

impl OrderField {
    /// Fields validated by the payment step
    pub const PAYMENT_STEP: [OrderField; 2] = [OrderField::Address, OrderField::Payment];
    /// Fields validated by the contacts step
    pub const CONTACTS_STEP: [OrderField; 2] = [OrderField::Email, OrderField::Phone];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Address => "address",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    /// Message shown while the field is empty
    pub fn required_message(&self) -> &'static str {
        match self {
            Self::Payment => "Payment method is required",
            Self::Address => "Delivery address is required",
            Self::Email => "Email is required",
            Self::Phone => "Phone number is required",
        }
    }
}

impl std::fmt::Display for OrderField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderField {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "payment" => Ok(Self::Payment),
            "address" => Ok(Self::Address),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            other => Err(StateError::UnknownField {
                field: other.to_string(),
            }),
        }
    }
}

/// Fields of the contacts step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Email,
    Phone,
}

impl From<ContactField> for OrderField {
    fn from(field: ContactField) -> Self {
        match field {
            ContactField::Email => OrderField::Email,
            ContactField::Phone => OrderField::Phone,
        }
    }
}

impl FromStr for ContactField {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            other => Err(StateError::UnknownField {
                field: other.to_string(),
            }),
        }
    }
}

/// Validation messages keyed by field; an absent key means the field is valid
pub type FormErrors = BTreeMap<OrderField, String>;

/// The order being filled in, and the payload sent on submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub payment: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    /// Ids of the purchasable basket items, set by finalization
    pub items: Vec<String>,
    /// Sum of purchasable prices, set by finalization
    pub total: Price,
}

impl OrderDraft {
    /// Current value of a form field
    pub fn field(&self, field: OrderField) -> &str {
        match field {
            OrderField::Payment => &self.payment,
            OrderField::Address => &self.address,
            OrderField::Email => &self.email,
            OrderField::Phone => &self.phone,
        }
    }

    pub(crate) fn set_field(&mut self, field: OrderField, value: String) {
        match field {
            OrderField::Payment => self.payment = value,
            OrderField::Address => self.address = value,
            OrderField::Email => self.email = value,
            OrderField::Phone => self.phone = value,
        }
    }

    /// True while no form field has a value
    ///
    /// `items` and `total` follow the basket and are not considered.
    pub fn is_empty(&self) -> bool {
        OrderField::PAYMENT_STEP
            .iter()
            .chain(OrderField::CONTACTS_STEP.iter())
            .all(|field| self.field(*field).is_empty())
    }

    /// Whether every form field has a value
    pub fn is_complete(&self) -> bool {
        OrderField::PAYMENT_STEP
            .iter()
            .chain(OrderField::CONTACTS_STEP.iter())
            .all(|field| !self.field(*field).is_empty())
    }
}

/// Response of a successful order submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResult {
    #[serde(default)]
    pub id: String,
    pub total: Price,
}
