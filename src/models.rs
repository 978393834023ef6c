//! Domain models and data structures
//!
//! This module contains the core data types of the order flow and the HTTP
//! payloads built on top of them. These are "pure" data structures; the
//! transition rules live in `services::order_wizard`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog::Offering;

/// Wizard step, in visiting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    #[default]
    Product,
    Payment,
    Contact,
    Complete,
}

impl Step {
    /// The step reached by a plain "continue", if any
    pub fn next(self) -> Option<Step> {
        match self {
            Step::Product => Some(Step::Payment),
            Step::Payment => Some(Step::Contact),
            Step::Contact => Some(Step::Complete),
            Step::Complete => None,
        }
    }

    /// The step reached by "back", if going back is allowed from here
    pub fn previous(self) -> Option<Step> {
        match self {
            Step::Payment => Some(Step::Product),
            Step::Contact => Some(Step::Payment),
            Step::Product | Step::Complete => None,
        }
    }
}

/// Cryptocurrency the customer intends to pay with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Bitcoin,
    Ethereum,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 2] = [PaymentMethod::Bitcoin, PaymentMethod::Ethereum];

    pub fn tag(self) -> &'static str {
        match self {
            PaymentMethod::Bitcoin => "bitcoin",
            PaymentMethod::Ethereum => "ethereum",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Bitcoin => "Bitcoin",
            PaymentMethod::Ethereum => "Ethereum",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Contact form field that can be marked as required
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    Name,
    Email,
    WalletAddress,
}

impl ContactField {
    pub fn as_str(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::WalletAddress => "walletAddress",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(ContactField::Name),
            "email" => Ok(ContactField::Email),
            "wallet" | "walletaddress" | "wallet_address" => Ok(ContactField::WalletAddress),
            other => Err(format!("unknown contact field `{other}`")),
        }
    }
}

/// Form state owned by a single open wizard
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFormState {
    pub step: Step,
    pub name: String,
    pub email: String,
    pub message: String,
    pub wallet_address: String,
    pub payment_method: PaymentMethod,
    pub submitting: bool,
}

impl OrderFormState {
    /// Current value of a contact field
    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::WalletAddress => &self.wallet_address,
        }
    }
}

/// Payload handed to the notification gateway at the contact -> complete edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    pub product_name: String,
    pub name: String,
    pub email: String,
    pub crypto_type: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
}

/// Opaque identifier returned on successful delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeliveryId(pub i64);

impl fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Request to open a wizard for an offering
#[derive(Debug, Deserialize)]
pub struct OpenWizard {
    #[serde(rename = "offeringId")]
    pub offering_id: u32,
}

/// Partial form update; absent fields are left untouched
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub wallet_address: Option<String>,
    #[serde(alias = "cryptoType")]
    pub payment_method: Option<PaymentMethod>,
}

/// Public snapshot of the open wizard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardView {
    pub offering: Offering,
    pub form: OrderFormState,
    pub receiving_address: String,
    pub can_go_back: bool,
    pub required_fields: Vec<ContactField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_id: Option<DeliveryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response returned from the continue endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueResponse {
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wizard: Option<WizardView>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn steps_only_move_one_at_a_time() {
        assert_eq!(Step::Product.next(), Some(Step::Payment));
        assert_eq!(Step::Contact.next(), Some(Step::Complete));
        assert_eq!(Step::Complete.next(), None);
        assert_eq!(Step::Product.previous(), None);
        assert_eq!(Step::Complete.previous(), None);
        assert_eq!(Step::Contact.previous(), Some(Step::Payment));
    }

    #[test]
    fn submission_uses_camel_case_keys() {
        let submission = OrderSubmission {
            product_name: "Link Encrypter".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            crypto_type: PaymentMethod::Bitcoin,
            message: None,
            wallet_address: None,
        };
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "productName": "Link Encrypter",
                "name": "Ada",
                "email": "ada@example.com",
                "cryptoType": "bitcoin",
            })
        );
    }

    #[test]
    fn contact_fields_parse_from_config_names() {
        assert_eq!("Name".parse::<ContactField>(), Ok(ContactField::Name));
        assert_eq!(
            "wallet_address".parse::<ContactField>(),
            Ok(ContactField::WalletAddress)
        );
        assert!("phone".parse::<ContactField>().is_err());
    }

    #[test]
    fn update_form_accepts_crypto_type_alias() {
        let update: UpdateForm =
            serde_json::from_str(r#"{"name":"Ada","cryptoType":"ethereum"}"#).unwrap();
        assert_eq!(update.name.as_deref(), Some("Ada"));
        assert_eq!(update.payment_method, Some(PaymentMethod::Ethereum));
        assert_eq!(update.email, None);
    }
}
