// ABOUTME: Wire types for the vendor REST API: drafts, persisted records and create payloads

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned record identifier.
///
/// Backends hand out either integer or string ids; the id is sent back in the
/// same JSON type it arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl FromStr for RecordId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(trimmed
            .parse::<i64>()
            .map_or_else(|_| Self::Text(trimmed.to_string()), Self::Int))
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

/// Vendor fields as entered in the creation form or wizard step 1
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorDraft {
    #[serde(default)]
    pub business_name: String,
    /// Primary contact name
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub website: String,
}

impl VendorDraft {
    /// Names of required fields that are still blank
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.business_name.trim().is_empty() {
            missing.push("business name");
        }
        if self.name.trim().is_empty() {
            missing.push("contact name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        missing
    }

    /// The canned vendor used by the quick-onboard action
    pub fn sample() -> Self {
        Self {
            business_name: "Alex Supplies Co.".to_string(),
            name: "Alex Vendor".to_string(),
            email: "alex@example.com".to_string(),
            phone: String::new(),
            category: "Supplies".to_string(),
            website: "https://example.com".to_string(),
        }
    }
}

/// A persisted vendor as returned by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: VendorDraft,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, alias = "role")]
    pub title: String,
}

impl ContactDraft {
    pub fn is_blank(&self) -> bool {
        [&self.name, &self.email, &self.phone, &self.title]
            .iter()
            .all(|field| field.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: RecordId,
    pub vendor_id: RecordId,
    #[serde(flatten)]
    pub fields: ContactDraft,
}

/// Body of `POST /contacts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewContact {
    pub vendor_id: RecordId,
    #[serde(flatten)]
    pub fields: ContactDraft,
}

/// Pipeline stage of a deal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealStage {
    #[default]
    Prospect,
    Qualified,
    Proposal,
    Negotiation,
    Won,
    Lost,
}

impl DealStage {
    pub const fn all() -> &'static [Self] {
        &[
            Self::Prospect,
            Self::Qualified,
            Self::Proposal,
            Self::Negotiation,
            Self::Won,
            Self::Lost,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Prospect => "Prospect",
            Self::Qualified => "Qualified",
            Self::Proposal => "Proposal",
            Self::Negotiation => "Negotiation",
            Self::Won => "Won",
            Self::Lost => "Lost",
        }
    }

    fn position(self) -> usize {
        Self::all().iter().position(|s| *s == self).unwrap_or(0)
    }

    /// Next stage, wrapping around
    pub fn next(self) -> Self {
        let all = Self::all();
        all[(self.position() + 1) % all.len()]
    }

    /// Previous stage, wrapping around
    pub fn previous(self) -> Self {
        let all = Self::all();
        all[(self.position() + all.len() - 1) % all.len()]
    }
}

impl fmt::Display for DealStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DealStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|stage| stage.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let labels: Vec<&str> = Self::all().iter().map(|s| s.label()).collect();
                format!("unknown deal stage '{wanted}' (expected one of: {})", labels.join(", "))
            })
    }
}

/// Deal fields as typed into the wizard. `value` stays text until submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealDraft {
    pub title: String,
    pub value: String,
    pub currency: String,
    pub stage: DealStage,
}

impl Default for DealDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            value: String::new(),
            currency: "USD".to_string(),
            stage: DealStage::Prospect,
        }
    }
}

impl DealDraft {
    /// Only an empty title skips the deal; whitespace is sent as typed
    pub fn is_blank(&self) -> bool {
        self.title.is_empty()
    }

    /// Coerce the typed value to a number. Blank means zero.
    pub fn numeric_value(&self) -> Option<f64> {
        let trimmed = self.value.trim();
        if trimmed.is_empty() {
            return Some(0.0);
        }
        trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: RecordId,
    pub vendor_id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub value: f64,
    #[serde(default)]
    pub currency: Option<String>,
    /// Kept as text: older records carry stages outside [`DealStage`]
    #[serde(default)]
    pub stage: String,
}

/// Decimal backends send amounts as strings like `"500.00"`
fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
        Missing(()),
    }

    Ok(match Amount::deserialize(deserializer)? {
        Amount::Number(value) => value,
        Amount::Text(text) => text.trim().parse().unwrap_or(0.0),
        Amount::Missing(()) => 0.0,
    })
}

/// Body of `POST /deals`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDeal {
    pub vendor_id: RecordId,
    pub title: String,
    pub value: f64,
    pub currency: String,
    pub stage: DealStage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    #[serde(default)]
    pub content: String,
}

impl NoteDraft {
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: RecordId,
    pub vendor_id: RecordId,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
}

/// Body of `POST /notes`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNote {
    pub vendor_id: RecordId,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// Record kinds that can be attached to a vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Contact,
    Deal,
    Note,
}

impl RecordKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Deal => "deal",
            Self::Note => "note",
        }
    }
}
