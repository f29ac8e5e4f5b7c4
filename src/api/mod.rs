// ABOUTME: Vendor REST API integration: the VendorApi seam, its reqwest client, and wire types
// The wizard and views only talk to the backend through the VendorApi trait

pub mod client;
pub mod error;
pub mod types;

use async_trait::async_trait;

pub use client::VendorApiClient;
pub use error::ApiError;
pub use types::{
    Contact, ContactDraft, Deal, DealDraft, DealStage, NewContact, NewDeal, NewNote, Note,
    NoteDraft, RecordId, RecordKind, Vendor, VendorDraft,
};

/// Operations the client needs from the vendor backend.
///
/// Create calls return the persisted record with its server-assigned id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VendorApi: Send + Sync {
    async fn create_vendor(&self, draft: &VendorDraft) -> Result<Vendor, ApiError>;

    async fn create_contact(&self, contact: &NewContact) -> Result<Contact, ApiError>;

    async fn create_deal(&self, deal: &NewDeal) -> Result<Deal, ApiError>;

    async fn create_note(&self, note: &NewNote) -> Result<Note, ApiError>;

    /// List vendors, filtered by business name when `query` is non-empty
    async fn list_vendors(&self, query: &str) -> Result<Vec<Vendor>, ApiError>;

    async fn list_contacts(&self, vendor_id: &RecordId) -> Result<Vec<Contact>, ApiError>;

    async fn list_deals(&self, vendor_id: &RecordId) -> Result<Vec<Deal>, ApiError>;

    async fn list_notes(&self, vendor_id: &RecordId) -> Result<Vec<Note>, ApiError>;
}
