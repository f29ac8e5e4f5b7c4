// ABOUTME: In-memory VendorApi for integration tests
// Records every call and assigns sequential ids; individual operations can be made to fail

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use vendorbox::api::{
    ApiError, Contact, Deal, NewContact, NewDeal, NewNote, Note, RecordId, Vendor, VendorApi,
    VendorDraft,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateVendor(VendorDraft),
    CreateContact(NewContact),
    CreateDeal(NewDeal),
    CreateNote(NewNote),
    ListVendors(String),
    ListContacts(RecordId),
    ListDeals(RecordId),
    ListNotes(RecordId),
}

#[derive(Default)]
struct Store {
    next_id: i64,
    vendors: Vec<Vendor>,
    contacts: Vec<Contact>,
    deals: Vec<Deal>,
    notes: Vec<Note>,
    calls: Vec<Call>,
}

#[derive(Default)]
pub struct FakeVendorApi {
    store: Mutex<Store>,
    /// Operation name ("create_contact", ...) and the detail to reject it with
    failures: Mutex<Vec<(&'static str, Option<String>)>>,
    delay: Option<Duration>,
}

impl FakeVendorApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call sleeps first, so tests can act while a request is in flight
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn fail(&self, operation: &'static str, detail: Option<&str>) {
        self.failures
            .lock()
            .unwrap()
            .push((operation, detail.map(str::to_string)));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.store.lock().unwrap().calls.clone()
    }

    /// Only the create calls, in order
    pub fn creates(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| {
                matches!(
                    c,
                    Call::CreateVendor(_) | Call::CreateContact(_) | Call::CreateDeal(_) | Call::CreateNote(_)
                )
            })
            .collect()
    }

    pub fn seed_vendor(&self, business_name: &str) -> Vendor {
        let mut store = self.store.lock().unwrap();
        store.next_id += 1;
        let vendor = Vendor {
            id: RecordId::Int(store.next_id),
            fields: VendorDraft {
                business_name: business_name.to_string(),
                ..Default::default()
            },
        };
        store.vendors.push(vendor.clone());
        vendor
    }

    async fn begin(&self, operation: &'static str, call: Call) -> Result<i64, ApiError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let mut store = self.store.lock().unwrap();
        store.calls.push(call);

        let mut failures = self.failures.lock().unwrap();
        if let Some(index) = failures.iter().position(|(op, _)| *op == operation) {
            let (_, detail) = failures.remove(index);
            return Err(ApiError::Rejected { status: 400, detail });
        }

        store.next_id += 1;
        Ok(store.next_id)
    }
}

#[async_trait]
impl VendorApi for FakeVendorApi {
    async fn create_vendor(&self, draft: &VendorDraft) -> Result<Vendor, ApiError> {
        let id = self.begin("create_vendor", Call::CreateVendor(draft.clone())).await?;
        let vendor = Vendor {
            id: RecordId::Int(id),
            fields: draft.clone(),
        };
        self.store.lock().unwrap().vendors.push(vendor.clone());
        Ok(vendor)
    }

    async fn create_contact(&self, contact: &NewContact) -> Result<Contact, ApiError> {
        let id = self.begin("create_contact", Call::CreateContact(contact.clone())).await?;
        let created = Contact {
            id: RecordId::Int(id),
            vendor_id: contact.vendor_id.clone(),
            fields: contact.fields.clone(),
        };
        self.store.lock().unwrap().contacts.push(created.clone());
        Ok(created)
    }

    async fn create_deal(&self, deal: &NewDeal) -> Result<Deal, ApiError> {
        let id = self.begin("create_deal", Call::CreateDeal(deal.clone())).await?;
        let created = Deal {
            id: RecordId::Int(id),
            vendor_id: deal.vendor_id.clone(),
            title: deal.title.clone(),
            value: deal.value,
            currency: Some(deal.currency.clone()),
            stage: deal.stage.label().to_string(),
        };
        self.store.lock().unwrap().deals.push(created.clone());
        Ok(created)
    }

    async fn create_note(&self, note: &NewNote) -> Result<Note, ApiError> {
        let id = self.begin("create_note", Call::CreateNote(note.clone())).await?;
        let created = Note {
            id: RecordId::Int(id),
            vendor_id: note.vendor_id.clone(),
            content: note.content.clone(),
            author: note.author.clone(),
        };
        self.store.lock().unwrap().notes.push(created.clone());
        Ok(created)
    }

    async fn list_vendors(&self, query: &str) -> Result<Vec<Vendor>, ApiError> {
        self.begin("list_vendors", Call::ListVendors(query.to_string())).await?;
        let needle = query.to_lowercase();
        Ok(self
            .store
            .lock()
            .unwrap()
            .vendors
            .iter()
            .filter(|v| v.fields.business_name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn list_contacts(&self, vendor_id: &RecordId) -> Result<Vec<Contact>, ApiError> {
        self.begin("list_contacts", Call::ListContacts(vendor_id.clone())).await?;
        Ok(self
            .store
            .lock()
            .unwrap()
            .contacts
            .iter()
            .filter(|c| &c.vendor_id == vendor_id)
            .cloned()
            .collect())
    }

    async fn list_deals(&self, vendor_id: &RecordId) -> Result<Vec<Deal>, ApiError> {
        self.begin("list_deals", Call::ListDeals(vendor_id.clone())).await?;
        Ok(self
            .store
            .lock()
            .unwrap()
            .deals
            .iter()
            .filter(|d| &d.vendor_id == vendor_id)
            .cloned()
            .collect())
    }

    async fn list_notes(&self, vendor_id: &RecordId) -> Result<Vec<Note>, ApiError> {
        self.begin("list_notes", Call::ListNotes(vendor_id.clone())).await?;
        Ok(self
            .store
            .lock()
            .unwrap()
            .notes
            .iter()
            .filter(|n| &n.vendor_id == vendor_id)
            .cloned()
            .collect())
    }
}
