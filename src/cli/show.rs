// ABOUTME: CLI show command - a vendor's contacts, deals and notes

use super::util::print_json;
use super::{OutputFormat, ShowArgs};
use crate::api::{Contact, Deal, Note, RecordId, VendorApi};
use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct VendorRecords {
    pub vendor_id: RecordId,
    pub contacts: Vec<Contact>,
    pub deals: Vec<Deal>,
    pub notes: Vec<Note>,
}

/// Execute the show command
pub async fn execute(api: &dyn VendorApi, args: ShowArgs, format: OutputFormat) -> Result<()> {
    let vendor_id: RecordId = args
        .vendor_id
        .parse()
        .context("Invalid vendor id")?;
    let records = load_records(api, vendor_id).await?;

    match format {
        OutputFormat::Json => print_json(&records)?,
        OutputFormat::Text => print!("{}", render_text(&records)),
    }

    Ok(())
}

/// Fetch the three collections for a vendor concurrently
pub async fn load_records(api: &dyn VendorApi, vendor_id: RecordId) -> Result<VendorRecords> {
    let (contacts, deals, notes) = tokio::join!(
        api.list_contacts(&vendor_id),
        api.list_deals(&vendor_id),
        api.list_notes(&vendor_id),
    );

    Ok(VendorRecords {
        contacts: contacts.context("Failed to load contacts")?,
        deals: deals.context("Failed to load deals")?,
        notes: notes.context("Failed to load notes")?,
        vendor_id,
    })
}

pub fn render_text(records: &VendorRecords) -> String {
    let mut out = format!("Vendor {}\n", records.vendor_id);

    out.push_str("\nContacts\n");
    if records.contacts.is_empty() {
        out.push_str("  No contacts yet\n");
    }
    for contact in &records.contacts {
        out.push_str(&format!("  {} • {}\n", contact.fields.name, contact.fields.email));
    }

    out.push_str("\nDeals\n");
    if records.deals.is_empty() {
        out.push_str("  No deals yet\n");
    }
    for deal in &records.deals {
        out.push_str(&format!("  {} • ${} • {}\n", deal.title, deal.value, deal.stage));
    }

    out.push_str("\nNotes\n");
    if records.notes.is_empty() {
        out.push_str("  No notes yet\n");
    }
    for note in &records.notes {
        out.push_str(&format!("  {}\n", note.content));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockVendorApi};

    #[tokio::test]
    async fn test_empty_sections() {
        let mut api = MockVendorApi::new();
        api.expect_list_contacts().returning(|_| Ok(Vec::new()));
        api.expect_list_deals().returning(|_| Ok(Vec::new()));
        api.expect_list_notes().returning(|_| {
            Ok(vec![Note {
                id: RecordId::Int(1),
                vendor_id: RecordId::Int(7),
                content: "call back".to_string(),
                author: None,
            }])
        });

        let records = load_records(&api, RecordId::Int(7)).await.unwrap();
        let text = render_text(&records);

        assert!(text.starts_with("Vendor 7\n"));
        assert!(text.contains("No contacts yet"));
        assert!(text.contains("No deals yet"));
        assert!(text.contains("  call back\n"));
    }

    #[tokio::test]
    async fn test_failure_names_collection() {
        let mut api = MockVendorApi::new();
        api.expect_list_contacts().returning(|_| Ok(Vec::new()));
        api.expect_list_deals().returning(|_| {
            Err(ApiError::Rejected {
                status: 500,
                detail: None,
            })
        });
        api.expect_list_notes().returning(|_| Ok(Vec::new()));

        let err = load_records(&api, RecordId::Int(7)).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to load deals");
    }
}
