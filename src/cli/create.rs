// ABOUTME: CLI create and sample commands - create a vendor from flags or the built-in sample

use super::util::print_json;
use super::{CreateArgs, OutputFormat};
use crate::api::{Vendor, VendorApi, VendorDraft};
use anyhow::{bail, Result};
use tracing::info;

/// Execute the create command
pub async fn execute(api: &dyn VendorApi, args: CreateArgs, format: OutputFormat) -> Result<()> {
    let vendor = create_vendor(api, &args.to_draft()).await?;
    report(&vendor, format)
}

/// Execute the sample command
pub async fn execute_sample(api: &dyn VendorApi, format: OutputFormat) -> Result<()> {
    let vendor = create_vendor(api, &VendorDraft::sample()).await?;
    report(&vendor, format)
}

/// Check required fields locally, then create
pub async fn create_vendor(api: &dyn VendorApi, draft: &VendorDraft) -> Result<Vendor> {
    let missing = draft.missing_required();
    if !missing.is_empty() {
        bail!("Please fill in: {}", missing.join(", "));
    }

    match api.create_vendor(draft).await {
        Ok(vendor) => {
            info!("Created vendor {} from CLI", vendor.id);
            Ok(vendor)
        }
        Err(e) => bail!(e.display_message("Failed to create vendor")),
    }
}

fn report(vendor: &Vendor, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(vendor)?,
        OutputFormat::Text => println!("Created vendor {} ({})", vendor.fields.business_name, vendor.id),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockVendorApi, RecordId};

    #[tokio::test]
    async fn test_blank_required_fields_make_no_call() {
        let mut api = MockVendorApi::new();
        api.expect_create_vendor().times(0);

        let draft = VendorDraft {
            business_name: "Acme".to_string(),
            name: "  ".to_string(),
            ..Default::default()
        };
        let err = create_vendor(&api, &draft).await.unwrap_err();
        assert_eq!(err.to_string(), "Please fill in: contact name, email");
    }

    #[tokio::test]
    async fn test_sample_reports_server_detail() {
        let mut api = MockVendorApi::new();
        api.expect_create_vendor()
            .withf(|draft| draft.business_name == "Alex Supplies Co.")
            .returning(|_| {
                Err(ApiError::Rejected {
                    status: 409,
                    detail: Some("duplicate vendor".to_string()),
                })
            });

        let err = execute_sample(&api, OutputFormat::Text).await.unwrap_err();
        assert_eq!(err.to_string(), "duplicate vendor");
    }

    #[tokio::test]
    async fn test_create_returns_vendor() {
        let mut api = MockVendorApi::new();
        api.expect_create_vendor().returning(|draft| {
            Ok(Vendor {
                id: RecordId::Int(9),
                fields: draft.clone(),
            })
        });

        let vendor = create_vendor(&api, &VendorDraft::sample()).await.unwrap();
        assert_eq!(vendor.id, RecordId::Int(9));
        assert_eq!(vendor.fields.email, "alex@example.com");
    }
}
