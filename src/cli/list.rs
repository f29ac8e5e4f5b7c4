// ABOUTME: CLI list command - list vendors, optionally filtered by business name

use super::util::{print_json, truncate};
use super::{ListArgs, OutputFormat};
use crate::api::{Vendor, VendorApi};
use anyhow::{Context, Result};

/// Execute the list command
pub async fn execute(api: &dyn VendorApi, args: ListArgs, format: OutputFormat) -> Result<()> {
    let query = args.query.unwrap_or_default();
    let vendors = api
        .list_vendors(query.trim())
        .await
        .context("Failed to load vendors")?;

    match format {
        OutputFormat::Json => print_json(&vendors)?,
        OutputFormat::Text => print!("{}", render_text(&vendors)),
    }

    Ok(())
}

/// Vendors as a text table
pub fn render_text(vendors: &[Vendor]) -> String {
    if vendors.is_empty() {
        return "No vendors found\n".to_string();
    }

    let mut out = format!("{:<10} {:<30} {:<20} EMAIL\n", "ID", "BUSINESS", "CONTACT");
    out.push_str(&"-".repeat(90));
    out.push('\n');

    for vendor in vendors {
        out.push_str(&format!(
            "{:<10} {:<30} {:<20} {}\n",
            truncate(&vendor.id.to_string(), 10),
            truncate(&vendor.fields.business_name, 30),
            truncate(&vendor.fields.name, 20),
            vendor.fields.email
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockVendorApi, RecordId, VendorDraft};

    fn acme() -> Vendor {
        Vendor {
            id: RecordId::Int(42),
            fields: VendorDraft {
                business_name: "Acme".to_string(),
                name: "Jo".to_string(),
                email: "jo@acme.com".to_string(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_text(&[]), "No vendors found\n");
    }

    #[test]
    fn test_render_rows() {
        let text = render_text(&[acme()]);
        let row = text.lines().nth(2).unwrap();
        assert!(row.starts_with("42"));
        assert!(row.contains("Acme"));
        assert!(row.ends_with("jo@acme.com"));
    }

    #[tokio::test]
    async fn test_execute_trims_query() {
        let mut api = MockVendorApi::new();
        api.expect_list_vendors()
            .withf(|q| q == "acme")
            .times(1)
            .returning(|_| Ok(vec![acme()]));

        let args = ListArgs {
            query: Some("  acme ".to_string()),
        };
        execute(&api, args, OutputFormat::Json).await.unwrap();
    }
}
