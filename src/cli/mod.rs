// ABOUTME: CLI argument parsing and command routing for vendorbox
//
// Provides command-line interface for:
// - Browsing vendors (list, show)
// - Creating vendors directly or from the built-in sample (create, sample)
// - Running the onboarding wizard headlessly (onboard)
// - Inspecting and saving the effective configuration (config)
// - Launching TUI (tui, default)

pub mod create;
pub mod list;
pub mod onboard;
pub mod settings;
pub mod show;
pub mod util;

use clap::{Parser, Subcommand, ValueEnum};

/// Terminal client for the vendor CRM backend
#[derive(Parser)]
#[command(name = "vendorbox")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base URL (overrides config and VENDORBOX_BACKEND_URL)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI (default if no command given)
    Tui,

    /// List vendors
    List(ListArgs),

    /// Show a vendor's contacts, deals and notes
    Show(ShowArgs),

    /// Create a vendor
    Create(CreateArgs),

    /// Create the built-in sample vendor
    Sample,

    /// Run the onboarding wizard from flags
    Onboard(OnboardArgs),

    /// Print the effective configuration
    Config(ConfigArgs),
}

/// Arguments for the config command
#[derive(clap::Args)]
pub struct ConfigArgs {
    /// Write the effective configuration to ~/.vendorbox/config/config.toml
    #[arg(long)]
    pub save: bool,
}

/// Arguments for the list command
#[derive(clap::Args)]
pub struct ListArgs {
    /// Filter by business name
    #[arg(long, short)]
    pub query: Option<String>,
}

/// Arguments for the show command
#[derive(clap::Args)]
pub struct ShowArgs {
    /// Vendor ID
    pub vendor_id: String,
}

/// Arguments for the create command
#[derive(clap::Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub business_name: String,

    /// Primary contact name
    #[arg(long)]
    pub name: String,

    /// Primary contact email
    #[arg(long)]
    pub email: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long, default_value = "")]
    pub category: String,

    #[arg(long, default_value = "")]
    pub website: String,
}

/// Arguments for the onboard command.
///
/// Contact, deal and note are created only when their key field is given.
#[derive(clap::Args)]
pub struct OnboardArgs {
    #[command(flatten)]
    pub vendor: CreateArgs,

    #[arg(long, default_value = "")]
    pub contact_name: String,

    #[arg(long, default_value = "")]
    pub contact_email: String,

    #[arg(long, default_value = "")]
    pub contact_phone: String,

    /// Contact title or role
    #[arg(long, default_value = "")]
    pub contact_title: String,

    #[arg(long, default_value = "")]
    pub deal_title: String,

    /// Deal value; blank means 0
    #[arg(long, default_value = "")]
    pub deal_value: String,

    #[arg(long, default_value = "USD")]
    pub deal_currency: String,

    /// Prospect, Qualified, Proposal, Negotiation, Won or Lost
    #[arg(long, default_value = "Prospect")]
    pub deal_stage: crate::api::DealStage,

    #[arg(long, default_value = "")]
    pub note: String,
}

impl CreateArgs {
    pub fn to_draft(&self) -> crate::api::VendorDraft {
        crate::api::VendorDraft {
            business_name: self.business_name.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            category: self.category.clone(),
            website: self.website.clone(),
        }
    }
}
