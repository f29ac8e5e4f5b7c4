// ABOUTME: UI components for the TUI interface including vendor list, detail pane, form and wizard

pub mod layout;
pub mod onboarding;
pub mod theme;
pub mod vendor_detail;
pub mod vendor_form;
pub mod vendor_list;

pub use layout::LayoutComponent;
pub use onboarding::OnboardingComponent;
pub use vendor_detail::VendorDetailComponent;
pub use vendor_form::VendorFormComponent;
pub use vendor_list::VendorListComponent;
