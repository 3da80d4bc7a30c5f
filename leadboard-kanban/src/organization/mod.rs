//! Organization commands

mod get;
mod init;
mod list;

pub use get::GetOrganization;
pub use init::InitOrganization;
pub use list::ListOrganizations;
