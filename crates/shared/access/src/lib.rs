//! Distribution Market Access Control
//!
//! In-process implementations of the access ports:
//! - [`RoleTable`] implements `RoleRegistry`
//! - [`SimpleOracle`] implements `Oracle`

mod oracle;
mod roles;

pub use oracle::SimpleOracle;
pub use roles::RoleTable;
