//! Database operations for the `leads` table.

mod read;
mod types;
mod write;

pub use read::list_leads;
pub use types::{LeadFilter, LeadRow, NewLead, DEFAULT_LIST_LIMIT};
pub use write::{insert_leads, record_website_audit};
