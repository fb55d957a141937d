//! Contact directory: visitor contact submissions.

pub mod directory;

pub use directory::ContactDirectory;

use concierge_types::chat::ContactInfo;

/// Read-side view of submitted contact details.
///
/// Used by the session registry when embedding contact details into history
/// snapshots, without coupling the registry to the directory's storage.
pub trait ContactLookup: Send + Sync {
    /// Name/number for a chat id, if a record was submitted.
    fn contact_info(&self, chat_id: &str) -> Option<ContactInfo>;
}
