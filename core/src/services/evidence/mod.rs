//! Evidence intake
//!
//! Records an uploaded artifact as a case document together with its
//! `DOCUMENT_UPLOAD` audit entry. The order is fixed:
//!
//! 1. legal declaration checked, before anything else is touched
//! 2. case resolved within the caller's firm
//! 3. bytes persisted and confirmed durable
//! 4. document and audit rows inserted in one transaction
//!
//! If step 4 fails the stored bytes are orphaned. They are discarded on a
//! best-effort basis and are never visible as a document.

mod service;

#[cfg(test)]
mod tests;

pub use service::{EvidenceIntakeService, IntakeReceipt, IntakeRequest};
