//! Archive inspection and classification.
//!
//! This module handles:
//! - Opening a downloaded ZIP payload in memory
//! - Recognizing payload files by name pattern ([`rules`])
//! - Writing recognized files under their canonical names ([`ArchiveInspector`])

mod inspector;
pub mod rules;

pub use inspector::{ArchiveInspector, ExtractionReport, DIAGNOSTIC_SAMPLE_SIZE};
pub use rules::{CanonicalRole, ClassificationRule, NamePredicate, RULES};
