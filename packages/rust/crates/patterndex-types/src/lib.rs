//! patterndex-types - Shared data model for the pattern corpus toolkit.
//!
//! Every crate in the workspace speaks in these types:
//! - `Slug` - kebab-case pattern identifier (file stem, corpus-unique)
//! - `RuleId` / `Finding` / `ValidationReport` - validator output (V1-V8)
//! - `DtoTag` - the frozen `dto:"direction,context,security"` vocabulary
//! - `SectionKind` - the ordered pattern file skeleton
//! - `CorpusError` / `CancelFlag` - failure and cancellation plumbing
//!
//! # Architecture
//!
//! ```text
//! patterndex-types/src/
//! ├── lib.rs       # Re-exports (this file)
//! ├── cancel.rs    # Cooperative stop signal
//! ├── dto.rs       # DTO-tag convention vocabulary + parser
//! ├── error.rs     # CorpusError enum
//! ├── finding.rs   # Finding, ValidationReport
//! ├── rule.rs      # RuleId (V1-V8)
//! ├── skeleton.rs  # SectionKind catalogue + heading normalisation
//! └── slug.rs      # Slug newtype + slugify
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod cancel;
pub mod dto;
mod error;
mod finding;
mod rule;
pub mod skeleton;
mod slug;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use cancel::CancelFlag;
pub use dto::{DtoContext, DtoDirection, DtoSecurity, DtoTag, DtoTagError, DtoVocabulary, InvalidToken};
pub use error::{CorpusError, CorpusResult};
pub use finding::{Finding, ValidationReport};
pub use rule::RuleId;
pub use skeleton::{SectionKind, normalize_heading};
pub use slug::{Slug, SlugError, slugify};

// ============================================================================
// JSON Schema Generation
// ============================================================================

/// Generate JSON Schema for one `Finding`.
///
/// Consumers of `patterndex check --format json` read one object of this
/// shape per line.
#[must_use]
pub fn finding_schema() -> String {
    let schema = schemars::schema_for!(Finding);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
