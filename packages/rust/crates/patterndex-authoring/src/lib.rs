//! patterndex-authoring - Write side of the pattern corpus.
//!
//! # Architecture
//!
//! ```text
//! patterndex-authoring/src/
//! ├── lib.rs        # Re-exports (this file)
//! ├── scaffold.rs   # New pattern files / category folders from templates
//! ├── template.rs   # Placeholder substitution, built-in templates
//! ├── index.rs      # Category table, alphabetical index, category indexes
//! ├── atomic.rs     # Temp file + fsync + rename
//! └── error.rs      # AuthoringError
//! ```
//!
//! Nothing here overwrites an existing pattern file. Generated index blocks
//! live between `<!-- patterndex:NAME -->` markers and are only rewritten
//! when their content changes.
//!
//! # Examples
//!
//! ```rust,no_run
//! use patterndex_authoring::Authoring;
//! use patterndex_scanner::CorpusConfig;
//!
//! let tool = Authoring::new("patterns", CorpusConfig::default());
//! let created = tool.new_pattern("concurrency", "Worker Pool", None)?;
//! println!("{} ({} placeholders left)", created.rel_path, created.placeholders.len());
//! # Ok::<(), patterndex_authoring::AuthoringError>(())
//! ```

mod atomic;
mod error;
pub mod index;
mod scaffold;
pub mod template;

pub use error::{AuthoringError, AuthoringResult};
pub use index::{GeneratedIndex, generate_index, write_index};
pub use scaffold::{Authoring, DEFAULT_EXEMPLAR_LANGUAGE, Scaffolded};
