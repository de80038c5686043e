//! patterndex-scanner - Loads a pattern corpus into an immutable snapshot.
//!
//! # Architecture
//!
//! ```text
//! patterndex-scanner/src/
//! ├── lib.rs         # Re-exports (this file)
//! ├── config.rs      # Layered .patterndex.yaml configuration
//! ├── corpus.rs      # Corpus, CategoryFolder, PatternFile, MarkdownFile
//! ├── index.rs       # RootIndex / CategoryIndex declarations
//! ├── markdown/      # comrak-based document model + DTO tag extraction
//! ├── paths.rs       # Link classification and resolution
//! ├── regex_util.rs  # Shared regex compilation helper
//! └── scanner.rs     # walkdir discovery + rayon parsing
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use patterndex_scanner::{CorpusConfig, CorpusScanner};
//! use patterndex_types::CancelFlag;
//!
//! let root = Path::new("docs/patterns");
//! let config = CorpusConfig::load(root, None)?;
//! let corpus = CorpusScanner::new(config).scan(root, &CancelFlag::new())?;
//! println!("{} patterns", corpus.pattern_total());
//! # Ok::<(), patterndex_types::CorpusError>(())
//! ```

pub mod config;
pub mod corpus;
pub mod index;
pub mod markdown;
pub mod paths;
mod regex_util;
mod scanner;

pub use config::{CONFIG_FILE_NAME, CorpusConfig, CorpusConfigFile};
pub use corpus::{CategoryFolder, Corpus, MarkdownFile, PatternFile};
pub use index::{
    AlphabeticalEntry, CATEGORY_INDEX_HEADER, CategoryIndex, DeclaredCategory, IndexRow,
    IndexTable, RootIndex,
};
pub use markdown::{MarkdownDocument, parse_markdown};
pub use paths::{LinkTarget, resolve_link};
pub use scanner::CorpusScanner;
