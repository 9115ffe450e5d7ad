//! im-authors: author-name canonicalization and duplicate detection for
//! bibliographic catalogs.
//!
//! The engine works on plain strings and lists of strings:
//!
//! - [`format_name`] turns a free-form personal name into the ABNT form
//!   `SURNAME, Given Names`.
//! - [`CanonicalRegistry`] holds curated overrides that take precedence over
//!   formatting (historical spellings, pseudonyms, typo fixes).
//! - [`is_corrupted`] and [`reconstruct`] detect and repair name lists that an
//!   earlier line-splitting step flattened into isolated words.
//! - [`SimilarityScanner`] reports pairs of recorded names that probably refer
//!   to the same person, for a curator to confirm.
//!
//! [`normalize`] ties these together over a [`Catalog`] and returns the new
//! catalog plus a [`ChangeLog`]; persisting the result is the caller's job.
//!
//! # Example
//!
//! ```
//! use im_authors::{CanonicalRegistry, Engine, EngineConfig};
//!
//! let registry = CanonicalRegistry::from_pairs([("BACH", "BACH, Johann Sebastian")]).unwrap();
//! let engine = Engine::new(EngineConfig::default(), registry);
//!
//! assert_eq!(engine.canonicalize("Murilo Mendes"), "MENDES, Murilo");
//! assert_eq!(engine.canonicalize("BACH"), "BACH, Johann Sebastian");
//! ```

pub mod catalog;
pub mod changelog;
pub mod config;
pub mod corruption;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod pipeline;
pub mod reconstruct;
pub mod registry;
pub mod similarity;
#[cfg(feature = "cli")]
pub mod telemetry;
pub mod vocabulary;

pub use catalog::{record_id, Catalog, Record};
pub use changelog::{ChangeLog, FieldChange, RepairKind};
pub use config::{EngineConfig, PipelineConfig, DEFAULT_FIELDS};
pub use corruption::{is_corrupted, is_single_token, CorruptionPolicy};
pub use engine::{normalize_author_text, Engine};
pub use error::{AuthorsError, Result};
pub use formatter::{
    collapse_whitespace, format_name, is_all_uppercase, split_multiline, title_case,
};
pub use pipeline::{normalize, normalize_name_list, NormalizationOutcome, NormalizedList};
pub use reconstruct::{reconstruct, reconstruct_with, ReconstructOptions};
pub use registry::{CanonicalRegistry, MergeRule, RegistryBuilder, RuleSet, RuleSource};
pub use similarity::{
    similarity_ratio, CandidatePair, DuplicateReport, MatchSignal, ScanOptions, SimilarityScanner,
};
pub use vocabulary::{NameCount, Vocabulary};
