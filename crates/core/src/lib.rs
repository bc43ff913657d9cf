//! Core domain types for felix
//!
//! This crate holds everything that does not touch the network: input
//! validation, JATS article parsing, sentence splitting, gene mentions and
//! the tab-separated report.

pub mod document;
pub mod error;
pub mod gene;
pub mod mention;
pub mod report;
pub mod sentence;
pub mod validate;

pub use document::Document;
pub use error::{CoreError, Result};
pub use gene::{Assembly, GeneMetadata, GenomicPosition, HgncId, HgncRecord, Strand};
pub use mention::{GeneMention, GeneMentions};
pub use report::{build_rows, write_report, write_report_file, ReportRow, HEADER};
pub use sentence::split_sentences;
pub use validate::{Email, PmcId};
