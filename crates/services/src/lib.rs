//! External services for felix
//!
//! This crate talks to everything outside the process:
//! - Entrez: PMC article XML
//! - NER worker or disease lexicon: disease mentions
//! - HGNC and MyGene.info: gene nomenclature and coordinates
//!
//! and wires them into the [`Pipeline`].

pub mod config;
pub mod enrich;
pub mod entrez;
pub mod error;
pub mod extract;
pub mod hgnc;
pub mod lexicon;
pub mod mygene;
pub mod ner;
pub mod one_or_many;
pub mod pipeline;

pub use config::ServiceConfig;
pub use enrich::{EnrichmentOutcome, MetadataEnricher, MissingDataPolicy};
pub use entrez::EntrezClient;
pub use error::{Result, ServiceError};
pub use extract::extract_mentions;
pub use hgnc::HgncClient;
pub use lexicon::LexiconTagger;
pub use mygene::{GenePositions, MyGeneClient};
pub use ner::{DiseaseTagger, NerClient, NerEntity};
pub use pipeline::{Pipeline, PipelineOutput};
