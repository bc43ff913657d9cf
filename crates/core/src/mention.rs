//! Gene mentions - which diseases co-occur with each HGNC identifier

use crate::gene::HgncId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One gene identifier and the diseases named alongside it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneMention {
    pub hgnc_id: HgncId,

    /// Disease labels, deduplicated and sorted
    #[serde(default)]
    pub diseases: BTreeSet<String>,
}

impl GeneMention {
    pub fn new(hgnc_id: HgncId) -> Self {
        Self {
            hgnc_id,
            diseases: BTreeSet::new(),
        }
    }
}

/// All gene mentions found in a document, keyed and iterated in identifier order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneMentions {
    mentions: BTreeMap<HgncId, GeneMention>,
}

impl GeneMentions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate every disease with every identifier of one sentence.
    ///
    /// Identifiers are recorded even when `diseases` is empty.
    pub fn record_sentence<I, S>(&mut self, ids: &[HgncId], diseases: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let diseases: BTreeSet<String> = diseases
            .into_iter()
            .map(|d| d.as_ref().trim().to_string())
            .filter(|d| !d.is_empty())
            .collect();

        for id in ids {
            self.mentions
                .entry(id.clone())
                .or_insert_with(|| GeneMention::new(id.clone()))
                .diseases
                .extend(diseases.iter().cloned());
        }
    }

    pub fn get(&self, id: &HgncId) -> Option<&GeneMention> {
        self.mentions.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &HgncId> {
        self.mentions.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneMention> {
        self.mentions.values()
    }

    pub fn len(&self) -> usize {
        self.mentions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty()
    }
}

impl FromIterator<GeneMention> for GeneMentions {
    fn from_iter<T: IntoIterator<Item = GeneMention>>(iter: T) -> Self {
        let mut mentions = GeneMentions::new();
        for mention in iter {
            mentions.record_sentence(&[mention.hgnc_id], mention.diseases);
        }
        mentions
    }
}
