//! Gene/disease association extraction over a parsed article.

use crate::ner::DiseaseTagger;
use crate::Result;
use felix_core::{split_sentences, Document, GeneMentions, HgncId};
use tracing::{debug, info, instrument};

/// Tag every sentence that names an HGNC identifier and attach its diseases to
/// each identifier in it. Sentences without an identifier are not sent to the tagger.
#[instrument(skip_all)]
pub async fn extract_mentions(
    document: &Document,
    tagger: &dyn DiseaseTagger,
) -> Result<GeneMentions> {
    let mut mentions = GeneMentions::new();
    let mut tagged_sentences = 0usize;

    for paragraph in &document.paragraphs {
        for sentence in split_sentences(paragraph) {
            let ids = HgncId::find_all(sentence);
            if ids.is_empty() {
                continue;
            }

            let diseases = tagger.tag_diseases(sentence).await?;
            debug!(
                "Sentence with {} ids, {} diseases: {}",
                ids.len(),
                diseases.len(),
                sentence
            );
            mentions.record_sentence(&ids, diseases);
            tagged_sentences += 1;
        }
    }

    info!(
        "Found {} HGNC ids in {} sentences",
        mentions.len(),
        tagged_sentences
    );
    Ok(mentions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::LexiconTagger;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records which sentences were tagged
    struct RecordingTagger {
        inner: LexiconTagger,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl DiseaseTagger for RecordingTagger {
        async fn tag_diseases(&self, sentence: &str) -> Result<Vec<String>> {
            self.seen.lock().unwrap().push(sentence.to_string());
            self.inner.tag_diseases(sentence).await
        }
    }

    fn tagger() -> RecordingTagger {
        RecordingTagger {
            inner: LexiconTagger::from_terms(["Alport syndrome", "hematuria", "deafness"]).unwrap(),
            seen: Mutex::new(Vec::new()),
        }
    }

    #[tokio::test]
    async fn test_alport_round_trip() {
        let doc = Document::new(
            "t",
            vec!["Mutations in COL4A3 (HGNC:2204) cause Alport syndrome".to_string()],
        );
        let mentions = extract_mentions(&doc, &tagger()).await.unwrap();

        let id = HgncId::parse("HGNC:2204").unwrap();
        let diseases: Vec<&str> = mentions
            .get(&id)
            .unwrap()
            .diseases
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(mentions.len(), 1);
        assert_eq!(diseases, vec!["Alport syndrome"]);
    }

    #[tokio::test]
    async fn test_only_sentences_with_ids_are_tagged() {
        let doc = Document::new(
            "t",
            vec![
                "Deafness is common. COL4A5 (HGNC:2207) causes hematuria. Alport syndrome is rare."
                    .to_string(),
                "COL4A5 (HGNC:2207) also leads to Alport syndrome and deafness. Unrelated text."
                    .to_string(),
            ],
        );
        let tagger = tagger();
        let mentions = extract_mentions(&doc, &tagger).await.unwrap();

        let seen = tagger.seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|s| s.contains("HGNC:2207")));

        let diseases: Vec<&str> = mentions
            .get(&HgncId::parse("HGNC:2207").unwrap())
            .unwrap()
            .diseases
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(diseases, vec!["Alport syndrome", "deafness", "hematuria"]);
    }

    #[tokio::test]
    async fn test_id_without_disease_is_recorded() {
        let doc = Document::new("t", vec!["We sequenced TP53 (HGNC:11998) in all samples.".to_string()]);
        let mentions = extract_mentions(&doc, &tagger()).await.unwrap();
        let mention = mentions.get(&HgncId::parse("HGNC:11998").unwrap()).unwrap();
        assert!(mention.diseases.is_empty());
    }

    #[tokio::test]
    async fn test_no_ids_no_mentions() {
        let doc = Document::new("t", vec!["Alport syndrome without identifiers.".to_string()]);
        let tagger = tagger();
        let mentions = extract_mentions(&doc, &tagger).await.unwrap();
        assert!(mentions.is_empty());
        assert!(tagger.seen.lock().unwrap().is_empty());
    }
}
