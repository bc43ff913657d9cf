//! Offline disease tagger backed by a term list.

use crate::ner::DiseaseTagger;
use crate::{Result, ServiceError};
use async_trait::async_trait;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Matches disease names from a fixed vocabulary, case-insensitively and on word
/// boundaries. Longer terms win over shorter ones starting at the same place.
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    pattern: Option<Regex>,
    n_terms: usize,
}

impl LexiconTagger {
    pub fn from_terms<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut terms: Vec<String> = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty() && seen.insert(t.to_lowercase()))
            .collect();
        terms.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));

        let n_terms = terms.len();
        if terms.is_empty() {
            return Ok(Self { pattern: None, n_terms });
        }

        let alternation = terms
            .iter()
            .map(|term| term_pattern(term))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = RegexBuilder::new(&alternation)
            .case_insensitive(true)
            .size_limit(64 * (1 << 20))
            .build()
            .map_err(|e| {
                ServiceError::Config(format!("disease lexicon could not be compiled: {}", e))
            })?;

        Ok(Self {
            pattern: Some(pattern),
            n_terms,
        })
    }

    /// One term per line; blank lines and `#` comments are ignored, and only the
    /// first tab-separated column is read.
    pub fn parse(contents: &str) -> Result<Self> {
        Self::from_terms(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .filter_map(|line| line.split('\t').next()),
        )
    }

    pub async fn from_file(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            ServiceError::Config(format!("cannot read disease lexicon {}: {}", path.display(), e))
        })?;
        let tagger = Self::parse(&contents)?;
        info!("Loaded {} disease terms from {}", tagger.n_terms, path.display());
        Ok(tagger)
    }

    pub fn len(&self) -> usize {
        self.n_terms
    }

    pub fn is_empty(&self) -> bool {
        self.n_terms == 0
    }

    fn find(&self, sentence: &str) -> Vec<String> {
        match &self.pattern {
            Some(re) => re.find_iter(sentence).map(|m| m.as_str().to_string()).collect(),
            None => Vec::new(),
        }
    }
}

#[async_trait]
impl DiseaseTagger for LexiconTagger {
    async fn tag_diseases(&self, sentence: &str) -> Result<Vec<String>> {
        Ok(self.find(sentence))
    }
}

/// Word boundaries only on sides where the term itself starts or ends with a word character.
fn term_pattern(term: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let leading = if term.chars().next().is_some_and(is_word) { r"\b" } else { "" };
    let trailing = if term.chars().last().is_some_and(is_word) { r"\b" } else { "" };
    format!("{}{}{}", leading, regex::escape(term), trailing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_alport_sentence() {
        let tagger = LexiconTagger::from_terms(["Alport syndrome", "nephritis"]).unwrap();
        let found = tagger
            .tag_diseases("Mutations in COL4A3 (HGNC:2204) cause Alport syndrome")
            .await
            .unwrap();
        assert_eq!(found, vec!["Alport syndrome"]);
    }

    #[test]
    fn test_case_insensitive_keeps_surface_text() {
        let tagger = LexiconTagger::from_terms(["alport syndrome"]).unwrap();
        assert_eq!(tagger.find("ALPORT SYNDROME is rare"), vec!["ALPORT SYNDROME"]);
    }

    #[test]
    fn test_longest_match_and_word_boundaries() {
        let tagger =
            LexiconTagger::from_terms(["cancer", "breast cancer", "Crohn's disease (CD)"]).unwrap();
        assert_eq!(
            tagger.find("Breast cancer, not cancerous cells, nor Crohn's disease (CD)."),
            vec!["Breast cancer", "Crohn's disease (CD)"]
        );
    }

    #[test]
    fn test_parse_skips_comments_and_extra_columns() {
        let tagger = LexiconTagger::parse("# diseases\n\nAlport syndrome\tMESH:D009394\nhematuria\n").unwrap();
        assert_eq!(tagger.len(), 2);
        assert_eq!(tagger.find("gross hematuria"), vec!["hematuria"]);
    }

    #[test]
    fn test_case_variants_count_once() {
        let tagger =
            LexiconTagger::from_terms(["Alport syndrome", "Bxxxxxxxxxxxxxx", "alport syndrome"])
                .unwrap();
        assert_eq!(tagger.len(), 2);
        assert_eq!(tagger.find("ALPORT SYNDROME"), vec!["ALPORT SYNDROME"]);
    }

    #[test]
    fn test_empty_lexicon_tags_nothing() {
        let tagger = LexiconTagger::from_terms(Vec::<String>::new()).unwrap();
        assert!(tagger.is_empty());
        assert!(tagger.find("Alport syndrome").is_empty());
    }

    #[tokio::test]
    async fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diseases.txt");
        std::fs::write(&path, "Alport syndrome\n").unwrap();

        let tagger = LexiconTagger::from_file(&path).await.unwrap();
        assert_eq!(tagger.len(), 1);

        let missing = LexiconTagger::from_file(&dir.path().join("nope.txt")).await;
        assert!(matches!(missing, Err(ServiceError::Config(_))));
    }
}
