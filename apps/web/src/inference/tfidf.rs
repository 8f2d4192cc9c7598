//! TF-IDF word vectorizer evaluated against a fitted vocabulary.
//!
//! Analyzer: optional lowercasing → regex tokens → stop-word removal →
//! n-grams joined by a single space. Weights are `tf × idf`, followed by
//! the configured normalization.

use std::collections::{HashMap, HashSet};

use regex::Regex;
use serde::Deserialize;

use crate::inference::ModelError;

const DEFAULT_TOKEN_PATTERN: &str = r"\b\w\w+\b";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
    None,
}

/// Serialized vectorizer parameters, as exported next to the classifier.
#[derive(Debug, Clone, Deserialize)]
pub struct VectorizerSpec {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub stop_words: Vec<String>,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_norm")]
    pub norm: Norm,
}

fn default_true() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Norm {
    Norm::L2
}

/// A sparse feature vector: (feature index, weight), sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

#[derive(Debug)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    lowercase: bool,
    token_re: Regex,
    ngram_range: (usize, usize),
    stop_words: HashSet<String>,
    sublinear_tf: bool,
    norm: Norm,
}

impl TfidfVectorizer {
    pub fn from_spec(spec: VectorizerSpec) -> Result<Self, ModelError> {
        let (min_n, max_n) = spec.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ModelError::Invalid(format!(
                "ngram_range ({min_n}, {max_n}) must satisfy 1 <= min <= max"
            )));
        }

        let n_features = spec.idf.len();
        if let Some((term, idx)) = spec.vocabulary.iter().find(|(_, idx)| **idx >= n_features) {
            return Err(ModelError::Invalid(format!(
                "vocabulary term '{term}' maps to index {idx} but idf has {n_features} entries"
            )));
        }

        let token_re = Regex::new(&spec.token_pattern)?;

        Ok(Self {
            vocabulary: spec.vocabulary,
            idf: spec.idf,
            lowercase: spec.lowercase,
            token_re,
            ngram_range: spec.ngram_range,
            stop_words: spec.stop_words.into_iter().collect(),
            sublinear_tf: spec.sublinear_tf,
            norm: spec.norm,
        })
    }

    /// Number of features (columns) produced by `transform`.
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Splits `text` into the analyzer's terms (n-grams included).
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let tokens: Vec<&str> = self
            .token_re
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(*t))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n == 1 {
                terms.extend(tokens.iter().map(|t| t.to_string()));
                continue;
            }
            terms.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        terms
    }

    /// Maps `text` to its normalized TF-IDF vector. Out-of-vocabulary terms are dropped.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in self.analyze(text) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(idx, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (idx, tf * self.idf[idx])
            })
            .collect();
        vector.sort_unstable_by_key(|(idx, _)| *idx);

        let scale = match self.norm {
            Norm::L2 => vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt(),
            Norm::L1 => vector.iter().map(|(_, w)| w.abs()).sum::<f64>(),
            Norm::None => 1.0,
        };
        if scale > 0.0 {
            for (_, w) in vector.iter_mut() {
                *w /= scale;
            }
        }

        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(terms: &[&str], idf: Vec<f64>) -> VectorizerSpec {
        VectorizerSpec {
            vocabulary: terms
                .iter()
                .enumerate()
                .map(|(i, t)| (t.to_string(), i))
                .collect(),
            idf,
            lowercase: true,
            token_pattern: default_token_pattern(),
            ngram_range: (1, 1),
            stop_words: vec![],
            sublinear_tf: false,
            norm: Norm::L2,
        }
    }

    #[test]
    fn test_analyze_drops_single_char_tokens_and_lowercases() {
        let v = TfidfVectorizer::from_spec(spec(&["work"], vec![1.0])).unwrap();
        assert_eq!(v.analyze("Work a FROM Home!"), vec!["work", "from", "home"]);
    }

    #[test]
    fn test_analyze_bigrams_skip_stop_words() {
        let mut s = spec(&["work"], vec![1.0]);
        s.ngram_range = (1, 2);
        s.stop_words = vec!["from".to_string()];
        let v = TfidfVectorizer::from_spec(s).unwrap();
        assert_eq!(
            v.analyze("work from home now"),
            vec!["work", "home", "now", "work home", "home now"]
        );
    }

    #[test]
    fn test_transform_is_l2_normalized() {
        let v = TfidfVectorizer::from_spec(spec(&["money", "fast"], vec![1.0, 2.0])).unwrap();
        let x = v.transform("money fast unknown");
        let norm: f64 = x.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
        // fast carries twice the idf of money.
        assert!((x[1].1 / x[0].1 - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_transform_counts_repeated_terms() {
        let mut s = spec(&["cash", "now"], vec![1.0, 1.0]);
        s.norm = Norm::None;
        let v = TfidfVectorizer::from_spec(s).unwrap();
        assert_eq!(v.transform("cash cash now"), vec![(0, 2.0), (1, 1.0)]);
    }

    #[test]
    fn test_sublinear_tf() {
        let mut s = spec(&["cash"], vec![1.0]);
        s.norm = Norm::None;
        s.sublinear_tf = true;
        let v = TfidfVectorizer::from_spec(s).unwrap();
        let x = v.transform("cash cash cash");
        assert!((x[0].1 - (1.0 + 3.0_f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_text_yields_empty_vector() {
        let v = TfidfVectorizer::from_spec(spec(&["cash"], vec![1.0])).unwrap();
        assert!(v.transform("nothing matches here").is_empty());
    }

    #[test]
    fn test_rejects_out_of_range_vocabulary_index() {
        let err = TfidfVectorizer::from_spec(spec(&["a1", "b2"], vec![1.0])).unwrap_err();
        assert!(err.to_string().contains("idf has 1 entries"));
    }

    #[test]
    fn test_rejects_bad_ngram_range() {
        let mut s = spec(&["cash"], vec![1.0]);
        s.ngram_range = (2, 1);
        assert!(TfidfVectorizer::from_spec(s).is_err());
    }

    #[test]
    fn test_rejects_invalid_token_pattern() {
        let mut s = spec(&["cash"], vec![1.0]);
        s.token_pattern = "(".to_string();
        assert!(matches!(
            TfidfVectorizer::from_spec(s),
            Err(ModelError::Pattern(_))
        ));
    }
}
