//! TF-IDF text vectorizer over ingredient lists.
//!
//! Vocabulary and IDF weights are fitted once on the dataset corpus. Encoding a
//! text afterwards counts terms, weights them by IDF and L2-normalises the
//! result. Terms outside the fitted vocabulary are dropped.

use std::collections::{BTreeMap, HashMap, HashSet};

/// Sparse vector with strictly increasing column indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    /// Builds a vector from `(column, value)` pairs. Zero values are dropped.
    pub fn from_entries(mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(_, v)| v != 0.0);
        entries.sort_by_key(|&(idx, _)| idx);
        entries.dedup_by_key(|&mut (idx, _)| idx);
        let (indices, values) = entries.into_iter().unzip();
        Self { indices, values }
    }

    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn get(&self, column: usize) -> f64 {
        match self.indices.binary_search(&column) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Squared Euclidean distance, merging both index lists so that equal
    /// vectors give exactly zero.
    pub fn squared_distance(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => {
                    sum += self.values[i] * self.values[i];
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    sum += other.values[j] * other.values[j];
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    let d = self.values[i] - other.values[j];
                    sum += d * d;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum += self.values[i..].iter().map(|v| v * v).sum::<f64>();
        sum += other.values[j..].iter().map(|v| v * v).sum::<f64>();
        sum
    }

    pub fn to_dense(&self, dimension: usize) -> Vec<f64> {
        let mut dense = vec![0.0; dimension];
        for (idx, value) in self.iter() {
            if idx < dimension {
                dense[idx] = value;
            }
        }
        dense
    }
}

/// Lowercases and splits on anything that is not alphanumeric or `_`,
/// keeping tokens of two or more characters.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| w.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    /// term -> column, columns assigned in alphabetical term order
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let n = documents.len() as f64;

        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        for doc in documents {
            let unique: HashSet<String> = tokenize(doc.as_ref()).into_iter().collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let mut vocabulary = HashMap::with_capacity(doc_freq.len());
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (idx, (term, df)) in doc_freq.into_iter().enumerate() {
            // Smoothed IDF, as if one extra document contained every term.
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, idx);
        }

        Self { vocabulary, idf }
    }

    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokenize(text) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, count)| (idx, count * self.idf[idx]))
            .collect();

        let norm = entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, v) in entries.iter_mut() {
                *v /= norm;
            }
        }
        SparseVector::from_entries(entries)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|idx| self.idf[idx])
    }
}
