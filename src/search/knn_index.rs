//! Exact Euclidean nearest-neighbour index over encoded recipes.
#![forbid(unsafe_code)]

use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{RecommenderError, Result};
use crate::search::feature_encoder::FeatureVector;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Row in the dataset the index was built from.
    pub index: usize,
    pub distance: f64,
}

#[derive(PartialEq)]
struct ScoredIndex {
    squared_distance: f64,
    index: usize,
}

impl Eq for ScoredIndex {}

impl PartialOrd for ScoredIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredIndex {
    // Farther is greater, and on equal distance the higher row index is greater,
    // so a max-heap of size k evicts the worst candidate and keeps lowest rows
    // on ties. NaN sorts above every number and is evicted first.
    fn cmp(&self, other: &Self) -> Ordering {
        self.squared_distance
            .partial_cmp(&other.squared_distance)
            .unwrap_or_else(|| {
                match (self.squared_distance.is_nan(), other.squared_distance.is_nan()) {
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    _ => Ordering::Equal,
                }
            })
            .then_with(|| self.index.cmp(&other.index))
    }
}

/// Immutable index; row order matches the slice it was built from.
#[derive(Debug)]
pub struct KnnIndex {
    rows: Vec<FeatureVector>,
}

impl KnnIndex {
    pub fn build(rows: Vec<FeatureVector>) -> Result<Self> {
        if rows.is_empty() {
            return Err(RecommenderError::EmptyIndex);
        }
        Ok(Self { rows })
    }

    /// The `k` closest rows, ascending by distance, lowest row first on ties.
    pub fn nearest(&self, query: &FeatureVector, k: usize) -> Vec<Neighbor> {
        if k == 0 {
            return Vec::new();
        }

        let distances: Vec<f64> = self
            .rows
            .par_iter()
            .map(|row| row.squared_distance(query))
            .collect();

        let mut heap = BinaryHeap::with_capacity(k + 1);
        for (index, squared_distance) in distances.into_iter().enumerate() {
            heap.push(ScoredIndex {
                squared_distance,
                index,
            });
            if heap.len() > k {
                heap.pop();
            }
        }

        heap.into_sorted_vec()
            .into_iter()
            .map(|si| Neighbor {
                index: si.index,
                distance: si.squared_distance.sqrt(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
