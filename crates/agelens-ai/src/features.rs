//! Sparse feature vectors and the text-to-features transformer seam.

/// Sparse row vector with strictly increasing feature indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    /// Build from `(index, value)` pairs in any order. Duplicate indices are summed.
    pub fn from_pairs(mut pairs: Vec<(usize, f64)>) -> Self {
        pairs.sort_by_key(|&(idx, _)| idx);
        let mut indices = Vec::with_capacity(pairs.len());
        let mut values: Vec<f64> = Vec::with_capacity(pairs.len());
        for (idx, val) in pairs {
            if indices.last() == Some(&idx) {
                if let Some(last) = values.last_mut() {
                    *last += val;
                }
            } else {
                indices.push(idx);
                values.push(val);
            }
        }
        Self { indices, values }
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Largest stored index, if any.
    pub fn max_index(&self) -> Option<usize> {
        self.indices.last().copied()
    }

    /// Dot product with a dense weight row. Indices past the row's end contribute nothing.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.iter()
            .filter_map(|(idx, val)| dense.get(idx).map(|w| w * val))
            .sum()
    }
}

/// Pre-fitted mapping from raw text to feature vectors.
///
/// Applied identically at inference time as at training time. Batch calls
/// exist for throughput of the numeric transform only.
pub trait Transformer: Send + Sync {
    /// Width of the feature space (vocabulary size).
    fn n_features(&self) -> usize;

    /// Transform each text into one sparse row, in input order.
    fn transform(&self, texts: &[&str]) -> Vec<SparseVector>;
}
