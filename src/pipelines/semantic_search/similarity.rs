use candle_core::{Device, Tensor};
use serde::Serialize;

use crate::core::CoachError;

/// One search result: the row index in the corpus and its score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hit {
    pub corpus_id: usize,
    pub score: f32,
}

/// Stack equally sized rows into a `(rows, dim)` tensor.
pub fn to_matrix(rows: &[Vec<f32>], device: &Device) -> anyhow::Result<Tensor> {
    let dim = rows.first().map_or(0, Vec::len);
    let mut flat = Vec::with_capacity(rows.len() * dim);
    for row in rows {
        if row.len() != dim {
            return Err(CoachError::DimensionMismatch {
                expected: dim,
                actual: row.len(),
            }
            .into());
        }
        flat.extend_from_slice(row);
    }
    Ok(Tensor::from_vec(flat, (rows.len(), dim), device)?)
}

/// Dot product of `query` with every row of `docs`.
pub fn dot_score(query: &[f32], docs: &[Vec<f32>]) -> anyhow::Result<Vec<f32>> {
    if docs.is_empty() {
        return Ok(Vec::new());
    }
    if docs[0].len() != query.len() {
        return Err(CoachError::DimensionMismatch {
            expected: docs[0].len(),
            actual: query.len(),
        }
        .into());
    }

    let device = Device::Cpu;
    let query = Tensor::new(query, &device)?.unsqueeze(0)?;
    let docs = to_matrix(docs, &device)?;
    let scores = query.matmul(&docs.t()?)?.squeeze(0)?;
    Ok(scores.to_vec1::<f32>()?)
}

/// Cosine similarity of `query` with every row of `docs`. Zero vectors score 0.
pub fn cos_sim(query: &[f32], docs: &[Vec<f32>]) -> anyhow::Result<Vec<f32>> {
    let docs: Vec<Vec<f32>> = docs.iter().map(|d| normalize(d)).collect();
    dot_score(&normalize(query), &docs)
}

fn normalize(v: &[f32]) -> Vec<f32> {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        v.iter().map(|x| x / norm).collect()
    } else {
        v.to_vec()
    }
}

/// Pair items with their scores, highest score first. Ties keep input order.
pub fn rank<T>(items: impl IntoIterator<Item = T>, scores: &[f32]) -> Vec<(T, f32)> {
    let mut ranked: Vec<(T, f32)> = items.into_iter().zip(scores.iter().copied()).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

/// The `top_k` rows of `corpus` most cosine-similar to `query`.
pub fn semantic_search(query: &[f32], corpus: &[Vec<f32>], top_k: usize) -> anyhow::Result<Vec<Hit>> {
    let scores = cos_sim(query, corpus)?;
    let mut hits: Vec<Hit> = rank(0..corpus.len(), &scores)
        .into_iter()
        .map(|(corpus_id, score)| Hit { corpus_id, score })
        .collect();
    hits.truncate(top_k);
    Ok(hits)
}
