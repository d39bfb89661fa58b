use super::index::DocumentIndex;
use super::similarity::{dot_score, rank, Hit};
use crate::pipelines::embedding_pipeline::{EmbeddingModel, EmbeddingPipeline};

/// Semantic search over an embedding pipeline.
pub struct SemanticSearchPipeline<'a, M: EmbeddingModel> {
    embedder: &'a EmbeddingPipeline<M>,
}

impl<'a, M: EmbeddingModel> SemanticSearchPipeline<'a, M> {
    pub fn new(embedder: &'a EmbeddingPipeline<M>) -> Self {
        Self { embedder }
    }

    /// Score every document against `query` by dot product, best first.
    pub fn rank_documents<'d>(
        &self,
        query: &str,
        documents: &[&'d str],
    ) -> anyhow::Result<Vec<(&'d str, f32)>> {
        let query_embedding = self.embedder.embed(query)?;
        let doc_embeddings = self.embedder.embed_batch(documents)?;
        let scores = dot_score(&query_embedding, &doc_embeddings)?;
        Ok(rank(documents.iter().copied(), &scores))
    }

    /// Embed `documents` into a searchable index.
    pub fn index(&self, documents: Vec<String>) -> anyhow::Result<DocumentIndex> {
        let refs: Vec<&str> = documents.iter().map(String::as_str).collect();
        let embeddings = self.embedder.embed_batch(&refs)?;
        DocumentIndex::new(documents, embeddings)
    }

    /// The `top_k` indexed documents closest to `query`.
    pub fn search<'i>(
        &self,
        index: &'i DocumentIndex,
        query: &str,
        top_k: usize,
    ) -> anyhow::Result<Vec<(Hit, &'i str)>> {
        let query_embedding = self.embedder.embed(query)?;
        index.search(&query_embedding, top_k)
    }
}
