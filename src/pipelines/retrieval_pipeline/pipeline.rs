use std::sync::Arc;

use minijinja::{context, Environment};
use serde::Serialize;

use super::embedder::Embedder;
use super::store::FactStore;
use crate::pipelines::text_generation_pipeline::TextGenerationPipeline;

pub const RAG_TEMPLATE: &str = "
You are a helpful AI assistant.
Answer based on the context provided. 
context: {{ context }}
input: {{ input }}
answer:
";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievalResponse {
    pub input: String,
    pub context: Vec<String>,
    pub answer: String,
}

/// The question-answering prompt, with `context` and `input` filled in.
#[derive(Clone)]
pub struct PromptTemplate {
    env: Arc<Environment<'static>>,
}

impl PromptTemplate {
    pub fn rag() -> anyhow::Result<Self> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.add_template("rag", RAG_TEMPLATE)?;
        Ok(Self { env: Arc::new(env) })
    }

    pub fn render(&self, context: &str, input: &str) -> anyhow::Result<String> {
        Ok(self
            .env
            .get_template("rag")?
            .render(context! { context => context, input => input })?)
    }
}

/// Retrieve the closest facts for a question and answer from them.
pub struct RetrievalPipeline<E: Embedder> {
    pub(crate) store: FactStore,
    pub(crate) embedder: E,
    pub(crate) generator: TextGenerationPipeline,
    pub(crate) prompt: PromptTemplate,
    pub(crate) k: usize,
}

impl<E: Embedder> RetrievalPipeline<E> {
    pub async fn invoke(&self, input: &str) -> anyhow::Result<RetrievalResponse> {
        let context = self.retrieve(input).await?;
        let prompt = self.prompt.render(&context.join("\n\n"), input)?;
        let answer = self.generator.prompt(&prompt).await?;
        Ok(RetrievalResponse {
            input: input.to_string(),
            context,
            answer,
        })
    }

    /// Texts of the `k` facts closest to `input`.
    pub async fn retrieve(&self, input: &str) -> anyhow::Result<Vec<String>> {
        if self.store.is_empty() {
            tracing::warn!(collection = self.store.name(), "fact collection is empty");
        }
        let embedding = self.embedder.embed(input).await?;
        let hits = self.store.query(&embedding, self.k)?;
        tracing::debug!(
            ids = ?hits.iter().map(|(r, _)| r.id.as_str()).collect::<Vec<_>>(),
            "retrieved facts"
        );
        Ok(hits.into_iter().map(|(record, _)| record.text.clone()).collect())
    }

    pub fn store(&self) -> &FactStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rag_prompt_layout() {
        let prompt = PromptTemplate::rag()
            .unwrap()
            .render("Jordan played for the Bulls.\n\nHe won six titles.", "Who did Jordan play for?")
            .unwrap();
        assert_eq!(
            prompt,
            "\nYou are a helpful AI assistant.\nAnswer based on the context provided. \n\
             context: Jordan played for the Bulls.\n\nHe won six titles.\n\
             input: Who did Jordan play for?\nanswer:\n"
        );
    }

    #[test]
    fn response_serialises_every_field() {
        let response = RetrievalResponse {
            input: "q".into(),
            context: vec!["a".into(), "b".into()],
            answer: "c".into(),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({"input": "q", "context": ["a", "b"], "answer": "c"})
        );
    }
}
