use serde::Serialize;
use tokenizers::Tokenizer;

use super::model::{NerModel, TokenPrediction};

/// A named entity found in the text. `start` and `end` are byte offsets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub label: String,
    pub score: f32,
    pub span: String,
    pub start: usize,
    pub end: usize,
}

pub struct NerPipeline<M: NerModel> {
    pub(crate) model: M,
    pub(crate) tokenizer: Tokenizer,
}

impl<M: NerModel> NerPipeline<M> {
    pub fn extract(&self, text: &str) -> anyhow::Result<Vec<Entity>> {
        let tokens = self.model.predict(&self.tokenizer, text)?;
        tracing::trace!(?tokens, "token predictions");
        Ok(aggregate_entities(text, &tokens))
    }

    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }
}

/// Split `B-PER` into `("B", "PER")`. Untagged labels count as inside tags.
fn split_tag(label: &str) -> (&str, &str) {
    match label.split_once('-') {
        Some((prefix @ ("B" | "I"), kind)) => (prefix, kind),
        _ if label == "O" => ("O", ""),
        _ => ("I", label),
    }
}

struct OpenEntity {
    label: String,
    scores: Vec<f32>,
    start: usize,
    end: usize,
}

impl OpenEntity {
    fn finish(self, text: &str) -> Entity {
        let score = self.scores.iter().sum::<f32>() / self.scores.len() as f32;
        Entity {
            span: text.get(self.start..self.end).unwrap_or_default().to_string(),
            label: self.label,
            score,
            start: self.start,
            end: self.end,
        }
    }
}

/// Merge BIO-tagged token predictions into entities.
///
/// A `B-X` tag opens an entity. It is extended by following `I-X` tokens and
/// by the remaining subword pieces of the same word, whatever their tag. Any
/// other token closes it. `O` tokens never appear in the output.
pub fn aggregate_entities(text: &str, tokens: &[TokenPrediction]) -> Vec<Entity> {
    let mut entities = Vec::new();
    let mut current: Option<OpenEntity> = None;
    let mut previous_word = None;

    for token in tokens {
        let same_word = token.word.is_some() && token.word == previous_word;
        previous_word = token.word;
        let (prefix, kind) = split_tag(&token.label);

        if let Some(open) = current.as_mut() {
            if same_word || (prefix == "I" && kind == open.label) {
                open.scores.push(token.score);
                open.end = token.end;
                continue;
            }
        }

        if let Some(open) = current.take() {
            entities.push(open.finish(text));
        }
        if prefix != "O" {
            current = Some(OpenEntity {
                label: kind.to_string(),
                scores: vec![token.score],
                start: token.start,
                end: token.end,
            });
        }
    }

    if let Some(open) = current {
        entities.push(open.finish(text));
    }
    entities
}
