use serde::Serialize;
use tokenizers::Tokenizer;

use super::model::QuestionAnsweringModel;

/// Longest answer, in tokens, the pipeline will extract.
pub const MAX_ANSWER_LEN: usize = 15;

/// An answer span. `start` and `end` are byte offsets into the context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    pub score: f32,
    pub start: usize,
    pub end: usize,
    pub answer: String,
}

pub struct QuestionAnsweringPipeline<M: QuestionAnsweringModel> {
    pub(crate) model: M,
    pub(crate) tokenizer: Tokenizer,
}

impl<M: QuestionAnsweringModel> QuestionAnsweringPipeline<M> {
    pub fn answer(&self, question: &str, context: &str) -> anyhow::Result<Answer> {
        let encoding = self
            .tokenizer
            .encode((question, context), true)
            .map_err(anyhow::Error::msg)?;

        // Only tokens of the second sequence (the context) may be part of the answer.
        let allowed: Vec<bool> = encoding
            .get_sequence_ids()
            .iter()
            .map(|id| *id == Some(1))
            .collect();

        let (start_logits, end_logits) = self
            .model
            .span_logits(encoding.get_ids(), encoding.get_attention_mask())?;

        let Some((start, end, score)) =
            best_span(&start_logits, &end_logits, &allowed, MAX_ANSWER_LEN)
        else {
            tracing::warn!(question, "context produced no answerable tokens");
            return Ok(Answer {
                score: 0.0,
                start: 0,
                end: 0,
                answer: String::new(),
            });
        };

        let offsets = encoding.get_offsets();
        let (byte_start, byte_end) = (offsets[start].0, offsets[end].1);
        tracing::debug!(start, end, score, "selected answer span");

        Ok(Answer {
            score,
            start: byte_start,
            end: byte_end,
            answer: context.get(byte_start..byte_end).unwrap_or_default().to_string(),
        })
    }

    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }
}

/// Pick the token span `(start, end, score)` maximising
/// `softmax(start)[start] * softmax(end)[end]`.
///
/// Both ends must be `allowed`, `start <= end` and the span is shorter than
/// `max_answer_len` tokens. The softmax is taken over allowed positions only.
pub fn best_span(
    start_logits: &[f32],
    end_logits: &[f32],
    allowed: &[bool],
    max_answer_len: usize,
) -> Option<(usize, usize, f32)> {
    let len = start_logits.len().min(end_logits.len()).min(allowed.len());
    let allowed = &allowed[..len];
    let start_probs = masked_softmax(&start_logits[..len], allowed);
    let end_probs = masked_softmax(&end_logits[..len], allowed);

    let mut best: Option<(usize, usize, f32)> = None;
    for start in (0..len).filter(|&i| allowed[i]) {
        for end in start..(start + max_answer_len).min(len) {
            if !allowed[end] {
                continue;
            }
            let score = start_probs[start] * end_probs[end];
            if best.map_or(true, |(_, _, top)| score > top) {
                best = Some((start, end, score));
            }
        }
    }
    best
}

fn masked_softmax(logits: &[f32], allowed: &[bool]) -> Vec<f32> {
    let max = logits
        .iter()
        .zip(allowed)
        .filter(|(_, ok)| **ok)
        .map(|(l, _)| *l)
        .fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits
        .iter()
        .zip(allowed)
        .map(|(l, ok)| if *ok { (l - max).exp() } else { 0.0 })
        .collect();
    let sum: f32 = exps.iter().sum();
    if sum > 0.0 {
        exps.into_iter().map(|e| e / sum).collect()
    } else {
        exps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use candle_core::Device;
    use serde_json::json;
    use tokenizers::models::wordlevel::WordLevel;
    use tokenizers::pre_tokenizers::whitespace::Whitespace;
    use tokenizers::processors::template::TemplateProcessing;

    use crate::loaders::ModelSource;

    const VOCAB: [&str; 17] = [
        "[UNK]", "[CLS]", "[SEP]", "where", "did", "jordan", "play", "?", "he", "played", "in",
        "chicago", "for", "the", "bulls", "münchen", ".",
    ];

    fn pair_tokenizer() -> Tokenizer {
        let vocab: serde_json::Map<String, serde_json::Value> = VOCAB
            .iter()
            .enumerate()
            .map(|(id, word)| (word.to_string(), json!(id)))
            .collect();
        let model: WordLevel =
            serde_json::from_value(json!({ "vocab": vocab, "unk_token": "[UNK]" })).unwrap();

        let mut tokenizer = Tokenizer::new(model);
        tokenizer.with_pre_tokenizer(Some(Whitespace));
        tokenizer.with_post_processor(Some(
            TemplateProcessing::builder()
                .try_single("[CLS] $A [SEP]")
                .unwrap()
                .try_pair("[CLS] $A [SEP] $B:1 [SEP]:1")
                .unwrap()
                .special_tokens(vec![("[CLS]", 1), ("[SEP]", 2)])
                .build()
                .unwrap(),
        ));
        tokenizer
    }

    fn id(word: &str) -> u32 {
        VOCAB.iter().position(|w| *w == word).unwrap() as u32
    }

    fn by_id(scores: &[(&str, f32)]) -> HashMap<u32, f32> {
        scores.iter().map(|(word, score)| (id(word), *score)).collect()
    }

    /// Scores every occurrence of a word the same, wherever it sits.
    #[derive(Clone)]
    struct WordScores {
        start: HashMap<u32, f32>,
        end: HashMap<u32, f32>,
        device: Device,
    }

    impl WordScores {
        fn new(start: &[(&str, f32)], end: &[(&str, f32)]) -> Self {
            Self {
                start: by_id(start),
                end: by_id(end),
                device: Device::Cpu,
            }
        }
    }

    impl QuestionAnsweringModel for WordScores {
        type Options = ModelSource;

        fn new(_options: Self::Options, _device: Device) -> anyhow::Result<Self> {
            anyhow::bail!("built directly in tests")
        }

        fn span_logits(
            &self,
            input_ids: &[u32],
            _attention_mask: &[u32],
        ) -> anyhow::Result<(Vec<f32>, Vec<f32>)> {
            let score = |table: &HashMap<u32, f32>| -> Vec<f32> {
                input_ids
                    .iter()
                    .map(|id| table.get(id).copied().unwrap_or(0.0))
                    .collect()
            };
            Ok((score(&self.start), score(&self.end)))
        }

        fn get_tokenizer(_options: Self::Options) -> anyhow::Result<Tokenizer> {
            Ok(pair_tokenizer())
        }

        fn device(&self) -> &Device {
            &self.device
        }
    }

    fn pipeline(model: WordScores) -> QuestionAnsweringPipeline<WordScores> {
        QuestionAnsweringPipeline {
            model,
            tokenizer: pair_tokenizer(),
        }
    }

    #[test]
    fn answer_comes_from_the_context_even_when_question_scores_higher() {
        let model = WordScores::new(
            &[("where", 20.0), ("[CLS]", 30.0), ("chicago", 5.0)],
            &[("jordan", 20.0), ("[SEP]", 30.0), ("bulls", 5.0)],
        );
        let context = "he played in chicago for the bulls .";

        let answer = pipeline(model)
            .answer("where did jordan play ?", context)
            .unwrap();
        assert_eq!(answer.answer, "chicago for the bulls");
        assert_eq!(answer.answer, &context[answer.start..answer.end]);
        assert_eq!(answer.start, context.find("chicago").unwrap());
        assert!(answer.score > 0.0 && answer.score <= 1.0);
    }

    #[test]
    fn offsets_are_bytes_into_non_ascii_context() {
        let model = WordScores::new(&[("münchen", 5.0)], &[("münchen", 5.0)]);
        let context = "he played in münchen .";

        let answer = pipeline(model)
            .answer("where did jordan play ?", context)
            .unwrap();
        assert_eq!(answer.answer, "münchen");
        assert_eq!(&context[answer.start..answer.end], "münchen");
        assert_eq!(answer.start, 13);
        assert_eq!(answer.end - answer.start, "münchen".len());
    }

    #[test]
    fn picks_highest_start_and_end() {
        let start = [9.0, 0.0, 5.0, 1.0, 0.0];
        let end = [9.0, 0.0, 0.0, 6.0, 1.0];
        let allowed = [false, true, true, true, true];
        let (s, e, score) = best_span(&start, &end, &allowed, 15).unwrap();
        assert_eq!((s, e), (2, 3));
        assert!(score > 0.0 && score <= 1.0);
    }

    #[test]
    fn end_never_precedes_start() {
        let start = [0.0, 0.0, 8.0];
        let end = [8.0, 0.0, 0.0];
        let allowed = [true, true, true];
        let (s, e, _) = best_span(&start, &end, &allowed, 15).unwrap();
        assert!(s <= e);
    }

    #[test]
    fn span_respects_max_length() {
        let start = [5.0, 0.0, 0.0, 0.0, 0.0];
        let end = [0.0, 0.0, 0.0, 0.0, 5.0];
        let allowed = [true; 5];
        let (s, e, _) = best_span(&start, &end, &allowed, 3).unwrap();
        assert!(e - s < 3);
    }

    #[test]
    fn question_tokens_are_never_chosen() {
        let start = [0.0, 10.0, 0.0, 1.0];
        let end = [0.0, 10.0, 0.0, 1.0];
        let allowed = [false, false, false, true];
        assert_eq!(best_span(&start, &end, &allowed, 15).map(|(s, e, _)| (s, e)), Some((3, 3)));
    }

    #[test]
    fn nothing_allowed_means_no_span() {
        assert!(best_span(&[1.0, 2.0], &[1.0, 2.0], &[false, false], 15).is_none());
    }

    #[test]
    fn answer_serialises_in_field_order() {
        let answer = Answer {
            score: 0.5,
            start: 10,
            end: 14,
            answer: "Ohio".into(),
        };
        assert_eq!(
            serde_json::to_string(&answer).unwrap(),
            r#"{"score":0.5,"start":10,"end":14,"answer":"Ohio"}"#
        );
    }
}
