use std::collections::BTreeSet;

use serde::Serialize;

use super::similarity::dot_score;
use crate::pipelines::embedding_pipeline::{EmbeddingModel, EmbeddingPipeline};

/// A best-scoring example phrase and the intent it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntentMatch {
    pub score: f32,
    pub intent: String,
    pub phrase: String,
}

/// Intents, each described by a set of example phrases.
///
/// Intents keep their insertion order. A phrase may belong to more than one
/// intent.
#[derive(Debug, Clone, Default)]
pub struct IntentLibrary {
    intents: Vec<(String, BTreeSet<String>)>,
}

impl IntentLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `phrases` to `intent`, creating the intent if needed.
    pub fn with_intent<I, S>(mut self, intent: &str, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases = phrases.into_iter().map(Into::into);
        match self.intents.iter_mut().find(|(name, _)| name == intent) {
            Some((_, existing)) => existing.extend(phrases),
            None => self.intents.push((intent.to_string(), phrases.collect())),
        }
        self
    }

    pub fn intents(&self) -> impl Iterator<Item = &str> {
        self.intents.iter().map(|(name, _)| name.as_str())
    }

    /// Every example phrase, intent by intent.
    pub fn phrases(&self) -> Vec<&str> {
        self.intents
            .iter()
            .flat_map(|(_, phrases)| phrases.iter().map(String::as_str))
            .collect()
    }

    fn intents_for<'a>(&'a self, phrase: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.intents
            .iter()
            .filter(move |(_, phrases)| phrases.contains(phrase))
            .map(|(name, _)| name.as_str())
    }

    /// Every `(score, intent, phrase)` whose score equals the best score.
    ///
    /// `scores` is aligned with [`IntentLibrary::phrases`].
    pub fn best_matches(&self, scores: &[f32]) -> Vec<IntentMatch> {
        let phrases = self.phrases();
        let Some(top) = scores.iter().copied().reduce(f32::max) else {
            return Vec::new();
        };

        let mut matches: Vec<IntentMatch> = Vec::new();
        for (phrase, &score) in phrases.iter().zip(scores) {
            if score < top {
                continue;
            }
            for intent in self.intents_for(phrase) {
                let candidate = IntentMatch {
                    score,
                    intent: intent.to_string(),
                    phrase: phrase.to_string(),
                };
                if !matches.contains(&candidate) {
                    matches.push(candidate);
                }
            }
        }
        matches
    }

    /// Embed the query and every phrase, and return the best matches by dot score.
    pub fn get_intent<M: EmbeddingModel>(
        &self,
        query: &str,
        pipeline: &EmbeddingPipeline<M>,
    ) -> anyhow::Result<Vec<IntentMatch>> {
        let query_embedding = pipeline.embed(query)?;
        let phrase_embeddings = pipeline.embed_batch(&self.phrases())?;
        let scores = dot_score(&query_embedding, &phrase_embeddings)?;
        tracing::debug!(?scores, "intent phrase scores");
        Ok(self.best_matches(&scores))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> IntentLibrary {
        IntentLibrary::new()
            .with_intent("TRAVEL", ["Dribble the ball to the other side of the court."])
            .with_intent(
                "PASS",
                [
                    "Pass the ball to your teammate.",
                    "Pass the ball to the player on your left.",
                ],
            )
            .with_intent("SHOOT", ["Attempt a free throw."])
    }

    #[test]
    fn phrases_follow_intent_order() {
        let library = library();
        let phrases = library.phrases();
        assert_eq!(phrases.len(), 4);
        assert_eq!(phrases[0], "Dribble the ball to the other side of the court.");
        assert_eq!(phrases[3], "Attempt a free throw.");
        assert_eq!(library.intents().collect::<Vec<_>>(), vec!["TRAVEL", "PASS", "SHOOT"]);
    }

    #[test]
    fn single_best_match() {
        let matches = library().best_matches(&[0.1, 0.2, 0.7, 0.3]);
        assert_eq!(
            matches,
            vec![IntentMatch {
                score: 0.7,
                intent: "PASS".into(),
                phrase: "Pass the ball to your teammate.".into(),
            }]
        );
    }

    #[test]
    fn ties_return_every_top_phrase() {
        let matches = library().best_matches(&[0.5, 0.1, 0.2, 0.5]);
        let intents: Vec<&str> = matches.iter().map(|m| m.intent.as_str()).collect();
        assert_eq!(intents, vec!["TRAVEL", "SHOOT"]);
    }

    #[test]
    fn phrase_shared_by_two_intents() {
        let library = IntentLibrary::new()
            .with_intent("PASS", ["Get the ball to Jordan."])
            .with_intent("ISOLATION", ["Get the ball to Jordan."]);
        let matches = library.best_matches(&[0.9, 0.9]);
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.phrase == "Get the ball to Jordan."));
    }

    #[test]
    fn empty_library_has_no_matches() {
        assert!(IntentLibrary::new().best_matches(&[]).is_empty());
    }
}
