use coach::pipelines::question_answering_pipeline::*;
use coach::ModelSource;

const CONTEXT: &str = "According to this narrative, shortly after the birth of young prince Gautama, \
an astrologer named Asita visited the young prince's father, Suddhodana, and prophesied that \
Siddhartha would either become a great king or renounce the material world to become a holy man.";

#[test]
fn best_span_respects_context_and_length() {
    // Question tokens (0..3) score highest but are not part of the context.
    let start = [9.0, 9.0, 9.0, 0.0, 5.0, 0.0, 0.0];
    let end = [9.0, 9.0, 9.0, 0.0, 0.0, 4.0, 6.0];
    let allowed = [false, false, false, true, true, true, true];

    let (s, e, score) = best_span(&start, &end, &allowed, 2).unwrap();
    assert_eq!((s, e), (4, 5));
    assert!(score > 0.0 && score <= 1.0);

    let (_, e, _) = best_span(&start, &end, &allowed, MAX_ANSWER_LEN).unwrap();
    assert_eq!(e, 6);
}

#[tokio::test]
#[ignore = "downloads distilbert-base-cased-distilled-squad"]
async fn finds_the_astrologer() -> anyhow::Result<()> {
    let pipeline = QuestionAnsweringPipelineBuilder::distilbert(ModelSource::hub(
        "distilbert/distilbert-base-cased-distilled-squad",
    ))
    .build()
    .await?;

    let answer = pipeline.answer(
        "What was the name of the astrologer that visited Gautama's father?",
        CONTEXT,
    )?;
    assert_eq!(answer.answer, "Asita");
    assert_eq!(&CONTEXT[answer.start..answer.end], "Asita");
    Ok(())
}

#[tokio::test]
async fn missing_checkpoint_is_reported() {
    let result = QuestionAnsweringPipelineBuilder::checkpoint("no_such_run", "1500")
        .cpu()
        .build()
        .await;
    let err = result.err().expect("checkpoint directory does not exist");
    assert!(err.to_string().contains("checkpoint-1500"));
}
