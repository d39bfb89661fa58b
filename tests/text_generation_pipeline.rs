use coach::pipelines::text_generation_pipeline::*;
use coach::{CoachError, Message};

const SUPPORTED: [&str; 3] = ["llama3", "llama3:8b", "llama3:70b"];

#[tokio::test]
async fn unsupported_model_is_rejected_before_any_request() {
    // Nothing listens here; a request would fail with a different error.
    let result = TextGenerationPipelineBuilder::ollama("mistral")
        .supported_models(SUPPORTED)
        .host("http://127.0.0.1:9")
        .build()
        .await;

    let err = result.err().expect("mistral is not supported");
    assert!(matches!(
        err.downcast_ref::<CoachError>(),
        Some(CoachError::UnsupportedModel { model, .. }) if model == "mistral"
    ));
    assert!(err.to_string().contains("llama3, llama3:8b, llama3:70b"));
}

#[test]
fn llama3_prompt_ends_with_an_open_assistant_turn() -> anyhow::Result<()> {
    let prompt = ChatTemplate::llama3()?.render(&[
        Message::system("Give a one or two word answers only."),
        Message::user("What is capital of America?"),
    ])?;
    assert!(prompt.starts_with("<|begin_of_text|>"));
    assert!(prompt.ends_with("<|start_header_id|>assistant<|end_header_id|>\n\n"));
    Ok(())
}

#[tokio::test]
#[ignore = "needs an Ollama daemon with llama3"]
async fn short_answer_from_llama3() -> anyhow::Result<()> {
    let pipeline = TextGenerationPipelineBuilder::ollama("llama3")
        .supported_models(SUPPORTED)
        .temperature(0.0)
        .build()
        .await?;

    let answer = pipeline
        .completion(&[
            Message::system("Give a one or two word answers only."),
            Message::user("What is capital of America?"),
        ])
        .await?;
    assert!(answer.contains("Washington"));
    assert!(!answer.contains("<|eot_id|>"));
    Ok(())
}
