use coach::pipelines::summarization_pipeline::*;
use coach::ModelSource;

#[test]
fn task_prefix_is_added_once() {
    assert_eq!(with_task_prefix("Amends the Act."), "summarize: Amends the Act.");
    assert_eq!(with_task_prefix("summarize: Amends the Act."), "summarize: Amends the Act.");
}

#[tokio::test]
#[ignore = "downloads t5-small"]
async fn summarizes_a_bill() -> anyhow::Result<()> {
    let pipeline = SummarizationPipelineBuilder::t5(ModelSource::hub("google-t5/t5-small"))
        .max_length(40)
        .min_length(5)
        .build()
        .await?;

    let summary = pipeline.summarize(
        "The Marine and Hydrokinetic Renewable Energy Promotion Act of 2011 amends the \
         Energy Independence and Security Act of 2007 to expand the research, development, \
         demonstration and commercial application program for marine renewable energy.",
    )?;
    let summary = summary.expect("t5-small always produces some text");
    assert!(!summary.is_empty());
    assert!(summary.split_whitespace().count() <= 40);
    Ok(())
}
