use coach::pipelines::topic_classification_pipeline::*;

#[tokio::test]
#[ignore = "downloads BERTopic_Wikipedia and its sentence encoder"]
async fn jordan_is_about_basketball() -> anyhow::Result<()> {
    let pipeline = TopicClassificationPipelineBuilder::new("MaartenGr/BERTopic_Wikipedia")
        .build()
        .await?;
    assert!(pipeline.topic_model().num_topics() > 100);

    let prediction =
        pipeline.classify("Michael Jordan is the greatest basketball player of all time.")?;
    assert!(prediction.topic >= 0);
    assert!(prediction.label.to_lowercase().contains("basketball"));
    assert!(prediction.probability > 0.0);
    Ok(())
}
