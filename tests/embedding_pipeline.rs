use coach::pipelines::embedding_pipeline::*;

const MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

#[tokio::test]
#[ignore = "downloads all-MiniLM-L6-v2"]
async fn basic_embedding() -> anyhow::Result<()> {
    let pipeline = EmbeddingPipelineBuilder::sentence_transformer(MODEL)
        .build()
        .await?;
    let emb = pipeline.embed("Pass the ball to someone else.")?;
    assert_eq!(emb.len(), 384);

    let norm = emb.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-4);
    Ok(())
}

#[tokio::test]
#[ignore = "downloads all-MiniLM-L6-v2"]
async fn batch_matches_single() -> anyhow::Result<()> {
    let pipeline = EmbeddingPipelineBuilder::sentence_transformer(MODEL)
        .cpu()
        .build()
        .await?;
    assert!(pipeline.device().is_cpu());

    let texts = ["Take a 2 point shot", "Pass the ball to your teammate on the left wing."];
    let batch = pipeline.embed_batch(&texts)?;
    let single = pipeline.embed(texts[0])?;
    for (a, b) in batch[0].iter().zip(&single) {
        assert!((a - b).abs() < 1e-4);
    }
    Ok(())
}
