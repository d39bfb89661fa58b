use coach::pipelines::embedding_pipeline::*;
use coach::pipelines::semantic_search::*;

fn plays() -> IntentLibrary {
    IntentLibrary::new()
        .with_intent("TRAVEL", ["Dribble the ball to the other side of the court."])
        .with_intent(
            "PASS",
            [
                "Pass the ball to your teammate.",
                "Pass the ball to the player on your left.",
                "Pass the ball to the player on your right.",
            ],
        )
        .with_intent(
            "SHOOT",
            [
                "Shoot the ball into the hoop.",
                "Attempt a free throw.",
                "Attempt to dunk the ball into the hoop.",
            ],
        )
}

#[test]
fn index_round_trips_through_disk() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let docs = dir.path().join("team_messages.json");
    let csv = dir.path().join("team_messages_embeddings.csv");

    let index = DocumentIndex::new(
        vec!["A layup is a two-point shot.".into(), "The shot clock is 24 seconds.".into()],
        vec![vec![0.6, 0.8, 0.0], vec![0.0, 0.0, 1.0]],
    )?;
    index.save(&docs, &csv)?;

    let loaded = DocumentIndex::load(&docs, &csv)?;
    assert_eq!(loaded.documents(), index.documents());

    let hits = loaded.search(&[0.0, 0.1, 2.0], 5)?;
    assert_eq!(hits[0].1, "The shot clock is 24 seconds.");
    assert!(hits[0].0.score > hits[1].0.score);
    Ok(())
}

#[test]
fn truncated_csv_is_rejected() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let docs = dir.path().join("docs.json");
    let csv = dir.path().join("embeddings.csv");
    std::fs::write(&docs, r#"["one", "two"]"#)?;
    std::fs::write(&csv, "0,1\n0.1,0.2\n")?;

    let err = DocumentIndex::load(&docs, &csv).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<coach::CoachError>(),
        Some(coach::CoachError::InvalidEmbeddings(_))
    ));
    Ok(())
}

#[tokio::test]
#[ignore = "downloads multi-qa-MiniLM-L6-cos-v1"]
async fn pass_message_ranks_the_pass_play_first() -> anyhow::Result<()> {
    let embedder =
        EmbeddingPipelineBuilder::sentence_transformer("sentence-transformers/multi-qa-MiniLM-L6-cos-v1")
            .build()
            .await?;
    let search = SemanticSearchPipeline::new(&embedder);

    let docs = ["Pass the ball to someone else.", "Take a 2 point shot", "Take a 3 point shot"];
    let ranked = search.rank_documents("Pass the ball to John when he is near the basket.", &docs)?;
    assert_eq!(ranked[0].0, "Pass the ball to someone else.");
    assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
    Ok(())
}

#[tokio::test]
#[ignore = "downloads multi-qa-MiniLM-L6-cos-v1"]
async fn free_throw_is_a_shot() -> anyhow::Result<()> {
    let embedder =
        EmbeddingPipelineBuilder::sentence_transformer("sentence-transformers/multi-qa-MiniLM-L6-cos-v1")
            .build()
            .await?;
    let matches = plays().get_intent("Go to the line and shoot a free throw.", &embedder)?;
    assert!(!matches.is_empty());
    assert_eq!(matches[0].intent, "SHOOT");
    Ok(())
}
