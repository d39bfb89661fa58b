use clap::Args;
use coach::pipelines::topic_classification_pipeline::TopicClassificationPipelineBuilder;

use super::Globals;

#[derive(Args)]
pub struct TopicArgs {
    /// BERTopic model saved with safetensors serialization.
    #[arg(short, long, default_value = "MaartenGr/BERTopic_Wikipedia")]
    model: String,

    /// Sentence encoder; defaults to the one the topic model was fitted with.
    #[arg(short, long)]
    embedding_model: Option<String>,

    #[arg(default_value = "Michael Jordan is the greatest basketball player of all time.")]
    content: String,
}

pub async fn run(args: TopicArgs, globals: &Globals) -> anyhow::Result<()> {
    let mut builder = TopicClassificationPipelineBuilder::new(&args.model);
    if let Some(model) = &args.embedding_model {
        builder = builder.embedding_model(model);
    }
    let pipeline = globals.on_device(builder).build().await?;

    let prediction = pipeline.classify(&args.content)?;
    tracing::debug!(topic = prediction.topic, "predicted topic");
    println!("{} {}", prediction.label, prediction.probability);
    Ok(())
}
