use clap::Args;
use coach::pipelines::ner_pipeline::NerPipelineBuilder;

use super::Globals;

#[derive(Args)]
pub struct EntitiesArgs {
    /// Token classification model with BIO labels.
    #[arg(short, long, default_value = "dslim/bert-base-NER")]
    model: String,

    #[arg(default_value = "Michael Jordan is the greatest basketball player of all time.")]
    content: String,
}

pub async fn run(args: EntitiesArgs, globals: &Globals) -> anyhow::Result<()> {
    let pipeline = globals
        .on_device(NerPipelineBuilder::bert(&args.model))
        .build()
        .await?;

    let entities = pipeline.extract(&args.content)?;
    if entities.is_empty() {
        println!("no entities found");
    }
    for entity in entities {
        println!("{:.3} {} {}", entity.score, entity.label, entity.span);
    }
    Ok(())
}
