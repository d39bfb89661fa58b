use clap::Args;
use coach::pipelines::summarization_pipeline::SummarizationPipelineBuilder;
use coach::ModelSource;

use super::{data, Globals};

#[derive(Args)]
pub struct SummarizeArgs {
    /// Output directory of the fine-tuning run.
    #[arg(long, default_value = "team_legal")]
    directory: String,

    #[arg(long, default_value = "2000")]
    checkpoint: String,

    /// Use this hub id or directory instead of the checkpoint.
    #[arg(long)]
    model: Option<String>,

    #[arg(default_value = data::DEFAULT_BILL, hide_default_value = true)]
    content: String,
}

pub async fn run(args: SummarizeArgs, globals: &Globals) -> anyhow::Result<()> {
    let builder = match &args.model {
        Some(model) => SummarizationPipelineBuilder::t5(ModelSource::parse(model)),
        None => SummarizationPipelineBuilder::checkpoint(&args.directory, &args.checkpoint),
    };
    let pipeline = globals.on_device(builder).build().await?;

    match pipeline.summarize(&args.content)? {
        Some(summary) => println!("{summary}"),
        None => println!("no summary found"),
    }
    Ok(())
}
