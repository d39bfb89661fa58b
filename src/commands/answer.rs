use clap::Args;
use coach::pipelines::question_answering_pipeline::QuestionAnsweringPipelineBuilder;
use coach::ModelSource;

use super::{data, Globals};

#[derive(Args)]
pub struct AnswerArgs {
    /// Output directory of the fine-tuning run.
    #[arg(long, default_value = "team_knowledge_base")]
    directory: String,

    #[arg(long, default_value = "1500")]
    checkpoint: String,

    /// Use this hub id or directory instead of the checkpoint.
    #[arg(long)]
    model: Option<String>,

    #[arg(default_value = data::DEFAULT_QUESTION)]
    question: String,

    #[arg(default_value = data::DEFAULT_CONTEXT, hide_default_value = true)]
    context: String,
}

pub async fn run(args: AnswerArgs, globals: &Globals) -> anyhow::Result<()> {
    let builder = match &args.model {
        Some(model) => QuestionAnsweringPipelineBuilder::distilbert(ModelSource::parse(model)),
        None => QuestionAnsweringPipelineBuilder::checkpoint(&args.directory, &args.checkpoint),
    };
    let pipeline = globals.on_device(builder).build().await?;

    let answer = pipeline.answer(&args.question, &args.context)?;
    println!("{}", serde_json::to_string(&answer)?);
    Ok(())
}
