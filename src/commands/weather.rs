use clap::Args;
use coach::pipelines::agent_pipeline::{AgentPipelineBuilder, WeatherLookupTool};

use super::Globals;

#[derive(Args)]
pub struct WeatherArgs {
    /// An Ollama model with tool support.
    #[arg(short, long, default_value = "llama3.1")]
    model: String,

    #[arg(default_value = "Can you give me the weather in Dayton, Ohio?")]
    task: String,
}

pub async fn run(args: WeatherArgs, globals: &Globals) -> anyhow::Result<()> {
    let agent = AgentPipelineBuilder::ollama(&args.model)
        .ollama_config(globals.ollama.clone())
        .tool(WeatherLookupTool::new())
        .build()
        .await?;

    let response = agent.run(&args.task).await?;
    println!("Response: {response}");
    Ok(())
}
