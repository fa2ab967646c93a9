//! Synthesizes the provisioning template for the route demo.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use georoute_cli::{init_tracing, write_output};
use georoute_stack::{Stack, StackContext, API_KEY_NAME_CONTEXT};

/// Print the CloudFormation template for the map key, identity pool and route role
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Stack name
    #[arg(long, default_value = "GeoRouteDemoStack")]
    stack_name: String,

    /// Name of the map API key
    #[arg(long)]
    api_key_name: Option<String>,

    /// Context entries as key=value, e.g. apiKeyName=MyKey
    #[arg(long = "context", short = 'c')]
    context: Vec<String>,

    /// Write the template here instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(false);

    let mut context = StackContext::from_pairs(&args.context)?;
    if let Some(name) = args.api_key_name {
        context = context.with(API_KEY_NAME_CONTEXT, name);
    }
    let stack = Stack::new(args.stack_name, &context);
    stack
        .verify_least_privilege()
        .context("stack declaration is over-privileged")?;

    let template = stack.to_template_string()?;
    write_output(&template, args.output.as_deref())?;

    tracing::info!(stack = %stack.name, key = %stack.api_key.key_name, "template synthesized");
    Ok(())
}
