use clap::{Args, ValueEnum};

use crate::{
    context::Context,
    entity::{diff, Change},
    source::Source,
};

use super::Command;

#[derive(ValueEnum, Clone, Debug, Copy)]
enum DiffFormat {
    Text,
    Json,
}

#[derive(Args, Clone, Debug)]
pub struct DiffArgs {
    /// The older sidebar script.
    old: Source,
    /// The newer sidebar script.
    new: Source,
    /// Exit with an error if the indexes differ.
    #[arg(long, default_value = "false")]
    exit_code: bool,
    /// The output format.
    #[arg(long, default_value = "text", value_enum)]
    format: DiffFormat,
}

fn describe(change: &Change<'_>) -> String {
    match change {
        Change::Added { category, name, .. } => format!("+ {} {}", category, name),
        Change::Removed { category, name, .. } => format!("- {} {}", category, name),
        Change::Reworded {
            category,
            name,
            before,
            after,
        } => format!("~ {} {}: {:?} -> {:?}", category, name, before, after),
    }
}

#[async_trait::async_trait]
impl Command for DiffArgs {
    async fn run(&self, context: &mut Context) -> anyhow::Result<()> {
        let old = context.load_document(&self.old).await?;
        let new = context.load_document(&self.new).await?;
        let changes = diff(&old.index, &new.index);

        match self.format {
            DiffFormat::Text => {
                for change in &changes {
                    println!("{}", describe(change));
                }
            }
            DiffFormat::Json => println!("{}", serde_json::to_string_pretty(&changes)?),
        }

        if self.exit_code && !changes.is_empty() {
            anyhow::bail!("{} change(s) between {} and {}", changes.len(), self.old, self.new);
        }
        Ok(())
    }
}
