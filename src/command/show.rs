use std::io::stdout;

use clap::Args;

use crate::{
    context::Context,
    entity::{Category, SidebarIndex},
    source::Source,
};

use super::{
    output::{Listing, OutputFormat},
    Command,
};

#[derive(Args, Clone, Debug)]
pub struct ShowArgs {
    /// The sidebar script to look in: a path, a URL, or `-` for stdin.
    source: Source,
    /// The exact item name.
    name: String,
    /// Only look in this category.
    #[arg(short, long, value_enum)]
    category: Option<Category>,
    /// The output format.
    #[arg(long, default_value = "text", value_enum)]
    format: OutputFormat,
}

fn lookup<'a>(index: &'a SidebarIndex, name: &'a str, only: Option<Category>) -> Vec<Listing<'a>> {
    index
        .find(name)
        .filter(|(category, _)| only.map_or(true, |c| c == *category))
        .map(|(category, item)| Listing::new(category, item))
        .collect()
}

fn print_card(listing: &Listing<'_>, bold: bool) {
    if bold {
        println!(
            "{}{}{} ({})",
            termion::style::Bold,
            listing.name,
            termion::style::Reset,
            listing.category.label()
        );
    } else {
        println!("{} ({})", listing.name, listing.category.label());
    }
    println!("  page: {}", listing.page);
    if !listing.summary.is_empty() {
        println!("  {}", listing.summary);
    }
}

#[async_trait::async_trait]
impl Command for ShowArgs {
    async fn run(&self, context: &mut Context) -> anyhow::Result<()> {
        let doc = context.load_document(&self.source).await?;
        let found = lookup(&doc.index, &self.name, self.category);
        if found.is_empty() {
            anyhow::bail!("item {} not found in {}", self.name, self.source);
        }

        match self.format {
            OutputFormat::Text => {
                let bold = termion::is_tty(&stdout());
                for listing in &found {
                    print_card(listing, bold);
                }
                Ok(())
            }
            format => format.to_output().output(&found),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{fixture::DYNASMRT_INDEX, Policy};

    #[test]
    fn finds_exact_names_only() {
        let index = SidebarIndex::parse(DYNASMRT_INDEX, Policy::default()).unwrap();
        let found = lookup(&index, "Executor", None);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].page, "struct.Executor.html");

        assert!(lookup(&index, "executor", None).is_empty());
        assert!(lookup(&index, "Executor", Some(Category::Trait)).is_empty());
    }
}
