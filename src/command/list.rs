use clap::Args;

use crate::{
    context::Context,
    entity::{Category, SidebarIndex},
    source::Source,
};

use super::{
    output::{render_table, Listing, OutputFormat},
    Command,
};

#[derive(Args, Clone, Debug)]
pub struct ListArgs {
    /// The sidebar script to list: a path, a URL, or `-` for stdin.
    source: Source,
    /// Only list items of this category.
    #[arg(short, long, value_enum)]
    category: Option<Category>,
    /// Print how many items each category holds instead of the items.
    #[arg(long, default_value = "false")]
    counts: bool,
    /// The output format.
    #[arg(long, default_value = "text", value_enum)]
    format: OutputFormat,
}

fn counts(index: &SidebarIndex, only: Option<Category>) -> Vec<(Category, usize)> {
    index
        .sections()
        .iter()
        .filter(|s| only.map_or(true, |c| c == s.category))
        .map(|s| (s.category, s.items.len()))
        .collect()
}

fn print_counts(counts: &[(Category, usize)], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for (category, count) in counts {
                println!("{}\t{}", category, count);
            }
        }
        OutputFormat::Json => {
            let object = counts
                .iter()
                .map(|(category, count)| (category.key().to_string(), serde_json::json!(count)))
                .collect::<serde_json::Map<_, _>>();
            println!("{}", serde_json::to_string_pretty(&object)?);
        }
        OutputFormat::Table => {
            let rows = counts
                .iter()
                .map(|(category, count)| vec![category.label().to_string(), count.to_string()])
                .collect();
            println!(
                "{}",
                render_table(vec!["Category".into(), "Items".into()], rows)
            );
        }
    }
    Ok(())
}

#[async_trait::async_trait]
impl Command for ListArgs {
    async fn run(&self, context: &mut Context) -> anyhow::Result<()> {
        let doc = context.load_document(&self.source).await?;

        if self.counts {
            return print_counts(&counts(&doc.index, self.category), self.format);
        }

        let listings = doc
            .index
            .items()
            .filter(|(category, _)| self.category.map_or(true, |c| c == *category))
            .map(|(category, item)| Listing::new(category, item))
            .collect::<Vec<_>>();
        self.format.to_output().output(&listings)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entity::{fixture::DYNASMRT_INDEX, Policy};

    #[test]
    fn counts_follow_section_order() {
        let index = SidebarIndex::parse(DYNASMRT_INDEX, Policy::default()).unwrap();
        assert_eq!(
            counts(&index, None),
            vec![
                (Category::Enum, 1),
                (Category::Macro, 2),
                (Category::Mod, 4),
                (Category::Struct, 6),
                (Category::Trait, 2),
            ]
        );
        assert_eq!(
            counts(&index, Some(Category::Struct)),
            vec![(Category::Struct, 6)]
        );
    }
}
