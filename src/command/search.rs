use clap::{Args, ValueEnum};
use fuzzy_matcher::FuzzyMatcher;

use crate::{
    context::Context,
    entity::{Category, SidebarIndex},
    source::Source,
};

use super::{
    output::{Listing, OutputFormat},
    Command,
};

#[derive(ValueEnum, Clone, Debug, Copy)]
enum Matcher {
    SkimMatcherV1,
    SkimMatcherV2,
    Clangd,
}

#[derive(Args, Clone, Debug)]
pub struct SearchArgs {
    /// The matcher to use.
    #[arg(long, default_value = "skim-matcher-v2", value_enum)]
    matcher: Matcher,
    /// The sidebar script to search: a path, a URL, or `-` for stdin.
    source: Source,
    /// The query to search.
    keyword: String,
    /// Only search items of this category.
    #[arg(short, long, value_enum)]
    category: Option<Category>,
    /// Print at most this many results.
    #[arg(short, long)]
    limit: Option<usize>,
    /// The output format.
    #[arg(long, default_value = "text", value_enum)]
    format: OutputFormat,
}

impl Matcher {
    fn to_matcher(self) -> Box<dyn FuzzyMatcher> {
        match self {
            #[allow(deprecated)]
            Matcher::SkimMatcherV1 => Box::new(fuzzy_matcher::skim::SkimMatcher::default()),
            Matcher::SkimMatcherV2 => Box::new(fuzzy_matcher::skim::SkimMatcherV2::default()),
            Matcher::Clangd => Box::new(fuzzy_matcher::clangd::ClangdMatcher::default()),
        }
    }
}

/// Items whose name matches `keyword`, best score first. Ties keep index order.
fn rank<'a>(
    index: &'a SidebarIndex,
    matcher: &dyn FuzzyMatcher,
    keyword: &str,
    only: Option<Category>,
) -> Vec<Listing<'a>> {
    let mut found = index
        .items()
        .filter(|(category, _)| only.map_or(true, |c| c == *category))
        .filter_map(|(category, item)| {
            matcher
                .fuzzy_match(&item.name, keyword)
                .map(|score| Listing::new(category, item).with_score(score))
        })
        .collect::<Vec<_>>();
    found.sort_by_key(|listing| std::cmp::Reverse(listing.score));
    found
}

#[async_trait::async_trait]
impl Command for SearchArgs {
    async fn run(&self, context: &mut Context) -> anyhow::Result<()> {
        let doc = context.load_document(&self.source).await?;
        let matcher = self.matcher.to_matcher();
        let mut found = rank(&doc.index, matcher.as_ref(), &self.keyword, self.category);
        if let Some(limit) = self.limit {
            found.truncate(limit);
        }

        let outputs = self.format.to_output();
        outputs.output(&found)
    }
}
