use clap::ValueEnum;
use serde::Serialize;
use stanza::{
    renderer::{console::Console, Renderer as _},
    style::{Header, Styles},
    table::{Row, Table},
};

use crate::entity::{Category, Item};

#[derive(ValueEnum, Clone, Debug, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Table,
}

/// An item as it is printed by `list`, `search` and `show`.
#[derive(Debug, Serialize)]
pub struct Listing<'a> {
    pub category: Category,
    pub name: &'a str,
    pub summary: &'a str,
    pub page: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
}

impl<'a> Listing<'a> {
    pub fn new(category: Category, item: &'a Item) -> Self {
        Self {
            category,
            name: &item.name,
            summary: &item.summary,
            page: category.page(&item.name),
            score: None,
        }
    }

    pub fn with_score(self, score: i64) -> Self {
        Self {
            score: Some(score),
            ..self
        }
    }
}

pub trait Outputs {
    fn output(&self, listings: &[Listing<'_>]) -> anyhow::Result<()>;
}

struct TextOutput;

impl Outputs for TextOutput {
    fn output(&self, listings: &[Listing<'_>]) -> anyhow::Result<()> {
        for listing in listings {
            println!("{}\t{}\t{}", listing.category, listing.name, listing.summary);
        }
        Ok(())
    }
}

struct JsonOutput;

impl Outputs for JsonOutput {
    fn output(&self, listings: &[Listing<'_>]) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(listings)?);
        Ok(())
    }
}

struct TableOutput;

pub fn render_table(header: Vec<String>, rows: Vec<Vec<String>>) -> String {
    let mut table = Table::default().with_row(Row::new(
        Styles::default().with(Header(true)),
        header.into_iter().map(Into::into).collect(),
    ));
    for row in rows {
        table.push_row(row);
    }
    Console::default().render(&table)
}

impl Outputs for TableOutput {
    fn output(&self, listings: &[Listing<'_>]) -> anyhow::Result<()> {
        let scored = listings.iter().any(|l| l.score.is_some());
        let mut header = vec!["Category".to_string(), "Name".into(), "Summary".into()];
        if scored {
            header.push("Score".into());
        }
        let rows = listings
            .iter()
            .map(|listing| {
                let mut row = vec![
                    listing.category.to_string(),
                    listing.name.to_string(),
                    listing.summary.to_string(),
                ];
                if scored {
                    row.push(listing.score.map(|s| s.to_string()).unwrap_or_default());
                }
                row
            })
            .collect();
        println!("{}", render_table(header, rows));
        Ok(())
    }
}

impl OutputFormat {
    pub fn to_output(self) -> Box<dyn Outputs> {
        match self {
            OutputFormat::Text => Box::new(TextOutput),
            OutputFormat::Json => Box::new(JsonOutput),
            OutputFormat::Table => Box::new(TableOutput),
        }
    }
}
