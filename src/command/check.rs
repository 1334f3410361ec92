use clap::Args;

use crate::{
    context::Context,
    entity::{Envelope, Policy, SidebarDocument},
    error::{list_violations, ParseError},
    source::Source,
};

use super::Command;

#[derive(Args, Clone, Debug)]
pub struct CheckArgs {
    /// The sidebar script to check: a path, a URL, or `-` for stdin.
    source: Source,
}

pub fn summarize(doc: &SidebarDocument) -> String {
    let envelope = match doc.envelope {
        Envelope::InitCall => "initSidebarItems(...)",
        Envelope::Window => "window.SIDEBAR_ITEMS",
        Envelope::Bare => "bare JSON",
    };
    format!(
        "{} items in {} categories ({})",
        doc.index.len(),
        doc.index.sections().len(),
        envelope
    )
}

/// The text `check` prints for `source`, and how many problems it lists.
fn report(source: &Source, text: &str, policy: Policy) -> anyhow::Result<(String, usize)> {
    match SidebarDocument::parse(text, policy) {
        Ok(doc) => Ok((format!("{}: ok, {}", source, summarize(&doc)), 0)),
        Err(ParseError::Invalid(violations)) => Ok((
            format!("{}:\n{}", source, list_violations(&violations)),
            violations.len(),
        )),
        Err(e) => Err(anyhow::anyhow!("{}: {}", source, e)),
    }
}

#[async_trait::async_trait]
impl Command for CheckArgs {
    async fn run(&self, context: &mut Context) -> anyhow::Result<()> {
        let text = context.read_source(&self.source).await?;
        let (report, problems) = report(&self.source, &text, context.policy())?;
        println!("{}", report);
        if problems > 0 {
            anyhow::bail!("{} problem(s) found in {}", problems, self.source);
        }
        Ok(())
    }
}
