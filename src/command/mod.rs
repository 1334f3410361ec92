use crate::context::Context;

pub mod check;
pub mod diff;
pub mod fmt;
pub mod list;
mod output;
pub mod search;
pub mod show;

#[async_trait::async_trait]
pub trait Command {
    /// Run the command.
    async fn run(&self, context: &mut Context) -> anyhow::Result<()>;
}
