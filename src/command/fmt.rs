use clap::Args;
use tracing::info;

use crate::{context::Context, entity::Envelope, source::Source, utils::write_atomic};

use super::Command;

#[derive(Args, Clone, Debug)]
pub struct FmtArgs {
    /// The sidebar script to format: a path, a URL, or `-` for stdin.
    source: Source,
    /// Do not print anything; fail if the formatted script differs from the input.
    #[arg(long, default_value = "false")]
    check: bool,
    /// Rewrite the source file in place instead of printing.
    #[arg(short, long, default_value = "false", conflicts_with = "check")]
    write: bool,
    /// Emit the index in this wrapper instead of the one it was read with.
    #[arg(long, value_enum)]
    envelope: Option<Envelope>,
}

#[async_trait::async_trait]
impl Command for FmtArgs {
    async fn run(&self, context: &mut Context) -> anyhow::Result<()> {
        if self.write && !matches!(self.source, Source::Path(_)) {
            anyhow::bail!("--write needs a file path, got {}", self.source);
        }

        let original = context.read_source(&self.source).await?;
        let mut doc = context.load_document_from_text(&self.source, &original)?;
        if let Some(envelope) = self.envelope {
            doc = doc.with_envelope(envelope);
        }
        let formatted = doc.render()?;

        if self.check {
            if formatted != original {
                anyhow::bail!("{} is not in canonical form", self.source);
            }
            return Ok(());
        }

        if let (true, Source::Path(path)) = (self.write, &self.source) {
            if formatted != original {
                write_atomic(path, &formatted).await?;
                info!(path = %path.display(), "rewrote sidebar script");
            }
            return Ok(());
        }

        print!("{}", formatted);
        Ok(())
    }
}
