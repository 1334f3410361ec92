use clap::ValueEnum;
use serde::Serialize;

use crate::error::ParseError;

use super::{Policy, SidebarIndex};

/// The JavaScript statement a sidebar index is wrapped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Envelope {
    /// `initSidebarItems({...});`
    InitCall,
    /// `window.SIDEBAR_ITEMS = {...};`
    Window,
    /// The JSON object on its own.
    Bare,
}

impl Envelope {
    fn affixes(self) -> (&'static str, &'static str) {
        match self {
            Envelope::InitCall => ("initSidebarItems(", ");"),
            Envelope::Window => ("window.SIDEBAR_ITEMS = ", ";"),
            Envelope::Bare => ("", ""),
        }
    }

    /// Recognise the envelope of `text` and return it with the JSON payload.
    pub fn detect(text: &str) -> Result<(Self, &str), ParseError> {
        for envelope in [Envelope::InitCall, Envelope::Window] {
            let (prefix, suffix) = envelope.affixes();
            if let Some(payload) = text
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_suffix(suffix))
            {
                return Ok((envelope, payload));
            }
        }
        if text.starts_with('{') {
            return Ok((Envelope::Bare, text));
        }
        Err(ParseError::UnrecognizedEnvelope)
    }

    pub fn wrap(self, json: &str) -> String {
        let (prefix, suffix) = self.affixes();
        format!("{}{}{}", prefix, json, suffix)
    }
}

/// A parsed sidebar script: the index plus what is needed to write it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarDocument {
    pub envelope: Envelope,
    pub index: SidebarIndex,
    trailing_newline: bool,
}

impl SidebarDocument {
    pub fn parse(text: &str, policy: Policy) -> Result<Self, ParseError> {
        let (body, trailing_newline) = match text.strip_suffix('\n') {
            Some(body) => (body, true),
            None => (text, false),
        };
        let (envelope, payload) = Envelope::detect(body)?;
        let index = SidebarIndex::parse(payload, policy)?;
        Ok(Self {
            envelope,
            index,
            trailing_newline,
        })
    }

    pub fn with_envelope(self, envelope: Envelope) -> Self {
        Self { envelope, ..self }
    }

    /// Write the document back out. Canonical input comes back byte-for-byte.
    pub fn render(&self) -> Result<String, serde_json::Error> {
        let mut out = self.envelope.wrap(&self.index.to_json()?);
        if self.trailing_newline {
            out.push('\n');
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entity::fixture::{sidebar_script, DYNASMRT_INDEX};

    #[test]
    fn init_call_round_trips() {
        let script = sidebar_script();
        let doc = SidebarDocument::parse(&script, Policy::default()).unwrap();
        assert_eq!(doc.envelope, Envelope::InitCall);
        assert_eq!(doc.render().unwrap(), script);

        let with_newline = format!("{}\n", script);
        let doc = SidebarDocument::parse(&with_newline, Policy::default()).unwrap();
        assert_eq!(doc.render().unwrap(), with_newline);
    }

    #[test]
    fn small_index_round_trips() {
        let script = r#"initSidebarItems({"enum":[["DynasmError","..."]]});"#;
        let policy = Policy {
            require_all_categories: false,
        };
        let doc = SidebarDocument::parse(script, policy).unwrap();
        assert_eq!(doc.render().unwrap(), script);
    }

    #[test]
    fn detects_window_and_bare_forms() {
        let window = format!("window.SIDEBAR_ITEMS = {};", DYNASMRT_INDEX);
        let doc = SidebarDocument::parse(&window, Policy::default()).unwrap();
        assert_eq!(doc.envelope, Envelope::Window);
        assert_eq!(doc.render().unwrap(), window);

        let doc = SidebarDocument::parse(DYNASMRT_INDEX, Policy::default()).unwrap();
        assert_eq!(doc.envelope, Envelope::Bare);
        assert_eq!(doc.render().unwrap(), DYNASMRT_INDEX);
    }

    #[test]
    fn converts_between_envelopes() {
        let doc = SidebarDocument::parse(&sidebar_script(), Policy::default())
            .unwrap()
            .with_envelope(Envelope::Window);
        assert_eq!(
            doc.render().unwrap(),
            format!("window.SIDEBAR_ITEMS = {};", DYNASMRT_INDEX)
        );
    }

    #[test]
    fn non_canonical_json_is_normalized() {
        let script = "initSidebarItems({ \"enum\": [ [\"DynasmError\", \"\"] ] });";
        let policy = Policy {
            require_all_categories: false,
        };
        let doc = SidebarDocument::parse(script, policy).unwrap();
        assert_eq!(
            doc.render().unwrap(),
            r#"initSidebarItems({"enum":[["DynasmError",""]]});"#
        );
    }

    #[test]
    fn rejects_unknown_wrappers() {
        for text in ["searchIndex = {};", "initSidebarItems({})", "  {}", ""] {
            assert!(matches!(
                SidebarDocument::parse(text, Policy::default()),
                Err(ParseError::UnrecognizedEnvelope)
            ));
        }
    }
}
