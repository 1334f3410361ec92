use serde::{ser::SerializeTuple, Serialize, Serializer};

/// A documented item: its name and one-line summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub summary: String,
}

impl Item {
    pub fn new(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
        }
    }
}

// Emitted as a `[name, summary]` pair, the shape the viewer expects.
impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut pair = serializer.serialize_tuple(2)?;
        pair.serialize_element(&self.name)?;
        pair.serialize_element(&self.summary)?;
        pair.end()
    }
}
