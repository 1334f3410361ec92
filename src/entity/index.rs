use std::{collections::HashSet, fmt};

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::Value as JsonValue;

use crate::error::{ParseError, Violation};

use super::{Category, Item};

/// Which structural rules an index must satisfy besides the always-on ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    /// Reject an index that does not list every one of the five categories.
    pub require_all_categories: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            require_all_categories: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub category: Category,
    pub items: Vec<Item>,
}

/// The category -> items table a rustdoc sidebar script registers.
///
/// Sections and items keep the order they had in the source so that
/// re-emitting an index reproduces it exactly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SidebarIndex {
    sections: Vec<Section>,
}

/// The top-level object as written, before any validation: keys in source
/// order, duplicates included.
struct RawIndex(Vec<(String, JsonValue)>);

impl<'de> Deserialize<'de> for RawIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawIndexVisitor;

        impl<'de> Visitor<'de> for RawIndexVisitor {
            type Value = RawIndex;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a sidebar index object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawIndex, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(Category::ALL.len()));
                while let Some(entry) = map.next_entry::<String, JsonValue>()? {
                    entries.push(entry);
                }
                Ok(RawIndex(entries))
            }
        }

        deserializer.deserialize_map(RawIndexVisitor)
    }
}

impl SidebarIndex {
    /// Parse the JSON object of a sidebar script and check its invariants.
    ///
    /// All violations are reported at once rather than stopping at the first.
    pub fn parse(json: &str, policy: Policy) -> Result<Self, ParseError> {
        let raw: RawIndex = serde_json::from_str(json)?;
        Self::validate(raw, policy).map_err(ParseError::Invalid)
    }

    fn validate(raw: RawIndex, policy: Policy) -> Result<Self, Vec<Violation>> {
        let mut violations = Vec::new();
        let mut seen_keys = HashSet::new();
        let mut sections = Vec::with_capacity(raw.0.len());

        for (key, value) in raw.0 {
            if !seen_keys.insert(key.clone()) {
                violations.push(Violation::DuplicateCategory(key));
                continue;
            }
            let Some(category) = Category::from_key(&key) else {
                violations.push(Violation::UnknownCategory(key));
                continue;
            };
            let JsonValue::Array(entries) = value else {
                violations.push(Violation::NotAList { key });
                continue;
            };

            let mut names = HashSet::new();
            let mut items = Vec::with_capacity(entries.len());
            // positions are 1-based
            for (position, entry) in (1..).zip(entries) {
                let Some(item) = entry_to_item(entry) else {
                    violations.push(Violation::MalformedEntry { category, position });
                    continue;
                };
                if item.name.is_empty() {
                    violations.push(Violation::EmptyName { category, position });
                    continue;
                }
                if !names.insert(item.name.clone()) {
                    violations.push(Violation::DuplicateName {
                        category,
                        name: item.name,
                    });
                    continue;
                }
                items.push(item);
            }
            sections.push(Section { category, items });
        }

        if policy.require_all_categories {
            for category in Category::ALL {
                if !seen_keys.contains(category.key()) {
                    violations.push(Violation::MissingCategory(category));
                }
            }
        }

        if violations.is_empty() {
            Ok(Self { sections })
        } else {
            Err(violations)
        }
    }

    /// Compact JSON in stored order.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, category: Category) -> Option<&Section> {
        self.sections.iter().find(|s| s.category == category)
    }

    pub fn items(&self) -> impl Iterator<Item = (Category, &Item)> {
        self.sections
            .iter()
            .flat_map(|s| s.items.iter().map(move |item| (s.category, item)))
    }

    /// Every item called exactly `name`, whatever its category.
    pub fn find<'a>(&'a self, name: &'a str) -> impl Iterator<Item = (Category, &'a Item)> {
        self.items().filter(move |(_, item)| item.name == name)
    }

    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }
}

fn entry_to_item(entry: JsonValue) -> Option<Item> {
    let JsonValue::Array(mut pair) = entry else {
        return None;
    };
    if pair.len() != 2 {
        return None;
    }
    match (pair.remove(0), pair.remove(0)) {
        (JsonValue::String(name), JsonValue::String(summary)) => Some(Item::new(name, summary)),
        _ => None,
    }
}

impl Serialize for SidebarIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            map.serialize_entry(section.category.key(), &section.items)?;
        }
        map.end()
    }
}
