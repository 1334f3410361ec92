use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

/// The kinds of items a sidebar index groups its entries by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Enum,
    Macro,
    Mod,
    Struct,
    Trait,
}

impl Category {
    /// All categories, in the order rustdoc emits them.
    pub const ALL: [Category; 5] = [
        Category::Enum,
        Category::Macro,
        Category::Mod,
        Category::Struct,
        Category::Trait,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::Enum => "enum",
            Category::Macro => "macro",
            Category::Mod => "mod",
            Category::Struct => "struct",
            Category::Trait => "trait",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Heading used by the documentation viewer for this category.
    pub fn label(self) -> &'static str {
        match self {
            Category::Enum => "Enums",
            Category::Macro => "Macros",
            Category::Mod => "Modules",
            Category::Struct => "Structs",
            Category::Trait => "Traits",
        }
    }

    /// Page of an item, relative to the directory holding the sidebar script.
    pub fn page(self, name: &str) -> String {
        match self {
            Category::Mod => format!("{}/index.html", name),
            other => format!("{}.{}.html", other.key(), name),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
