use std::collections::HashMap;

use serde::Serialize;

use super::{Category, Item, SidebarIndex};

/// One difference between two generations of a sidebar index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "lowercase")]
pub enum Change<'a> {
    Added {
        category: Category,
        name: &'a str,
        summary: &'a str,
    },
    Removed {
        category: Category,
        name: &'a str,
        summary: &'a str,
    },
    Reworded {
        category: Category,
        name: &'a str,
        before: &'a str,
        after: &'a str,
    },
}

fn by_name(index: &SidebarIndex, category: Category) -> (Vec<&Item>, HashMap<&str, &Item>) {
    let items = index
        .section(category)
        .map(|s| s.items.iter().collect::<Vec<_>>())
        .unwrap_or_default();
    let lookup = items
        .iter()
        .map(|&item| (item.name.as_str(), item))
        .collect();
    (items, lookup)
}

/// Compare `old` against `new`, category by category in canonical order.
pub fn diff<'a>(old: &'a SidebarIndex, new: &'a SidebarIndex) -> Vec<Change<'a>> {
    let mut changes = Vec::new();
    for category in Category::ALL {
        let (old_items, old_lookup) = by_name(old, category);
        let (new_items, new_lookup) = by_name(new, category);

        for item in old_items {
            if !new_lookup.contains_key(item.name.as_str()) {
                changes.push(Change::Removed {
                    category,
                    name: &item.name,
                    summary: &item.summary,
                });
            }
        }
        for item in new_items {
            match old_lookup.get(item.name.as_str()) {
                None => changes.push(Change::Added {
                    category,
                    name: &item.name,
                    summary: &item.summary,
                }),
                Some(previous) if previous.summary != item.summary => {
                    changes.push(Change::Reworded {
                        category,
                        name: &item.name,
                        before: &previous.summary,
                        after: &item.summary,
                    })
                }
                Some(_) => {}
            }
        }
    }
    changes
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entity::{fixture::DYNASMRT_INDEX, Policy};

    fn parse(json: &str) -> SidebarIndex {
        let policy = Policy {
            require_all_categories: false,
        };
        SidebarIndex::parse(json, policy).unwrap()
    }

    #[test]
    fn identical_indexes_have_no_changes() {
        let index = parse(DYNASMRT_INDEX);
        assert!(diff(&index, &index).is_empty());
    }

    #[test]
    fn reports_additions_removals_and_rewordings() {
        let old = parse(
            r#"{"struct":[["Executor","old"],["AssemblyOffset",""]],"trait":[["DynasmApi",""]]}"#,
        );
        let new = parse(
            r#"{"enum":[["DynasmError",""]],"struct":[["Executor","new"],["ExecutableBuffer","buf"]]}"#,
        );
        assert_eq!(
            diff(&old, &new),
            vec![
                Change::Added {
                    category: Category::Enum,
                    name: "DynasmError",
                    summary: ""
                },
                Change::Removed {
                    category: Category::Struct,
                    name: "AssemblyOffset",
                    summary: ""
                },
                Change::Reworded {
                    category: Category::Struct,
                    name: "Executor",
                    before: "old",
                    after: "new"
                },
                Change::Added {
                    category: Category::Struct,
                    name: "ExecutableBuffer",
                    summary: "buf"
                },
                Change::Removed {
                    category: Category::Trait,
                    name: "DynasmApi",
                    summary: ""
                },
            ]
        );
    }
}
