mod category;
mod diff;
mod document;
mod index;
mod item;

#[cfg(test)]
pub mod fixture;

pub use category::Category;
pub use diff::{diff, Change};
pub use document::{Envelope, SidebarDocument};
pub use index::{Policy, SidebarIndex};
pub use item::Item;
