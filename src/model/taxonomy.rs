use serde::{Deserialize, Serialize};
use std::ops::Deref;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Taxonomy {
    Category,
    PostTag,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Term {
    pub id: u64,
    pub link: String,
    pub name: String,
    pub slug: String,
    pub taxonomy: Taxonomy,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Category {
    #[serde(flatten)]
    pub term: Term,
    /// 0 for top-level categories.
    #[serde(default)]
    pub parent: u64,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Tag {
    #[serde(flatten)]
    pub term: Term,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub description: String,
}

impl Deref for Category {
    type Target = Term;

    fn deref(&self) -> &Self::Target {
        &self.term
    }
}

impl Deref for Tag {
    type Target = Term;

    fn deref(&self) -> &Self::Target {
        &self.term
    }
}
