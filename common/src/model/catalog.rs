use crate::model::banner::Banners;
use crate::model::channel::Channel;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A category channels can be filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Category {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// The whole catalog document: categories, channels and banners.
///
/// It is always read and written as a single document. Missing top-level keys
/// fall back to their empty defaults so documents written by older revisions
/// still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub featured_channels: Vec<Channel>,
    /// Category id to category, in insertion order.
    #[serde(default)]
    pub categories: IndexMap<String, Category>,
    #[serde(default)]
    pub banners: Banners,
}

impl Catalog {
    /// The catalog written the first time storage is found empty or unreadable.
    pub fn bootstrap() -> Self {
        let mut categories = IndexMap::new();
        categories.insert(
            "vestibular".to_string(),
            Category::new(
                "Vestibular",
                "Canais focados em preparação para vestibular",
            ),
        );
        categories.insert(
            "informatica".to_string(),
            Category::new("Informática", "Canais sobre programação e computação"),
        );
        categories.insert(
            "engenharia".to_string(),
            Category::new("Engenharia", "Canais sobre engenharia e tecnologia"),
        );

        Self {
            featured_channels: Vec::new(),
            categories,
            banners: Banners::default(),
        }
    }

    pub fn channel(&self, id: &str) -> Option<&Channel> {
        self.featured_channels.iter().find(|ch| ch.id == id)
    }

    pub fn has_channel(&self, id: &str) -> bool {
        self.channel(id).is_some()
    }
}
