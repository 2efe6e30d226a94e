use serde::{Deserialize, Serialize};

/// One curated YouTube channel.
///
/// `subject` is free text; subjects are derived on read by grouping channels.
/// `category` refers to a key of `Catalog::categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Canonical YouTube channel id (the `<id>` of `/channel/<id>`).
    pub id: String,
    pub name: String,
    pub subject: String,
    pub category: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub featured: bool,
}

impl Channel {
    /// Public URL of the channel page.
    pub fn url(&self) -> String {
        format!("https://youtube.com/channel/{}", self.id)
    }
}

/// Channels sharing the same subject, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectGroup {
    pub subject: String,
    pub channels: Vec<Channel>,
}
