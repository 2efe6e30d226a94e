use crate::model::catalog::Category;
use crate::model::channel::{Channel, SubjectGroup};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Current state of the caller's admin session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Unauthenticated,
    Locked { retry_after_secs: u64 },
    Authenticated,
}

/// Entry of the category sidebar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub channel_count: usize,
}

/// A category page: the category and its channels grouped by subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPage {
    pub id: String,
    pub category: Category,
    pub subjects: Vec<SubjectGroup>,
}

/// A channel as listed by the catalog browser.
///
/// `category_name` is `None` when the channel points to a category that no
/// longer exists; such channels are shown as uncategorized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelListing {
    #[serde(flatten)]
    pub channel: Channel,
    pub category_name: Option<String>,
}
