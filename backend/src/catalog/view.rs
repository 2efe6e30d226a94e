use common::model::catalog::Catalog;
use common::model::channel::{Channel, SubjectGroup};
use common::responses::{CategorySummary, ChannelListing};
use std::collections::BTreeMap;

pub fn channels_in_category<'a>(catalog: &'a Catalog, category_id: &str) -> Vec<&'a Channel> {
    filter_channels(catalog, Some(category_id), None)
}

/// Channels matching both filters, in catalog order. `None` matches anything.
pub fn filter_channels<'a>(
    catalog: &'a Catalog,
    category: Option<&str>,
    subject: Option<&str>,
) -> Vec<&'a Channel> {
    catalog
        .featured_channels
        .iter()
        .filter(|ch| category.map_or(true, |c| ch.category == c))
        .filter(|ch| subject.map_or(true, |s| ch.subject == s))
        .collect()
}

/// Groups channels by subject. Groups come out sorted by subject; channels
/// keep their relative order inside a group.
pub fn group_by_subject<'a>(channels: impl IntoIterator<Item = &'a Channel>) -> Vec<SubjectGroup> {
    let mut groups: BTreeMap<&str, Vec<Channel>> = BTreeMap::new();
    for channel in channels {
        groups
            .entry(channel.subject.as_str())
            .or_default()
            .push(channel.clone());
    }

    groups
        .into_iter()
        .map(|(subject, channels)| SubjectGroup {
            subject: subject.to_string(),
            channels,
        })
        .collect()
}

/// Distinct subjects, sorted.
pub fn subjects(catalog: &Catalog) -> Vec<String> {
    let mut subjects: Vec<String> = catalog
        .featured_channels
        .iter()
        .map(|ch| ch.subject.clone())
        .collect();
    subjects.sort();
    subjects.dedup();
    subjects
}

/// `None` when the channel points to a category that does not exist.
pub fn category_name<'a>(catalog: &'a Catalog, channel: &Channel) -> Option<&'a str> {
    catalog
        .categories
        .get(&channel.category)
        .map(|c| c.name.as_str())
}

pub fn listings<'a>(
    catalog: &Catalog,
    channels: impl IntoIterator<Item = &'a Channel>,
) -> Vec<ChannelListing> {
    channels
        .into_iter()
        .map(|ch| ChannelListing {
            channel: ch.clone(),
            category_name: category_name(catalog, ch).map(str::to_string),
        })
        .collect()
}

pub fn category_summaries(catalog: &Catalog) -> Vec<CategorySummary> {
    catalog
        .categories
        .iter()
        .map(|(id, category)| CategorySummary {
            id: id.clone(),
            name: category.name.clone(),
            description: category.description.clone(),
            channel_count: channels_in_category(catalog, id).len(),
        })
        .collect()
}
