use crate::catalog::CatalogError;
use common::model::banner::{Banner, Banners};
use common::model::catalog::{Catalog, Category};
use common::model::channel::Channel;

/// Normalizes a category id the way the admin forms do: trimmed, lowercase.
pub fn normalize_category_id(id: &str) -> String {
    id.trim().to_lowercase()
}

fn require(value: &str, field: &'static str) -> Result<(), CatalogError> {
    if value.trim().is_empty() {
        return Err(CatalogError::MissingField(field));
    }
    Ok(())
}

fn require_category(catalog: &Catalog, id: &str) -> Result<(), CatalogError> {
    if !catalog.categories.contains_key(id) {
        return Err(CatalogError::UnknownCategory(id.to_string()));
    }
    Ok(())
}

/// Adds a category and returns its normalized id.
pub fn add_category(
    catalog: &mut Catalog,
    id: &str,
    name: &str,
    description: &str,
) -> Result<String, CatalogError> {
    let id = normalize_category_id(id);
    require(&id, "category id")?;
    require(name, "category name")?;
    if !id.chars().all(char::is_alphanumeric) {
        return Err(CatalogError::InvalidCategoryId(id));
    }
    if catalog.categories.contains_key(&id) {
        return Err(CatalogError::DuplicateCategory(id));
    }

    catalog.categories.insert(
        id.clone(),
        Category::new(name.trim(), description.trim()),
    );
    Ok(id)
}

pub fn update_category(
    catalog: &mut Catalog,
    id: &str,
    name: &str,
    description: &str,
) -> Result<(), CatalogError> {
    require(name, "category name")?;
    let category = catalog
        .categories
        .get_mut(id)
        .ok_or_else(|| CatalogError::CategoryNotFound(id.to_string()))?;

    category.name = name.trim().to_string();
    category.description = description.trim().to_string();
    Ok(())
}

/// Removes a category. Refused while any channel still points to it.
pub fn remove_category(catalog: &mut Catalog, id: &str) -> Result<Category, CatalogError> {
    if !catalog.categories.contains_key(id) {
        return Err(CatalogError::CategoryNotFound(id.to_string()));
    }
    let channels = catalog
        .featured_channels
        .iter()
        .filter(|ch| ch.category == id)
        .count();
    if channels > 0 {
        return Err(CatalogError::CategoryInUse {
            id: id.to_string(),
            channels,
        });
    }

    // `shift_remove` keeps the remaining categories in order.
    catalog
        .categories
        .shift_remove(id)
        .ok_or_else(|| CatalogError::CategoryNotFound(id.to_string()))
}

/// Appends a channel at the end of the catalog, with its name and subject
/// trimmed.
pub fn add_channel(catalog: &mut Catalog, mut channel: Channel) -> Result<(), CatalogError> {
    require(&channel.id, "channel id")?;
    require(&channel.name, "channel name")?;
    require(&channel.subject, "subject")?;
    require_category(catalog, &channel.category)?;
    if catalog.has_channel(&channel.id) {
        return Err(CatalogError::DuplicateChannel(channel.id));
    }

    channel.name = channel.name.trim().to_string();
    channel.subject = channel.subject.trim().to_string();
    catalog.featured_channels.push(channel);
    Ok(())
}

pub fn update_channel(
    catalog: &mut Catalog,
    id: &str,
    name: &str,
    subject: &str,
    category: &str,
) -> Result<(), CatalogError> {
    require(name, "channel name")?;
    require(subject, "subject")?;
    require_category(catalog, category)?;
    let channel = channel_mut(catalog, id)?;

    channel.name = name.trim().to_string();
    channel.subject = subject.trim().to_string();
    channel.category = category.to_string();
    Ok(())
}

pub fn remove_channel(catalog: &mut Catalog, id: &str) -> Result<Channel, CatalogError> {
    let idx = catalog
        .featured_channels
        .iter()
        .position(|ch| ch.id == id)
        .ok_or_else(|| CatalogError::ChannelNotFound(id.to_string()))?;
    Ok(catalog.featured_channels.remove(idx))
}

pub fn set_featured(catalog: &mut Catalog, id: &str, featured: bool) -> Result<(), CatalogError> {
    channel_mut(catalog, id)?.featured = featured;
    Ok(())
}

pub fn set_banners(catalog: &mut Catalog, cover: Option<Banner>, promotional: Vec<Banner>) {
    catalog.banners = Banners::new(cover, promotional);
}

fn channel_mut<'a>(catalog: &'a mut Catalog, id: &str) -> Result<&'a mut Channel, CatalogError> {
    catalog
        .featured_channels
        .iter_mut()
        .find(|ch| ch.id == id)
        .ok_or_else(|| CatalogError::ChannelNotFound(id.to_string()))
}
