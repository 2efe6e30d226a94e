use serde::{Deserialize, Serialize};

/// A banner image shown on the home page, optionally wrapped in a hyperlink.
///
/// Stored documents carry banners in two shapes: a bare URL string, or an
/// object `{ "url": ..., "link": ... }`. Both are normalized into this struct
/// when the catalog is deserialized. A banner without a link is written back
/// as a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredBanner", into = "StoredBanner")]
pub struct Banner {
    pub url: String,
    pub link: Option<String>,
}

impl Banner {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            link: None,
        }
    }

    /// A blank `link` gives a banner without link.
    pub fn linked(url: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            link: non_blank(link.into()),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.url.trim().is_empty()
    }
}

fn non_blank(s: String) -> Option<String> {
    if s.trim().is_empty() { None } else { Some(s) }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum StoredBanner {
    Url(String),
    Linked {
        #[serde(default)]
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        link: Option<String>,
    },
}

impl From<StoredBanner> for Banner {
    fn from(stored: StoredBanner) -> Self {
        match stored {
            StoredBanner::Url(url) => Banner { url, link: None },
            // An empty link renders exactly like no link at all.
            StoredBanner::Linked { url, link } => Banner {
                url,
                link: link.and_then(non_blank),
            },
        }
    }
}

impl From<Banner> for StoredBanner {
    fn from(banner: Banner) -> Self {
        match banner.link.and_then(non_blank) {
            None => StoredBanner::Url(banner.url),
            Some(link) => StoredBanner::Linked {
                url: banner.url,
                link: Some(link),
            },
        }
    }
}

/// Cover and promotional banners of the home page.
///
/// A cover with a blank URL is not a valid value: it is stored as `""`, which
/// reads back as no cover. Build covers through `Banners::new` to drop them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banners {
    #[serde(
        default,
        deserialize_with = "deserialize_cover",
        skip_serializing_if = "Option::is_none"
    )]
    pub cover: Option<Banner>,
    #[serde(default)]
    pub promotional: Vec<Banner>,
}

impl Banners {
    /// Drops a blank cover and blank promotional banners.
    pub fn new(cover: Option<Banner>, promotional: Vec<Banner>) -> Self {
        Self {
            cover: cover.filter(|b| !b.is_blank()),
            promotional: promotional.into_iter().filter(|b| !b.is_blank()).collect(),
        }
    }
}

/// Freshly bootstrapped documents store the cover as `""`, meaning "no cover".
fn deserialize_cover<'de, D>(deserializer: D) -> Result<Option<Banner>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let cover = Option::<Banner>::deserialize(deserializer)?;
    Ok(cover.filter(|b| !b.is_blank()))
}
