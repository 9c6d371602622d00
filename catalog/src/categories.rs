//! Video categories that can filter the popular feed.

use std::fmt;
use std::str::FromStr;

/// The categories offered in the feed sidebar, as `(id, name)`.
///
/// Ids are YouTube's `videoCategoryId` values; `"0"` is not a real category
/// and stands for "no filter".
pub const CATEGORIES: &[(&str, &str)] = &[
    ("0", "Home"),
    ("20", "Gaming"),
    ("10", "Music"),
    ("17", "Sports"),
    ("24", "Entertainment"),
    ("25", "News & Politics"),
    ("28", "Science & Technology"),
    ("27", "Education"),
    ("26", "Howto & Style"),
    ("1", "Film & Animation"),
    ("2", "Autos & Vehicles"),
    ("15", "Pets & Animals"),
    ("19", "Travel & Events"),
    ("22", "People & Blogs"),
    ("23", "Comedy"),
];

/// The feed's category selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Category {
    /// Most popular videos across all categories.
    #[default]
    All,
    /// Most popular videos within one `videoCategoryId`.
    Id(String),
}

impl Category {
    /// The id the UI uses for [`Category::All`].
    pub const ALL_ID: &'static str = "0";

    pub fn from_id(id: &str) -> Self {
        let id = id.trim();
        if id.is_empty() || id == Self::ALL_ID {
            Category::All
        } else {
            Category::Id(id.to_string())
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Category::All => Self::ALL_ID,
            Category::Id(id) => id,
        }
    }

    /// The value to send as `videoCategoryId`, if any.
    pub fn filter(&self) -> Option<&str> {
        match self {
            Category::All => None,
            Category::Id(id) => Some(id),
        }
    }

    /// Human-readable name, for categories that appear in [`CATEGORIES`].
    pub fn name(&self) -> Option<&'static str> {
        CATEGORIES
            .iter()
            .find(|(id, _)| *id == self.id())
            .map(|(_, name)| *name)
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Category::from_id(s))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "category {}", self.id()),
        }
    }
}
