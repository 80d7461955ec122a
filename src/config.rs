//! Per-genre site configuration.
//!
//! A genre is a deployment-time content domain: it sets the item
//! vocabulary, branding and storage keys without changing the game rules.

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    Films,
    Music,
    Sports,
    Books,
}

impl Genre {
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Films => "films",
            Genre::Music => "music",
            Genre::Sports => "sports",
            Genre::Books => "books",
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Genre {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "films" => Ok(Genre::Films),
            "music" => Ok(Genre::Music),
            "sports" => Ok(Genre::Sports),
            "books" => Ok(Genre::Books),
            other => Err(format!("unknown genre: {}", other)),
        }
    }
}

/// Branding and storage keys for one deployed site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub genre: Genre,
    pub site_name: String,
    /// Noun for a single board entry, e.g. "film".
    pub item_name: String,
    pub domain: String,
    /// Key prefix for the local stats record.
    pub storage_prefix: String,
}

impl SiteConfig {
    /// Built-in configuration for a genre deployment.
    pub fn for_genre(genre: Genre) -> Self {
        let (site_name, item_name, domain, storage_prefix) = match genre {
            Genre::Films => ("Filmclues", "film", "filmclues.space", "filmclues"),
            Genre::Music => ("Musiclues", "song", "musiclues.space", "musiclues"),
            Genre::Sports => ("Sportsclues", "athlete", "sportsclues.space", "sportsclues"),
            Genre::Books => ("Litclues", "book", "litclues.space", "litclues"),
        };
        Self {
            genre,
            site_name: site_name.to_string(),
            item_name: item_name.to_string(),
            domain: domain.to_string(),
            storage_prefix: storage_prefix.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_round_trips_through_str() {
        for genre in [Genre::Films, Genre::Music, Genre::Sports, Genre::Books] {
            assert_eq!(genre.as_str().parse::<Genre>(), Ok(genre));
        }
        assert!("opera".parse::<Genre>().is_err());
    }

    #[test]
    fn test_site_config_presets() {
        let config = SiteConfig::for_genre(Genre::Films);
        assert_eq!(config.site_name, "Filmclues");
        assert_eq!(config.item_name, "film");
        assert_eq!(config.domain, "filmclues.space");
        assert_eq!(config.storage_prefix, "filmclues");

        let books = SiteConfig::for_genre(Genre::Books);
        assert_eq!(books.site_name, "Litclues");
    }
}
