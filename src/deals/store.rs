//! Store enumeration and the CheapShark store-id mapping.
//!
//! CheapShark identifies stores by numeric string ids ("1" is Steam, "7" is
//! GOG). Persisted channel mappings and the config file use the slugs
//! "steam"/"gog" instead; both directions are mapped here.

use crate::errors::Error;
use std::fmt;
use std::str::FromStr;

/// A store a deal belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Store {
    /// Steam (CheapShark store id "1")
    Steam,
    /// GOG (CheapShark store id "7")
    Gog,
}

impl Store {
    /// CheapShark store id for this store.
    #[must_use]
    pub const fn store_id(self) -> &'static str {
        match self {
            Self::Steam => "1",
            Self::Gog => "7",
        }
    }

    /// Slug used in persisted channel mappings and config files.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Steam => "steam",
            Self::Gog => "gog",
        }
    }

    /// Maps a CheapShark store id back to a store, `None` for ids the bot
    /// does not carry.
    #[must_use]
    pub fn from_store_id(id: &str) -> Option<Self> {
        match id {
            "1" => Some(Self::Steam),
            "7" => Some(Self::Gog),
            _ => None,
        }
    }

    /// Maps a persisted slug back to a store.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "steam" => Some(Self::Steam),
            "gog" => Some(Self::Gog),
            _ => None,
        }
    }
}

/// Store filter for a fetch: a single store or both combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreSelector {
    /// Only Steam deals
    Steam,
    /// Only GOG deals
    Gog,
    /// Both stores in one query
    #[default]
    All,
}

impl StoreSelector {
    /// `storeID` query value for the CheapShark API.
    #[must_use]
    pub const fn store_ids(self) -> &'static str {
        match self {
            Self::Steam => "1",
            Self::Gog => "7",
            Self::All => "1,7",
        }
    }
}

impl FromStr for StoreSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "steam" => Ok(Self::Steam),
            "gog" => Ok(Self::Gog),
            "all" => Ok(Self::All),
            _ => Err(Error::InvalidStore {
                store: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for StoreSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Steam => write!(f, "Steam"),
            Self::Gog => write!(f, "GOG"),
            Self::All => write!(f, "all stores"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_parses_known_stores() {
        assert_eq!("steam".parse::<StoreSelector>().ok(), Some(StoreSelector::Steam));
        assert_eq!("GOG".parse::<StoreSelector>().ok(), Some(StoreSelector::Gog));
        assert_eq!("all".parse::<StoreSelector>().ok(), Some(StoreSelector::All));
    }

    #[test]
    fn test_selector_rejects_unknown_store() {
        let err = "epic".parse::<StoreSelector>().unwrap_err();
        assert!(matches!(err, Error::InvalidStore { store } if store == "epic"));
    }

    #[test]
    fn test_store_id_round_trip() {
        assert_eq!(Store::from_store_id("1"), Some(Store::Steam));
        assert_eq!(Store::from_store_id("7"), Some(Store::Gog));
        assert_eq!(Store::from_store_id("12"), None);
        assert_eq!(Store::Steam.store_id(), "1");
        assert_eq!(Store::Gog.slug(), "gog");
        assert_eq!(Store::from_slug("steam"), Some(Store::Steam));
        assert_eq!(Store::from_slug("itch"), None);
    }

    #[test]
    fn test_selector_query_values() {
        assert_eq!(StoreSelector::Steam.store_ids(), "1");
        assert_eq!(StoreSelector::Gog.store_ids(), "7");
        assert_eq!(StoreSelector::All.store_ids(), "1,7");
    }
}
