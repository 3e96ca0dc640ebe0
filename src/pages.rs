// src/pages.rs
// Site map: every routable page, its locale-agnostic path and the official
// links it displays.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDef {
    pub id: &'static str,
    pub path: &'static str,
    pub links: &'static [&'static str],
    pub toc: bool,
}

const fn page(id: &'static str, path: &'static str, links: &'static [&'static str]) -> PageDef {
    PageDef {
        id,
        path,
        links,
        toc: false,
    }
}

/// Catalog entries that are not routes of their own.
pub const LAYOUT_PAGE: &str = "layout";
pub const NOT_FOUND_PAGE: &str = "not-found";

pub const PAGES: &[PageDef] = &[
    page("home", "/", &[]),
    PageDef {
        id: "docs",
        path: "/docs",
        links: &["oneMission"],
        toc: true,
    },
    page(
        "verify",
        "/verify",
        &[
            "website",
            "x",
            "telegram",
            "solMint",
            "dexscreener",
            "bscContract",
            "bscDex",
        ],
    ),
    page(
        "connect",
        "/connect",
        &[
            "oneMission",
            "oneMissionUniversal",
            "oneField",
            "telegram",
            "x",
            "meditation",
            "mint",
            "website",
        ],
    ),
    page("community", "/community", &["telegram", "x"]),
    page("builders", "/builders", &[]),
    page("participants", "/participants", &[]),
    page("practice", "/practice", &["meditation"]),
    page("genesis", "/genesis", &["mint", "genesisCollectionMint"]),
    page("network", "/network", &["dexscreener"]),
    page("get-started", "/get-started", &[]),
    page("get-started/whitepaper", "/get-started/whitepaper", &["whitepaper"]),
    page(
        "get-started/token",
        "/get-started/token",
        &["solMint", "bscContract", "dexscreener", "buySol", "buyBsc"],
    ),
    page("get-started/meditation", "/get-started/meditation", &["meditation"]),
    page(
        "get-started/nft",
        "/get-started/nft",
        &["mint", "genesisCandyMachine", "genesisCollectionMint"],
    ),
];

pub fn find(id: &str) -> Option<&'static PageDef> {
    PAGES.iter().find(|p| p.id == id)
}

/// Look a page up by its locale-agnostic path. A trailing slash is ignored.
pub fn find_by_path(path: &str) -> Option<&'static PageDef> {
    let trimmed = path.trim_end_matches('/');
    let normalized = if trimmed.is_empty() { "/" } else { trimmed };
    PAGES.iter().find(|p| p.path == normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_and_paths_unique() {
        let ids: HashSet<_> = PAGES.iter().map(|p| p.id).collect();
        let paths: HashSet<_> = PAGES.iter().map(|p| p.path).collect();
        assert_eq!(ids.len(), PAGES.len());
        assert_eq!(paths.len(), PAGES.len());
        assert!(!ids.contains(LAYOUT_PAGE));
        assert!(!ids.contains(NOT_FOUND_PAGE));
    }

    #[test]
    fn test_find_by_path() {
        assert_eq!(find_by_path("/").map(|p| p.id), Some("home"));
        assert_eq!(find_by_path("").map(|p| p.id), Some("home"));
        assert_eq!(find_by_path("/verify/").map(|p| p.id), Some("verify"));
        assert_eq!(
            find_by_path("/get-started/token").map(|p| p.id),
            Some("get-started/token")
        );
        assert!(find_by_path("/admin").is_none());
    }

    #[test]
    fn test_paths_are_locale_agnostic() {
        for p in PAGES {
            assert!(p.path.starts_with('/'));
            assert!(!p.path.starts_with("/en") && !p.path.starts_with("/zh"));
        }
    }
}
