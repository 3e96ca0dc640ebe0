// src/services/health.rs
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::SiteError;
use crate::models::{LinkKind, Locale};
use crate::pages::{self, PAGES};
use crate::services::renderer::PageRenderer;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IntegrityReport {
    pub pages: usize,
    pub locales: usize,
    pub renders: usize,
    pub links: usize,
    pub catalog_entries: usize,
    /// Link ids whose `/static/...` file is absent from the static directory.
    pub missing_assets: Vec<String>,
}

/// Startup validation: every site-map page renders in every locale, every
/// referenced link and page target exists, and every URL entry is usable.
/// A success here means configuration errors cannot occur per request.
/// Deploy-time files missing under `static_dir` are reported, not fatal.
pub fn check_site(renderer: &PageRenderer, static_dir: &Path) -> Result<IntegrityReport, SiteError> {
    info!("Starting site integrity check...");

    check_urls(renderer)?;
    let missing_assets = missing_assets(renderer, static_dir);

    let mut renders = 0;
    for def in PAGES {
        if let Some(id) = def.links.iter().find(|id| !renderer.links().contains(id)) {
            return Err(SiteError::UnknownLink(id.to_string()));
        }
        for locale in Locale::ALL {
            renderer.render_def(def, locale)?;
            renders += 1;
            debug!("Rendered {} ({})", def.id, locale);
        }
    }

    for locale in Locale::ALL {
        let layout = renderer.layout(locale)?;
        for field in ["brand.name", "footer.left", "footer.right", "copy.label", "copy.done", "open"] {
            if layout.text(field).is_none() {
                return Err(SiteError::MissingField {
                    page: pages::LAYOUT_PAGE.to_string(),
                    field: field.to_string(),
                });
            }
        }
        let not_found = renderer.not_found(locale)?;
        if not_found.text("title").is_none() {
            return Err(SiteError::MissingField {
                page: pages::NOT_FOUND_PAGE.to_string(),
                field: "title".to_string(),
            });
        }
    }

    // Catalog pages nothing routes to are dead copy.
    for page_id in renderer.catalog().page_ids(Locale::En) {
        if pages::find(page_id).is_none()
            && page_id != pages::LAYOUT_PAGE
            && page_id != pages::NOT_FOUND_PAGE
        {
            return Err(SiteError::UnknownPage(page_id.to_string()));
        }
    }

    let report = IntegrityReport {
        pages: PAGES.len(),
        locales: Locale::ALL.len(),
        renders,
        links: renderer.links().len(),
        catalog_entries: renderer.catalog().len(),
        missing_assets,
    };
    info!(
        "Integrity check passed: {} pages x {} locales, {} links",
        report.pages, report.locales, report.links
    );
    Ok(report)
}

/// Absolute http(s) URLs or site-relative paths; placeholders are skipped.
fn check_urls(renderer: &PageRenderer) -> Result<(), SiteError> {
    for entry in renderer.links().iter() {
        if entry.kind != LinkKind::Url || entry.is_placeholder() {
            continue;
        }
        let usable = if entry.value.starts_with('/') {
            !entry.value.starts_with("//")
        } else {
            url::Url::parse(&entry.value)
                .map(|u| matches!(u.scheme(), "http" | "https") && u.host().is_some())
                .unwrap_or(false)
        };
        if !usable {
            return Err(SiteError::InvalidUrl {
                id: entry.id.to_string(),
                value: entry.value.clone(),
            });
        }
    }
    Ok(())
}

/// Site-relative links served from `/static` must exist on disk.
fn missing_assets(renderer: &PageRenderer, static_dir: &Path) -> Vec<String> {
    let mut missing = Vec::new();
    for entry in renderer.links().iter() {
        let Some(relative) = entry.value.strip_prefix("/static/") else {
            continue;
        };
        if entry.kind != LinkKind::Url || entry.is_placeholder() {
            continue;
        }
        let file = static_dir.join(relative);
        if !file.is_file() {
            warn!("⚠️  Link `{}` points at {} which is not deployed", entry.id, file.display());
            missing.push(entry.id.to_string());
        }
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LinkEntry, LinkGroup};
    use crate::services::{catalog::ContentCatalog, links::LinkRegistry};
    use std::path::PathBuf;
    use std::sync::Arc;

    fn renderer_with(links: LinkRegistry) -> PageRenderer {
        PageRenderer::new(Arc::new(links), Arc::new(ContentCatalog::builtin().unwrap()))
    }

    #[test]
    fn test_builtin_site_passes() {
        let renderer = renderer_with(LinkRegistry::official("https://one-mission.vercel.app").unwrap());
        let report = check_site(&renderer, Path::new("static")).unwrap();
        assert_eq!(report.pages, PAGES.len());
        assert_eq!(report.renders, PAGES.len() * 2);
        assert_eq!(report.locales, 2);
    }

    #[test]
    fn test_missing_link_fails() {
        // A registry without the addresses the verify page needs.
        let links = LinkRegistry::new(vec![LinkEntry::url(
            "website",
            "Website",
            LinkGroup::Official,
            "https://www.weareoneconnection.org",
        )])
        .unwrap();
        let err = check_site(&renderer_with(links), Path::new("static")).unwrap_err();
        assert!(matches!(err, SiteError::UnknownLink(_)));
    }

    #[test]
    fn test_unusable_url_fails() {
        let links = LinkRegistry::new(vec![LinkEntry::url(
            "website",
            "Website",
            LinkGroup::Official,
            "javascript:alert(1)",
        )])
        .unwrap();
        let err = check_site(&renderer_with(links), Path::new("static")).unwrap_err();
        assert_eq!(
            err,
            SiteError::InvalidUrl {
                id: "website".to_string(),
                value: "javascript:alert(1)".to_string()
            }
        );
    }

    #[test]
    fn test_undeployed_static_asset_is_reported() {
        let renderer = renderer_with(LinkRegistry::official("https://one-mission.vercel.app").unwrap());

        let empty = std::env::temp_dir().join(format!("waoc-static-empty-{}", std::process::id()));
        let report = check_site(&renderer, &empty).unwrap();
        assert_eq!(report.missing_assets, vec!["whitepaper".to_string()]);

        let deployed: PathBuf = std::env::temp_dir().join(format!("waoc-static-full-{}", std::process::id()));
        std::fs::create_dir_all(deployed.join("whitepaper")).unwrap();
        std::fs::write(deployed.join("whitepaper/WAOC_Whitepaper_v1.pdf"), b"%PDF-1.4").unwrap();
        let report = check_site(&renderer, &deployed).unwrap();
        assert!(report.missing_assets.is_empty());
        std::fs::remove_dir_all(&deployed).unwrap();
    }
}
