// src/services/renderer.rs
use std::sync::Arc;

use crate::error::SiteError;
use crate::models::{
    ContentEntry, LinkGroupBlock, LinkKind, Locale, NavAction, Notice, RenderedLink, RenderedPage,
    Section, TocEntry,
};
use crate::pages::{self, PageDef, LAYOUT_PAGE, NOT_FOUND_PAGE};
use crate::services::catalog::ContentCatalog;
use crate::services::links::LinkRegistry;

/// Build an internal href by putting `/{locale}` in front of a
/// locale-agnostic path. Apply once: a path that already carries a locale
/// prefix is a caller error.
pub fn prepend_locale(path: &str, locale: Locale) -> Result<String, SiteError> {
    let normalized = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };

    if has_locale_prefix(&normalized) {
        return Err(SiteError::AlreadyPrefixed(path.to_string()));
    }

    let code = locale.as_str();
    if normalized == "/" {
        Ok(format!("/{}", code))
    } else if normalized.starts_with("/#") || normalized.starts_with("/?") {
        Ok(format!("/{}{}", code, &normalized[1..]))
    } else {
        Ok(format!("/{}{}", code, normalized))
    }
}

fn has_locale_prefix(path: &str) -> bool {
    Locale::ALL.iter().any(|locale| {
        path.strip_prefix('/')
            .and_then(|rest| rest.strip_prefix(locale.as_str()))
            .is_some_and(|tail| {
                tail.is_empty() || tail.starts_with('/') || tail.starts_with('#') || tail.starts_with('?')
            })
    })
}

/// Composes the link registry and the content catalog into pages.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    links: Arc<LinkRegistry>,
    catalog: Arc<ContentCatalog>,
}

impl PageRenderer {
    pub fn new(links: Arc<LinkRegistry>, catalog: Arc<ContentCatalog>) -> Self {
        Self { links, catalog }
    }

    pub fn links(&self) -> &LinkRegistry {
        &self.links
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    /// Shared chrome (navigation, footer, button labels).
    pub fn layout(&self, locale: Locale) -> Result<&ContentEntry, SiteError> {
        self.catalog.lookup(LAYOUT_PAGE, locale)
    }

    pub fn not_found(&self, locale: Locale) -> Result<&ContentEntry, SiteError> {
        self.catalog.lookup(NOT_FOUND_PAGE, locale)
    }

    /// Render a site-map page with the links the site map assigns to it.
    pub fn render_def(&self, def: &PageDef, locale: Locale) -> Result<RenderedPage, SiteError> {
        self.render(def.id, locale, def.links)
    }

    pub fn render(&self, page_id: &str, locale: Locale, link_ids: &[&str]) -> Result<RenderedPage, SiteError> {
        let def = pages::find(page_id).ok_or_else(|| SiteError::UnknownPage(page_id.to_string()))?;
        let content = self.catalog.lookup(page_id, locale)?;

        let title = content
            .text("title")
            .ok_or_else(|| missing_field(page_id, "title"))?
            .to_string();

        let mut actions = Vec::new();
        for target in content.keys_with_prefix("cta.") {
            let key = format!("cta.{}", target);
            let label = content.text(&key).ok_or_else(|| missing_field(page_id, &key))?;
            actions.push(NavAction {
                label: label.to_string(),
                href: self.target_href(target, locale)?,
            });
        }

        let mut sections = Vec::new();
        for name in content.groups("section.") {
            sections.push(self.section(content, &name, locale)?);
        }

        let toc = if def.toc {
            sections
                .iter()
                .filter_map(|s| {
                    s.title.as_ref().map(|title| TocEntry {
                        id: s.id.clone(),
                        label: title.clone(),
                    })
                })
                .collect()
        } else {
            Vec::new()
        };

        let mut link_groups: Vec<LinkGroupBlock> = Vec::new();
        for id in link_ids {
            let entry = self.links.get(id)?;
            let card = self.link_card(content, id)?;
            match link_groups.iter_mut().find(|g| g.group == entry.group) {
                Some(block) => block.links.push(card),
                None => {
                    let prefix = format!("group.{}", entry.group.as_str());
                    link_groups.push(LinkGroupBlock {
                        group: entry.group,
                        title: content.text(&format!("{}.title", prefix)).map(str::to_string),
                        subtitle: content.text(&format!("{}.subtitle", prefix)).map(str::to_string),
                        links: vec![card],
                    });
                }
            }
        }

        let notice = notice(content, "notice.title", "notice.text");

        Ok(RenderedPage {
            page_id: page_id.to_string(),
            locale,
            path: prepend_locale(def.path, locale)?,
            title,
            subtitle: content.text("subtitle").map(str::to_string),
            badges: content.list("badges"),
            kicker: content.text("kicker").map(str::to_string),
            notice,
            actions,
            toc,
            sections,
            link_groups,
            alternate_href: prepend_locale(def.path, locale.other())?,
        })
    }

    /// `target` is a page id, optionally followed by `#anchor`.
    fn target_href(&self, target: &str, locale: Locale) -> Result<String, SiteError> {
        let (page_id, anchor) = match target.split_once('#') {
            Some((id, anchor)) => (id, Some(anchor)),
            None => (target, None),
        };
        let def = pages::find(page_id).ok_or_else(|| SiteError::UnknownPage(page_id.to_string()))?;
        let path = match anchor {
            Some(anchor) => format!("{}#{}", def.path, anchor),
            None => def.path.to_string(),
        };
        prepend_locale(&path, locale)
    }

    fn section(&self, content: &ContentEntry, name: &str, locale: Locale) -> Result<Section, SiteError> {
        let key = |field: &str| format!("section.{}.{}", name, field);

        let title = content.text(&key("title")).map(str::to_string);

        let link = match content.text(&key("link")) {
            Some(target) => Some(NavAction {
                label: content
                    .text(&key("cta"))
                    .or(title.as_deref())
                    .unwrap_or(target)
                    .to_string(),
                href: self.target_href(target, locale)?,
            }),
            None => None,
        };

        let external = match content.text(&key("external")) {
            Some(id) => Some(self.link_card(content, id)?),
            None => None,
        };

        Ok(Section {
            id: name.to_string(),
            title,
            subtitle: content.text(&key("subtitle")).map(str::to_string),
            paragraphs: content.list(&key("body")),
            bullets: content.list(&key("bullets")),
            steps: content.list(&key("steps")),
            callout: notice(content, &key("callout.title"), &key("callout.text")),
            link,
            external,
        })
    }

    fn link_card(&self, content: &ContentEntry, id: &str) -> Result<RenderedLink, SiteError> {
        let entry = self.links.get(id)?;
        let field = |name: &str| {
            content
                .text(&format!("link.{}.{}", id, name))
                .map(str::to_string)
        };

        let copy = (entry.kind == LinkKind::Address && !entry.is_placeholder()).then(|| entry.value.clone());

        Ok(RenderedLink {
            id: entry.id.to_string(),
            kind: entry.kind,
            label: field("label").unwrap_or_else(|| entry.label.to_string()),
            value: entry.value.clone(),
            href: entry.href(),
            copy,
            desc: field("desc"),
            cta: field("cta"),
            tag: field("tag"),
            warn: field("warn"),
        })
    }
}

fn notice(content: &ContentEntry, title_key: &str, text_key: &str) -> Option<Notice> {
    match (content.text(title_key), content.text(text_key)) {
        (None, None) => None,
        (title, text) => Some(Notice {
            title: title.unwrap_or_default().to_string(),
            text: text.unwrap_or_default().to_string(),
        }),
    }
}

fn missing_field(page: &str, field: &str) -> SiteError {
    SiteError::MissingField {
        page: page.to_string(),
        field: field.to_string(),
    }
}
