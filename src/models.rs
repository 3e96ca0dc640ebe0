// src/models.rs
use serde::{Deserialize, Serialize};
use std::fmt;

// Locale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Zh];

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }

    /// Value for the `<html lang>` attribute.
    pub fn html_lang(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh-CN",
        }
    }

    pub fn other(self) -> Locale {
        match self {
            Locale::En => Locale::Zh,
            Locale::Zh => Locale::En,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Link registry types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Url,
    Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Solana,
    Bsc,
}

impl Chain {
    /// Public explorer page for an address on this chain. The value is
    /// inserted exactly as configured.
    pub fn explorer_url(self, value: &str) -> String {
        match self {
            Chain::Solana => format!("https://solscan.io/token/{}", value),
            Chain::Bsc => format!("https://bscscan.com/address/{}", value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkGroup {
    Official,
    Missions,
    Products,
    Markets,
    Solana,
    Bsc,
}

impl LinkGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkGroup::Official => "official",
            LinkGroup::Missions => "missions",
            LinkGroup::Products => "products",
            LinkGroup::Markets => "markets",
            LinkGroup::Solana => "solana",
            LinkGroup::Bsc => "bsc",
        }
    }
}

pub const PLACEHOLDER_VALUE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkEntry {
    pub id: &'static str,
    pub kind: LinkKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<Chain>,
    pub value: String,
    pub label: &'static str,
    pub group: LinkGroup,
}

impl LinkEntry {
    pub fn url(id: &'static str, label: &'static str, group: LinkGroup, value: impl Into<String>) -> Self {
        Self {
            id,
            kind: LinkKind::Url,
            chain: None,
            value: value.into(),
            label,
            group,
        }
    }

    pub fn address(id: &'static str, label: &'static str, chain: Chain, value: impl Into<String>) -> Self {
        let group = match chain {
            Chain::Solana => LinkGroup::Solana,
            Chain::Bsc => LinkGroup::Bsc,
        };
        Self {
            id,
            kind: LinkKind::Address,
            chain: Some(chain),
            value: value.into(),
            label,
            group,
        }
    }

    /// `N/A` marks a slot that is intentionally empty: no anchor, no copy.
    pub fn is_placeholder(&self) -> bool {
        self.value.trim().eq_ignore_ascii_case(PLACEHOLDER_VALUE)
    }

    /// Explorer URL for address entries, `None` for plain URLs.
    pub fn explorer_url(&self) -> Option<String> {
        match (self.kind, self.chain) {
            (LinkKind::Address, Some(chain)) => Some(chain.explorer_url(&self.value)),
            _ => None,
        }
    }

    /// Where an anchor for this entry points.
    pub fn href(&self) -> Option<String> {
        if self.is_placeholder() {
            return None;
        }
        match self.kind {
            LinkKind::Address => self.explorer_url(),
            LinkKind::Url => Some(self.value.clone()),
        }
    }
}

// Content catalog types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentEntry {
    pub page_id: String,
    pub locale: Locale,
    pub fields: Vec<(String, FieldValue)>,
}

impl ContentEntry {
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(FieldValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// A list field, or a text field read as a one-element list.
    pub fn list(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(FieldValue::List(items)) => items.clone(),
            Some(FieldValue::Text(s)) => vec![s.clone()],
            None => Vec::new(),
        }
    }

    pub fn text_or<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.text(key).unwrap_or(fallback)
    }

    /// Distinct `<prefix><name>.` groups in first-appearance order.
    pub fn groups(&self, prefix: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for (key, _) in &self.fields {
            if let Some(rest) = key.strip_prefix(prefix) {
                let name = rest.split('.').next().unwrap_or(rest);
                if !name.is_empty() && !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }
        names
    }

    /// Keys starting with `prefix`, with the prefix removed, in order.
    pub fn keys_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter_map(move |(key, _)| key.strip_prefix(prefix))
    }
}

// Rendered page (output of the renderer, input of the templates)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavAction {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedLink {
    pub id: String,
    pub kind: LinkKind,
    pub label: String,
    pub value: String,
    /// `None` for placeholder entries.
    pub href: Option<String>,
    /// Value offered to the copy button; only addresses are copyable.
    pub copy: Option<String>,
    pub desc: Option<String>,
    pub cta: Option<String>,
    pub tag: Option<String>,
    pub warn: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkGroupBlock {
    pub group: LinkGroup,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub links: Vec<RenderedLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub id: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub paragraphs: Vec<String>,
    pub bullets: Vec<String>,
    pub steps: Vec<String>,
    pub callout: Option<Notice>,
    pub link: Option<NavAction>,
    pub external: Option<RenderedLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPage {
    pub page_id: String,
    pub locale: Locale,
    pub path: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub badges: Vec<String>,
    pub kicker: Option<String>,
    pub notice: Option<Notice>,
    pub actions: Vec<NavAction>,
    pub toc: Vec<TocEntry>,
    pub sections: Vec<Section>,
    pub link_groups: Vec<LinkGroupBlock>,
    /// Same page in the other locale.
    pub alternate_href: String,
}

impl RenderedPage {
    pub fn find_link(&self, id: &str) -> Option<&RenderedLink> {
        self.link_groups
            .iter()
            .flat_map(|g| g.links.iter())
            .find(|l| l.id == id)
    }

    pub fn group(&self, group: LinkGroup) -> Option<&LinkGroupBlock> {
        self.link_groups.iter().find(|g| g.group == group)
    }
}
