// src/services/catalog.rs
use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::SiteError;
use crate::models::{ContentEntry, FieldValue, Locale};

static EN_CONTENT: &str = include_str!("../../content/en.json");
static ZH_CONTENT: &str = include_str!("../../content/zh.json");

/// Localized page copy keyed by `(page id, locale)`. Loaded once, read-only.
#[derive(Debug, Clone)]
pub struct ContentCatalog {
    entries: Vec<ContentEntry>,
    index: HashMap<(String, Locale), usize>,
}

impl ContentCatalog {
    /// Catalog built from the data files compiled into the binary.
    pub fn builtin() -> Result<Self, SiteError> {
        Self::from_sources(&[(Locale::En, EN_CONTENT), (Locale::Zh, ZH_CONTENT)])
    }

    /// Parse one JSON document per locale and enforce that every page and
    /// every field exists in all locales.
    pub fn from_sources(sources: &[(Locale, &str)]) -> Result<Self, SiteError> {
        let mut entries = Vec::new();
        for &(locale, raw) in sources {
            entries.extend(parse_locale(locale, raw)?);
        }

        let index = entries
            .iter()
            .enumerate()
            .map(|(pos, e)| ((e.page_id.clone(), e.locale), pos))
            .collect();

        let catalog = Self { entries, index };
        catalog.check_symmetry()?;
        Ok(catalog)
    }

    pub fn lookup(&self, page_id: &str, locale: Locale) -> Result<&ContentEntry, SiteError> {
        self.index
            .get(&(page_id.to_string(), locale))
            .map(|&pos| &self.entries[pos])
            .ok_or_else(|| SiteError::MissingContent {
                page: page_id.to_string(),
                locale,
            })
    }

    /// Page ids for one locale in file order.
    pub fn page_ids(&self, locale: Locale) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.locale == locale)
            .map(|e| e.page_id.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn check_symmetry(&self) -> Result<(), SiteError> {
        for entry in &self.entries {
            for other in Locale::ALL {
                if other == entry.locale {
                    continue;
                }
                let counterpart = match self.index.get(&(entry.page_id.clone(), other)) {
                    Some(&pos) => &self.entries[pos],
                    None => {
                        return Err(SiteError::ContentGap {
                            page: entry.page_id.clone(),
                            present: entry.locale,
                            missing: other,
                        })
                    }
                };
                for (field, _) in &entry.fields {
                    if counterpart.get(field).is_none() {
                        return Err(SiteError::FieldGap {
                            page: entry.page_id.clone(),
                            field: field.clone(),
                            present: entry.locale,
                            missing: other,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

fn parse_locale(locale: Locale, raw: &str) -> Result<Vec<ContentEntry>, SiteError> {
    let invalid = |reason: String| SiteError::InvalidCatalog { locale, reason };

    let pages: Map<String, Value> =
        serde_json::from_str(raw).map_err(|e| invalid(e.to_string()))?;

    let mut entries = Vec::with_capacity(pages.len());
    for (page_id, body) in pages {
        let Value::Object(raw_fields) = body else {
            return Err(invalid(format!("page `{}` is not an object", page_id)));
        };

        let mut fields = Vec::with_capacity(raw_fields.len());
        for (name, value) in raw_fields {
            let value: FieldValue = serde_json::from_value(value).map_err(|_| {
                invalid(format!(
                    "field `{}` of `{}` must be a string or a list of strings",
                    name, page_id
                ))
            })?;
            fields.push((name, value));
        }

        entries.push(ContentEntry {
            page_id,
            locale,
            fields,
        });
    }
    Ok(entries)
}
