//! Item page extraction.
//!
//! ### Title
//! - Text of the first element matching the title selector, trimmed.
//! - Empty string when the page has no such element.
//!
//! ### Info panel
//! - Every element matching the entry selector is one label/value pair.
//! - Label and value are the trimmed text of the label and value selectors
//!   inside that entry.
//! - Later entries overwrite earlier ones with the same label.
//! - An entry without a label is stored under the empty label.
//!
//! ### Coercion
//! - Values go through [`coerce`] before they reach the item.

use std::collections::BTreeMap;

use nwitems_core::item::{Attributes, coerce};
use nwitems_core::{AppConfig, Error, Item};
use scraper::{ElementRef, Html, Selector};

/// Compiled selectors locating the parts of an item page.
#[derive(Debug, Clone)]
pub struct PageSelectors {
    title: Selector,
    entry: Selector,
    label: Selector,
    value: Selector,
}

impl PageSelectors {
    /// Compile selectors from their CSS source.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` naming the first selector that fails to parse.
    pub fn new(title: &str, entry: &str, label: &str, value: &str) -> Result<Self, Error> {
        Ok(Self { title: compile(title)?, entry: compile(entry)?, label: compile(label)?, value: compile(value)? })
    }

    /// Compile the selectors named in the application config.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        Self::new(&config.title_selector, &config.entry_selector, &config.label_selector, &config.value_selector)
    }
}

#[cfg(test)]
impl Default for PageSelectors {
    fn default() -> Self {
        Self::from_config(&AppConfig::default()).unwrap()
    }
}

fn compile(css: &str) -> Result<Selector, Error> {
    Selector::parse(css).map_err(|e| Error::InvalidInput(format!("invalid selector {css:?}: {e:?}")))
}

/// Raw content of an item page, before coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Trimmed heading text.
    pub name: String,
    /// Trimmed label to trimmed raw value.
    pub entries: BTreeMap<String, String>,
}

impl ParsedPage {
    /// Coerce the raw entries and attach the name key.
    pub fn into_item(self, name_key: &str) -> Item {
        let attributes: Attributes = self
            .entries
            .into_iter()
            .map(|(label, raw)| (label, coerce(&raw)))
            .collect();

        Item::new(name_key, self.name, attributes)
    }
}

/// Parse an item page.
pub fn parse_page(html: &str, selectors: &PageSelectors) -> ParsedPage {
    let document = Html::parse_document(html);

    let name = document
        .select(&selectors.title)
        .next()
        .map(|el| trimmed_text(&el))
        .unwrap_or_default();

    let mut entries = BTreeMap::new();
    for entry in document.select(&selectors.entry) {
        let label = joined_text(&entry, &selectors.label);
        if label.is_empty() {
            tracing::debug!("info panel entry without a label");
        }
        let value = joined_text(&entry, &selectors.value);
        entries.insert(label, value);
    }

    ParsedPage { name, entries }
}

fn trimmed_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text of every match under `scope`, concatenated, then trimmed.
fn joined_text(scope: &ElementRef<'_>, selector: &Selector) -> String {
    scope
        .select(selector)
        .flat_map(|el| el.text())
        .collect::<String>()
        .trim()
        .to_string()
}
