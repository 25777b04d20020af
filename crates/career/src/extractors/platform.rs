// ABOUTME: Platform locator: maps filter tabs to their rendered view subtrees.
// ABOUTME: Translates public platform aliases (pc, console, psn...) to the site's internal ids.

use std::collections::HashMap;

use dom_query::Selection;
use tracing::{debug, warn};

use crate::extractors::profile::PlatformSelectors;
use crate::extractors::select::{element_attr, element_text, select_all};

pub const PLATFORM_PC: &str = "pc";
pub const PLATFORM_CONSOLE: &str = "console";
pub const PLATFORM_XBL: &str = "xbl";
pub const PLATFORM_PSN: &str = "psn";
pub const PLATFORM_NS: &str = "nintendo-switch";

/// Public platform key -> internal view id.
const PLATFORM_ALIASES: &[(&str, &str)] = &[
    (PLATFORM_PC, "mouseKeyboard"),
    (PLATFORM_CONSOLE, "controller"),
    (PLATFORM_XBL, "controller"),
    (PLATFORM_PSN, "controller"),
    (PLATFORM_NS, "controller"),
];

/// Translates a public platform key; `None` for keys outside the alias table.
pub fn internal_platform_id(key: &str) -> Option<&'static str> {
    let key = key.trim().to_ascii_lowercase();
    PLATFORM_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, id)| *id)
}

fn has_class_token(el: &Selection, class: &str) -> bool {
    element_attr(el, "class")
        .is_some_and(|classes| classes.split_whitespace().any(|token| token == class))
}

/// The subtree of the profile document scoped to one platform.
#[derive(Debug, Clone)]
pub struct PlatformView<'a> {
    pub id: String,
    pub name: String,
    pub root: Selection<'a>,
}

/// Internal platform id -> view, for every tab whose view is rendered.
#[derive(Debug, Default)]
pub struct PlatformIndex<'a> {
    views: HashMap<String, PlatformView<'a>>,
}

impl<'a> PlatformIndex<'a> {
    /// Walks the filter tabs under `root` and pairs each with its view.
    ///
    /// Tabs without an id or without a rendered view are skipped. Views are
    /// matched by exact class token, so tab ids never become selector text.
    pub fn build(root: &Selection<'a>, selectors: &PlatformSelectors) -> Self {
        let candidates = select_all(root, &selectors.views);
        let mut views = HashMap::new();

        for tab in select_all(root, &selectors.filters) {
            let Some(raw_id) = element_attr(&tab, &selectors.id_attr) else {
                continue;
            };
            let id = raw_id
                .strip_suffix(selectors.id_suffix.as_str())
                .unwrap_or(&raw_id)
                .to_string();

            let class = selectors.view_class(&id);
            let Some(view) = candidates.iter().find(|el| has_class_token(el, &class)).cloned() else {
                warn!(platform = %id, "platform tab has no rendered view, skipping");
                continue;
            };

            let name = element_text(&tab).unwrap_or_default();
            views.insert(
                id.clone(),
                PlatformView {
                    id,
                    name,
                    root: view,
                },
            );
        }

        debug!(platforms = views.len(), "indexed platform views");
        Self { views }
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Internal ids of every rendered platform, sorted.
    pub fn platform_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.views.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Finds the view for a public platform key. `None` means unsupported.
    pub fn locate(&self, platform_key: &str) -> Option<&PlatformView<'a>> {
        let id = internal_platform_id(platform_key)?;
        self.views.get(id)
    }
}

/// Builds the index and looks up `platform_key` in one step.
pub fn locate<'a>(
    root: &Selection<'a>,
    platform_key: &str,
    selectors: &PlatformSelectors,
) -> Option<PlatformView<'a>> {
    PlatformIndex::build(root, selectors)
        .locate(platform_key)
        .cloned()
}
