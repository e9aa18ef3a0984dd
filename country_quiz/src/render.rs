//! Renderer contract and the views renderers draw from.
//!
//! Map drawing (projection, zoom, pan) belongs to the renderer. This module
//! only fixes what a renderer is given and what it reports back, plus the
//! pure view helpers shared by every frontend.

use crate::{
    catalog::{Catalog, Continent, Country},
    session::DiscoveredSet,
};
use serde::{Deserialize, Serialize};

/// Placeholder shown for undiscovered list entries and unnamed features
pub const HIDDEN_NAME: &str = "—";

/// What the renderer reports for the feature under the pointer
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct HoverInfo {
    pub name: String,
    pub discovered: bool,
}

impl HoverInfo {
    /// Tooltip text. Only discovered countries get one.
    #[must_use]
    pub fn tooltip(&self) -> Option<String> {
        self.discovered.then(|| format!("{} ✓ discovered", self.name))
    }
}

/// A map renderer driven by the quiz
pub trait MapRenderer {
    /// Redraw every feature from the catalog and discovered set.
    fn render(&mut self, catalog: &Catalog, discovered: &DiscoveredSet);

    /// Feature currently under the pointer, if any.
    fn hover(&self) -> Option<HoverInfo>;

    /// Restore the default zoom and pan.
    fn reset_zoom(&mut self);
}

/// Describe a map feature for hover feedback.
///
/// Catalog names win; otherwise the feature's own name from the topology is
/// used, and [`HIDDEN_NAME`] when it has none.
#[must_use]
pub fn hover_info(
    catalog: &Catalog,
    discovered: &DiscoveredSet,
    feature_id: &str,
    feature_name: Option<&str>,
) -> HoverInfo {
    let name = catalog
        .get(feature_id)
        .map(|country| country.name.as_str())
        .or(feature_name)
        .unwrap_or(HIDDEN_NAME);
    HoverInfo {
        name: name.to_string(),
        discovered: discovered.contains(feature_id),
    }
}

/// Fill state of a map feature
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MapFill {
    Discovered,
    Undiscovered,
    DiscoveredHover,
    UndiscoveredHover,
}

impl MapFill {
    #[must_use]
    pub fn for_feature(discovered: &DiscoveredSet, feature_id: &str, hovered: bool) -> Self {
        match (discovered.contains(feature_id), hovered) {
            (true, false) => Self::Discovered,
            (false, false) => Self::Undiscovered,
            (true, true) => Self::DiscoveredHover,
            (false, true) => Self::UndiscoveredHover,
        }
    }

    /// Fill colour as RGB.
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Discovered => (0x22, 0xc5, 0x5e),
            Self::Undiscovered => (0x33, 0x41, 0x55),
            Self::DiscoveredHover => (0x16, 0xa3, 0x4a),
            Self::UndiscoveredHover => (0x47, 0x55, 0x69),
        }
    }
}

/// One row of the continent list
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ListEntry<'a> {
    Discovered(&'a Country),
    Hidden,
}

impl ListEntry<'_> {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            ListEntry::Discovered(country) => &country.name,
            ListEntry::Hidden => HIDDEN_NAME,
        }
    }
}

/// Catalog entries of one continent, undiscovered ones masked
#[derive(Clone, Debug, PartialEq)]
pub struct ContinentBlock<'a> {
    pub continent: Continent,
    pub entries: Vec<ListEntry<'a>>,
}

impl ContinentBlock<'_> {
    #[must_use]
    pub fn discovered_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, ListEntry::Discovered(_)))
            .count()
    }
}

/// Group the catalog by continent in display order, skipping empty
/// continents.
#[must_use]
pub fn continent_blocks<'a>(
    catalog: &'a Catalog,
    discovered: &DiscoveredSet,
) -> Vec<ContinentBlock<'a>> {
    Continent::ALL
        .iter()
        .filter_map(|&continent| {
            let entries: Vec<ListEntry<'a>> = catalog
                .in_continent(continent)
                .map(|country| {
                    if discovered.contains(country.id.as_str()) {
                        ListEntry::Discovered(country)
                    } else {
                        ListEntry::Hidden
                    }
                })
                .collect();
            (!entries.is_empty()).then_some(ContinentBlock { continent, entries })
        })
        .collect()
}

/// Format seconds as `MM:SS`.
///
/// ```
/// use country_quiz::render::format_time;
///
/// assert_eq!(format_time(900), "15:00");
/// assert_eq!(format_time(61), "01:01");
/// ```
#[must_use]
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
