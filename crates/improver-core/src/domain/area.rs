//! Improvement areas and the ordered selection mapping.

use std::fmt;
use std::str::FromStr;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

/// Website aspect that can be selected for improvement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ImprovementArea {
    /// Menus, links and user flow.
    Navigation,

    /// Copy and messaging.
    Content,

    /// Forms and input fields.
    Forms,

    /// Call-to-action elements.
    #[serde(alias = "calls_to_action", alias = "calls-to-action")]
    CallsToAction,

    /// Mobile experience.
    Mobile,
}

impl ImprovementArea {
    /// All areas, in the order the agent processes them.
    pub const ALL: [ImprovementArea; 5] = [
        ImprovementArea::Navigation,
        ImprovementArea::Content,
        ImprovementArea::Forms,
        ImprovementArea::CallsToAction,
        ImprovementArea::Mobile,
    ];

    /// Canonical mapping key for this area.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImprovementArea::Navigation => "navigation",
            ImprovementArea::Content => "content",
            ImprovementArea::Forms => "forms",
            ImprovementArea::CallsToAction => "callsToAction",
            ImprovementArea::Mobile => "mobile",
        }
    }

    /// Progress message logged when analysis of this area begins.
    pub fn analyzing_message(&self) -> &'static str {
        match self {
            ImprovementArea::Navigation => "Analyzing navigation structure...",
            ImprovementArea::Content => "Analyzing content structure...",
            ImprovementArea::Forms => "Analyzing form structure...",
            ImprovementArea::CallsToAction => "Analyzing call-to-action elements...",
            ImprovementArea::Mobile => "Analyzing mobile experience...",
        }
    }

    /// Progress message logged while improvements are generated.
    pub fn generating_message(&self) -> &'static str {
        match self {
            ImprovementArea::Navigation => "Generating navigation improvements...",
            ImprovementArea::Content => "Generating content improvements...",
            ImprovementArea::Forms => "Generating form improvements...",
            ImprovementArea::CallsToAction => "Generating CTA improvements...",
            ImprovementArea::Mobile => "Generating mobile improvements...",
        }
    }

    /// Success message logged when the area is done.
    pub fn completed_message(&self) -> &'static str {
        match self {
            ImprovementArea::Navigation => "Navigation improvements completed",
            ImprovementArea::Content => "Content improvements completed",
            ImprovementArea::Forms => "Form improvements completed",
            ImprovementArea::CallsToAction => "CTA improvements completed",
            ImprovementArea::Mobile => "Mobile improvements completed",
        }
    }
}

impl fmt::Display for ImprovementArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a key does not name a known improvement area.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown improvement area: {0}")]
pub struct UnknownArea(pub String);

impl FromStr for ImprovementArea {
    type Err = UnknownArea;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "navigation" => Ok(ImprovementArea::Navigation),
            "content" => Ok(ImprovementArea::Content),
            "forms" => Ok(ImprovementArea::Forms),
            "callsToAction" | "calls_to_action" | "calls-to-action" => {
                Ok(ImprovementArea::CallsToAction)
            }
            "mobile" => Ok(ImprovementArea::Mobile),
            other => Err(UnknownArea(other.to_string())),
        }
    }
}

/// Mapping from improvement area to its "selected" flag.
///
/// Entries keep insertion order; setting an area again updates the flag in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngagementAreas {
    entries: Vec<(ImprovementArea, bool)>,
}

impl EngagementAreas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from raw string keys, skipping keys that name no known area.
    pub fn from_raw<I, K>(raw: I) -> Self
    where
        I: IntoIterator<Item = (K, bool)>,
        K: AsRef<str>,
    {
        let mut areas = Self::new();
        for (key, selected) in raw {
            let key = key.as_ref();
            match key.parse::<ImprovementArea>() {
                Ok(area) => areas.set(area, selected),
                Err(e) => debug!(key = %key, "{}", e),
            }
        }
        areas
    }

    /// Builder-style variant of [`EngagementAreas::set`].
    pub fn with(mut self, area: ImprovementArea, selected: bool) -> Self {
        self.set(area, selected);
        self
    }

    pub fn set(&mut self, area: ImprovementArea, selected: bool) {
        match self.entries.iter_mut().find(|(a, _)| *a == area) {
            Some(entry) => entry.1 = selected,
            None => self.entries.push((area, selected)),
        }
    }

    /// Whether `area` is present and flagged true.
    pub fn is_selected(&self, area: ImprovementArea) -> bool {
        self.entries
            .iter()
            .any(|(a, selected)| *a == area && *selected)
    }

    /// Selected areas in mapping iteration order.
    pub fn selected(&self) -> impl Iterator<Item = ImprovementArea> + '_ {
        self.entries
            .iter()
            .filter(|(_, selected)| *selected)
            .map(|(area, _)| *area)
    }

    pub fn selected_count(&self) -> usize {
        self.selected().count()
    }

    /// All entries, selected or not, in mapping iteration order.
    pub fn iter(&self) -> impl Iterator<Item = (ImprovementArea, bool)> + '_ {
        self.entries.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(ImprovementArea, bool)> for EngagementAreas {
    fn from_iter<T: IntoIterator<Item = (ImprovementArea, bool)>>(iter: T) -> Self {
        let mut areas = Self::new();
        for (area, selected) in iter {
            areas.set(area, selected);
        }
        areas
    }
}

impl Serialize for EngagementAreas {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (area, selected) in &self.entries {
            map.serialize_entry(area.as_str(), selected)?;
        }
        map.end()
    }
}

struct AreasVisitor;

impl<'de> Visitor<'de> for AreasVisitor {
    type Value = EngagementAreas;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of improvement area to boolean")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut areas = EngagementAreas::new();
        while let Some(key) = map.next_key::<String>()? {
            match key.parse::<ImprovementArea>() {
                Ok(area) => {
                    let selected: bool = map.next_value()?;
                    areas.set(area, selected);
                }
                Err(e) => {
                    debug!(key = %key, "{}", e);
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(areas)
    }
}

impl<'de> Deserialize<'de> for EngagementAreas {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AreasVisitor)
    }
}
