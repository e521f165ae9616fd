//! Element table and handles.
//!
//! Elements live in an [`ElementTable`] owned by the caller. Values refer to
//! them through an [`ElementHandle`], a slot index plus a generation counter:
//! once an element is removed, every handle to it stops resolving, even after
//! the slot is reused.
//!
//! Tables can be loaded from an element profile:
//!
//! ```toml
//! [[element]]
//! name = "X"
//! report_size = 16
//! logical_min = -32768
//! logical_max = 32767
//!
//! [element.calibration]
//! dead_zone_min = -512
//! dead_zone_max = 512
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::error::ConfigError;

/// Non-owning reference to an element in an [`ElementTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle {
    index: u32,
    generation: u32,
}

impl ElementHandle {
    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }

    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}@{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

/// Externally owned store of elements.
#[derive(Debug, Clone, Default)]
pub struct ElementTable {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

/// Serializable list of element descriptions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementProfile {
    #[serde(rename = "element", default)]
    pub elements: Vec<Element>,
}

impl ElementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element and return its handle.
    pub fn insert(&mut self, element: Element) -> ElementHandle {
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(index as usize) {
                slot.element = Some(element);
                return ElementHandle {
                    index,
                    generation: slot.generation,
                };
            }
        }

        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 0,
            element: Some(element),
        });
        ElementHandle {
            index,
            generation: 0,
        }
    }

    /// Remove an element. Outstanding handles to it stop resolving.
    pub fn remove(&mut self, handle: ElementHandle) -> Option<Element> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let element = slot.element.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        Some(element)
    }

    pub fn get(&self, handle: ElementHandle) -> Option<&Element> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.element.as_ref())
    }

    /// Mutable access, e.g. to recalibrate. Existing values keep their snapshot.
    pub fn get_mut(&mut self, handle: ElementHandle) -> Option<&mut Element> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.element.as_mut())
    }

    pub fn contains(&self, handle: ElementHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Iterate live `(handle, element)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementHandle, &Element)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            let element = slot.element.as_ref()?;
            let index = u32::try_from(i).ok()?;
            Some((
                ElementHandle {
                    index,
                    generation: slot.generation,
                },
                element,
            ))
        })
    }

    /// First element whose [`display_name`](Element::display_name) equals `name`.
    pub fn find(&self, name: &str) -> Option<ElementHandle> {
        self.iter()
            .find(|(_, el)| el.display_name() == name)
            .map(|(handle, _)| handle)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.element.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build a table from a profile, validating every element.
    pub fn from_profile(profile: ElementProfile) -> Result<Self, ConfigError> {
        let mut table = Self::new();
        for (index, element) in profile.elements.into_iter().enumerate() {
            element
                .validate()
                .map_err(|source| ConfigError::InvalidElement { index, source })?;
            if element.has_degenerate_bounds() {
                tracing::warn!(
                    index,
                    name = %element.display_name(),
                    "element has a zero-width range; scaled values will use fallbacks"
                );
            }
            table.insert(element);
        }
        tracing::info!(elements = table.len(), "loaded element profile");
        Ok(table)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Self::from_profile(toml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Self::from_profile(serde_json::from_str(s)?)
    }

    /// Load a `.toml` or `.json` element profile.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&text),
            Some("json") => Self::from_json_str(&text),
            _ => Err(ConfigError::UnknownFormat(path.to_path_buf())),
        }
    }

    /// Live elements as a profile, in slot order.
    pub fn to_profile(&self) -> ElementProfile {
        ElementProfile {
            elements: self.iter().map(|(_, el)| el.clone()).collect(),
        }
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(&self.to_profile())?)
    }
}
