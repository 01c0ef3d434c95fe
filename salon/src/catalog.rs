//! Level catalog: nails, stickers, targets, tolerances, and the ordered store.
//!
//! The catalog is loaded once before any transition and is read-only from
//! then on. JSON keys follow the authoring format (`camelCase`, e.g.
//! `stickerId`, `targetTransform`, `nailTargets`).

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_STICKER_SCALE, DEFAULT_TOLERANCE_ROTATION, DEFAULT_TOLERANCE_SCALE, DEFAULT_TOLERANCE_X,
    DEFAULT_TOLERANCE_Y,
};

/// Stable identifier of a task (level).
pub type TaskId = String;

/// Identifier of a sticker, unique within its task.
pub type StickerId = String;

/// Error returned by [`Catalog::from_json`] and [`Catalog::new`].
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog source is not valid JSON of the expected shape.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    /// The catalog defines no tasks.
    #[error("catalog has no tasks")]
    Empty,
    /// Two tasks share an id.
    #[error("duplicate task id `{0}`")]
    DuplicateTask(TaskId),
    /// Two stickers in the same task share an id.
    #[error("task `{task}` defines sticker `{sticker}` more than once")]
    DuplicateSticker { task: TaskId, sticker: StickerId },
    /// A target points at a sticker the task does not define.
    #[error("task `{task}` targets unknown sticker `{sticker}`")]
    UnknownSticker { task: TaskId, sticker: StickerId },
}

/// One of the five paintable nails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NailName {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

/// Position, rotation, and scale in normalized board space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Horizontal position in `[0, 1]`.
    pub x: f64,
    /// Vertical position in `[0, 1]`.
    pub y: f64,
    /// Clockwise rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    /// Uniform scale factor.
    #[serde(default = "unit_scale")]
    pub scale: f64,
}

fn unit_scale() -> f64 {
    1.0
}

fn default_start_transform() -> Transform {
    Transform { x: 0.5, y: 0.5, rotation: 0.0, scale: DEFAULT_STICKER_SCALE }
}

/// Allowed deviation per axis. Absent fields use the crate defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

impl Tolerance {
    #[must_use]
    pub fn x(&self) -> f64 {
        self.x.unwrap_or(DEFAULT_TOLERANCE_X)
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.y.unwrap_or(DEFAULT_TOLERANCE_Y)
    }

    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation.unwrap_or(DEFAULT_TOLERANCE_ROTATION)
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale.unwrap_or(DEFAULT_TOLERANCE_SCALE)
    }
}

/// A placeable sticker as offered in the palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sticker {
    pub id: StickerId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Image source for the host renderer.
    #[serde(default, alias = "img", alias = "src", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Transform used when the sticker is first dropped on the board.
    #[serde(default = "default_start_transform")]
    pub start_transform: Transform,
}

/// The goal for one sticker in a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub sticker_id: StickerId,
    pub nail_name: NailName,
    pub target_transform: Transform,
    #[serde(default)]
    pub tolerance: Tolerance,
}

/// One level: required nail colors plus sticker placement goals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    #[serde(default, alias = "name")]
    pub title: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub stickers: Vec<Sticker>,
    #[serde(default)]
    pub targets: Vec<Target>,
    /// Required paint per nail. Nails absent here have no paint requirement.
    #[serde(default)]
    pub nail_targets: BTreeMap<NailName, String>,
}

impl Task {
    /// The target for `sticker_id`, if the sticker has one.
    #[must_use]
    pub fn target_for(&self, sticker_id: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.sticker_id == sticker_id)
    }

    /// The sticker definition for `sticker_id`.
    #[must_use]
    pub fn sticker(&self, sticker_id: &str) -> Option<&Sticker> {
        self.stickers.iter().find(|s| s.id == sticker_id)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for sticker in &self.stickers {
            if !seen.insert(sticker.id.as_str()) {
                return Err(CatalogError::DuplicateSticker { task: self.id.clone(), sticker: sticker.id.clone() });
            }
        }
        for target in &self.targets {
            if !seen.contains(target.sticker_id.as_str()) {
                return Err(CatalogError::UnknownSticker {
                    task: self.id.clone(),
                    sticker: target.sticker_id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Ordered, immutable list of tasks.
#[derive(Debug, Clone)]
pub struct Catalog {
    tasks: Vec<Task>,
}

impl Catalog {
    /// Build a catalog, checking that task ids are unique and that every
    /// target references a sticker defined by its own task.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found, in catalog order.
    pub fn new(tasks: Vec<Task>) -> Result<Self, CatalogError> {
        if tasks.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut ids = HashSet::new();
        for task in &tasks {
            if !ids.insert(task.id.as_str()) {
                return Err(CatalogError::DuplicateTask(task.id.clone()));
            }
            task.validate()?;
        }
        Ok(Self { tasks })
    }

    /// Parse and validate a catalog from a JSON array of tasks.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for malformed JSON and any validation
    /// error from [`Catalog::new`].
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let tasks: Vec<Task> = serde_json::from_str(raw)?;
        Self::new(tasks)
    }

    /// Look up a task by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// The first task in play order.
    #[must_use]
    pub fn first(&self) -> Option<&Task> {
        self.tasks.first()
    }

    /// All task ids in catalog order.
    #[must_use]
    pub fn ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(|t| t.id.clone()).collect()
    }

    /// Whether `id` names a task in this catalog.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Iterate tasks in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the catalog has no tasks. Never true once validated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
