//! Keyword tables for selector extra tokens.
//!
//! Built once on first use and immutable afterwards. Lookups take the token
//! as written; matching is case-insensitive.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::{SingleField, TransformPart};
use crate::types::ValueKind;
use crate::util::Axis;

/// Field keyword entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldKeyword {
    pub field: SingleField,
    /// Kind the keyword suggests the source is (`R`/`ROLL` hint a rotation).
    pub hint: ValueKind,
    pub index: usize,
}

/// The three keyword tables.
#[derive(Debug)]
pub struct Keywords {
    fields: HashMap<&'static str, FieldKeyword>,
    axes: HashMap<&'static str, Axis>,
    components: HashMap<&'static str, TransformPart>,
}

const FIELDS: &[(&str, SingleField, ValueKind)] = &[
    ("X", SingleField::X, ValueKind::Vector3),
    ("R", SingleField::X, ValueKind::Quaternion),
    ("ROLL", SingleField::X, ValueKind::Quaternion),
    ("RX", SingleField::X, ValueKind::Quaternion),
    ("Y", SingleField::Y, ValueKind::Vector3),
    ("G", SingleField::Y, ValueKind::Vector4),
    ("YAW", SingleField::Y, ValueKind::Quaternion),
    ("RY", SingleField::Y, ValueKind::Quaternion),
    ("Z", SingleField::Z, ValueKind::Vector3),
    ("B", SingleField::Z, ValueKind::Vector4),
    ("P", SingleField::Z, ValueKind::Quaternion),
    ("PITCH", SingleField::Z, ValueKind::Quaternion),
    ("RZ", SingleField::Z, ValueKind::Quaternion),
    ("W", SingleField::W, ValueKind::Vector4),
    ("A", SingleField::W, ValueKind::Vector4),
    ("L", SingleField::Length, ValueKind::Vector3),
    ("LEN", SingleField::Length, ValueKind::Vector3),
    ("LENGTH", SingleField::Length, ValueKind::Vector3),
    ("SQUAREDLENGTH", SingleField::SquaredLength, ValueKind::Vector3),
    ("LENSQR", SingleField::SquaredLength, ValueKind::Vector3),
    ("VOL", SingleField::Volume, ValueKind::Vector3),
    ("VOLUME", SingleField::Volume, ValueKind::Vector3),
    ("SUM", SingleField::Sum, ValueKind::Vector3),
];

const AXES: &[(&str, Axis)] = &[
    ("FORWARD", Axis::Forward),
    ("FRONT", Axis::Forward),
    ("BACKWARD", Axis::Backward),
    ("BACK", Axis::Backward),
    ("RIGHT", Axis::Right),
    ("LEFT", Axis::Left),
    ("UP", Axis::Up),
    ("TOP", Axis::Up),
    ("DOWN", Axis::Down),
    ("BOTTOM", Axis::Down),
];

const COMPONENTS: &[(&str, TransformPart)] = &[
    ("POSITION", TransformPart::Position),
    ("POS", TransformPart::Position),
    ("ROTATION", TransformPart::Rotation),
    ("ROT", TransformPart::Rotation),
    ("ORIENT", TransformPart::Rotation),
    ("SCALE", TransformPart::Scale),
];

impl Keywords {
    fn build() -> Self {
        let fields = FIELDS
            .iter()
            .map(|&(k, field, hint)| (k, FieldKeyword { field, hint, index: field.index() }))
            .collect();
        Self {
            fields,
            axes: AXES.iter().copied().collect(),
            components: COMPONENTS.iter().copied().collect(),
        }
    }

    /// Shared snapshot.
    pub fn get() -> &'static Self {
        static KEYWORDS: OnceLock<Keywords> = OnceLock::new();
        KEYWORDS.get_or_init(|| {
            let k = Self::build();
            tracing::debug!(
                "Selector keywords ready: {} fields, {} axes, {} components",
                k.fields.len(),
                k.axes.len(),
                k.components.len()
            );
            k
        })
    }

    pub fn field(&self, token: &str) -> Option<FieldKeyword> {
        self.fields.get(token.trim().to_ascii_uppercase().as_str()).copied()
    }

    pub fn axis(&self, token: &str) -> Option<Axis> {
        self.axes.get(token.trim().to_ascii_uppercase().as_str()).copied()
    }

    pub fn component(&self, token: &str) -> Option<TransformPart> {
        self.components.get(token.trim().to_ascii_uppercase().as_str()).copied()
    }

    /// Total entries across the three tables.
    pub fn len(&self) -> usize {
        self.fields.len() + self.axes.len() + self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when `token` is in any of the three tables.
    pub fn is_keyword(&self, token: &str) -> bool {
        self.field(token).is_some() || self.axis(token).is_some() || self.component(token).is_some()
    }
}
