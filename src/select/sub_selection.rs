//! Parsed sub-selection of a value: a field, an axis, a transform part.

use std::borrow::Cow;
use std::fmt;

use super::{
    component_field, extract_axis_fn, extract_component, extract_field_fn, inject_component,
    inject_field_fn, set_component_field, Keywords, SingleField, TransformPart,
};
use crate::types::{convert_or_default, Value, ValueKind};
use crate::util::Axis;

/// What part of a value a selector addresses.
///
/// Built from the extra tokens of a selector (`Rotation.Forward` in
/// `MyTransform.Rotation.Forward`). An invalid selection addresses the whole
/// value, so every apply degrades to a plain conversion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SubSelection {
    pub is_valid: bool,
    pub component: Option<TransformPart>,
    pub axis: Option<Axis>,
    pub field: Option<SingleField>,
    /// Component index of `field`, 0 for derived fields.
    pub field_index: usize,
    /// Kind the tokens suggest the source has.
    pub possible_source_kind: Option<ValueKind>,
}

impl SubSelection {
    /// Selection that addresses the whole value.
    pub const NONE: Self = Self {
        is_valid: false,
        component: None,
        axis: None,
        field: None,
        field_index: 0,
        possible_source_kind: None,
    };

    /// Resolve extra tokens.
    ///
    /// Component and axis keywords are searched over every token; the field
    /// is read from the second token when there are several (the first one
    /// names the component), else from the only token.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Self {
        if tokens.is_empty() {
            return Self::NONE;
        }
        let keywords = Keywords::get();

        let component = tokens.iter().find_map(|t| keywords.component(t.as_ref()));
        let axis = tokens.iter().find_map(|t| keywords.axis(t.as_ref()));
        let field_token = if tokens.len() > 1 { &tokens[1] } else { &tokens[0] };
        let field = keywords.field(field_token.as_ref());

        let possible_source_kind = match (component, field) {
            (Some(part), _) => Some(part.kind()),
            (None, Some(f)) => Some(f.hint),
            (None, None) if axis.is_some() => Some(ValueKind::Quaternion),
            (None, None) => None,
        };

        Self {
            is_valid: component.is_some() || axis.is_some() || field.is_some(),
            component,
            axis,
            field: field.map(|f| f.field),
            field_index: field.map_or(0, |f| f.index),
            possible_source_kind,
        }
    }

    /// Resolve a dotted suffix such as `.Rotation.Forward`.
    pub fn from_path(path: &str) -> Self {
        let tokens: Vec<&str> = path.split('.').map(str::trim).filter(|t| !t.is_empty()).collect();
        Self::parse(&tokens)
    }

    /// Select a transform part.
    pub fn set_component(&mut self, part: TransformPart) {
        self.component = Some(part);
        self.is_valid = true;
    }

    /// Select component field `index` (0..=3 for X..W).
    ///
    /// An out-of-range index clears the field and returns `false`.
    pub fn set_field_index(&mut self, index: usize) -> bool {
        match SingleField::from_index(index) {
            Some(field) => {
                self.field = Some(field);
                self.field_index = index;
                self.is_valid = true;
                true
            }
            None => {
                self.field = None;
                self.field_index = 0;
                self.is_valid = self.component.is_some() || self.axis.is_some();
                false
            }
        }
    }

    /// Kind produced by reading through this selection.
    pub fn get_result_kind(&self, fallback: ValueKind) -> ValueKind {
        if !self.is_valid {
            return fallback;
        }
        if self.field.is_some() {
            ValueKind::Double
        } else if self.axis.is_some() {
            ValueKind::Vector3
        } else if let Some(part) = self.component {
            part.kind()
        } else {
            fallback
        }
    }

    /// Extract the selected part of `src` and convert it to `working_kind`.
    pub fn apply_get(&self, real_kind: ValueKind, src: &Value, working_kind: ValueKind) -> Value {
        let src = as_kind(src, real_kind);
        let part = self.extract(real_kind, &src);
        if part.kind() == working_kind {
            part
        } else {
            convert_or_default(&part, working_kind)
        }
    }

    fn extract(&self, real_kind: ValueKind, src: &Value) -> Value {
        if !self.is_valid {
            return src.clone();
        }
        if let (Some(part), Value::Transform(t)) = (self.component, src) {
            return match (part, self.axis, self.field) {
                (TransformPart::Rotation, Some(axis), _) => Value::Vector3(axis.direction(t.rotation)),
                (_, _, Some(field)) => Value::Double(component_field(t, part, field)),
                _ => extract_component(t, part),
            };
        }
        // Axes only read from rotation-bearing kinds, fields only from
        // multi-component kinds; anything else reads the plain value.
        if let Some(field) = self.field.filter(|_| real_kind.field_count() > 1) {
            return match self.axis {
                Some(axis) if real_kind.has_rotation() => Value::Vector3(extract_axis_fn(real_kind)(src, axis)),
                _ => Value::Double(extract_field_fn(real_kind)(src, field)),
            };
        }
        match self.axis {
            Some(axis) if self.field.is_none() && real_kind.has_rotation() => {
                Value::Vector3(extract_axis_fn(real_kind)(src, axis))
            }
            _ => src.clone(),
        }
    }

    /// Write `value` (of `working_kind`) into the selected part of `target`,
    /// leaving the rest of `target` untouched.
    pub fn apply_set(&self, real_kind: ValueKind, target: &mut Value, working_kind: ValueKind, value: &Value) {
        if target.kind() != real_kind {
            *target = convert_or_default(target, real_kind);
        }
        let value = as_kind(value, working_kind);

        if !self.is_valid {
            *target = convert_or_default(&value, real_kind);
            return;
        }
        if let (Some(part), Value::Transform(t)) = (self.component, &mut *target) {
            match self.field {
                Some(field) => set_component_field(t, part, scalar_of(&value), field),
                None => inject_component(t, part, &value),
            }
            return;
        }
        if let Some(field) = self.field.filter(|_| real_kind.field_count() > 1) {
            inject_field_fn(real_kind)(target, scalar_of(&value), field);
            return;
        }
        *target = convert_or_default(&value, real_kind);
    }

    /// Selected field of `src` as a double (`0` when no field is selected).
    pub fn extract_field_f64(&self, src: &Value) -> f64 {
        match self.field {
            Some(field) => extract_field_fn(src.kind())(src, field),
            None => 0.0,
        }
    }

    /// Write a double into the selected field of `target`; no-op without one.
    pub fn inject_field_f64(&self, target: &mut Value, value: f64) {
        if let Some(field) = self.field {
            inject_field_fn(target.kind())(target, value, field);
        }
    }
}

fn as_kind(value: &Value, kind: ValueKind) -> Cow<'_, Value> {
    if value.kind() == kind {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(convert_or_default(value, kind))
    }
}

pub(crate) fn scalar_of(value: &Value) -> f64 {
    match value {
        Value::Double(v) => *v,
        other => match convert_or_default(other, ValueKind::Double) {
            Value::Double(v) => v,
            _ => 0.0,
        },
    }
}

/// Dotted form, e.g. `.Rotation.Forward`; empty when invalid.
impl fmt::Display for SubSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid {
            return Ok(());
        }
        if let Some(part) = self.component {
            write!(f, ".{}", part)?;
        }
        if let Some(axis) = self.axis {
            write!(f, ".{}", axis)?;
        }
        if let Some(field) = self.field {
            write!(f, ".{}", field)?;
        }
        Ok(())
    }
}
