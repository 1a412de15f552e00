//! Sub-selection resolved against a `(real, working)` kind pair.

use super::{
    component_field, extract_axis_fn, extract_component, extract_field_fn, inject_component,
    inject_field_fn, set_component_field, ExtractAxisFn, ExtractFieldFn, InjectFieldFn, SingleField,
    SubSelection, TransformPart,
};
use crate::types::{apply_conversion, conversion, ConvertFn, Value, ValueKind};
use crate::util::{DVec3, Transform};

type ExtractComponentFn = fn(&Transform, TransformPart) -> Value;
type InjectComponentFn = fn(&mut Transform, TransformPart, &Value);

/// A [`SubSelection`] with every function it needs looked up in advance.
///
/// Resolved once per proxy; `apply_get` / `apply_set` only call the stored
/// function pointers. Unsupported conversions produce the working kind's
/// default.
#[derive(Clone, Copy, Debug)]
pub struct CachedSubSelection {
    selection: SubSelection,
    real_kind: ValueKind,
    working_kind: ValueKind,
    component_kind: Option<ValueKind>,
    applies_read: bool,
    applies_write: bool,

    extract_field_real: ExtractFieldFn,
    inject_field_real: InjectFieldFn,
    extract_field_working: ExtractFieldFn,
    inject_field_working: InjectFieldFn,
    extract_axis_real: ExtractAxisFn,
    extract_component: Option<ExtractComponentFn>,
    inject_component: Option<InjectComponentFn>,

    real_to_working: Option<ConvertFn>,
    working_to_real: Option<ConvertFn>,
    working_to_double: Option<ConvertFn>,
    double_to_working: Option<ConvertFn>,
    real_to_double: Option<ConvertFn>,
    double_to_real: Option<ConvertFn>,
    vector_to_working: Option<ConvertFn>,
    component_to_working: Option<ConvertFn>,
    working_to_component: Option<ConvertFn>,
}

impl CachedSubSelection {
    pub fn resolve(selection: &SubSelection, real_kind: ValueKind, working_kind: ValueKind) -> Self {
        let is_transform = real_kind == ValueKind::Transform;
        let component_kind = match selection.component {
            Some(part) if is_transform => Some(part.kind()),
            _ => None,
        };

        let mut cached = Self {
            selection: *selection,
            real_kind,
            working_kind,
            component_kind,
            applies_read: false,
            applies_write: false,
            extract_field_real: extract_field_fn(real_kind),
            inject_field_real: inject_field_fn(real_kind),
            extract_field_working: extract_field_fn(working_kind),
            inject_field_working: inject_field_fn(working_kind),
            extract_axis_real: extract_axis_fn(real_kind),
            extract_component: is_transform.then_some(extract_component as ExtractComponentFn),
            inject_component: is_transform.then_some(inject_component as InjectComponentFn),
            real_to_working: conversion(real_kind, working_kind),
            working_to_real: conversion(working_kind, real_kind),
            working_to_double: conversion(working_kind, ValueKind::Double),
            double_to_working: conversion(ValueKind::Double, working_kind),
            real_to_double: conversion(real_kind, ValueKind::Double),
            double_to_real: conversion(ValueKind::Double, real_kind),
            vector_to_working: conversion(ValueKind::Vector3, working_kind),
            component_to_working: component_kind.and_then(|k| conversion(k, working_kind)),
            working_to_component: component_kind.and_then(|k| conversion(working_kind, k)),
        };
        cached.applies_read = cached.compute_applies(true);
        cached.applies_write = cached.compute_applies(false);
        cached
    }

    fn compute_applies(&self, read: bool) -> bool {
        let s = &self.selection;
        if !s.is_valid {
            return false;
        }
        if s.field.is_some() {
            return self.real_kind.field_count() > 1;
        }
        if read && s.axis.is_some() {
            return self.real_kind.has_rotation();
        }
        if s.component.is_some() {
            return self.real_kind == ValueKind::Transform;
        }
        false
    }

    #[inline]
    pub fn selection(&self) -> &SubSelection {
        &self.selection
    }

    #[inline]
    pub fn real_kind(&self) -> ValueKind {
        self.real_kind
    }

    #[inline]
    pub fn working_kind(&self) -> ValueKind {
        self.working_kind
    }

    /// The selection changes what a read returns.
    #[inline]
    pub fn applies_to_source_read(&self) -> bool {
        self.applies_read
    }

    /// The selection changes what a write touches. Axes are read-only.
    #[inline]
    pub fn applies_to_target_write(&self) -> bool {
        self.applies_write
    }

    /// Read `real` (of the real kind) as the working kind.
    pub fn apply_get(&self, real: &Value) -> Value {
        if !self.applies_read {
            return apply_conversion(self.real_to_working, real, self.working_kind);
        }
        if self.selection.component.is_some() && self.extract_component.is_some() {
            return self.get_with_component(real);
        }
        if let Some(axis) = self.selection.axis.filter(|_| self.real_kind.has_rotation()) {
            return self.from_vector((self.extract_axis_real)(real, axis));
        }
        if let Some(field) = self.selection.field {
            return self.from_double((self.extract_field_real)(real, field));
        }
        apply_conversion(self.real_to_working, real, self.working_kind)
    }

    fn get_with_component(&self, real: &Value) -> Value {
        let (Value::Transform(t), Some(part), Some(extract), Some(kind)) =
            (real, self.selection.component, self.extract_component, self.component_kind)
        else {
            return Value::default_of(self.working_kind);
        };
        match (part, self.selection.axis, self.selection.field) {
            (TransformPart::Rotation, Some(axis), _) => self.from_vector(axis.direction(t.rotation)),
            (_, _, Some(field)) => self.from_double(component_field(t, part, field)),
            _ => {
                let value = extract(t, part);
                if kind == self.working_kind {
                    value
                } else {
                    apply_conversion(self.component_to_working, &value, self.working_kind)
                }
            }
        }
    }

    /// Write `working` (of the working kind) into `real`.
    pub fn apply_set(&self, real: &mut Value, working: &Value) {
        if !self.applies_write {
            *real = apply_conversion(self.working_to_real, working, self.real_kind);
            return;
        }
        if let (Some(part), Some(inject), Some(kind)) =
            (self.selection.component, self.inject_component, self.component_kind)
        {
            if let Value::Transform(t) = real {
                match self.selection.field {
                    Some(field) => set_component_field(t, part, self.to_double(working), field),
                    None if kind == self.working_kind => inject(t, part, working),
                    None => inject(t, part, &apply_conversion(self.working_to_component, working, kind)),
                }
            }
            return;
        }
        if let Some(field) = self.selection.field {
            (self.inject_field_real)(real, self.to_double(working), field);
            return;
        }
        *real = apply_conversion(self.working_to_real, working, self.real_kind);
    }

    /// Read `real` as a single double: the selected field when one applies,
    /// else the real-to-double conversion.
    pub fn get_f64(&self, real: &Value) -> f64 {
        match self.selection.field {
            Some(field) if self.applies_read => (self.extract_field_real)(real, field),
            _ => double_of(apply_conversion(self.real_to_double, real, ValueKind::Double)),
        }
    }

    /// Write a single double into `real`, the counterpart of [`get_f64`](Self::get_f64).
    pub fn set_f64(&self, real: &mut Value, value: f64) {
        match self.selection.field {
            Some(field) if self.applies_write => (self.inject_field_real)(real, value, field),
            _ => *real = apply_conversion(self.double_to_real, &Value::Double(value), self.real_kind),
        }
    }

    /// Field of a working-kind value; X when no field is selected.
    pub fn working_field(&self, working: &Value) -> f64 {
        (self.extract_field_working)(working, self.selection.field.unwrap_or(SingleField::X))
    }

    /// Set a field of a working-kind value; X when no field is selected.
    pub fn set_working_field(&self, working: &mut Value, value: f64) {
        (self.inject_field_working)(working, value, self.selection.field.unwrap_or(SingleField::X))
    }

    #[inline]
    fn from_double(&self, v: f64) -> Value {
        if self.working_kind == ValueKind::Double {
            Value::Double(v)
        } else {
            apply_conversion(self.double_to_working, &Value::Double(v), self.working_kind)
        }
    }

    #[inline]
    fn from_vector(&self, v: DVec3) -> Value {
        if self.working_kind == ValueKind::Vector3 {
            Value::Vector3(v)
        } else {
            apply_conversion(self.vector_to_working, &Value::Vector3(v), self.working_kind)
        }
    }

    #[inline]
    fn to_double(&self, working: &Value) -> f64 {
        match working {
            Value::Double(v) => *v,
            other => double_of(apply_conversion(self.working_to_double, other, ValueKind::Double)),
        }
    }
}

#[inline]
fn double_of(value: Value) -> f64 {
    match value {
        Value::Double(v) => v,
        _ => 0.0,
    }
}
