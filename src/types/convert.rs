//! Any-kind to any-kind conversion table.
//!
//! A 15×15 matrix of function pointers, one independent entry per
//! `(from, to)` pair. Rows are produced by one generic builder per source
//! type, so there is no per-call-site instantiation: callers look an entry up
//! once and keep the pointer.
//!
//! A `None` entry is the formal "unsupported" state. A `Some` entry may still
//! return `None` for one particular input (a string that does not parse);
//! callers treat both the same way and fall back to the target's default.

use std::sync::OnceLock;

use super::cast::{Cast, CastTarget};
use super::{Name, SoftClassPath, SoftObjectPath, Value, ValueKind};
use crate::util::{DQuat, DVec2, DVec3, DVec4, Rotator, Transform};

/// Converts a value of the entry's source kind into its target kind.
pub type ConvertFn = fn(&Value) -> Option<Value>;

/// Whether a `(from, to)` pair has a conversion at all.
///
/// Pairs whose result would not depend on the input are left out: numbers
/// to and from transforms, and non-text kinds to and from asset paths (a path
/// still converts to a boolean validity flag).
pub const fn is_supported(from: ValueKind, to: ValueKind) -> bool {
    use ValueKind::*;
    if from as u8 == to as u8 {
        return true;
    }
    match (from, to) {
        (Boolean | Int32 | Int64 | Float | Double, Transform) => false,
        (Transform, Int32 | Int64 | Float | Double) => false,
        (ObjectPathRef | ClassPathRef, Boolean | String | Name | ObjectPathRef | ClassPathRef) => true,
        (ObjectPathRef | ClassPathRef, _) => false,
        (String | Name, _) => true,
        (_, ObjectPathRef | ClassPathRef) => false,
        _ => true,
    }
}

fn copy_value(value: &Value) -> Option<Value> {
    Some(value.clone())
}

fn convert_pair<S: Cast + ?Sized, T: CastTarget>(value: &Value) -> Option<Value> {
    S::peek(value).and_then(|s| T::cast(s)).map(T::into_value)
}

fn entry<S: Cast + ?Sized, T: CastTarget>() -> Option<ConvertFn> {
    if S::KIND == T::KIND {
        Some(copy_value as ConvertFn)
    } else if is_supported(S::KIND, T::KIND) {
        Some(convert_pair::<S, T> as ConvertFn)
    } else {
        None
    }
}

type Row = [Option<ConvertFn>; ValueKind::COUNT];

/// One source row; column order follows [`ValueKind::ALL`].
fn row<S: Cast + ?Sized>() -> Row {
    [
        entry::<S, bool>(),
        entry::<S, i32>(),
        entry::<S, i64>(),
        entry::<S, f32>(),
        entry::<S, f64>(),
        entry::<S, DVec2>(),
        entry::<S, DVec3>(),
        entry::<S, DVec4>(),
        entry::<S, Rotator>(),
        entry::<S, DQuat>(),
        entry::<S, Transform>(),
        entry::<S, String>(),
        entry::<S, Name>(),
        entry::<S, SoftObjectPath>(),
        entry::<S, SoftClassPath>(),
    ]
}

/// Immutable conversion matrix.
pub struct ConversionTable {
    rows: [Row; ValueKind::COUNT],
}

impl ConversionTable {
    fn build() -> Self {
        Self {
            rows: [
                row::<bool>(),
                row::<i32>(),
                row::<i64>(),
                row::<f32>(),
                row::<f64>(),
                row::<DVec2>(),
                row::<DVec3>(),
                row::<DVec4>(),
                row::<Rotator>(),
                row::<DQuat>(),
                row::<Transform>(),
                row::<str>(),
                row::<Name>(),
                row::<SoftObjectPath>(),
                row::<SoftClassPath>(),
            ],
        }
    }

    /// Shared table, built on first use.
    pub fn get() -> &'static Self {
        static TABLE: OnceLock<ConversionTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            let table = Self::build();
            tracing::debug!("Conversion table ready: {} supported pairs", table.supported_count());
            table
        })
    }

    /// Entry for `(from, to)`, `None` when unsupported.
    #[inline]
    pub fn lookup(&self, from: ValueKind, to: ValueKind) -> Option<ConvertFn> {
        self.rows[from.index()][to.index()]
    }

    /// Number of supported pairs, the diagonal included.
    pub fn supported_count(&self) -> usize {
        self.rows.iter().flatten().filter(|e| e.is_some()).count()
    }
}

/// Entry for `(from, to)` from the shared table.
#[inline]
pub fn conversion(from: ValueKind, to: ValueKind) -> Option<ConvertFn> {
    ConversionTable::get().lookup(from, to)
}

/// Convert `value` to kind `to`.
///
/// `None` when the pair is unsupported or the input cannot be parsed.
pub fn convert(value: &Value, to: ValueKind) -> Option<Value> {
    conversion(value.kind(), to).and_then(|f| f(value))
}

/// Convert `value` to kind `to`, falling back to the kind's default.
pub fn convert_or_default(value: &Value, to: ValueKind) -> Value {
    convert(value, to).unwrap_or_else(|| Value::default_of(to))
}

/// Run a resolved entry, falling back to the default of `to`.
#[inline]
pub fn apply_conversion(f: Option<ConvertFn>, value: &Value, to: ValueKind) -> Value {
    f.and_then(|f| f(value)).unwrap_or_else(|| Value::default_of(to))
}
