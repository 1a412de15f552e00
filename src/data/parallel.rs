//! Chunked parallel loops over point indices.
//!
//! Proxies are `Sync`, so one proxy is shared by every worker; each worker
//! owns a disjoint index range.

use rayon::prelude::*;
use std::ops::Range;

use super::BufferProxy;
use crate::types::{blender, BlendOp, Value};

/// Split `0..count` into ranges of at most `chunk_size` indices.
pub fn scopes(count: usize, chunk_size: usize) -> Vec<Range<usize>> {
    let chunk_size = chunk_size.max(1);
    (0..count)
        .step_by(chunk_size)
        .map(|start| start..(start + chunk_size).min(count))
        .collect()
}

/// Run `f` on every chunk of `0..count` in parallel.
pub fn for_each_range<F>(count: usize, chunk_size: usize, f: F)
where
    F: Fn(Range<usize>) + Send + Sync,
{
    scopes(count, chunk_size).into_par_iter().for_each(f);
}

/// `target[i] = f(i, source[i])` for every index of `target`.
///
/// `source` is read in its working kind; the result is written through
/// `target`'s conversions.
pub fn transform_range<F>(source: &dyn BufferProxy, target: &dyn BufferProxy, chunk_size: usize, f: F)
where
    F: Fn(usize, Value) -> Value + Send + Sync,
{
    for_each_range(target.len(), chunk_size, |range| {
        for i in range {
            let value = f(i, source.get_raw(i));
            target.set_raw(i, &value);
        }
    });
}

/// `target[i] = blend(op, a[i], b[i], weight)` in the target's working kind.
pub fn blend_range(
    a: &dyn BufferProxy,
    b: &dyn BufferProxy,
    target: &dyn BufferProxy,
    op: BlendOp,
    weight: f64,
    chunk_size: usize,
) {
    let kind = target.working_kind();
    let blend = blender(kind);
    for_each_range(target.len(), chunk_size, |range| {
        for i in range {
            let value = blend(op, &a.get_as(i, kind), &b.get_as(i, kind), weight);
            target.set_raw(i, &value);
        }
    });
}
