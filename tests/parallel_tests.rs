//! Integration tests for concurrent proxy access.

use attrkit::data::{
    blend_range, for_each_range, get_proxy_buffer, scopes, transform_range, AttributeColumn, Facade, PointCloud,
    PointStore, ProxyDescriptor, Role, Side,
};
use attrkit::types::{BlendOp, Value, ValueKind};
use attrkit::util::{DVec3, Settings};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const COUNT: usize = 10_000;

fn facade() -> (Arc<PointCloud>, Facade) {
    attrkit::init();
    let cloud = Arc::new(PointCloud::new(COUNT));
    cloud.add_attribute("A", (0..COUNT).map(|i| i as f64).collect::<Vec<_>>());
    cloud.add_attribute("B", vec![DVec3::new(1.0, 2.0, 3.0); COUNT]);
    let settings = Settings { chunk_size: 256, ..Settings::default() };
    let facade = Facade::new(cloud.clone()).with_settings(settings);
    (cloud, facade)
}

#[test]
fn test_scopes_cover_every_index_once() {
    let ranges = scopes(COUNT, 256);
    assert_eq!(ranges.first().map(|r| r.start), Some(0));
    assert_eq!(ranges.last().map(|r| r.end), Some(COUNT));
    assert!(ranges.windows(2).all(|w| w[0].end == w[1].start));
}

#[test]
fn test_parallel_reads() {
    let (_, f) = facade();
    let d = ProxyDescriptor::capture(&f, "B.Z", Side::In).unwrap();
    let proxy = get_proxy_buffer(&f, &d).unwrap();
    let total = AtomicUsize::new(0);
    for_each_range(proxy.len(), f.settings().chunk_size, |range| {
        let sum: f64 = range.map(|i| proxy.get::<f64>(i)).sum();
        total.fetch_add(sum as usize, Ordering::Relaxed);
    });
    assert_eq!(total.load(Ordering::Relaxed), 3 * COUNT);
}

#[test]
fn test_transform_range_writes_every_index() {
    let (cloud, f) = facade();
    let source = get_proxy_buffer(&f, &ProxyDescriptor::capture(&f, "A", Side::In).unwrap()).unwrap();
    let target = ProxyDescriptor::capture(&f, "B.X", Side::Out).unwrap().with_role(Role::Write);
    let target = get_proxy_buffer(&f, &target).unwrap();

    transform_range(&*source, &*target, f.settings().chunk_size, |_, v| match v {
        Value::Double(x) => Value::Double(x * 2.0),
        other => other,
    });
    f.flush();

    let column = cloud.attribute("B").unwrap();
    for i in [0, 1, 777, COUNT - 1] {
        assert_eq!(column.read(i), Value::Vector3(DVec3::new(i as f64 * 2.0, 2.0, 3.0)));
    }
}

#[test]
fn test_blend_range() {
    let (cloud, f) = facade();
    let a = get_proxy_buffer(&f, &ProxyDescriptor::capture(&f, "A", Side::In).unwrap()).unwrap();
    let b = ProxyDescriptor::capture(&f, "B", Side::In).unwrap().with_working_kind(ValueKind::Double);
    let b = get_proxy_buffer(&f, &b).unwrap();
    let out = ProxyDescriptor::new(attrkit::select::Selector::attribute("Sum"), ValueKind::Double)
        .with_role(Role::Write)
        .with_side(Side::Out);
    let out = get_proxy_buffer(&f, &out).unwrap();

    blend_range(&*a, &*b, &*out, BlendOp::Add, 1.0, f.settings().chunk_size);
    f.flush();

    let sum = cloud.attribute("Sum").unwrap();
    assert_eq!(sum.kind(), ValueKind::Double);
    assert_eq!(sum.read(10), Value::Double(11.0));
    assert_eq!(sum.read(COUNT - 1), Value::Double(COUNT as f64));
}

#[test]
fn test_concurrent_pool_access() {
    let (_, f) = facade();
    let d = ProxyDescriptor::capture(&f, "A", Side::In).unwrap().shared();
    let proxies: Vec<_> = (0..64)
        .into_par_iter()
        .map(|_| get_proxy_buffer(&f, &d).unwrap())
        .collect();
    assert!(proxies.iter().all(|p| Arc::ptr_eq(p, &proxies[0])));
    assert_eq!(f.pool().len(), 1);
    let (hits, misses) = f.pool().stats();
    assert_eq!(hits + misses, 64);
    assert_eq!(misses, 1);
}
