//! Proxy construction.

use std::sync::Arc;

use super::{
    finalize, ArrayProxy, AttributeProxy, BufferProxy, ConstantProxy, DirectProxy, Facade, PropertyProxy,
    ProxyDescriptor, Role, Side, ValueArray,
};
use crate::select::SelectorTarget;
use crate::types::{Value, ValueKind};
use crate::util::{Error, Result};

/// Build (or fetch from the pool) the proxy `descriptor` describes.
///
/// Variant selection:
/// - `constant` flag: [`ConstantProxy`] from the first input value
/// - point property: [`PropertyProxy`]
/// - data domain: [`DirectProxy`] over the collection value
/// - `direct` flag: [`DirectProxy`] over the store column
/// - otherwise: [`AttributeProxy`] over a facade buffer
///
/// Read descriptors flagged `shared` are pooled when the facade settings
/// allow it. A proxy that fails validation is returned inert.
pub fn get_proxy_buffer(facade: &Facade, descriptor: &ProxyDescriptor) -> Result<Arc<dyn BufferProxy>> {
    if descriptor.flags.shared && descriptor.role == Role::Read && facade.settings().pool_shared_reads {
        return facade
            .pool()
            .get_or_create(descriptor.pool_key(), || build_proxy(facade, descriptor));
    }
    build_proxy(facade, descriptor)
}

fn build_proxy(facade: &Facade, descriptor: &ProxyDescriptor) -> Result<Arc<dyn BufferProxy>> {
    let selector = &descriptor.selector;
    let proxy: Arc<dyn BufferProxy> = if descriptor.flags.constant {
        Arc::new(finalize(constant_from_source(facade, descriptor)?, descriptor))
    } else {
        match selector.target() {
            SelectorTarget::Property(property) => {
                let store = Arc::clone(facade.store(descriptor.side));
                Arc::new(finalize(PropertyProxy::new(store, *property), descriptor))
            }
            SelectorTarget::Attribute(name) if selector.is_data_domain() => {
                let store = Arc::clone(facade.store(descriptor.side));
                let writable = descriptor.role == Role::Write;
                let proxy = DirectProxy::data(store, name.as_str(), descriptor.real_kind, writable);
                Arc::new(finalize(proxy, descriptor))
            }
            SelectorTarget::Attribute(name) if descriptor.flags.direct => {
                let proxy = match descriptor.role {
                    Role::Read => {
                        let column = facade
                            .store(descriptor.side)
                            .attribute(name)
                            .ok_or_else(|| Error::AttributeNotFound(name.clone()))?;
                        DirectProxy::column(column, false)
                    }
                    Role::Write => {
                        let default = Value::default_of(descriptor.real_kind);
                        let column = facade.output().create_attribute(name, descriptor.real_kind, default)?;
                        DirectProxy::column(column, true)
                    }
                };
                Arc::new(finalize(proxy, descriptor))
            }
            SelectorTarget::Attribute(name) => {
                let buffer = match (descriptor.role, descriptor.side) {
                    (Role::Read, side) => facade.readable(name, side)?,
                    (Role::Write, _) => facade.writable(name, descriptor.real_kind)?,
                };
                if buffer.kind() != descriptor.real_kind {
                    return Err(Error::TypeMismatch { expected: descriptor.real_kind, actual: buffer.kind() });
                }
                Arc::new(finalize(AttributeProxy::new(buffer), descriptor))
            }
        }
    };

    tracing::debug!(
        "Proxy for \"{}\": {} -> {}, {:?}",
        selector,
        proxy.real_kind(),
        proxy.working_kind(),
        proxy.state()
    );
    Ok(proxy)
}

/// First value of the source; the kind default when it is empty.
fn constant_from_source(facade: &Facade, descriptor: &ProxyDescriptor) -> Result<ConstantProxy> {
    let store = facade.store(Side::In);
    let len = store.num_points();
    let selector = &descriptor.selector;

    let value = match selector.target() {
        SelectorTarget::Property(property) if len > 0 => store.read_property(0, *property),
        SelectorTarget::Property(property) => Value::default_of(property.kind()),
        SelectorTarget::Attribute(name) if selector.is_data_domain() => store
            .data_value(name)
            .ok_or_else(|| Error::AttributeNotFound(selector.to_string()))?,
        SelectorTarget::Attribute(name) => {
            let column = store
                .attribute(name)
                .ok_or_else(|| Error::AttributeNotFound(name.clone()))?;
            column.read(0)
        }
    };
    Ok(ConstantProxy::new(value, len))
}

/// Constant proxy over a literal value, read as `working_kind`.
pub fn constant_proxy(value: Value, working_kind: ValueKind, len: usize) -> Arc<dyn BufferProxy> {
    let real_kind = value.kind();
    let descriptor = ProxyDescriptor::new(crate::select::Selector::attribute("<constant>"), real_kind)
        .with_working_kind(working_kind);
    Arc::new(finalize(ConstantProxy::new(value, len), &descriptor))
}

/// Proxy over a dense array, configured by `descriptor` (kinds,
/// sub-selection, role). The selector is not looked up.
pub fn array_proxy(array: Arc<ValueArray>, descriptor: &ProxyDescriptor) -> Arc<dyn BufferProxy> {
    Arc::new(finalize(ArrayProxy::new(array), descriptor))
}

/// One Double proxy per field of a composite attribute.
///
/// With a sub-selection naming a field already, the same proxy is returned
/// `count` times. Fields past the kind's last component repeat the last one.
/// Text kinds, and transforms without a component, cannot be broken down.
pub fn get_per_field_proxy_buffers(
    facade: &Facade,
    descriptor: &ProxyDescriptor,
    count: usize,
) -> Result<Vec<Arc<dyn BufferProxy>>> {
    let selection = descriptor.sub_selection;
    let dimensions = match (descriptor.real_kind, selection.component) {
        (kind, _) if kind.is_text() => 0,
        (ValueKind::Transform, Some(part)) if selection.is_valid => part.kind().field_count(),
        (ValueKind::Transform, _) => 0,
        (kind, _) => kind.field_count().min(4),
    };
    if dimensions == 0 {
        return Err(Error::UnsupportedBreakdown(descriptor.real_kind));
    }

    if selection.is_valid && selection.field.is_some() {
        let proxy = get_proxy_buffer(facade, descriptor)?;
        return Ok(vec![proxy; count]);
    }

    let max_index = dimensions - 1;
    (0..count)
        .map(|i| {
            let mut single = descriptor.clone();
            single.set_field_index(i.min(max_index));
            get_proxy_buffer(facade, &single)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{PointCloud, PointProperty, PointStore, ProxyState};
    use crate::util::{DQuat, DVec3, DVec4, Rotator, Transform};

    fn cloud() -> Arc<PointCloud> {
        let cloud = Arc::new(PointCloud::new(3));
        cloud.add_attribute("Speed", vec![12.5f64, 1.0, -2.0]);
        cloud.add_attribute("Color", vec![DVec4::new(0.1, 0.2, 0.3, 1.0); 3]);
        cloud.add_values("Label", ValueKind::String, vec![Value::string("a"); 3]);
        cloud.set_data_value("Count", Value::Int64(3));
        cloud
    }

    #[test]
    fn test_speed_broadcast() {
        let f = Facade::new(cloud());
        let d = ProxyDescriptor::capture(&f, "Speed", Side::In)
            .unwrap()
            .with_working_kind(ValueKind::Vector3);
        let proxy = get_proxy_buffer(&f, &d).unwrap();
        assert_eq!(proxy.get::<DVec3>(0), DVec3::splat(12.5));
    }

    #[test]
    fn test_property_proxy_write() {
        let c = cloud();
        let f = Facade::new(c.clone());
        let d = ProxyDescriptor::capture(&f, "$Position.Z", Side::Out).unwrap().with_role(Role::Write);
        let proxy = get_proxy_buffer(&f, &d).unwrap();
        assert_eq!(proxy.state(), ProxyState::Active);
        proxy.set(1, 4.0f64);
        assert_eq!(c.read_property(1, PointProperty::Position), Value::Vector3(DVec3::new(0.0, 0.0, 4.0)));
    }

    #[test]
    fn test_index_write_is_inert() {
        let f = Facade::new(cloud());
        let d = ProxyDescriptor::capture(&f, "$Index", Side::Out).unwrap().with_role(Role::Write);
        let proxy = get_proxy_buffer(&f, &d).unwrap();
        assert!(proxy.is_inert());
        assert_eq!(proxy.get::<i32>(2), 2);
    }

    #[test]
    fn test_write_on_input_side_is_inert() {
        let f = Facade::new(cloud());
        let d = ProxyDescriptor::capture(&f, "$Density", Side::In).unwrap().with_role(Role::Write);
        assert!(get_proxy_buffer(&f, &d).unwrap().is_inert());
    }

    #[test]
    fn test_buffered_write_needs_flush() {
        let c = cloud();
        let f = Facade::new(c.clone());
        let d = ProxyDescriptor::capture(&f, "Speed", Side::Out).unwrap().with_role(Role::Write);
        let proxy = get_proxy_buffer(&f, &d).unwrap();
        proxy.set(0, 3i32);
        assert_eq!(c.attribute("Speed").unwrap().read(0), Value::Double(12.5));
        assert_eq!(f.flush(), 1);
        assert_eq!(c.attribute("Speed").unwrap().read(0), Value::Double(3.0));
    }

    #[test]
    fn test_direct_write_is_immediate() {
        let c = cloud();
        let f = Facade::new(c.clone());
        let d = ProxyDescriptor::capture(&f, "Color.A", Side::Out)
            .unwrap()
            .with_role(Role::Write)
            .direct();
        let proxy = get_proxy_buffer(&f, &d).unwrap();
        proxy.set(2, 0.5f64);
        assert_eq!(c.attribute("Color").unwrap().read(2), Value::Vector4(DVec4::new(0.1, 0.2, 0.3, 0.5)));
    }

    #[test]
    fn test_constant_from_attribute_and_data() {
        let f = Facade::new(cloud());
        let d = ProxyDescriptor::capture(&f, "Speed", Side::In).unwrap().constant();
        let proxy = get_proxy_buffer(&f, &d).unwrap();
        assert_eq!(proxy.get::<f64>(2), 12.5);
        assert_eq!(proxy.len(), 3);

        let d = ProxyDescriptor::capture(&f, "@Data.Count", Side::In).unwrap();
        let proxy = get_proxy_buffer(&f, &d).unwrap();
        assert_eq!(proxy.get_as(1, ValueKind::String), Value::string("3"));
    }

    #[test]
    fn test_shared_reads_are_pooled() {
        let f = Facade::new(cloud());
        let d = ProxyDescriptor::capture(&f, "Speed", Side::In).unwrap().shared();
        let a = get_proxy_buffer(&f, &d).unwrap();
        let b = get_proxy_buffer(&f, &d).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(f.pool().len(), 1);

        let unshared = ProxyDescriptor::capture(&f, "Speed", Side::In).unwrap();
        assert!(!Arc::ptr_eq(&a, &get_proxy_buffer(&f, &unshared).unwrap()));
    }

    #[test]
    fn test_per_field_proxies() {
        let f = Facade::new(cloud());
        let d = ProxyDescriptor::capture(&f, "Color", Side::In).unwrap();
        let fields = get_per_field_proxy_buffers(&f, &d, 5).unwrap();
        let read: Vec<f64> = fields.iter().map(|p| p.get::<f64>(0)).collect();
        assert_eq!(read, vec![0.1, 0.2, 0.3, 1.0, 1.0]);
        assert!(fields.iter().all(|p| p.working_kind() == ValueKind::Double));

        let d = ProxyDescriptor::capture(&f, "Color.G", Side::In).unwrap();
        let fields = get_per_field_proxy_buffers(&f, &d, 3).unwrap();
        assert!(fields.iter().all(|p| Arc::ptr_eq(p, &fields[0])));

        let d = ProxyDescriptor::capture(&f, "Speed", Side::In).unwrap();
        let fields = get_per_field_proxy_buffers(&f, &d, 3).unwrap();
        assert!(fields.iter().all(|p| p.get::<f64>(0) == 12.5));
    }

    #[test]
    fn test_per_field_breakdown_errors() {
        let c = cloud();
        c.add_attribute("Xf", vec![Transform::new(DVec3::new(1.0, 2.0, 3.0), DQuat::IDENTITY, DVec3::ONE); 3]);
        let f = Facade::new(c);

        let d = ProxyDescriptor::capture(&f, "Label", Side::In).unwrap();
        assert!(matches!(get_per_field_proxy_buffers(&f, &d, 3), Err(Error::UnsupportedBreakdown(_))));
        let d = ProxyDescriptor::capture(&f, "Xf", Side::In).unwrap();
        assert!(matches!(get_per_field_proxy_buffers(&f, &d, 3), Err(Error::UnsupportedBreakdown(_))));

        let d = ProxyDescriptor::capture(&f, "Xf.Position", Side::In).unwrap();
        let fields = get_per_field_proxy_buffers(&f, &d, 3).unwrap();
        let read: Vec<f64> = fields.iter().map(|p| p.get::<f64>(1)).collect();
        assert_eq!(read, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_constant_literal() {
        let proxy = constant_proxy(Value::Rotator(Rotator::new(0.0, 90.0, 0.0)), ValueKind::Double, 10);
        assert_eq!(proxy.get::<f64>(7), 0.0);
        assert_eq!(proxy.real_kind(), ValueKind::Rotator);
    }
}
