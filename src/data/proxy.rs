//! Proxy buffers: one read/write interface over every kind of backing storage.
//!
//! A proxy stores values in their *real* kind and hands them out in the
//! *working* kind, applying the sub-selection in between. All per-point
//! methods take `&self` and never fail; setup errors are reported by the
//! [factory](super::get_proxy_buffer).

use std::fmt;
use std::sync::{Arc, OnceLock};

use super::{AttributeBuffer, AttributeColumn, PointProperty, PointStore, ProxyDescriptor, Role, Side, ValueArray};
use crate::select::{CachedSubSelection, SubSelection};
use crate::types::{convert_or_default, AttributeType, Value, ValueKind};

/// Lifecycle of a proxy.
///
/// Proxies are shared only once `Active` or `Inert`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ProxyState {
    #[default]
    Uninitialized,
    /// Real and working kinds known, sub-selection resolved.
    Bound,
    /// Passed validation against its descriptor.
    Validated,
    Active,
    /// Failed validation: reads work, writes are ignored.
    Inert,
}

/// Kinds, resolved sub-selection and state shared by all proxy variants.
#[derive(Clone, Copy, Debug)]
pub struct ProxyCore {
    state: ProxyState,
    cached: CachedSubSelection,
    /// Writes must read the current real value first.
    read_modify_write: bool,
}

impl Default for ProxyCore {
    fn default() -> Self {
        Self {
            state: ProxyState::Uninitialized,
            cached: CachedSubSelection::resolve(&SubSelection::NONE, ValueKind::Double, ValueKind::Double),
            read_modify_write: false,
        }
    }
}

impl ProxyCore {
    /// Resolve the sub-selection for `(real, working)`.
    pub fn bind(&mut self, real_kind: ValueKind, working_kind: ValueKind, selection: &SubSelection) {
        self.cached = CachedSubSelection::resolve(selection, real_kind, working_kind);
        self.read_modify_write = self.cached.applies_to_target_write();
        self.state = ProxyState::Bound;
    }

    /// Record the validation outcome.
    pub fn validated(&mut self, ok: bool) {
        if self.state == ProxyState::Bound {
            self.state = if ok { ProxyState::Validated } else { ProxyState::Inert };
        }
    }

    pub fn activate(&mut self) {
        if self.state == ProxyState::Validated {
            self.state = ProxyState::Active;
        }
    }

    #[inline]
    pub fn state(&self) -> ProxyState {
        self.state
    }

    #[inline]
    pub fn real_kind(&self) -> ValueKind {
        self.cached.real_kind()
    }

    #[inline]
    pub fn working_kind(&self) -> ValueKind {
        self.cached.working_kind()
    }

    #[inline]
    pub fn sub_selection(&self) -> &CachedSubSelection {
        &self.cached
    }

    #[inline]
    pub fn is_inert(&self) -> bool {
        self.state == ProxyState::Inert
    }

    /// Real value to working value.
    #[inline]
    pub fn to_working(&self, real: &Value) -> Value {
        self.cached.apply_get(real)
    }

    /// Working value to real value, from scratch.
    #[inline]
    pub fn to_real(&self, working: &Value) -> Value {
        let mut real = Value::default_of(self.real_kind());
        self.cached.apply_set(&mut real, working);
        real
    }

    /// Merge `working` into the current real value.
    #[inline]
    pub fn merge(&self, real: &mut Value, working: &Value) {
        self.cached.apply_set(real, working);
    }
}

/// Type-erased accessor over one source of values.
///
/// `get_raw` returns working-kind values; `set_raw` accepts any kind and
/// converts to the working kind first. Implementations supply storage access
/// in the real kind.
pub trait BufferProxy: Send + Sync {
    fn core(&self) -> &ProxyCore;

    fn core_mut(&mut self) -> &mut ProxyCore;

    /// Number of addressable indices.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored value in the real kind.
    fn read_real(&self, index: usize) -> Value;

    /// Store a real-kind value.
    fn write_real(&self, index: usize, value: Value);

    /// Storage accepts writes.
    fn is_writable(&self) -> bool;

    /// Attribute buffer behind the proxy, if any.
    fn buffer(&self) -> Option<Arc<AttributeBuffer>> {
        None
    }

    /// Check this proxy can serve `descriptor`.
    fn validate(&self, descriptor: &ProxyDescriptor) -> bool {
        let core = self.core();
        if core.real_kind() != descriptor.real_kind || core.working_kind() != descriptor.working_kind {
            return false;
        }
        descriptor.role == Role::Read || (self.is_writable() && descriptor.side == Side::Out)
    }

    #[inline]
    fn real_kind(&self) -> ValueKind {
        self.core().real_kind()
    }

    #[inline]
    fn working_kind(&self) -> ValueKind {
        self.core().working_kind()
    }

    #[inline]
    fn state(&self) -> ProxyState {
        self.core().state()
    }

    /// Working-kind value at `index`.
    fn get_raw(&self, index: usize) -> Value {
        self.core().to_working(&self.read_real(index))
    }

    /// Write `value` at `index`. No-op on inert proxies.
    fn set_raw(&self, index: usize, value: &Value) {
        let core = self.core();
        if core.is_inert() {
            return;
        }
        let working_kind = core.working_kind();
        let converted;
        let value = if value.kind() == working_kind {
            value
        } else {
            converted = convert_or_default(value, working_kind);
            &converted
        };
        if core.read_modify_write {
            let mut real = self.read_real(index);
            core.merge(&mut real, value);
            self.write_real(index, real);
        } else {
            self.write_real(index, core.to_real(value));
        }
    }

    /// Hash of the working value at `index`.
    fn hash(&self, index: usize) -> u32 {
        self.get_raw(index).hash32()
    }
}

impl dyn BufferProxy + '_ {
    /// Read as `T`, converting from the working kind.
    pub fn get<T: AttributeType>(&self, index: usize) -> T {
        let value = self.get_raw(index);
        let value = if value.kind() == T::KIND { value } else { convert_or_default(&value, T::KIND) };
        T::from_value(&value).unwrap_or_else(T::default_value)
    }

    /// Write a `T`, converting to the working kind.
    pub fn set<T: AttributeType>(&self, index: usize, value: T) {
        self.set_raw(index, &value.into_value());
    }

    /// Read converted to `kind`.
    pub fn get_as(&self, index: usize, kind: ValueKind) -> Value {
        let value = self.get_raw(index);
        if value.kind() == kind {
            value
        } else {
            convert_or_default(&value, kind)
        }
    }

    #[inline]
    pub fn is_inert(&self) -> bool {
        self.core().is_inert()
    }
}

impl fmt::Debug for dyn BufferProxy + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferProxy")
            .field("real", &self.real_kind())
            .field("working", &self.working_kind())
            .field("state", &self.state())
            .field("len", &self.len())
            .finish()
    }
}

// ============================================================================
// Variants
// ============================================================================

/// Proxy over a dense [`ValueArray`].
pub struct ArrayProxy {
    core: ProxyCore,
    array: Arc<ValueArray>,
}

impl ArrayProxy {
    pub fn new(array: Arc<ValueArray>) -> Self {
        Self { core: ProxyCore::default(), array }
    }
}

impl BufferProxy for ArrayProxy {
    fn core(&self) -> &ProxyCore {
        &self.core
    }
    fn core_mut(&mut self) -> &mut ProxyCore {
        &mut self.core
    }
    fn len(&self) -> usize {
        self.array.len()
    }
    fn read_real(&self, index: usize) -> Value {
        self.array.get(index)
    }
    fn write_real(&self, index: usize, value: Value) {
        self.array.set(index, value);
    }
    fn is_writable(&self) -> bool {
        true
    }
    fn validate(&self, descriptor: &ProxyDescriptor) -> bool {
        self.core.real_kind() == descriptor.real_kind && self.core.working_kind() == descriptor.working_kind
    }
}

/// Proxy over an [`AttributeBuffer`].
pub struct AttributeProxy {
    core: ProxyCore,
    buffer: Arc<AttributeBuffer>,
}

impl AttributeProxy {
    pub fn new(buffer: Arc<AttributeBuffer>) -> Self {
        Self { core: ProxyCore::default(), buffer }
    }
}

impl BufferProxy for AttributeProxy {
    fn core(&self) -> &ProxyCore {
        &self.core
    }
    fn core_mut(&mut self) -> &mut ProxyCore {
        &mut self.core
    }
    fn len(&self) -> usize {
        self.buffer.len()
    }
    fn read_real(&self, index: usize) -> Value {
        self.buffer.read(index)
    }
    fn write_real(&self, index: usize, value: Value) {
        self.buffer.write(index, value);
    }
    fn is_writable(&self) -> bool {
        self.buffer.is_writable()
    }
    fn buffer(&self) -> Option<Arc<AttributeBuffer>> {
        Some(Arc::clone(&self.buffer))
    }
}

/// Proxy over a per-point engine property.
pub struct PropertyProxy {
    core: ProxyCore,
    store: Arc<dyn PointStore>,
    property: PointProperty,
}

impl PropertyProxy {
    pub fn new(store: Arc<dyn PointStore>, property: PointProperty) -> Self {
        Self { core: ProxyCore::default(), store, property }
    }

    #[inline]
    pub fn property(&self) -> PointProperty {
        self.property
    }
}

impl BufferProxy for PropertyProxy {
    fn core(&self) -> &ProxyCore {
        &self.core
    }
    fn core_mut(&mut self) -> &mut ProxyCore {
        &mut self.core
    }
    fn len(&self) -> usize {
        self.store.num_points()
    }
    fn read_real(&self, index: usize) -> Value {
        self.store.read_property(index, self.property)
    }
    fn write_real(&self, index: usize, value: Value) {
        self.store.write_property(index, self.property, &value);
    }
    fn is_writable(&self) -> bool {
        !self.property.is_read_only()
    }
}

/// Proxy returning the same value for every index.
///
/// The working value is computed on first read. Never writable.
pub struct ConstantProxy {
    core: ProxyCore,
    constant: Value,
    working: OnceLock<Value>,
    len: usize,
}

impl ConstantProxy {
    /// `len` is informational; every index reads the constant.
    pub fn new(constant: Value, len: usize) -> Self {
        Self { core: ProxyCore::default(), constant, working: OnceLock::new(), len }
    }

    #[inline]
    pub fn constant(&self) -> &Value {
        &self.constant
    }
}

impl BufferProxy for ConstantProxy {
    fn core(&self) -> &ProxyCore {
        &self.core
    }
    fn core_mut(&mut self) -> &mut ProxyCore {
        &mut self.core
    }
    fn len(&self) -> usize {
        self.len
    }
    fn read_real(&self, _index: usize) -> Value {
        self.constant.clone()
    }
    fn write_real(&self, _index: usize, _value: Value) {}
    fn is_writable(&self) -> bool {
        false
    }
    fn validate(&self, descriptor: &ProxyDescriptor) -> bool {
        descriptor.role == Role::Read && self.core.working_kind() == descriptor.working_kind
    }
    fn get_raw(&self, _index: usize) -> Value {
        self.working.get_or_init(|| self.core.to_working(&self.constant)).clone()
    }
}

/// Unbuffered target of a [`DirectProxy`].
pub enum DirectTarget {
    /// Element domain: one store column.
    Column(Arc<dyn AttributeColumn>),
    /// Data domain: a single collection-level value.
    Data { store: Arc<dyn PointStore>, name: String, kind: ValueKind },
}

/// Proxy reading and writing the store without a buffer.
pub struct DirectProxy {
    core: ProxyCore,
    target: DirectTarget,
    writable: bool,
    len: usize,
}

impl DirectProxy {
    pub fn column(column: Arc<dyn AttributeColumn>, writable: bool) -> Self {
        let len = column.len();
        Self { core: ProxyCore::default(), target: DirectTarget::Column(column), writable, len }
    }

    /// Data-domain value `name` of `store`; every index maps to it.
    pub fn data(store: Arc<dyn PointStore>, name: impl Into<String>, kind: ValueKind, writable: bool) -> Self {
        let len = store.num_points();
        Self {
            core: ProxyCore::default(),
            target: DirectTarget::Data { store, name: name.into(), kind },
            writable,
            len,
        }
    }

    #[inline]
    pub fn is_data_domain(&self) -> bool {
        matches!(self.target, DirectTarget::Data { .. })
    }
}

impl BufferProxy for DirectProxy {
    fn core(&self) -> &ProxyCore {
        &self.core
    }
    fn core_mut(&mut self) -> &mut ProxyCore {
        &mut self.core
    }
    fn len(&self) -> usize {
        match &self.target {
            DirectTarget::Column(c) => c.len(),
            DirectTarget::Data { .. } => self.len,
        }
    }
    fn read_real(&self, index: usize) -> Value {
        match &self.target {
            DirectTarget::Column(c) => c.read(index),
            DirectTarget::Data { store, name, kind } => {
                store.data_value(name).unwrap_or_else(|| Value::default_of(*kind))
            }
        }
    }
    fn write_real(&self, index: usize, value: Value) {
        if !self.writable {
            return;
        }
        match &self.target {
            DirectTarget::Column(c) => c.write(index, value),
            DirectTarget::Data { store, name, .. } => store.set_data_value(name, value),
        }
    }
    fn is_writable(&self) -> bool {
        self.writable
    }
}

/// Bind, validate and activate `proxy` for `descriptor`.
///
/// A proxy failing validation is returned inert.
pub(crate) fn finalize<P: BufferProxy + 'static>(mut proxy: P, descriptor: &ProxyDescriptor) -> P {
    let selection = descriptor.effective_sub_selection();
    proxy.core_mut().bind(descriptor.real_kind, descriptor.working_kind, &selection);
    let ok = proxy.validate(descriptor);
    if !ok {
        tracing::warn!("Proxy buffer doesn't match desired types: \"{}\"", descriptor.selector);
    }
    let core = proxy.core_mut();
    core.validated(ok);
    core.activate();
    proxy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PointCloud;
    use crate::select::Selector;
    use crate::util::{DQuat, DVec3};

    fn bound<P: BufferProxy + 'static>(proxy: P, path: &str, real: ValueKind) -> Arc<dyn BufferProxy> {
        let descriptor = ProxyDescriptor::new(Selector::parse(path).unwrap(), real);
        Arc::new(finalize(proxy, &descriptor))
    }

    #[test]
    fn test_state_machine() {
        let mut core = ProxyCore::default();
        assert_eq!(core.state(), ProxyState::Uninitialized);
        core.validated(true);
        assert_eq!(core.state(), ProxyState::Uninitialized);
        core.bind(ValueKind::Double, ValueKind::Double, &SubSelection::NONE);
        assert_eq!(core.state(), ProxyState::Bound);
        core.validated(false);
        core.activate();
        assert_eq!(core.state(), ProxyState::Inert);
    }

    #[test]
    fn test_array_proxy_field_write() {
        let array = Arc::new(ValueArray::from_slice(&[DVec3::new(1.0, 2.0, 3.0)]));
        let proxy = bound(ArrayProxy::new(Arc::clone(&array)), "V.Z", ValueKind::Vector3);
        assert_eq!(proxy.state(), ProxyState::Active);
        assert_eq!(proxy.get::<f64>(0), 3.0);
        proxy.set(0, 9.0f64);
        assert_eq!(array.get(0), Value::Vector3(DVec3::new(1.0, 2.0, 9.0)));
        // Typed set converts to the working kind first.
        proxy.set(0, 4i32);
        assert_eq!(array.get(0), Value::Vector3(DVec3::new(1.0, 2.0, 4.0)));
    }

    #[test]
    fn test_constant_proxy_is_inert_for_writes() {
        let descriptor = ProxyDescriptor::new(Selector::attribute("C"), ValueKind::Int32).with_role(Role::Write);
        let proxy: Arc<dyn BufferProxy> = Arc::new(finalize(ConstantProxy::new(Value::Int32(5), 3), &descriptor));
        assert!(proxy.is_inert());
        proxy.set(1, 10i32);
        assert_eq!(proxy.get::<i32>(1), 5);
        assert_eq!(proxy.get_as(2, ValueKind::String), Value::string("5"));
    }

    #[test]
    fn test_property_proxy_axis() {
        let cloud = Arc::new(PointCloud::new(2));
        let proxy = bound(PropertyProxy::new(cloud.clone(), PointProperty::Rotation), "$Rotation.Up", ValueKind::Quaternion);
        assert_eq!(proxy.working_kind(), ValueKind::Vector3);
        assert_eq!(proxy.get::<DVec3>(0), DVec3::Z);
        assert_eq!(proxy.len(), 2);
        // Axis selections are read-only; the write replaces the whole rotation.
        proxy.set_raw(0, &Value::Vector3(DVec3::ZERO));
        assert_eq!(cloud.read_property(0, PointProperty::Rotation), Value::Quaternion(DQuat::IDENTITY));
    }

    #[test]
    fn test_hash_follows_working_value() {
        let array = Arc::new(ValueArray::from_slice(&[DVec3::new(1.0, 2.0, 3.0), DVec3::new(5.0, 2.0, 0.0)]));
        let proxy = bound(ArrayProxy::new(array), "V.Y", ValueKind::Vector3);
        assert_eq!(proxy.hash(0), proxy.hash(1));
        assert_eq!(proxy.hash(0), Value::Double(2.0).hash32());
    }

    #[test]
    fn test_direct_data_domain() {
        let cloud = Arc::new(PointCloud::new(4));
        cloud.set_data_value("Count", Value::Int64(7));
        let descriptor = ProxyDescriptor::new(Selector::parse("@Data.Count").unwrap(), ValueKind::Int64)
            .with_side(Side::Out)
            .with_role(Role::Write);
        let proxy = finalize(DirectProxy::data(cloud.clone(), "Count", ValueKind::Int64, true), &descriptor);
        let proxy: Arc<dyn BufferProxy> = Arc::new(proxy);
        assert_eq!(proxy.get::<i64>(3), 7);
        proxy.set(2, 11i64);
        assert_eq!(cloud.data_value("Count"), Some(Value::Int64(11)));
        assert_eq!(proxy.len(), 4);
    }
}
