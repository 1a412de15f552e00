//! Proxy descriptors.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::Facade;
use crate::select::{Selector, SelectorTarget, SubSelection};
use crate::types::ValueKind;
use crate::util::{Error, Result};

/// Which store of a [`Facade`] a proxy binds to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Side {
    #[default]
    In,
    Out,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::In => "input",
            Self::Out => "output",
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    Read,
    Write,
}

/// Construction flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ProxyFlags {
    /// Bypass attribute buffers and touch the store column directly.
    pub direct: bool,
    /// Read the first value once and return it for every index.
    pub constant: bool,
    /// Ignore the sub-selection; reads and writes address the whole value.
    pub raw: bool,
    /// Allow the proxy to be pooled and shared with identical read descriptors.
    pub shared: bool,
}

/// Everything needed to build one proxy. Consumed by the factory.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProxyDescriptor {
    pub selector: Selector,
    pub sub_selection: SubSelection,
    pub side: Side,
    pub role: Role,
    /// Kind stored at the source.
    pub real_kind: ValueKind,
    /// Kind the consumer reads and writes.
    pub working_kind: ValueKind,
    pub flags: ProxyFlags,
}

impl ProxyDescriptor {
    /// Read descriptor for `selector` stored as `real_kind`.
    ///
    /// The working kind is what the selector's sub-selection produces.
    pub fn new(selector: Selector, real_kind: ValueKind) -> Self {
        let sub_selection = *selector.sub_selection();
        Self {
            working_kind: sub_selection.get_result_kind(real_kind),
            selector,
            sub_selection,
            side: Side::In,
            role: Role::Read,
            real_kind,
            flags: ProxyFlags::default(),
        }
    }

    /// Parse `path` and resolve its kind against `facade`.
    ///
    /// An attribute missing on the output side is looked up on the input
    /// side; the descriptor then reads from the input.
    pub fn capture(facade: &Facade, path: &str, side: Side) -> Result<Self> {
        Self::capture_selector(facade, Selector::parse(path)?, side)
    }

    /// Like [`capture`](Self::capture) without the output-to-input fallback.
    pub fn capture_strict(facade: &Facade, path: &str, side: Side) -> Result<Self> {
        let descriptor = Self::capture(facade, path, side)?;
        if descriptor.side != side {
            return Err(Error::AttributeNotFound(format!("\"{}\" does not exist on {}", path, side)));
        }
        Ok(descriptor)
    }

    /// Resolve an already parsed selector.
    pub fn capture_selector(facade: &Facade, selector: Selector, side: Side) -> Result<Self> {
        let (real_kind, side) = resolve_kind(facade, &selector, side)
            .ok_or_else(|| Error::AttributeNotFound(selector.to_string()))?;
        let mut descriptor = Self::new(selector, real_kind);
        descriptor.side = side;
        Ok(descriptor)
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn with_working_kind(mut self, kind: ValueKind) -> Self {
        self.working_kind = kind;
        self
    }

    pub fn with_flags(mut self, flags: ProxyFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn direct(mut self) -> Self {
        self.flags.direct = true;
        self
    }

    /// Constants always read the input side.
    pub fn constant(mut self) -> Self {
        self.flags.constant = true;
        self.side = Side::In;
        self
    }

    pub fn raw(mut self) -> Self {
        self.flags.raw = true;
        self
    }

    pub fn shared(mut self) -> Self {
        self.flags.shared = true;
        self
    }

    /// Re-read the sub-selection from the selector, resetting the working kind.
    pub fn update_sub_selection(&mut self) {
        self.sub_selection = *self.selector.sub_selection();
        self.working_kind = self.sub_selection.get_result_kind(self.real_kind);
    }

    /// Narrow to component field `index` (X..W); the working kind follows.
    pub fn set_field_index(&mut self, index: usize) -> bool {
        let ok = self.sub_selection.set_field_index(index);
        self.working_kind = self.sub_selection.get_result_kind(self.real_kind);
        ok
    }

    /// Sub-selection the proxy will apply.
    pub fn effective_sub_selection(&self) -> SubSelection {
        if self.flags.raw {
            SubSelection::NONE
        } else {
            self.sub_selection
        }
    }

    /// Key under which the buffer pool stores the proxy.
    pub fn pool_key(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

fn resolve_kind(facade: &Facade, selector: &Selector, side: Side) -> Option<(ValueKind, Side)> {
    let lookup = |side: Side| -> Option<ValueKind> {
        let store = facade.store(side);
        match selector.target() {
            SelectorTarget::Property(p) => Some(p.kind()),
            SelectorTarget::Attribute(name) if selector.is_data_domain() => store.data_kind(name),
            SelectorTarget::Attribute(name) => store.attribute(name).map(|c| c.kind()),
        }
    };
    match (lookup(side), side) {
        (Some(kind), _) => Some((kind, side)),
        (None, Side::Out) => lookup(Side::In).map(|kind| (kind, Side::In)),
        (None, Side::In) => None,
    }
}
