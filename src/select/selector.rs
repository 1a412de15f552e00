//! Attribute selector parsing.
//!
//! ```text
//! Speed                   element attribute
//! Orientation.Up          element attribute + sub-selection
//! $Position.X             point property + sub-selection
//! @Data.Count             collection-level value
//! @Elements.Speed         explicit element domain
//! ```

use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use super::SubSelection;
use crate::data::PointProperty;
use crate::util::{Error, Result};

const DATA_PREFIX: &str = "@DATA";
const ELEMENTS_PREFIX: &str = "@ELEMENTS";

/// Where a selector reads from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Domain {
    /// One value per point.
    #[default]
    Elements,
    /// One value for the whole collection.
    Data,
}

impl Domain {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Elements => "Elements",
            Self::Data => "Data",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the first selector token names.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SelectorTarget {
    Attribute(String),
    Property(PointProperty),
}

/// Parsed attribute selector.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Selector {
    domain: Domain,
    target: SelectorTarget,
    extras: SmallVec<[String; 2]>,
    sub_selection: SubSelection,
}

impl Selector {
    /// Element attribute with no extra tokens.
    pub fn attribute(name: impl Into<String>) -> Self {
        Self {
            domain: Domain::Elements,
            target: SelectorTarget::Attribute(name.into()),
            extras: SmallVec::new(),
            sub_selection: SubSelection::NONE,
        }
    }

    /// Point property with no extra tokens.
    pub fn property(property: PointProperty) -> Self {
        Self {
            domain: Domain::Elements,
            target: SelectorTarget::Property(property),
            extras: SmallVec::new(),
            sub_selection: SubSelection::NONE,
        }
    }

    /// Parse selector text.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid(text, "empty selector"));
        }

        let (domain, rest) = split_domain(trimmed)?;
        let mut tokens = rest.split('.').map(str::trim);
        let head = tokens.next().unwrap_or_default();
        let extras: SmallVec<[String; 2]> =
            tokens.filter(|t| !t.is_empty()).map(str::to_string).collect();

        if head.is_empty() {
            return Err(Error::invalid(text, "missing attribute name"));
        }
        if head.chars().any(char::is_whitespace) {
            return Err(Error::invalid(text, "attribute name contains whitespace"));
        }

        let target = match head.strip_prefix('$') {
            Some(_) if domain == Domain::Data => {
                return Err(Error::invalid(text, "point properties have no data domain"));
            }
            Some(name) => match PointProperty::from_name(name) {
                Some(p) => SelectorTarget::Property(p),
                None => return Err(Error::PropertyNotFound(name.to_string())),
            },
            None => SelectorTarget::Attribute(head.to_string()),
        };

        let sub_selection = SubSelection::parse(extras.as_slice());
        Ok(Self { domain, target, extras, sub_selection })
    }

    #[inline]
    pub fn domain(&self) -> Domain {
        self.domain
    }

    #[inline]
    pub fn target(&self) -> &SelectorTarget {
        &self.target
    }

    /// Attribute name, or the property name for property selectors.
    pub fn name(&self) -> &str {
        match &self.target {
            SelectorTarget::Attribute(name) => name,
            SelectorTarget::Property(p) => p.name(),
        }
    }

    pub fn as_property(&self) -> Option<PointProperty> {
        match self.target {
            SelectorTarget::Property(p) => Some(p),
            SelectorTarget::Attribute(_) => None,
        }
    }

    #[inline]
    pub fn is_data_domain(&self) -> bool {
        self.domain == Domain::Data
    }

    /// Tokens after the name, as written.
    #[inline]
    pub fn extras(&self) -> &[String] {
        &self.extras
    }

    #[inline]
    pub fn sub_selection(&self) -> &SubSelection {
        &self.sub_selection
    }

    /// Same target with the extra tokens dropped.
    pub fn without_extras(&self) -> Self {
        Self {
            domain: self.domain,
            target: self.target.clone(),
            extras: SmallVec::new(),
            sub_selection: SubSelection::NONE,
        }
    }
}

fn split_domain(text: &str) -> Result<(Domain, &str)> {
    if !text.starts_with('@') {
        return Ok((Domain::Elements, text));
    }
    let (head, rest) = text.split_once('.').unwrap_or((text, ""));
    let domain = match head.trim().to_ascii_uppercase().as_str() {
        DATA_PREFIX => Domain::Data,
        ELEMENTS_PREFIX => Domain::Elements,
        _ => return Err(Error::invalid(text, format!("unknown domain '{}'", head))),
    };
    Ok((domain, rest))
}

impl FromStr for Selector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Canonical text: explicit `@Data.` prefix, `$` for properties, extras as written.
impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.domain == Domain::Data {
            write!(f, "@Data.")?;
        }
        match &self.target {
            SelectorTarget::Attribute(name) => write!(f, "{}", name)?,
            SelectorTarget::Property(p) => write!(f, "${}", p)?,
        }
        for extra in &self.extras {
            write!(f, ".{}", extra)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::TransformPart;
    use crate::util::Axis;

    #[test]
    fn test_plain_attribute() {
        let s = Selector::parse("Speed").unwrap();
        assert_eq!(s.name(), "Speed");
        assert_eq!(s.domain(), Domain::Elements);
        assert!(s.extras().is_empty());
        assert!(!s.sub_selection().is_valid);
    }

    #[test]
    fn test_extras() {
        let s = Selector::parse(" Orientation.Up ").unwrap();
        assert_eq!(s.name(), "Orientation");
        assert_eq!(s.extras(), ["Up".to_string()]);
        assert_eq!(s.sub_selection().axis, Some(Axis::Up));
        assert_eq!(s.to_string(), "Orientation.Up");
    }

    #[test]
    fn test_property() {
        let s = Selector::parse("$rotation.Forward").unwrap();
        assert_eq!(s.as_property(), Some(PointProperty::Rotation));
        assert_eq!(s.to_string(), "$Rotation.Forward");

        let s = Selector::parse("$Transform.Scale.x").unwrap();
        assert_eq!(s.sub_selection().component, Some(TransformPart::Scale));
        assert!(matches!(Selector::parse("$Nope"), Err(Error::PropertyNotFound(_))));
    }

    #[test]
    fn test_domains() {
        let s = Selector::parse("@Data.Count").unwrap();
        assert!(s.is_data_domain());
        assert_eq!(s.name(), "Count");
        assert_eq!(s.to_string(), "@Data.Count");

        let s = Selector::parse("@elements.Speed.X").unwrap();
        assert_eq!(s.domain(), Domain::Elements);
        assert_eq!(s.to_string(), "Speed.X");
    }

    #[test]
    fn test_invalid() {
        for text in ["", "   ", "@Data", "@Data.", "@Other.Speed", "Bad Name", ".X", "@Data.$Seed"] {
            assert!(Selector::parse(text).is_err(), "{:?} should fail", text);
        }
    }

    #[test]
    fn test_without_extras() {
        let s: Selector = "Orientation.Rotation.Up".parse().unwrap();
        let base = s.without_extras();
        assert_eq!(base, Selector::attribute("Orientation"));
    }
}
