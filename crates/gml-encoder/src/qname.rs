//! Namespace-qualified element and attribute names

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A (namespace, local name, prefix) triple naming an element or attribute.
///
/// Two names are equal when their namespace and local name match; the prefix
/// is only a rendering detail bound for one document.
#[derive(Clone, Debug)]
pub struct QualifiedName {
    namespace: Cow<'static, str>,
    local_name: Cow<'static, str>,
    prefix: Option<Cow<'static, str>>,
}

impl QualifiedName {
    /// Create a name in `namespace` rendered with `prefix`
    pub fn new(
        namespace: impl Into<Cow<'static, str>>,
        local_name: impl Into<Cow<'static, str>>,
        prefix: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            local_name: local_name.into(),
            prefix: Some(prefix.into()),
        }
    }

    /// Create a name without namespace, such as the `srsName` attribute
    pub fn unqualified(local_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            namespace: Cow::Borrowed(""),
            local_name: local_name.into(),
            prefix: None,
        }
    }

    /// Same namespace and local name, rendered with another prefix
    pub fn derive(&self, prefix: impl Into<Cow<'static, str>>) -> Self {
        Self {
            namespace: self.namespace.clone(),
            local_name: self.local_name.clone(),
            prefix: Some(prefix.into()),
        }
    }

    /// A sibling name in the same namespace with the same prefix
    pub fn sibling(&self, local_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            namespace: self.namespace.clone(),
            local_name: local_name.into(),
            prefix: self.prefix.clone(),
        }
    }

    #[inline]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[inline]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    #[inline]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref().filter(|p| !p.is_empty())
    }

    /// The name as written in markup, `prefix:local` or just `local`
    pub fn qualified(&self) -> String {
        match self.prefix() {
            Some(prefix) => format!("{}:{}", prefix, self.local_name),
            None => self.local_name.to_string(),
        }
    }
}

impl PartialEq for QualifiedName {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace && self.local_name == other.local_name
    }
}

impl Eq for QualifiedName {}

impl Hash for QualifiedName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.namespace.hash(state);
        self.local_name.hash(state);
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.local_name)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.local_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GML_NAMESPACE;

    #[test]
    fn test_equality_ignores_prefix() {
        let a = QualifiedName::new(GML_NAMESPACE, "member", "gml");
        let b = a.derive("gml32");
        assert_eq!(a, b);
        assert_eq!(b.qualified(), "gml32:member");
    }

    #[test]
    fn test_unqualified_has_no_prefix() {
        let name = QualifiedName::unqualified("srsName");
        assert_eq!(name.prefix(), None);
        assert_eq!(name.qualified(), "srsName");
        assert_eq!(name.to_string(), "srsName");
    }

    #[test]
    fn test_sibling_keeps_prefix() {
        let member = QualifiedName::new(GML_NAMESPACE, "member", "g");
        let pos = member.sibling("pos");
        assert_eq!(pos.qualified(), "g:pos");
        assert_eq!(pos.namespace(), GML_NAMESPACE);
    }

    #[test]
    fn test_empty_prefix_renders_local_name() {
        let name = QualifiedName::new(GML_NAMESPACE, "Point", "");
        assert_eq!(name.qualified(), "Point");
    }
}
