//! Namespace prefix bindings negotiated for one document

use crate::{EncodeError, Result};

/// GML 3.2 namespace
pub const GML_NAMESPACE: &str = "http://www.opengis.net/gml/3.2";

/// WFS 2.0 namespace, home of the default collection root element
pub const WFS_NAMESPACE: &str = "http://www.opengis.net/wfs/2.0";

/// XML Schema instance namespace
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Location of the WFS 2.0 schema document
pub const WFS_SCHEMA_LOCATION: &str = "http://schemas.opengis.net/wfs/2.0/wfs.xsd";

/// Ordered prefix -> namespace URI bindings
///
/// Binding a URI that is already bound replaces its prefix, so a URI always
/// maps to exactly one prefix.
#[derive(Debug, Clone)]
pub struct NamespaceContext {
    bindings: Vec<(String, String)>,
}

impl Default for NamespaceContext {
    fn default() -> Self {
        Self {
            bindings: vec![
                ("gml".to_string(), GML_NAMESPACE.to_string()),
                ("wfs".to_string(), WFS_NAMESPACE.to_string()),
                ("xsi".to_string(), XSI_NAMESPACE.to_string()),
            ],
        }
    }
}

impl NamespaceContext {
    /// A context without any binding
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Bind `prefix` to `uri`
    pub fn bind(&mut self, prefix: impl Into<String>, uri: impl Into<String>) -> &mut Self {
        let prefix = prefix.into();
        let uri = uri.into();
        match self.bindings.iter_mut().find(|(_, bound)| *bound == uri) {
            Some(binding) => binding.0 = prefix,
            None => self.bindings.push((prefix, uri)),
        }
        self
    }

    /// Bind `prefix` to `uri` without disturbing any existing binding
    ///
    /// Binding a pair that is already bound is a no-op.
    ///
    /// # Errors
    ///
    /// [`EncodeError::NamespaceBinding`] when `prefix` is empty, when it
    /// already names another namespace, or when `uri` is already bound to
    /// another prefix.
    pub fn try_bind(&mut self, prefix: &str, uri: &str) -> Result<()> {
        let refuse = |reason: String| EncodeError::NamespaceBinding {
            prefix: prefix.to_string(),
            namespace: uri.to_string(),
            reason,
        };
        if prefix.is_empty() {
            return Err(refuse("the prefix is empty".to_string()));
        }
        for (bound_prefix, bound_uri) in &self.bindings {
            match (bound_prefix == prefix, bound_uri == uri) {
                (true, true) => return Ok(()),
                (true, false) => {
                    return Err(refuse(format!("the prefix is already bound to {bound_uri}")));
                }
                (false, true) => {
                    return Err(refuse(format!(
                        "the namespace is already bound to prefix '{bound_prefix}'"
                    )));
                }
                (false, false) => {}
            }
        }
        self.bindings.push((prefix.to_string(), uri.to_string()));
        Ok(())
    }

    /// Builder-style [`bind`](Self::bind)
    pub fn with_binding(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.bind(prefix, uri);
        self
    }

    /// Prefix bound to `uri`, if any
    pub fn prefix_for(&self, uri: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(_, bound)| bound == uri)
            .map(|(prefix, _)| prefix.as_str())
    }

    /// All bindings as (prefix, uri), in binding order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings
            .iter()
            .map(|(prefix, uri)| (prefix.as_str(), uri.as_str()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
