//! Session-wide values fixed when an encoding session starts

use crate::{
    Configuration, CoordinateFormatter, GML_NAMESPACE, NamespaceContext, QualifiedName, SrsSyntax,
    resolve_num_decimals,
};
use std::borrow::Cow;
use std::fmt;

/// Markup vocabulary and version an encoding session targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SchemaProfile {
    /// GML 3.2.1 (ISO 19136)
    Gml32,
}

impl SchemaProfile {
    /// Namespace URI of the profile's vocabulary
    pub fn namespace(self) -> &'static str {
        match self {
            SchemaProfile::Gml32 => GML_NAMESPACE,
        }
    }

    /// Location of the profile's root schema document
    pub fn schema_location(self) -> &'static str {
        match self {
            SchemaProfile::Gml32 => "http://schemas.opengis.net/gml/3.2.1/gml.xsd",
        }
    }

    /// Prefix used when the document binds none for the namespace
    pub fn default_prefix(self) -> &'static str {
        match self {
            SchemaProfile::Gml32 => "gml",
        }
    }
}

impl fmt::Display for SchemaProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaProfile::Gml32 => f.write_str("GML 3.2"),
        }
    }
}

/// Immutable values shared by every component of one session
///
/// Created once at delegate construction; nothing in here changes while the
/// document is being written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    profile: SchemaProfile,
    gml_prefix: String,
    member: QualifiedName,
    num_decimals: u32,
    srs_syntax: SrsSyntax,
    force_decimal: bool,
}

impl SessionContext {
    /// Resolve prefix and precision for `profile`
    pub fn new(
        profile: SchemaProfile,
        namespaces: &NamespaceContext,
        configuration: &dyn Configuration,
        srs_syntax: SrsSyntax,
        force_decimal: bool,
    ) -> Self {
        let gml_prefix = match namespaces.prefix_for(profile.namespace()) {
            Some(prefix) => prefix.to_string(),
            None => {
                tracing::debug!(
                    "No prefix bound for {}, using '{}'",
                    profile.namespace(),
                    profile.default_prefix()
                );
                profile.default_prefix().to_string()
            }
        };
        let member = QualifiedName::new(profile.namespace(), "member", profile.default_prefix())
            .derive(gml_prefix.clone());

        Self {
            profile,
            gml_prefix,
            member,
            num_decimals: resolve_num_decimals(configuration),
            srs_syntax,
            force_decimal,
        }
    }

    #[inline]
    pub fn profile(&self) -> SchemaProfile {
        self.profile
    }

    #[inline]
    pub fn gml_prefix(&self) -> &str {
        &self.gml_prefix
    }

    /// The `member` element wrapping each feature
    #[inline]
    pub fn member(&self) -> &QualifiedName {
        &self.member
    }

    #[inline]
    pub fn num_decimals(&self) -> u32 {
        self.num_decimals
    }

    #[inline]
    pub fn srs_syntax(&self) -> SrsSyntax {
        self.srs_syntax
    }

    #[inline]
    pub fn force_decimal(&self) -> bool {
        self.force_decimal
    }

    /// Name in the profile's namespace with the session prefix
    pub fn gml_name(&self, local_name: impl Into<Cow<'static, str>>) -> QualifiedName {
        QualifiedName::new(self.profile.namespace(), local_name, self.gml_prefix.clone())
    }

    /// Ordinate formatter honouring the session precision
    pub fn formatter(&self) -> CoordinateFormatter {
        CoordinateFormatter::new(self.num_decimals, self.force_decimal)
    }
}
