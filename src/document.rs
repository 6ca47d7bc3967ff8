//! Document assembly: configuration, the build entry points, and the result

use crate::attributes::Attributes;
use crate::builder::Builder;
use crate::error::Result;
use crate::options::MenuOption;
use crate::serializer::Escape;
use std::fmt;
use tracing::{debug, instrument};

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
pub const DEFAULT_ROOT: &str = "response";
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Configuration for document builds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Fragment written before the root element
    pub declaration: String,
    /// Root tag identifier, rendered in `PascalCase`
    pub root: String,
    /// Maximum number of scopes open below the root at once
    pub max_depth: usize,
    /// Escaping applied to text and string attribute values
    pub escape: Escape,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            declaration: XML_DECLARATION.to_string(),
            root: DEFAULT_ROOT.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            escape: Escape::None,
        }
    }
}

impl Config {
    #[must_use]
    pub fn declaration(mut self, declaration: impl Into<String>) -> Self {
        self.declaration = declaration.into();
        self
    }

    #[must_use]
    pub fn root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn escape(mut self, escape: Escape) -> Self {
        self.escape = escape;
        self
    }
}

/// A finished document.
///
/// Plain documents are [`Twiml::Xml`]; documents that recorded menu options
/// come back as [`Twiml::Menu`] with the options in the order they were
/// recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Twiml {
    Xml(String),
    Menu {
        options: Vec<MenuOption>,
        xml: String,
    },
}

impl Twiml {
    pub fn xml(&self) -> &str {
        match self {
            Self::Xml(xml) | Self::Menu { xml, .. } => xml,
        }
    }

    /// Recorded options; empty for plain documents.
    pub fn options(&self) -> &[MenuOption] {
        match self {
            Self::Xml(_) => &[],
            Self::Menu { options, .. } => options,
        }
    }

    pub fn into_xml(self) -> String {
        match self {
            Self::Xml(xml) | Self::Menu { xml, .. } => xml,
        }
    }

    pub fn into_parts(self) -> (Vec<MenuOption>, String) {
        match self {
            Self::Xml(xml) => (Vec::new(), xml),
            Self::Menu { options, xml } => (options, xml),
        }
    }
}

impl fmt::Display for Twiml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.xml())
    }
}

/// Builds a document with the default configuration.
///
/// ```
/// use twiml::{build, Attributes, Verb};
///
/// let doc = build(|b| {
///     b.nest(Verb::Gather, Attributes::new().with("digits", 3), |b| {
///         b.text("Phone Number");
///         Ok(())
///     })
/// })?;
/// assert_eq!(
///     doc.xml(),
///     r#"<?xml version="1.0" encoding="UTF-8"?><Response><Gather digits="3">Phone Number</Gather></Response>"#
/// );
/// # Ok::<(), twiml::Error>(())
/// ```
pub fn build<F>(routine: F) -> Result<Twiml>
where
    F: FnOnce(&mut Builder) -> Result<()>,
{
    build_with_config(&Config::default(), routine)
}

/// Builds a document: the declaration, then the root scope wrapping whatever
/// `routine` composes.
///
/// A failing routine aborts the build and its error is returned as is; the
/// partial document is dropped.
#[instrument(skip_all, fields(root = %config.root))]
pub fn build_with_config<F>(config: &Config, routine: F) -> Result<Twiml>
where
    F: FnOnce(&mut Builder) -> Result<()>,
{
    debug!("starting document");
    let mut builder = Builder::new(config);
    builder.tag(&config.root, Attributes::new(), routine)?;

    let (options, xml) = builder.finish()?;
    if options.is_empty() {
        Ok(Twiml::Xml(xml))
    } else {
        debug!(options = options.len(), "document recorded menu options");
        Ok(Twiml::Menu { options, xml })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};
    use crate::verb::Verb;

    #[test]
    fn test_empty_document() -> Result<()> {
        let doc = build(|_| Ok(()))?;
        assert_eq!(
            doc,
            Twiml::Xml(r#"<?xml version="1.0" encoding="UTF-8"?><Response></Response>"#.to_string())
        );
        assert!(doc.options().is_empty());
        Ok(())
    }

    #[test]
    fn test_custom_root_and_declaration() -> Result<()> {
        let config = Config::default().declaration("").root("twiml_response");
        let doc = build_with_config(&config, |b| b.verb(Verb::Hangup, Attributes::new()))?;
        assert_eq!(doc.xml(), "<TwimlResponse><Hangup /></TwimlResponse>");
        Ok(())
    }

    #[test]
    fn test_failure_propagates() {
        let result = build(|b| {
            b.verb(Verb::Say, "never seen")?;
            Err(Error::with_message(ErrorKind::Composition, "no queue configured"))
        });
        let err = result.err();
        assert_eq!(err.as_ref().map(Error::kind), Some(&ErrorKind::Composition));
        assert_eq!(err.as_ref().map(Error::message), Some("no queue configured"));
    }

    #[test]
    fn test_menu_parts() -> Result<()> {
        let doc = build(|b| {
            b.option("1", "Sales", Attributes::new(), Attributes::new())
        })?;
        assert_eq!(doc.options().len(), 1);
        let (options, xml) = doc.into_parts();
        assert_eq!(options.first().map(|o| o.key.as_str()), Some("1"));
        assert!(xml.contains("<Say>Sales</Say>"));
        Ok(())
    }

    #[test]
    fn test_display_writes_xml() -> Result<()> {
        let doc = build(|b| b.verb(Verb::Leave, Attributes::new()))?;
        assert_eq!(doc.to_string(), doc.xml());
        assert!(doc.into_xml().ends_with("<Response><Leave /></Response>"));
        Ok(())
    }
}
