//! twiml: a declarative builder for TwiML call-control documents
//!
//! This crate provides functionality to:
//! - Compose nested tags inside closures, with the closing tag always written
//! - Emit catalogued verbs as text, attribute-only, or container tags
//! - Record menu options beside the markup in one pass
//! - Render one compact XML string with the declaration and `<Response>` root
//!
//! # Examples
//! ```
//! use twiml::{build, Attributes, Verb};
//!
//! # fn main() -> twiml::Result<()> {
//! let menu = [("1", "sales"), ("2", "support")];
//! let doc = build(|b| {
//!     b.nest(Verb::Gather, Attributes::new().with("num_digits", 1), |b| {
//!         for (digit, team) in menu {
//!             b.option(
//!                 digit,
//!                 format!("For {team}, press {digit}"),
//!                 Attributes::new().with("team", team),
//!                 Attributes::new(),
//!             )?;
//!         }
//!         Ok(())
//!     })
//! })?;
//!
//! assert_eq!(doc.options().len(), 2);
//! assert!(doc.xml().contains("<Say>For support, press 2</Say>"));
//! # Ok(())
//! # }
//! ```

pub mod attributes;
pub mod buffer;
pub mod builder;
pub mod document;
pub mod error;
pub mod names;
pub mod options;
pub mod serializer;
pub mod verb;

// Re-exports
pub use attributes::{AttrValue, Attributes};
pub use builder::Builder;
pub use document::{build, build_with_config, Config, Twiml};
pub use error::{Error, ErrorKind, Result};
pub use options::MenuOption;
pub use serializer::Escape;
pub use verb::{Capability, Content, Verb};
