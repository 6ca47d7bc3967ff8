//! Scope composition.
//!
//! A [`Builder`] appends fragments to one linear buffer. Nesting comes from
//! the call stack: [`Builder::tag`] writes an opening tag, runs the body, and
//! writes the matching closing tag whichever way the body exits, so the
//! buffer always holds balanced markup.

use crate::attributes::Attributes;
use crate::buffer::{Buffer, Fragment};
use crate::document::Config;
use crate::error::{Error, ErrorKind, Result};
use crate::options::MenuOption;
use crate::serializer::{close_tag, escape_text, start_tag, CloseStyle, Escape};
use crate::verb::{Content, Verb};
use std::fmt;
use tracing::{debug, trace, warn};

/// An open scope; `id` tells apart two scopes with the same tag
#[derive(Debug)]
struct Scope {
    id: u64,
    tag: String,
}

#[derive(Debug)]
pub struct Builder {
    markup: Buffer<Fragment>,
    options: Buffer<MenuOption>,
    open: Vec<Scope>,
    next_scope: u64,
    max_depth: usize,
    escape: Escape,
}

impl Builder {
    /// A builder whose markup starts with the configured declaration.
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            markup: Buffer::with_initial([Fragment::from(config.declaration.as_str())]),
            options: Buffer::new(),
            open: Vec::new(),
            next_scope: 0,
            // the root scope does not count towards the limit
            max_depth: config.max_depth.saturating_add(1),
            escape: config.escape,
        }
    }

    /// Number of scopes currently open, the root included.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Fragments written so far, in order.
    pub fn fragments(&self) -> &[Fragment] {
        self.markup.snapshot()
    }

    /// Menu options recorded so far, in order.
    pub fn options(&self) -> &[MenuOption] {
        self.options.snapshot()
    }

    /// Writes `<Tag attrs>` and opens a scope that [`close`](Self::close) ends.
    ///
    /// Prefer [`tag`](Self::tag), which cannot leave the scope open.
    pub fn open(&mut self, tag: &str, attrs: Attributes) -> Result<()> {
        self.open_scope(tag, attrs).map(drop)
    }

    /// Writes the closing tag of the innermost open scope.
    pub fn close(&mut self) -> Result<()> {
        let scope = self
            .open
            .pop()
            .ok_or_else(|| Error::new(ErrorKind::UnbalancedClose))?;
        trace!(tag = %scope.tag, depth = self.open.len(), "close");
        self.markup.append(close_tag(&scope.tag).into());
        Ok(())
    }

    /// Appends raw text to the current scope.
    pub fn text(&mut self, value: impl fmt::Display) {
        let value = value.to_string();
        let text = escape_text(&value, self.escape).into_owned();
        self.markup.append(Fragment::from(text));
    }

    /// Writes `<Tag attrs>`, runs `body`, then writes `</Tag>`.
    ///
    /// The closing tag is written even when `body` fails; any scope the body
    /// opened with [`open`](Self::open) and did not close is closed first.
    /// Works for any tag name, catalogued or not:
    ///
    /// ```
    /// use twiml::{build, Attributes};
    ///
    /// let doc = build(|b| {
    ///     b.tag("connect", Attributes::new(), |b| {
    ///         b.tag("stream", Attributes::new().with("url", "wss://example.com"), |_| Ok(()))
    ///     })
    /// })?;
    /// assert!(doc.xml().ends_with(
    ///     r#"<Connect><Stream url="wss://example.com"></Stream></Connect></Response>"#
    /// ));
    /// # Ok::<(), twiml::Error>(())
    /// ```
    pub fn tag<F>(&mut self, tag: &str, attrs: Attributes, body: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let outer = self.open.len();
        let id = self.open_scope(tag, attrs)?;
        let result = body(self);

        if self.open.get(outer).map(|scope| scope.id) != Some(id) {
            // the body closed this scope itself, whatever it opened since
            // lies outside it
            warn!(tag, "scope closed by its own body");
            self.unwind_to(outer);
            return result.and(Err(Error::with_message(
                ErrorKind::UnbalancedClose,
                format!("scope {tag} was closed by its own body"),
            )));
        }

        match result {
            Err(err) => {
                warn!(tag, error = %err, "scope body failed");
                self.unwind_to(outer);
                Err(err)
            }
            Ok(()) if self.open.len() > outer + 1 => {
                let leaked = self
                    .open
                    .last()
                    .map(|scope| scope.tag.clone())
                    .unwrap_or_default();
                warn!(tag, leaked = %leaked, "scope body left a scope open");
                self.unwind_to(outer);
                Err(Error::new(ErrorKind::UnclosedScope { tag: leaked }))
            }
            Ok(()) => self.close(),
        }
    }

    /// Writes a tag that cannot hold children: `<Tag attrs>text</Tag>` for
    /// text content, `<Tag attrs />` for attributes alone.
    pub fn leaf(&mut self, tag: &str, content: impl Into<Content>) -> Result<()> {
        match content.into() {
            Content::Text(text, attrs) => self.tag(tag, attrs, |b| {
                b.text(text);
                Ok(())
            }),
            Content::Attrs(attrs) => {
                self.markup
                    .append(start_tag(tag, &attrs, CloseStyle::SelfClose, self.escape).into());
                Ok(())
            }
        }
    }

    /// Emits a catalogued verb without a nested body.
    ///
    /// ```
    /// use twiml::{build, Attributes, Verb};
    ///
    /// let doc = build(|b| {
    ///     b.verb(Verb::Say, "Leave a message")?;
    ///     b.verb(Verb::Record, Attributes::new().with("finish_on_key", "#").with("transcribe", true))
    /// })?;
    /// assert_eq!(
    ///     doc.xml(),
    ///     concat!(
    ///         r#"<?xml version="1.0" encoding="UTF-8"?><Response>"#,
    ///         "<Say>Leave a message</Say>",
    ///         r##"<Record finishOnKey="#" transcribe="true" />"##,
    ///         "</Response>",
    ///     )
    /// );
    /// # Ok::<(), twiml::Error>(())
    /// ```
    pub fn verb(&mut self, verb: Verb, content: impl Into<Content>) -> Result<()> {
        let content = content.into();
        note_undocumented(verb, content.attributes());
        self.leaf(verb.name(), content)
    }

    /// Emits a container verb wrapping `body`.
    pub fn nest<F>(&mut self, verb: Verb, attrs: Attributes, body: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        if !verb.is_container() {
            return Err(Error::new(ErrorKind::NotAContainer {
                verb: verb.name().to_string(),
            }));
        }
        note_undocumented(verb, &attrs);
        self.tag(verb.name(), attrs, body)
    }

    /// Records a menu option and says its text.
    ///
    /// `(key, menu)` goes to the option list and `<Say leaf>text</Say>` to the
    /// markup. Either both are written or neither is.
    pub fn option(
        &mut self,
        key: impl Into<String>,
        text: impl fmt::Display,
        menu: Attributes,
        leaf: Attributes,
    ) -> Result<()> {
        self.check_depth()?;
        note_undocumented(Verb::Say, &leaf);

        let say = Verb::Say.name();
        let text = text.to_string();
        let fragments = [
            start_tag(say, &leaf, CloseStyle::Normal, self.escape),
            escape_text(&text, self.escape).into_owned(),
            close_tag(say),
        ];

        let option = MenuOption::new(key, menu);
        trace!(key = %option.key, "option");
        self.options.append(option);
        for fragment in fragments {
            self.markup.append(fragment.into());
        }
        Ok(())
    }

    /// Renders the markup and hands back the recorded options.
    pub(crate) fn finish(self) -> Result<(Vec<MenuOption>, String)> {
        if let Some(tag) = self.open.last().map(|scope| scope.tag.clone()) {
            warn!(tag = %tag, "document finished with open scopes");
            return Err(Error::new(ErrorKind::UnclosedScope { tag }));
        }
        let xml = self.markup.render();
        debug!(
            fragments = self.markup.len(),
            options = self.options.len(),
            "rendered document"
        );
        self.markup.dispose();
        Ok((self.options.dispose(), xml))
    }

    fn open_scope(&mut self, tag: &str, attrs: Attributes) -> Result<u64> {
        self.check_depth()?;
        trace!(tag, depth = self.open.len(), "open");
        self.markup
            .append(start_tag(tag, &attrs, CloseStyle::Normal, self.escape).into());
        let id = self.next_scope;
        self.next_scope = self.next_scope.wrapping_add(1);
        self.open.push(Scope {
            id,
            tag: tag.to_string(),
        });
        Ok(id)
    }

    fn check_depth(&self) -> Result<()> {
        if self.open.len() >= self.max_depth {
            let max = self.max_depth.saturating_sub(1);
            return Err(Error::new(ErrorKind::MaxDepthExceeded { max }));
        }
        Ok(())
    }

    fn unwind_to(&mut self, depth: usize) {
        while self.open.len() > depth {
            if let Some(scope) = self.open.pop() {
                self.markup.append(close_tag(&scope.tag).into());
            }
        }
    }
}

fn note_undocumented(verb: Verb, attrs: &Attributes) {
    for key in attrs.keys().filter(|key| !verb.documents(key)) {
        debug!(verb = verb.name(), key = %key, "attribute not documented for verb");
    }
}
