//! The verb catalog and its call shapes.
//!
//! Each verb is declared once with its tag name, whether it may hold child
//! tags, and the attribute keys it documents. The builder consults this table
//! to decide how a call is rendered; nothing here knows what a verb means.

use crate::attributes::Attributes;
use crate::error::{Error, ErrorKind};
use std::fmt;
use std::str::FromStr;

/// Whether a tag may hold nested tags
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    /// Text or attributes only
    Leaf,
    /// May wrap a nested body
    Container,
}

/// Static description of one verb
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerbSpec {
    pub name: &'static str,
    pub capability: Capability,
    /// Attribute keys the verb documents, snake_case
    pub attributes: &'static [&'static str],
}

const STATUS_CALLBACKS: &[&str] = &[
    "url",
    "method",
    "status_callback_event",
    "status_callback",
    "status_callback_method",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    Gather,
    Dial,
    Message,
    Say,
    Play,
    Pause,
    Record,
    Sms,
    Number,
    Sip,
    Client,
    Conference,
    Queue,
    Enqueue,
    Leave,
    Hangup,
    Redirect,
    Reject,
    Body,
    Media,
}

impl Verb {
    pub const ALL: [Self; 20] = [
        Self::Gather,
        Self::Dial,
        Self::Message,
        Self::Say,
        Self::Play,
        Self::Pause,
        Self::Record,
        Self::Sms,
        Self::Number,
        Self::Sip,
        Self::Client,
        Self::Conference,
        Self::Queue,
        Self::Enqueue,
        Self::Leave,
        Self::Hangup,
        Self::Redirect,
        Self::Reject,
        Self::Body,
        Self::Media,
    ];

    pub const fn spec(self) -> VerbSpec {
        use Capability::{Container, Leaf};

        let (name, capability, attributes): (_, _, &'static [&'static str]) = match self {
            Self::Gather => (
                "gather",
                Container,
                &[
                    "action",
                    "method",
                    "timeout",
                    "finish_on_key",
                    "num_digits",
                    "input",
                    "language",
                    "hints",
                    "speech_timeout",
                    "action_on_empty_result",
                ],
            ),
            Self::Dial => (
                "dial",
                Container,
                &[
                    "action",
                    "method",
                    "timeout",
                    "hangup_on_star",
                    "time_limit",
                    "caller_id",
                    "record",
                    "trim",
                    "ring_tone",
                    "answer_on_bridge",
                ],
            ),
            Self::Message => (
                "message",
                Container,
                &["to", "from", "action", "method", "status_callback"],
            ),
            Self::Say => ("say", Leaf, &["voice", "language", "loop"]),
            Self::Play => ("play", Leaf, &["loop", "digits"]),
            Self::Pause => ("pause", Leaf, &["length"]),
            Self::Record => (
                "record",
                Leaf,
                &[
                    "action",
                    "method",
                    "timeout",
                    "finish_on_key",
                    "max_length",
                    "play_beep",
                    "trim",
                    "recording_status_callback",
                    "recording_status_callback_method",
                    "transcribe",
                    "transcribe_callback",
                ],
            ),
            Self::Sms => (
                "sms",
                Leaf,
                &["to", "from", "action", "method", "status_callback"],
            ),
            Self::Number => (
                "number",
                Leaf,
                &[
                    "send_digits",
                    "url",
                    "method",
                    "status_callback_event",
                    "status_callback",
                    "status_callback_method",
                ],
            ),
            Self::Sip => (
                "sip",
                Leaf,
                &[
                    "username",
                    "password",
                    "url",
                    "method",
                    "status_callback_event",
                    "status_callback",
                    "status_callback_method",
                ],
            ),
            Self::Client => ("client", Leaf, STATUS_CALLBACKS),
            Self::Conference => (
                "conference",
                Leaf,
                &[
                    "muted",
                    "beep",
                    "start_conference_on_enter",
                    "end_conference_on_exit",
                    "wait_url",
                    "wait_method",
                    "max_participants",
                    "record",
                    "region",
                    "trim",
                    "status_callback_event",
                    "status_callback",
                    "status_callback_method",
                    "recording_status_callback",
                    "recording_status_callback_method",
                ],
            ),
            Self::Queue => (
                "queue",
                Leaf,
                &["url", "method", "reservation_sid", "post_work_activity_sid"],
            ),
            Self::Enqueue => (
                "enqueue",
                Leaf,
                &["action", "method", "wait_url", "wait_url_method", "workflow_sid"],
            ),
            Self::Leave => ("leave", Leaf, &[]),
            Self::Hangup => ("hangup", Leaf, &[]),
            Self::Redirect => ("redirect", Leaf, &["method"]),
            Self::Reject => ("reject", Leaf, &["reason"]),
            Self::Body => ("body", Leaf, &[]),
            Self::Media => ("media", Leaf, &[]),
        };

        VerbSpec {
            name,
            capability,
            attributes,
        }
    }

    /// The snake_case tag identifier, e.g. `"gather"`
    pub const fn name(self) -> &'static str {
        self.spec().name
    }

    pub const fn capability(self) -> Capability {
        self.spec().capability
    }

    pub fn is_container(self) -> bool {
        self.capability() == Capability::Container
    }

    /// Whether `key` is one of the attribute keys this verb documents.
    pub fn documents(self, key: &str) -> bool {
        self.spec().attributes.contains(&key)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Verb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|verb| verb.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::new(ErrorKind::UnknownVerb { name: s.to_string() }))
    }
}

/// What a non-nested verb call carries.
///
/// Strings and any `(text, Attributes)` pair become [`Content::Text`], a bare
/// [`Attributes`] becomes [`Content::Attrs`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    /// `<Tag attrs>text</Tag>`
    Text(String, Attributes),
    /// `<Tag attrs />`
    Attrs(Attributes),
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into(), Attributes::new())
    }

    /// Text content taken from any displayable value.
    pub fn display(value: impl fmt::Display) -> Self {
        Self::Text(value.to_string(), Attributes::new())
    }

    /// Attaches attributes to the content.
    #[must_use]
    pub fn with_attrs(self, attrs: Attributes) -> Self {
        match self {
            Self::Text(text, _) => Self::Text(text, attrs),
            Self::Attrs(_) => Self::Attrs(attrs),
        }
    }

    pub fn attributes(&self) -> &Attributes {
        match self {
            Self::Text(_, attrs) | Self::Attrs(attrs) => attrs,
        }
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

impl From<Attributes> for Content {
    fn from(attrs: Attributes) -> Self {
        Self::Attrs(attrs)
    }
}

impl<T: Into<String>> From<(T, Attributes)> for Content {
    fn from((text, attrs): (T, Attributes)) -> Self {
        Self::Text(text.into(), attrs)
    }
}
