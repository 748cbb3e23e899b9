//! Typed `{{TOKEN}}` templates.
//!
//! Each template kind declares a closed set of slots with [`slots!`]. A
//! [`Template`] only renders when every slot of its kind has a value, and
//! values are HTML-escaped unless they were supplied with [`Fills::raw`].
//!
//! Substitution is a single left-to-right pass over the template source, so a
//! value that happens to contain `{{SOMETHING}}` is emitted as-is and never
//! expanded. Tokens that are not slots of the template are left verbatim.

use std::collections::BTreeMap;
use std::marker::PhantomData;

/// A named placeholder of one template kind.
pub trait Slot: Copy + Ord + std::fmt::Debug + 'static {
    /// Template file the slots belong to (for error messages)
    const TEMPLATE: &'static str;
    /// Every slot of the kind; all of them must be filled
    const ALL: &'static [Self];

    /// Token text between the braces, e.g. `PAGE_TITLE`
    fn token(self) -> &'static str;
}

/// Declare a closed slot enum for one template file.
///
/// ```ignore
/// slots! {
///     pub enum PageSlot for "page.html" {
///         Title => "TITLE",
///         Body => "BODY",
///     }
/// }
/// ```
macro_rules! slots {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident for $template:literal {
            $($variant:ident => $token:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::template::Slot for $name {
            const TEMPLATE: &'static str = $template;
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn token(self) -> &'static str {
                match self {
                    $($name::$variant => $token),+
                }
            }
        }
    };
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Template {template}: no value supplied for slot {token}")]
    MissingSlot {
        template: &'static str,
        token: &'static str,
    },
}

#[derive(Debug, Clone)]
enum Fill {
    Text(String),
    Raw(String),
}

/// Values for every slot of one template render.
#[derive(Debug, Clone)]
pub struct Fills<S: Slot> {
    values: BTreeMap<S, Fill>,
}

impl<S: Slot> Default for Fills<S> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

impl<S: Slot> Fills<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain text, escaped on output.
    pub fn text(mut self, slot: S, value: impl Into<String>) -> Self {
        self.values.insert(slot, Fill::Text(value.into()));
        self
    }

    /// Trusted markup, emitted unchanged.
    pub fn raw(mut self, slot: S, value: impl Into<String>) -> Self {
        self.values.insert(slot, Fill::Raw(value.into()));
        self
    }
}

/// Template source bound to one slot kind.
#[derive(Debug, Clone)]
pub struct Template<S: Slot> {
    source: String,
    _slots: PhantomData<S>,
}

impl<S: Slot> Template<S> {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            _slots: PhantomData,
        }
    }

    pub fn render(&self, fills: &Fills<S>) -> Result<String, TemplateError> {
        if let Some(missing) = S::ALL.iter().find(|slot| !fills.values.contains_key(slot)) {
            return Err(TemplateError::MissingSlot {
                template: S::TEMPLATE,
                token: missing.token(),
            });
        }

        let mut out = String::with_capacity(self.source.len() * 2);
        let mut rest = self.source.as_str();
        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            let Some(close) = after.find("}}") else {
                out.push_str(&rest[open..]);
                rest = "";
                break;
            };
            let token = &after[..close];
            let fill = S::ALL
                .iter()
                .find(|slot| slot.token() == token)
                .and_then(|slot| fills.values.get(slot));
            match fill {
                Some(Fill::Text(text)) => {
                    out.push_str(&escape_html(text));
                    rest = &after[close + 2..];
                }
                Some(Fill::Raw(raw)) => {
                    out.push_str(raw);
                    rest = &after[close + 2..];
                }
                None => {
                    out.push_str("{{");
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        Ok(out)
    }
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
