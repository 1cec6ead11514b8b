//! Index-to-URL resolution for frame sequences.
//!
//! A [`FrameSource`] must be a pure function of the index: the same index always resolves to
//! the same resource, so swapping sources swaps the sequence without touching the player.

use crate::foundation::{
    core::FrameIndex,
    error::{ScrollframeError, ScrollframeResult},
};

/// Resolves a frame index to the location of its image.
pub trait FrameSource {
    /// Location (relative path or URL) of frame `index`.
    fn frame_url(&self, index: FrameIndex) -> String;
}

impl<F> FrameSource for F
where
    F: Fn(FrameIndex) -> String,
{
    fn frame_url(&self, index: FrameIndex) -> String {
        self(index)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
/// Explicit list of frame URLs; indices wrap modulo the list length.
pub struct FrameList {
    urls: Vec<String>,
}

impl FrameList {
    /// Build from a non-empty list.
    pub fn new(urls: Vec<String>) -> ScrollframeResult<Self> {
        let out = Self { urls };
        out.validate()?;
        Ok(out)
    }

    /// Reject empty lists and blank entries.
    pub fn validate(&self) -> ScrollframeResult<()> {
        if self.urls.is_empty() {
            return Err(ScrollframeError::validation("frame list must be non-empty"));
        }
        if let Some(i) = self.urls.iter().position(|u| u.trim().is_empty()) {
            return Err(ScrollframeError::validation(format!(
                "frame list entry {i} is empty"
            )));
        }
        Ok(())
    }

    /// Number of distinct URLs.
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// True if the list has no entries (never true once validated).
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

impl FrameSource for FrameList {
    fn frame_url(&self, index: FrameIndex) -> String {
        if self.urls.is_empty() {
            return String::new();
        }
        self.urls[index.as_usize() % self.urls.len()].clone()
    }
}

/// Widest zero padding a pattern placeholder may request.
pub const MAX_PAD_WIDTH: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Counter {
    ZeroBased,
    OneBased,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Number { counter: Counter, width: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
/// URL template such as `frames/so{n}.jpg` or `seq/{index:03}.png`.
///
/// `{index}` expands to the 0-based index, `{n}` to the 1-based index. An optional `:0W` (or
/// `:W`) suffix zero-pads to width `W`, at most [`MAX_PAD_WIDTH`].
pub struct FramePattern {
    template: String,
    segments: Vec<Segment>,
}

impl FramePattern {
    /// Parse a template; it must contain at least one placeholder.
    pub fn parse(template: impl Into<String>) -> ScrollframeResult<Self> {
        let template = template.into();
        let mut segments = Vec::new();
        let mut rest = template.as_str();
        let mut has_placeholder = false;

        while let Some(open) = rest.find('{') {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(|| {
                ScrollframeError::validation(format!("unclosed '{{' in frame pattern '{template}'"))
            })?;
            segments.push(parse_placeholder(&after[..close], &template)?);
            has_placeholder = true;
            rest = &after[close + 1..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        if !has_placeholder {
            return Err(ScrollframeError::validation(format!(
                "frame pattern '{template}' must contain {{index}} or {{n}}"
            )));
        }

        Ok(Self { template, segments })
    }

    /// Original template text.
    pub fn as_str(&self) -> &str {
        &self.template
    }
}

fn parse_placeholder(body: &str, template: &str) -> ScrollframeResult<Segment> {
    let (name, fmt) = match body.split_once(':') {
        Some((n, f)) => (n, Some(f)),
        None => (body, None),
    };
    let counter = match name.trim() {
        "index" => Counter::ZeroBased,
        "n" => Counter::OneBased,
        other => {
            return Err(ScrollframeError::validation(format!(
                "unknown placeholder '{{{other}}}' in frame pattern '{template}'"
            )));
        }
    };
    let width = match fmt {
        None => 0,
        Some(f) => {
            let bad = || {
                ScrollframeError::validation(format!(
                    "invalid width ':{f}' in frame pattern '{template}'"
                ))
            };
            let digits = f.trim();
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(bad());
            }
            let significant = digits.trim_start_matches('0');
            if significant.is_empty() {
                0
            } else {
                significant.parse::<usize>().map_err(|_| bad())?
            }
        }
    };
    if width > MAX_PAD_WIDTH {
        return Err(ScrollframeError::validation(format!(
            "pad width {width} exceeds {MAX_PAD_WIDTH} in frame pattern '{template}'"
        )));
    }
    Ok(Segment::Number { counter, width })
}

impl FrameSource for FramePattern {
    fn frame_url(&self, index: FrameIndex) -> String {
        let mut out = String::with_capacity(self.template.len() + 4);
        for seg in &self.segments {
            match seg {
                Segment::Literal(s) => out.push_str(s),
                Segment::Number { counter, width } => {
                    let v = match counter {
                        Counter::ZeroBased => u64::from(index.0),
                        Counter::OneBased => u64::from(index.0) + 1,
                    };
                    out.push_str(&format!("{v:0width$}", width = *width));
                }
            }
        }
        out
    }
}

impl TryFrom<String> for FramePattern {
    type Error = ScrollframeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<FramePattern> for String {
    fn from(p: FramePattern) -> Self {
        p.template
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Serializable choice of frame source used by scene files.
pub enum FrameSourceSpec {
    /// Explicit URL list.
    List(FrameList),
    /// URL template.
    Pattern(FramePattern),
}

impl FrameSourceSpec {
    /// Validate the inner source.
    pub fn validate(&self) -> ScrollframeResult<()> {
        match self {
            Self::List(l) => l.validate(),
            Self::Pattern(_) => Ok(()),
        }
    }
}

impl FrameSource for FrameSourceSpec {
    fn frame_url(&self, index: FrameIndex) -> String {
        match self {
            Self::List(l) => l.frame_url(index),
            Self::Pattern(p) => p.frame_url(index),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
