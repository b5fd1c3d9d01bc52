//! Delimiter-pair segmentation for documentation strings.
//!
//! Description strings coming out of the IDL compiler are free-form markdown
//! that may embed fenced code blocks and bare diagram sources (graphviz,
//! `PlantUML`). This crate splits such a string into an ordered sequence of
//! typed [`Segment`]s by scanning for delimiter pairs:
//!
//! - [`split_one`] applies a single `(kind, start_tag, end_tag)` rule to one
//!   string.
//! - [`split_all`] applies the fixed rule list in priority order, re-splitting
//!   only still-`text` segments so that fenced code stays opaque to the
//!   diagram rules.
//!
//! Segment contents cover the input in order, so concatenating them
//! reconstructs the original string (modulo the trailing-boundary behavior
//! documented on [`split_one`]).
//!
//! # Example
//!
//! ```
//! use idldoc_segments::{SegmentKind, split_all};
//!
//! let segments = split_all("123```code```abc");
//! assert_eq!(segments.len(), 3);
//! assert_eq!(segments[0].kind, SegmentKind::Text);
//! assert_eq!(segments[1].kind, SegmentKind::Code);
//! assert_eq!(segments[1].content, "```code```");
//! ```

/// Classification of a substring produced by segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Plain narrative text.
    Text,
    /// A fenced code block, delimiters included.
    Code,
    /// A bare graphviz digraph source.
    Graphviz,
    /// A bare `PlantUML` source (`@startuml` .. `@enduml`).
    Uml,
}

impl SegmentKind {
    /// Return the kind as a display string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Code => "code",
            Self::Graphviz => "graphviz",
            Self::Uml => "uml",
        }
    }
}

/// A typed substring of a description.
///
/// `content` always includes the matched delimiters for non-text kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub content: String,
}

impl Segment {
    /// Create a segment of the given kind.
    #[must_use]
    pub fn new(kind: SegmentKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }

    /// Create a text segment.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(SegmentKind::Text, content)
    }
}

/// A single delimiter-pair rule.
#[derive(Debug, Clone, Copy)]
pub struct SplitRule {
    pub kind: SegmentKind,
    pub start_tag: &'static str,
    pub end_tag: &'static str,
}

/// The fixed rule list, in priority order.
///
/// Fenced code is recognized first; its contents are opaque to the diagram
/// rules. The graphviz end tag includes the newline so the segment keeps the
/// line break following the closing brace.
pub const RULES: [SplitRule; 3] = [
    SplitRule {
        kind: SegmentKind::Code,
        start_tag: "```",
        end_tag: "```",
    },
    SplitRule {
        kind: SegmentKind::Graphviz,
        start_tag: "digraph G {",
        end_tag: "}\n",
    },
    SplitRule {
        kind: SegmentKind::Uml,
        start_tag: "@startuml",
        end_tag: "@enduml",
    },
];

/// Split `input` by one delimiter-pair rule.
///
/// Scans left to right for non-overlapping `start_tag .. end_tag` spans. Text
/// between matches becomes a `text` segment (only if non-empty); each matched
/// span becomes a segment of the rule's kind, delimiters included. A start
/// tag without a terminating end tag stops the scan.
///
/// Trailing text after the last match is appended only when
/// `last_match_end + 1 < input.len()`. This reproduces the generator this
/// tool is output-compatible with: a single character of trailing text is
/// dropped, and on a match-free input of length < 2 nothing is emitted.
/// Downstream formatting depends on the exact boundary, so it is kept as is.
#[must_use]
pub fn split_one(input: &str, rule: &SplitRule) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    let mut last_end = 0;

    loop {
        let Some(offset) = input[cursor..].find(rule.start_tag) else {
            break;
        };
        let start = cursor + offset;
        let body = start + rule.start_tag.len();
        let Some(offset) = input[body..].find(rule.end_tag) else {
            break;
        };
        let end = body + offset + rule.end_tag.len();

        if start > cursor {
            segments.push(Segment::text(&input[cursor..start]));
        }
        segments.push(Segment::new(rule.kind, &input[start..end]));

        cursor = end;
        last_end = end;
    }

    if last_end + 1 < input.len() {
        segments.push(Segment::text(&input[last_end..]));
    }

    segments
}

/// Apply one rule across a segment list, re-splitting only `text` segments.
///
/// Already-typed segments pass through untouched.
#[must_use]
pub fn split_segments(segments: Vec<Segment>, rule: &SplitRule) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        if segment.kind == SegmentKind::Text {
            result.extend(split_one(&segment.content, rule));
        } else {
            result.push(segment);
        }
    }

    result
}

/// Split `input` by every rule in [`RULES`], in priority order.
///
/// Implemented as a worklist over the rule sequence rather than recursion, so
/// pathological inputs cannot exhaust the stack.
#[must_use]
pub fn split_all(input: &str) -> Vec<Segment> {
    let mut segments = vec![Segment::text(input)];

    for rule in &RULES {
        segments = split_segments(segments, rule);
    }

    segments
}

/// Escape bare underscores for markdown (`_` → `\_`).
///
/// An underscore already preceded by a backslash is left alone, so applying
/// the escape to already-escaped text is a no-op. Applied to narrative text
/// only; code and diagram segments are never escaped.
#[must_use]
pub fn escape_underscores(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut escaped = false;

    for ch in input.chars() {
        if ch == '_' && !escaped {
            result.push('\\');
        }
        result.push(ch);
        escaped = ch == '\\';
    }

    result
}
