//! Description preprocessing: segmentation, diagram extraction, escaping.

use idldoc_segments::{SegmentKind, escape_underscores, split_all};
use tracing::debug;

use crate::consts::{DEFAULT_STYLE_PLACEHOLDER, GRAPHVIZ_DEFAULT_STYLE};
use crate::sink::{DiagramError, DiagramKind, DiagramSink};

/// Per-entity extraction state.
///
/// Owns the image-index counter shared by both diagram kinds, so the Nth
/// diagram of an entity (in document order) is named `<entity>_<N-1>`
/// regardless of language. Callers create a fresh context per entity; the
/// counter is never shared across entities or runs.
#[derive(Debug)]
pub struct DiagramContext<'a> {
    entity: &'a str,
    index: usize,
}

impl<'a> DiagramContext<'a> {
    /// Create a context for one entity, counter at zero.
    #[must_use]
    pub fn new(entity: &'a str) -> Self {
        Self { entity, index: 0 }
    }

    /// Current counter value (the index the next diagram will get).
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Claim the next diagram base name, advancing the counter.
    fn next_name(&mut self) -> String {
        let name = format!("{}_{}", self.entity, self.index);
        self.index += 1;
        name
    }
}

/// Preprocess one description string.
///
/// Splits the input into typed segments, then per segment:
///
/// - `code` segments containing a `` ```graphviz `` or `` ```uml `` marker
///   (loose substring search, matching the generator this tool replaces) have
///   their fence rewritten to the diagram preamble and are extracted; other
///   code fences pass through verbatim.
/// - Bare `graphviz`/`uml` segments are extracted as-is.
/// - `text` segments get bare underscores escaped.
///
/// Extraction writes the source through `sink` and substitutes a
/// `![image](images/<name>.png)\n` reference. The concatenation of the
/// processed segments is returned.
pub fn preprocess(
    input: &str,
    ctx: &mut DiagramContext<'_>,
    sink: &mut dyn DiagramSink,
) -> Result<String, DiagramError> {
    let mut output = String::with_capacity(input.len());

    for segment in split_all(input) {
        match segment.kind {
            SegmentKind::Text => output.push_str(&escape_underscores(&segment.content)),
            SegmentKind::Code => {
                if segment.content.contains("```graphviz") {
                    let source = rewrite_fence(&segment.content, "```graphviz", "digraph G {", "}");
                    output.push_str(&extract(DiagramKind::Graphviz, &source, ctx, sink)?);
                } else if segment.content.contains("```uml") {
                    let source = rewrite_fence(&segment.content, "```uml", "@startuml", "@enduml");
                    output.push_str(&extract(DiagramKind::Uml, &source, ctx, sink)?);
                } else {
                    output.push_str(&segment.content);
                }
            }
            SegmentKind::Graphviz => {
                output.push_str(&extract(DiagramKind::Graphviz, &segment.content, ctx, sink)?);
            }
            SegmentKind::Uml => {
                output.push_str(&extract(DiagramKind::Uml, &segment.content, ctx, sink)?);
            }
        }
    }

    Ok(output)
}

/// Rewrite a fenced diagram block into its language's source form.
///
/// The opening marker becomes the preamble and the first remaining fence
/// (the closer) becomes the trailer. Only first occurrences are replaced.
fn rewrite_fence(content: &str, marker: &str, preamble: &str, trailer: &str) -> String {
    content
        .replacen(marker, preamble, 1)
        .replacen("```", trailer, 1)
}

/// Extract one diagram: substitute the style block, write the side file and
/// return the image reference that replaces it in the document.
fn extract(
    kind: DiagramKind,
    source: &str,
    ctx: &mut DiagramContext<'_>,
    sink: &mut dyn DiagramSink,
) -> Result<String, DiagramError> {
    let name = ctx.next_name();

    let source = match kind {
        DiagramKind::Graphviz => source.replace(DEFAULT_STYLE_PLACEHOLDER, GRAPHVIZ_DEFAULT_STYLE),
        DiagramKind::Uml => source.to_owned(),
    };

    debug!(kind = kind.as_str(), name = %name, "extracted diagram");
    sink.write(kind, &name, &source)?;

    Ok(format!("![image](images/{name}.png)\n"))
}
