//! Shared constants for diagram extraction.

/// Style block substituted for the `[default_style]` placeholder in graphviz
/// sources. Kept byte-identical to the style the docs build expects.
pub const GRAPHVIZ_DEFAULT_STYLE: &str = r#"
    rankdir  = BT
    fontname = "Courier New"
    fontsize = 12

    node [
        fontname = "Courier New"
        fontsize = 12
        shape    = "record"
        width = 0.4
    ]
"#;

/// Placeholder literal replaced by [`GRAPHVIZ_DEFAULT_STYLE`].
pub(crate) const DEFAULT_STYLE_PLACEHOLDER: &str = "[default_style]";
