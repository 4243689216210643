//! Application-wide constants and default values
//!
//! Centralized location for all hard-coded identifiers

/// String viewer identifiers
pub mod string_viewer {
    /// Name the display extension registers under
    pub const EXTENSION_NAME: &str = "StringViewerNode";

    /// The only node type the display extension attaches to
    pub const NODE_TYPE: &str = "StringViewer";

    /// Field identifier of the display widget
    pub const FIELD_NAME: &str = "output_text";

    /// Placeholder shown while the display widget is empty
    pub const PLACEHOLDER: &str = "Text";
}

/// Primitive widget type tags understood by the widget factory
pub mod type_tag {
    pub const STRING: &str = "STRING";
    pub const INT: &str = "INT";
    pub const FLOAT: &str = "FLOAT";
    pub const BOOLEAN: &str = "BOOLEAN";
    pub const ANY: &str = "*";
}

/// Demo window sizing
pub mod window {
    /// Initial window size
    pub const DEFAULT_SIZE: [f32; 2] = [720.0, 640.0];

    /// Minimum window size
    pub const MIN_SIZE: [f32; 2] = [400.0, 300.0];

    /// Rows shown by multiline text widgets
    pub const MULTILINE_ROWS: usize = 4;
}
