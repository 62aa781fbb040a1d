//! Constants shared by the preview engine

/// Block loop simulation
pub mod blocks {
    /// Full passes over every declared block type when simulating
    /// `for block in section.blocks`
    pub const LOOP_CYCLES: usize = 4;

    /// Collection iterated by simulated block loops
    pub const COLLECTION: &str = "section.blocks";
}

/// Control-flow evaluation limits
pub mod limits {
    /// Deepest block nesting evaluated; deeper subtrees are dropped
    pub const MAX_NESTING_DEPTH: usize = 256;
}

/// Literal values substituted for runtime-only references
pub mod placeholders {
    pub const ASSET_URL: &str = "https://placehold.co/600x400/EEE/31343C?text=Asset";
    pub const IMAGE_URL: &str = "https://placehold.co/600x400/EEE/31343C?text=Image";
    pub const SECTION_ID: &str = "custom-preview-123";
    pub const RENDERED_SNIPPET: &str = "<!-- Rendered Snippet -->";
    pub const FORM_OPEN: &str = r#"<form onsubmit="event.preventDefault();">"#;
    pub const FORM_CLOSE: &str = "</form>";
}

/// Script and stylesheet CDN references loaded by preview documents
pub mod cdn {
    pub const TAILWIND: &str = "https://cdn.tailwindcss.com";
    pub const REACT: &str = "https://unpkg.com/react@18/umd/react.development.js";
    pub const REACT_DOM: &str = "https://unpkg.com/react-dom@18/umd/react-dom.development.js";
    pub const BABEL: &str = "https://unpkg.com/@babel/standalone/babel.min.js";
}
