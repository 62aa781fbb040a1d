//! Tokenization for the mock renderer
//!
//! Provides O(n) tokenization of `{{ ... }}` outputs and `{% ... %}` tags
//! using a state machine.

/// Which delimiter pair opened a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delimiter {
    /// `{{ ... }}`
    Output,
    /// `{% ... %}`
    Tag,
}

impl Delimiter {
    /// First byte of the closing delimiter (`}` or `%`)
    fn close_byte(self) -> u8 {
        match self {
            Delimiter::Output => b'}',
            Delimiter::Tag => b'%',
        }
    }
}

/// Token classification
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    /// `{{ expr }}`
    Output { expr: String },

    /// `{% name args %}`
    Tag { name: String, args: String },
}

/// A single `{{...}}` or `{%...%}` token with position and classification
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    /// Token classification
    pub kind: TokenKind,
    /// Absolute byte position of the opening delimiter
    pub start: usize,
    /// Total length in bytes including both delimiters
    pub length: usize,
    /// Line number where token ends (for diagnostics)
    pub line: usize,
}

impl Token {
    /// Byte position just past the closing delimiter
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Tag name, if this is a `{% %}` token
    pub fn tag_name(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Tag { name, .. } => Some(name),
            TokenKind::Output { .. } => None,
        }
    }

    /// Check for a `{% %}` token with the given name
    pub fn is_tag(&self, wanted: &str) -> bool {
        self.tag_name() == Some(wanted)
    }
}

/// Tokenization state machine (explicit for testability)
///
/// # State Transitions
///
/// ```text
/// Normal ──{──> SeenLBrace ──{ or %──> InToken ──} or %──> SeenClose ──}──> [Yield Token] → Normal
///   │              │                      │                    │
///   │ (not {)      │ (other)              │ (other)            │ (other)
///   └─────────────>└─────────────────────>└───────────────────>└──────────> InToken
///
/// Unterminated {{ or {% → consumes the rest of the input, no token
/// ```
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ScanState {
    /// Normal text scanning
    Normal,

    /// Seen `{`, checking for `{` or `%`
    SeenLBrace {
        /// Position of the `{` character
        pos: usize,
    },

    /// Inside a token, scanning for the closing delimiter
    InToken {
        /// Byte position of the opening delimiter
        start: usize,
        /// Byte position where token content starts
        content_start: usize,
        delimiter: Delimiter,
    },

    /// Seen the first byte of the closing delimiter, checking for `}`
    SeenClose {
        start: usize,
        content_start: usize,
        delimiter: Delimiter,
        /// Position of the first closing byte
        close_pos: usize,
    },
}

/// Iterator over tokens in a template string
///
/// # Performance
///
/// - **O(n) guarantee**: Each byte processed at most twice (reprocessing on
///   a failed delimiter match), bounded by a step counter
/// - **Forward-only**: Position never moves backward
pub(crate) struct TokenStream<'a> {
    /// Zero-copy byte slice of template text
    bytes: &'a [u8],
    /// Current byte position
    pos: usize,
    /// State machine state
    state: ScanState,
    /// Current line number
    line: usize,
    /// Step count for O(n) termination guarantee
    step_count: usize,
}

impl<'a> TokenStream<'a> {
    /// Create a new TokenStream from template text
    pub fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
            state: ScanState::Normal,
            line: 1,
            step_count: 0,
        }
    }

    /// Classify token content into TokenKind
    ///
    /// Whitespace-control markers (`{%-`, `-%}`, `{{-`, `-}}`) are accepted
    /// and discarded.
    fn classify_content(&self, content: &str, delimiter: Delimiter) -> TokenKind {
        let trimmed = trim_markers(content);

        match delimiter {
            Delimiter::Output => TokenKind::Output {
                expr: trimmed.to_string(),
            },
            Delimiter::Tag => {
                let name_end = trimmed
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(trimmed.len());
                TokenKind::Tag {
                    name: trimmed[..name_end].to_string(),
                    args: trimmed[name_end..].trim().to_string(),
                }
            }
        }
    }

    /// Check if we should continue iteration (guards for step bound and EOF)
    #[inline]
    fn should_continue(&mut self, max_steps: usize) -> bool {
        self.step_count += 1;
        self.step_count <= max_steps && self.pos < self.bytes.len()
    }

    /// Record step for O(n) performance verification in tests
    #[cfg(test)]
    #[inline]
    fn record_test_step() {
        test_counter::inc();
    }

    fn process_normal_state(&mut self, byte: u8) {
        if byte == b'{' {
            self.state = ScanState::SeenLBrace { pos: self.pos };
        } else if byte == b'\n' {
            self.line += 1;
        }
        self.pos += 1;
    }

    /// Returns true if position was advanced, false if byte should be reprocessed
    fn process_seen_lbrace(&mut self, byte: u8, lbrace_pos: usize) -> bool {
        let delimiter = match byte {
            b'{' => Delimiter::Output,
            b'%' => Delimiter::Tag,
            _ => {
                self.state = ScanState::Normal;
                return false;
            }
        };

        self.state = ScanState::InToken {
            start: lbrace_pos,
            content_start: self.pos + 1,
            delimiter,
        };
        self.pos += 1;
        true
    }

    fn process_in_token(
        &mut self,
        byte: u8,
        start: usize,
        content_start: usize,
        delimiter: Delimiter,
    ) {
        if byte == delimiter.close_byte() {
            self.state = ScanState::SeenClose {
                start,
                content_start,
                delimiter,
                close_pos: self.pos,
            };
        } else if byte == b'\n' {
            self.line += 1;
        }
        self.pos += 1;
    }

    /// Returns (Option<Token>, advanced)
    fn process_seen_close(
        &mut self,
        byte: u8,
        start: usize,
        content_start: usize,
        delimiter: Delimiter,
        close_pos: usize,
    ) -> (Option<Token>, bool) {
        if byte == b'}' {
            let content = std::str::from_utf8(&self.bytes[content_start..close_pos]).unwrap_or("");

            let token = Token {
                kind: self.classify_content(content, delimiter),
                start,
                length: self.pos + 1 - start,
                line: self.line,
            };

            self.state = ScanState::Normal;
            self.pos += 1;

            (Some(token), true)
        } else {
            // Lone closing byte inside content, reprocess in InToken
            self.state = ScanState::InToken {
                start,
                content_start,
                delimiter,
            };
            (None, false)
        }
    }
}

impl Iterator for TokenStream<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        const MAX_STEPS_MULTIPLIER: usize = 3;
        let max_steps = self.bytes.len().saturating_mul(MAX_STEPS_MULTIPLIER);

        loop {
            if !self.should_continue(max_steps) {
                return None;
            }

            let byte = self.bytes[self.pos];
            #[cfg(test)]
            Self::record_test_step();

            match self.state.clone() {
                ScanState::Normal => self.process_normal_state(byte),
                ScanState::SeenLBrace { pos } => {
                    if !self.process_seen_lbrace(byte, pos) {
                        continue;
                    }
                }
                ScanState::InToken {
                    start,
                    content_start,
                    delimiter,
                } => self.process_in_token(byte, start, content_start, delimiter),
                ScanState::SeenClose {
                    start,
                    content_start,
                    delimiter,
                    close_pos,
                } => {
                    let (token, advanced) =
                        self.process_seen_close(byte, start, content_start, delimiter, close_pos);
                    if let Some(token) = token {
                        return Some(token);
                    }
                    if !advanced {
                        continue;
                    }
                }
            }
        }
    }
}

/// Strip surrounding whitespace and `-` whitespace-control markers
pub(crate) fn trim_markers(content: &str) -> &str {
    let trimmed = content.trim();
    let trimmed = trimmed.strip_prefix('-').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('-').unwrap_or(trimmed);
    trimmed.trim()
}

/// Rewrite every token in `source` through `replace`
///
/// `replace` returns `Some(text)` to substitute the whole token, or `None`
/// to keep the token's source text verbatim. Text between tokens is copied
/// unchanged.
pub(crate) fn rewrite_tokens<F>(source: &str, mut replace: F) -> String
where
    F: FnMut(&Token) -> Option<String>,
{
    let mut output = String::with_capacity(source.len());
    let mut pos = 0;

    for token in TokenStream::new(source) {
        output.push_str(&source[pos..token.start]);
        match replace(&token) {
            Some(text) => output.push_str(&text),
            None => output.push_str(&source[token.start..token.end()]),
        }
        pos = token.end();
    }

    output.push_str(&source[pos..]);
    output
}
