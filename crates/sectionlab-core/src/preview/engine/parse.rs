//! Stack-based parser turning the token stream into a control-flow tree
//!
//! Only control-flow tags (`if`, `unless`, `case`, `for`, `comment`) become
//! tree nodes. Text, outputs and every other tag stay as verbatim source
//! slices for the substitution pass.

use super::tokenize::{Token, TokenKind, TokenStream};

/// A parsed template fragment
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node<'a> {
    /// Source passed through untouched (text, outputs, leaf tags)
    Raw(&'a str),

    /// `if`/`elsif`/`else` or `unless`/`else`
    Conditional {
        branches: Vec<Branch<'a>>,
        fallback: Option<Vec<Node<'a>>>,
    },

    /// `case`/`when`/`else`
    Case {
        subject: String,
        clauses: Vec<WhenClause<'a>>,
        fallback: Option<Vec<Node<'a>>>,
    },

    /// `for var in collection`/`else`
    Loop {
        var: String,
        collection: String,
        /// Raw body source, re-parsed per synthesized item
        body_source: &'a str,
        body: Vec<Node<'a>>,
        fallback: Option<Vec<Node<'a>>>,
    },
}

/// Guard of a conditional branch
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Guard {
    /// Body kept when the condition holds
    If(String),
    /// Body kept when the condition does not hold
    Unless(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Branch<'a> {
    pub guard: Guard,
    pub body: Vec<Node<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WhenClause<'a> {
    pub values: Vec<String>,
    pub body: Vec<Node<'a>>,
}

/// Block tags that open a frame on the parser stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    If,
    Unless,
    Case,
    For,
    Comment,
}

impl BlockKind {
    fn from_opener(name: &str) -> Option<Self> {
        match name {
            "if" => Some(BlockKind::If),
            "unless" => Some(BlockKind::Unless),
            "case" => Some(BlockKind::Case),
            "for" => Some(BlockKind::For),
            "comment" => Some(BlockKind::Comment),
            _ => None,
        }
    }

    fn from_closer(name: &str) -> Option<Self> {
        name.strip_prefix("end").and_then(Self::from_opener)
    }
}

/// Clause separator inside a block
#[derive(Debug, Clone, PartialEq)]
enum Marker {
    /// Content right after the opener
    Head,
    Elsif(String),
    When(Vec<String>),
    Else,
}

/// One clause of an open block
struct Clause<'a> {
    marker: Marker,
    /// Source text of the separating tag (empty for the head clause)
    marker_source: &'a str,
    nodes: Vec<Node<'a>>,
    /// Byte range of the clause content in the source
    start: usize,
    end: usize,
}

impl<'a> Clause<'a> {
    fn new(marker: Marker, marker_source: &'a str, start: usize) -> Self {
        Self {
            marker,
            marker_source,
            nodes: Vec::new(),
            start,
            end: start,
        }
    }
}

/// An open block on the parser stack
struct Frame<'a> {
    kind: BlockKind,
    /// Line of the opening tag
    line: usize,
    opener_source: &'a str,
    args: String,
    clauses: Vec<Clause<'a>>,
}

impl<'a> Frame<'a> {
    fn current(&mut self) -> &mut Clause<'a> {
        // A frame always holds at least its head clause
        let last = self.clauses.len() - 1;
        &mut self.clauses[last]
    }

    /// Flatten an unterminated frame back into verbatim content
    fn unwind(self) -> Vec<Node<'a>> {
        tracing::debug!(
            "unclosed {:?} block from line {} left unresolved",
            self.kind,
            self.line
        );
        let mut nodes = vec![Node::Raw(self.opener_source)];
        for clause in self.clauses {
            if !clause.marker_source.is_empty() {
                nodes.push(Node::Raw(clause.marker_source));
            }
            nodes.extend(clause.nodes);
        }
        nodes
    }

    /// Turn a properly closed frame into its tree node
    fn close(self, source: &'a str) -> Option<Node<'a>> {
        match self.kind {
            BlockKind::Comment => None,
            BlockKind::If | BlockKind::Unless => Some(self.close_conditional()),
            BlockKind::Case => Some(self.close_case()),
            BlockKind::For => Some(self.close_loop(source)),
        }
    }

    fn close_conditional(self) -> Node<'a> {
        let mut branches = Vec::new();
        let mut fallback = None;

        for clause in self.clauses {
            match clause.marker {
                Marker::Head => {
                    let guard = if self.kind == BlockKind::Unless {
                        Guard::Unless(self.args.clone())
                    } else {
                        Guard::If(self.args.clone())
                    };
                    branches.push(Branch {
                        guard,
                        body: clause.nodes,
                    });
                }
                Marker::Elsif(condition) => branches.push(Branch {
                    guard: Guard::If(condition),
                    body: clause.nodes,
                }),
                // First else wins; later clauses are unreachable
                Marker::Else if fallback.is_none() => fallback = Some(clause.nodes),
                _ => {}
            }
        }

        Node::Conditional { branches, fallback }
    }

    fn close_case(self) -> Node<'a> {
        let mut clauses = Vec::new();
        let mut fallback = None;

        for clause in self.clauses {
            match clause.marker {
                Marker::When(values) => clauses.push(WhenClause {
                    values,
                    body: clause.nodes,
                }),
                Marker::Else if fallback.is_none() => fallback = Some(clause.nodes),
                // Text between `case` and the first `when` is discarded
                _ => {}
            }
        }

        Node::Case {
            subject: remove_quotes(&self.args),
            clauses,
            fallback,
        }
    }

    fn close_loop(self, source: &'a str) -> Node<'a> {
        let (var, collection) = parse_loop_header(&self.args);
        let mut clauses = self.clauses.into_iter();

        let (body_source, body) = match clauses.next() {
            Some(head) => (&source[head.start..head.end], head.nodes),
            None => ("", Vec::new()),
        };
        let fallback = clauses
            .find(|clause| clause.marker == Marker::Else)
            .map(|clause| clause.nodes);

        Node::Loop {
            var,
            collection,
            body_source,
            body,
            fallback,
        }
    }
}

/// Parser state
struct Parser<'a> {
    source: &'a str,
    root: Vec<Node<'a>>,
    stack: Vec<Frame<'a>>,
    /// Maximum number of simultaneously open frames
    max_depth: usize,
    /// Kinds of the openers seen while at `max_depth`, skipped together with
    /// their content
    overflow: Vec<BlockKind>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, max_depth: usize) -> Self {
        Self {
            source,
            root: Vec::new(),
            stack: Vec::new(),
            max_depth,
            overflow: Vec::new(),
        }
    }

    /// Append a node to the innermost open clause (or the root)
    fn push_node(&mut self, node: Node<'a>) {
        match self.stack.last_mut() {
            Some(frame) => frame.current().nodes.push(node),
            None => self.root.push(node),
        }
    }

    fn push_text(&mut self, start: usize, end: usize) {
        if start < end && self.overflow.is_empty() && !self.in_comment() {
            self.push_node(Node::Raw(&self.source[start..end]));
        }
    }

    fn in_comment(&self) -> bool {
        self.stack
            .last()
            .is_some_and(|frame| frame.kind == BlockKind::Comment)
    }

    /// Mark the end of the current clause's content
    fn seal_clause(&mut self, end: usize) {
        if let Some(frame) = self.stack.last_mut() {
            frame.current().end = end;
        }
    }

    fn handle_token(&mut self, token: &Token) {
        let token_source = &self.source[token.start..token.end()];

        let (name, args) = match &token.kind {
            TokenKind::Tag { name, args } => (name.as_str(), args.as_str()),
            TokenKind::Output { .. } => {
                if self.overflow.is_empty() && !self.in_comment() {
                    self.push_node(Node::Raw(token_source));
                }
                return;
            }
        };

        if self.in_comment() {
            self.handle_comment_tag(name, token);
            return;
        }

        if !self.overflow.is_empty() {
            self.handle_overflow_tag(name, token, token_source);
            return;
        }

        if let Some(kind) = BlockKind::from_opener(name) {
            self.open(kind, token, token_source, args);
        } else if let Some(kind) = BlockKind::from_closer(name) {
            self.close(kind, token, token_source);
        } else if let Some(marker) = self.clause_marker(name, args) {
            self.seal_clause(token.start);
            if let Some(frame) = self.stack.last_mut() {
                frame
                    .clauses
                    .push(Clause::new(marker, token_source, token.end()));
            }
        } else {
            self.push_node(Node::Raw(token_source));
        }
    }

    /// Classify `elsif`/`when`/`else` against the innermost open block
    fn clause_marker(&self, name: &str, args: &str) -> Option<Marker> {
        let kind = self.stack.last()?.kind;
        match (name, kind) {
            ("elsif", BlockKind::If | BlockKind::Unless) => Some(Marker::Elsif(args.to_string())),
            ("when", BlockKind::Case) => Some(Marker::When(parse_when_values(args))),
            ("else", BlockKind::If | BlockKind::Unless | BlockKind::Case | BlockKind::For) => {
                Some(Marker::Else)
            }
            _ => None,
        }
    }

    fn open(&mut self, kind: BlockKind, token: &Token, opener_source: &'a str, args: &str) {
        if self.stack.len() >= self.max_depth {
            tracing::debug!("nesting deeper than {} levels dropped", self.max_depth);
            self.overflow.push(kind);
            return;
        }

        self.stack.push(Frame {
            kind,
            line: token.line,
            opener_source,
            args: args.to_string(),
            clauses: vec![Clause::new(Marker::Head, "", token.end())],
        });
    }

    fn close(&mut self, kind: BlockKind, token: &Token, closer_source: &'a str) {
        // Closer without any matching opener: leave it for cleanup
        let Some(index) = self.stack.iter().rposition(|frame| frame.kind == kind) else {
            self.push_node(Node::Raw(closer_source));
            return;
        };

        // Frames opened after the matching one were never closed
        while self.stack.len() > index + 1 {
            if let Some(frame) = self.stack.pop() {
                let nodes = frame.unwind();
                for node in nodes {
                    self.push_node(node);
                }
            }
        }

        self.seal_clause(token.start);
        if let Some(frame) = self.stack.pop()
            && let Some(node) = frame.close(self.source)
        {
            self.push_node(node);
        }
    }

    fn handle_comment_tag(&mut self, name: &str, token: &Token) {
        match name {
            "comment" => self.overflow.push(BlockKind::Comment),
            "endcomment" if !self.overflow.is_empty() => {
                self.overflow.pop();
            }
            "endcomment" => {
                let source = &self.source[token.start..token.end()];
                self.close(BlockKind::Comment, token, source);
            }
            _ => {}
        }
    }

    /// Track nesting inside a dropped subtree
    ///
    /// A closer only ends the skipped opener of its own kind. A closer for
    /// a frame that is still open ends the skip and closes that frame;
    /// any other closer is dropped with the rest of the subtree.
    fn handle_overflow_tag(&mut self, name: &str, token: &Token, token_source: &'a str) {
        if let Some(kind) = BlockKind::from_opener(name) {
            self.overflow.push(kind);
        } else if let Some(kind) = BlockKind::from_closer(name) {
            if let Some(index) = self.overflow.iter().rposition(|&open| open == kind) {
                self.overflow.truncate(index);
            } else if self.stack.iter().any(|frame| frame.kind == kind) {
                self.overflow.clear();
                self.close(kind, token, token_source);
            }
        }
    }

    fn finish(mut self) -> Vec<Node<'a>> {
        while let Some(frame) = self.stack.pop() {
            let nodes = frame.unwind();
            for node in nodes {
                self.push_node(node);
            }
        }
        self.root
    }
}

/// Parse `source` into a control-flow tree
///
/// At most `max_depth` blocks may be open at once; anything nested deeper
/// is dropped. Unterminated blocks are flattened back into verbatim
/// content.
pub(crate) fn parse(source: &str, max_depth: usize) -> Vec<Node<'_>> {
    let mut parser = Parser::new(source, max_depth);
    let mut pos = 0;

    for token in TokenStream::new(source) {
        parser.push_text(pos, token.start);
        parser.handle_token(&token);
        pos = token.end();
    }

    parser.push_text(pos, source.len());
    parser.finish()
}

/// Parse `var in collection ...` into (var, collection)
fn parse_loop_header(args: &str) -> (String, String) {
    let mut words = args.split_whitespace();
    let var = words.next().unwrap_or_default();
    match (words.next(), words.next()) {
        (Some("in"), Some(collection)) => (var.to_string(), collection.to_string()),
        _ => (var.to_string(), String::new()),
    }
}

/// Parse the value list of a `when` tag
///
/// Values are separated by commas or the word `or`; quoted values may
/// contain separators.
pub(crate) fn parse_when_values(args: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut chars = args.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() || c == ',' {
            chars.next();
            continue;
        }

        if c == '"' || c == '\'' {
            chars.next();
            let mut end = args.len();
            for (i, inner) in chars.by_ref() {
                if inner == c {
                    end = i;
                    break;
                }
            }
            values.push(args[start + 1..end].to_string());
            continue;
        }

        let mut end = args.len();
        while let Some(&(i, inner)) = chars.peek() {
            if inner.is_whitespace() || inner == ',' {
                end = i;
                break;
            }
            chars.next();
        }
        let word = &args[start..end];
        if word != "or" {
            values.push(word.to_string());
        }
    }

    values
}

/// Trim and strip surrounding quote characters
pub(crate) fn strip_quotes(text: &str) -> &str {
    text.trim().trim_matches(|c| c == '"' || c == '\'')
}

/// Trim and drop every quote character
pub(crate) fn remove_quotes(text: &str) -> String {
    text.trim().chars().filter(|&c| c != '"' && c != '\'').collect()
}
