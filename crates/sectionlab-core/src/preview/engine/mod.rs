//! Mock renderer for markup templates
//!
//! Control flow is resolved by evaluating the tree built in [`parse`]:
//! conditionals and case blocks keep the branch the string-level
//! [`condition`] evaluator picks, and loops over `section.blocks` are
//! expanded from the schema's block types. Only the outermost blocks loop
//! is expanded; one nested inside a block item renders its body once, like
//! any other collection. Substitution of the remaining references happens
//! afterwards in [`substitute`].

mod blocks;
mod condition;
mod parse;
mod substitute;

pub(crate) mod tokenize;

use crate::config::PreviewConfig;
use crate::config::consts::{blocks as block_consts, limits::MAX_NESTING_DEPTH};
use crate::preview::schema::{SchemaDefaults, SettingsMap};

use blocks::{simulate_blocks, specialize_body};
use parse::{Branch, Guard, Node, WhenClause, parse};
use substitute::Substituter;

/// Markup and CSS after mock rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockOutput {
    pub markup: String,
    pub css: String,
}

/// Mock renderer for one template's markup
pub struct MockRenderer<'a> {
    defaults: &'a SchemaDefaults,
    config: &'a PreviewConfig,
}

impl<'a> MockRenderer<'a> {
    /// Create a renderer over the given schema defaults
    pub fn new(defaults: &'a SchemaDefaults, config: &'a PreviewConfig) -> Self {
        Self { defaults, config }
    }

    /// Resolve control flow and block loops, without substitution
    pub fn resolve(&self, markup: &str) -> String {
        let nodes = parse(markup, MAX_NESTING_DEPTH);
        let mut output = String::with_capacity(markup.len());
        self.render_nodes(&nodes, 0, false, &mut output);
        output
    }

    /// Fully render markup and CSS
    pub fn render(&self, markup: &str, css: &str) -> MockOutput {
        let resolved = self.resolve(markup);
        let substituter = Substituter::new(&self.defaults.settings, self.config);

        MockOutput {
            markup: substituter.markup(&resolved),
            css: substituter.stylesheet(css),
        }
    }

    fn render_nodes(&self, nodes: &[Node<'_>], depth: usize, in_item: bool, output: &mut String) {
        for node in nodes {
            self.render_node(node, depth, in_item, output);
        }
    }

    /// `in_item` is set while rendering the body of an expanded blocks loop
    fn render_node(&self, node: &Node<'_>, depth: usize, in_item: bool, output: &mut String) {
        match node {
            Node::Raw(text) => output.push_str(text),
            Node::Conditional { branches, fallback } => {
                let body = select_branch(branches).or(fallback.as_deref());
                if let Some(body) = body {
                    self.render_nodes(body, depth + 1, in_item, output);
                }
            }
            Node::Case {
                subject,
                clauses,
                fallback,
            } => {
                let body = select_clause(subject, clauses).or(fallback.as_deref());
                if let Some(body) = body {
                    self.render_nodes(body, depth + 1, in_item, output);
                }
            }
            Node::Loop {
                var,
                collection,
                body_source,
                body,
                fallback,
            } => {
                if collection == block_consts::COLLECTION && !in_item {
                    self.render_block_loop(var, body_source, fallback.as_deref(), depth, output);
                } else {
                    // Unknown collections and nested blocks loops render their body once
                    self.render_nodes(body, depth + 1, in_item, output);
                }
            }
        }
    }

    fn render_block_loop(
        &self,
        var: &str,
        body_source: &str,
        fallback: Option<&[Node<'_>]>,
        depth: usize,
        output: &mut String,
    ) {
        let blocks = &self.defaults.blocks;
        if blocks.is_empty() {
            if let Some(fallback) = fallback {
                self.render_nodes(fallback, depth + 1, false, output);
            }
            return;
        }

        let no_defaults = SettingsMap::default();
        let remaining = MAX_NESTING_DEPTH.saturating_sub(depth + 1);
        for item in simulate_blocks(blocks, self.config.preview.loop_cycles) {
            let defaults = blocks.get(item.kind).unwrap_or(&no_defaults);
            let item_source = specialize_body(body_source, var, &item, defaults);
            let item_nodes = parse(&item_source, remaining);
            self.render_nodes(&item_nodes, depth + 1, true, output);
        }
    }
}

/// First branch whose guard holds
fn select_branch<'n, 'a>(branches: &'n [Branch<'a>]) -> Option<&'n [Node<'a>]> {
    branches
        .iter()
        .find(|branch| match &branch.guard {
            Guard::If(condition) => condition::evaluate(condition),
            Guard::Unless(condition) => !condition::evaluate(condition),
        })
        .map(|branch| branch.body.as_slice())
}

/// First `when` clause listing the subject
fn select_clause<'n, 'a>(subject: &str, clauses: &'n [WhenClause<'a>]) -> Option<&'n [Node<'a>]> {
    clauses
        .iter()
        .find(|clause| clause.values.iter().any(|value| value == subject))
        .map(|clause| clause.body.as_slice())
}

#[cfg(test)]
mod tests;
