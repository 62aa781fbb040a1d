//! Condition evaluation for `if`/`unless`/`elsif`
//!
//! Purely string-level: real values are unknown at mock time, so presence
//! checks are assumed to hold and anything unrecognised is truthy.

use super::parse::{remove_quotes, strip_quotes};

const NOT_BLANK: &str = "!= blank";
const IS_BLANK: &str = "== blank";
const EQUALS: &str = "==";
const NOT_EQUALS: &str = "!=";

/// Evaluate a raw condition expression
pub(crate) fn evaluate(condition: &str) -> bool {
    let c = strip_quotes(condition);

    if c.is_empty() {
        return false;
    }
    if c.contains(NOT_BLANK) {
        return true;
    }
    if c.contains(IS_BLANK) {
        return false;
    }
    if let Some((left, right)) = c.split_once(EQUALS) {
        return remove_quotes(left) == remove_quotes(right);
    }
    if let Some((left, right)) = c.split_once(NOT_EQUALS) {
        return remove_quotes(left) != remove_quotes(right);
    }

    match c {
        "true" => true,
        "false" => false,
        _ => true,
    }
}
