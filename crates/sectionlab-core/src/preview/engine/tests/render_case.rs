//! Case/when rendering tests

use super::helpers::{MIXED_SCHEMA, render, render_with};

#[test]
fn test_case_selects_matching_when() {
    assert_eq!(
        render("{% case 'lg' %}{% when 'sm' %}S{% when 'lg' %}L{% else %}D{% endcase %}"),
        "L"
    );
}

#[test]
fn test_case_falls_back_to_else() {
    assert_eq!(
        render("{% case 'xl' %}{% when 'sm' %}S{% when 'lg' %}L{% else %}D{% endcase %}"),
        "D"
    );
}

#[test]
fn test_case_without_match_or_else_is_empty() {
    assert_eq!(render("<{% case 'xl' %}{% when 'sm' %}S{% endcase %}>"), "<>");
}

#[test]
fn test_when_with_several_values() {
    assert_eq!(
        render("{% case 'md' %}{% when 'sm', 'md' %}small{% when 'lg' or 'xl' %}big{% endcase %}"),
        "small"
    );
    assert_eq!(
        render("{% case xl %}{% when 'sm', 'md' %}small{% when 'lg' or 'xl' %}big{% endcase %}"),
        "big"
    );
}

#[test]
fn test_first_matching_when_wins() {
    assert_eq!(
        render("{% case 'a' %}{% when 'a' %}1{% when 'a' %}2{% endcase %}"),
        "1"
    );
}

#[test]
fn test_nested_case() {
    assert_eq!(
        render(
            "{% case 'a' %}{% when 'a' %}[{% case 'b' %}{% when 'b' %}inner{% endcase %}]{% when 'c' %}C{% endcase %}"
        ),
        "[inner]"
    );
}

#[test]
fn test_case_inside_conditional() {
    assert_eq!(
        render("{% if true %}{% case 'on' %}{% when 'on' %}yes{% else %}no{% endcase %}{% endif %}"),
        "yes"
    );
}

#[test]
fn test_case_on_block_type() {
    assert_eq!(
        render_with(
            MIXED_SCHEMA,
            "{% for block in section.blocks %}{% case block.type %}{% when 'card' %}C{% when 'quote' %}Q{% endcase %}{% endfor %}"
        ),
        "CQCQCQCQ"
    );
}
