//! Presentation of generated descriptions.

/// Heading printed above every generated description.
pub const DESCRIPTION_HEADING: &str = "Generated PR Description (Markdown):";

/// Printed instead of a description when HEAD matches the base branch.
pub const NO_CHANGES_MESSAGE: &str =
    "No changes between HEAD and the base branch. Nothing to describe.";

/// Width of the separator lines around the description.
const SEPARATOR_WIDTH: usize = 80;

/// Wraps `text` between two separator lines under a heading.
pub fn format_description(text: &str) -> String {
    let separator = "=".repeat(SEPARATOR_WIDTH);

    let mut output = String::with_capacity(text.len() + 2 * SEPARATOR_WIDTH + 64);
    output.push_str(DESCRIPTION_HEADING);
    output.push('\n');
    output.push_str(&separator);
    output.push('\n');
    output.push_str(text);
    if !text.ends_with('\n') {
        output.push('\n');
    }
    output.push_str(&separator);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_text_between_separators() {
        insta::assert_snapshot!(format_description("Summary: s\nChanges: c"), @r"
        Generated PR Description (Markdown):
        ================================================================================
        Summary: s
        Changes: c
        ================================================================================
        ");
    }

    #[test]
    fn trailing_newline_is_not_doubled() {
        assert_eq!(
            format_description("text\n"),
            format_description("text")
        );
    }

    #[test]
    fn text_is_kept_verbatim() {
        let text = "```markdown\n## Summary\n  indented\n```";
        assert!(format_description(text).contains(text));
    }

    #[test]
    fn separators_are_identical() {
        let output = format_description("x");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], DESCRIPTION_HEADING);
        assert_eq!(lines[1], lines[lines.len() - 1]);
        assert_eq!(lines[1].len(), SEPARATOR_WIDTH);
    }
}
