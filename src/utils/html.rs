/// Escapes text for safe interpolation into generated HTML.
///
/// Unlike sanitizing, every character that is meaningful to HTML is entity-encoded,
/// so user-supplied names show up verbatim in the rendered report.
pub fn escape_text(input: &str) -> String {
    ammonia::clean_text(input)
}
