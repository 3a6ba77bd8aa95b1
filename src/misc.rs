fn strip_prefix_token_untrimmed<'a>(src: &'a str, search: &str) -> Option<&'a str> {
    src.strip_prefix(search)
        .filter(|src| src.chars().next().is_none_or(<char>::is_whitespace))
}
/// Strips `search` only when it is a whole word, `importfen` does not match
/// `import`.
pub fn strip_prefix_token<'a>(src: &'a str, search: &str) -> Option<&'a str> {
    strip_prefix_token_untrimmed(src, search).map(<str>::trim_start)
}
