/// Compile a regex literal once and hand out a `&'static Regex`.
///
/// Patterns are literals checked by the test suite, so a failed compile is a
/// programming error rather than an input error.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// First capture group of `$re` in `$text`, as `&str`.
#[macro_export]
macro_rules! capture {
    ($re:expr, $text:expr) => {
        $re.captures($text).and_then(|caps| caps.get(1)).map(|m| m.as_str())
    };
}
