/// Split the joined positional arguments into a filter part and a template
/// part.
///
/// The filter is everything before the last `|` and the template everything
/// after it. Without a `|`, text containing a `.` but none of `=`, `!`, `~`
/// is a template, text with one of those and no `.` is a filter, and
/// anything else is taken as a template.
pub fn split_args(args: &str) -> (String, String) {
    let Some(split) = args.rfind('|') else {
        let likely_template = args.contains('.');
        let likely_filter = args.contains(['=', '!', '~']);

        return if likely_filter && !likely_template {
            (args.to_string(), String::new())
        } else {
            (String::new(), args.to_string())
        };
    };

    let filter = &args[..split];
    let template = args[split + 1..].trim_matches(' ');
    (filter.to_string(), template.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(filter: &str, template: &str) -> (String, String) {
        (filter.to_string(), template.to_string())
    }

    #[test]
    fn test_filter_and_template() {
        assert_eq!(split_args("foo=bar | .baz"), parts("foo=bar ", ".baz"));
    }

    #[test]
    fn test_filter_only() {
        assert_eq!(split_args("foo=bar"), parts("foo=bar", ""));
    }

    #[test]
    fn test_template_only() {
        assert_eq!(split_args(".baz"), parts("", ".baz"));
    }

    #[test]
    fn test_chained_filters_split_on_last_pipe() {
        assert_eq!(split_args("foo=bar | this=that | .baz"), parts("foo=bar | this=that ", ".baz"));
        assert_eq!(split_args("foo=bar this=that | .baz"), parts("foo=bar this=that ", ".baz"));
        assert_eq!(split_args("foo=bar this=that|.baz"), parts("foo=bar this=that", ".baz"));
    }

    #[test]
    fn test_ambiguous_and_empty() {
        assert_eq!(split_args("test"), parts("", "test"));
        assert_eq!(split_args("version=1.2"), parts("", "version=1.2"));
        assert_eq!(split_args(""), parts("", ""));
    }
}
