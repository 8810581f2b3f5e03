use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Entities decoded by [`decode_entities`]. Typographic punctuation is
/// folded to ASCII.
const ENTITIES: &[(&str, &str)] = &[
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#039;", "'"),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&nbsp;", " "),
    ("&#8216;", "'"),
    ("&#8217;", "'"),
    ("&#8220;", "\""),
    ("&#8221;", "\""),
    ("&#8211;", "-"),
    ("&#8212;", "--"),
    ("&#8230;", "..."),
];

fn entity_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"&(?:#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*);").expect("Invalid regex")
    })
}

fn markup_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>?").expect("Invalid regex"))
}

/// Decodes the entities in [`ENTITIES`] in a single pass. Entities outside
/// the table are left as they are.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    entity_regex()
        .replace_all(text, |caps: &Captures<'_>| {
            let entity = &caps[0];
            ENTITIES
                .iter()
                .find(|(name, _)| *name == entity)
                .map_or_else(|| entity.to_string(), |(_, ch)| (*ch).to_string())
        })
        .into_owned()
}

/// Removes tags, folds each blank-line pair into one newline and trims.
#[must_use]
pub fn strip_markup(html: &str) -> String {
    markup_regex()
        .replace_all(html, "")
        .replace("\n\n", "\n")
        .trim()
        .to_string()
}

/// [`strip_markup`] followed by [`decode_entities`], for rendered HTML fields.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    decode_entities(&strip_markup(html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_entities_basic() {
        assert_eq!(decode_entities("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(
            decode_entities("&lt;b&gt; &quot;hi&quot; it&#039;s"),
            "<b> \"hi\" it's"
        );
    }

    #[test]
    fn test_decode_entities_typographic() {
        assert_eq!(
            decode_entities("Artemis&#8217;s launch &#8211; live&#8230;"),
            "Artemis's launch - live..."
        );
        assert_eq!(decode_entities("a&#8212;b"), "a--b");
    }

    #[test]
    fn test_decode_entities_unknown_passthrough() {
        assert_eq!(decode_entities("&copy; 1936 &bogus; & more"), "&copy; 1936 &bogus; & more");
    }

    #[test]
    fn test_decode_entities_single_pass() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_decode_entities_empty() {
        assert_eq!(decode_entities(""), "");
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("<p>Hi</p>\n\n<p>Bye</p>"), "Hi\nBye");
        assert_eq!(strip_markup("  <div class=\"x\">text</div>  "), "text");
        assert_eq!(strip_markup(""), "");
    }

    #[test]
    fn test_strip_markup_unterminated_tag() {
        assert_eq!(strip_markup("before <img src="), "before");
    }

    #[test]
    fn test_sanitize_html() {
        assert_eq!(
            sanitize_html("<p>Mars &amp; the Moon</p>\n\n<p>Part&nbsp;2</p>"),
            "Mars & the Moon\nPart 2"
        );
    }
}
