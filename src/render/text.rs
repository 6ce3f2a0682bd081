// Las dos formas en que un texto llega al HTML: `escaped` para texto plano y
// `sanitized` para los campos enriquecidos del editor del panel.

use std::sync::LazyLock;

use maud::{Markup, PreEscaped};
use regex::Regex;

// Bloques <script>…</script> completos, sin cruzar saltos de línea
static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<script[^\n\r\u{2028}\u{2029}]*?>[^\n\r\u{2028}\u{2029}]*?</script>")
        .unwrap_or_else(|e| panic!("invalid script pattern: {e}"))
});

// Etiquetas que sobreviven a `sanitized`; el resto se elimina
pub const ALLOWED_TAGS: [&str; 8] = ["b", "strong", "em", "i", "p", "br", "ul", "li"];

// Escapa & < > " '
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

// Primero quita los bloques <script>, luego toda etiqueta fuera de ALLOWED_TAGS.
// El texto y las etiquetas permitidas pasan tal cual.
pub fn sanitize_html(input: &str) -> String {
    let without_scripts = SCRIPT_BLOCK.replace_all(input, "");

    let mut out = String::with_capacity(without_scripts.len());
    let mut rest: &str = &without_scripts;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        match after.find('>') {
            Some(end) if !is_allowed_tag(after) => {
                rest = &after[end + 1..];
            }
            _ => {
                out.push('<');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

// `after` es el texto que sigue a '<'
fn is_allowed_tag(after: &str) -> bool {
    let name_start = after.strip_prefix('/').unwrap_or(after);
    let bytes = name_start.as_bytes();

    ALLOWED_TAGS.iter().any(|name| {
        bytes.len() >= name.len()
            && bytes[..name.len()].eq_ignore_ascii_case(name.as_bytes())
            && !bytes
                .get(name.len())
                .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
    })
}

pub fn escaped(input: &str) -> Markup {
    PreEscaped(escape_html(input))
}

pub fn sanitized(input: &str) -> Markup {
    PreEscaped(sanitize_html(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_five_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn keeps_allowed_tags() {
        let html = "<p>Hola <b>mundo</b> <STRONG>fuerte</STRONG><br><ul><li>uno</li></ul></p>";
        assert_eq!(sanitize_html(html), html);
    }

    #[test]
    fn strips_tags_outside_the_allow_list() {
        assert_eq!(
            sanitize_html(r#"<h1>Título</h1><a href="/x">enlace</a><img src=x onerror=alert(1)>"#),
            "Títuloenlace"
        );
    }

    #[test]
    fn removes_script_blocks_with_content() {
        assert_eq!(sanitize_html("antes<script>alert('x')</script>después"), "antesdespués");
        assert_eq!(sanitize_html("<SCRIPT type=\"a\">x</ScRiPt>ok"), "ok");
    }

    #[test]
    fn multiline_script_loses_only_its_tags() {
        assert_eq!(sanitize_html("<script>\nalert(1)\n</script>"), "\nalert(1)\n");
    }

    #[test]
    fn names_must_end_at_a_word_boundary() {
        // <i> está permitido, <img> e <iframe> no; <pre> no es <p>
        assert_eq!(sanitize_html("<i>x</i><img src=a><iframe></iframe><pre>y</pre>"), "<i>x</i>y");
        assert_eq!(sanitize_html("<b_x>z"), "z");
    }

    #[test]
    fn allowed_tags_keep_their_attributes() {
        assert_eq!(sanitize_html(r#"<p class="lead">x</p>"#), r#"<p class="lead">x</p>"#);
    }

    #[test]
    fn unterminated_tags_are_left_as_text() {
        assert_eq!(sanitize_html("a < b"), "a < b");
        assert_eq!(sanitize_html("<div"), "<div");
    }

    #[test]
    fn tag_inside_allowed_tag_is_still_checked() {
        assert_eq!(sanitize_html("<b <img src=x>"), "<b ");
    }

    #[test]
    fn empty_tag_is_removed() {
        assert_eq!(sanitize_html("a<>b"), "ab");
    }
}
