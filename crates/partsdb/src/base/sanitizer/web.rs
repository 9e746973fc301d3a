use partsdb_core::traits::Sanitizer;

/// Entities this escaper emits. An ampersand that already begins one of
/// these is left alone, which is what makes the transform idempotent.
const ENTITIES: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&#x27;"];

/// escape_markup
/// Neutralize characters with special meaning in a markup rendering
/// context. Idempotent: escaping an already-escaped string is a no-op.
#[must_use]
pub fn escape_markup(s: &str) -> String {
    let mut out = String::with_capacity(s.len());

    for (idx, ch) in s.char_indices() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '&' => {
                if ENTITIES.iter().any(|entity| s[idx..].starts_with(entity)) {
                    out.push('&');
                } else {
                    out.push_str("&amp;");
                }
            }
            c => out.push(c),
        }
    }

    out
}

///
/// EscapeMarkup
/// Escapes markup-significant characters in place.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct EscapeMarkup;

impl Sanitizer<String> for EscapeMarkup {
    fn sanitize(&self, value: &mut String) -> Result<(), String> {
        let escaped = escape_markup(value);

        if *value != escaped {
            *value = escaped;
        }

        Ok(())
    }
}

///
/// TESTS
///
