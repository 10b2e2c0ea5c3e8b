use crate::core::prompt::{CONTACT_EMAIL, DEFAULT_AREA};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

// 與瀏覽器 encodeURIComponent 相同：保留 A-Z a-z 0-9 - _ . ! ~ * ' ( )
const URI_COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT_ENCODE_SET).to_string()
}

/// 固定的備用 HTML，只依賴 area
pub fn fallback_html(area: Option<&str>) -> String {
    let area = area.filter(|a| !a.is_empty()).unwrap_or(DEFAULT_AREA);
    let subject = encode_uri_component(area);

    format!(
        r##"<h4>Doporučení</h4>
<ul>
  <li>Krátký diagnostický rozhovor (30 min).</li>
  <li>Vyberte 1 pilotní téma na 2–4 týdny.</li>
  <li>Průběžná zpětná vazba a stabilizace.</li>
</ul>
<div class="oobpa-cta">
  <a class="primary" href="mailto:{CONTACT_EMAIL}?subject=Konzultace%20–%20{subject}">Domluvit konzultaci</a>
  <a href="#jak-pomahame">Zjistit víc</a>
</div>"##
    )
}

pub fn fallback_text() -> &'static str {
    "Zahajte krátkou diagnostiku (30 min), vyberte 1 pilotní téma a nastavte zpětnou vazbu."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_uri_component_matches_browser() {
        assert_eq!(encode_uri_component("Firemní kultura"), "Firemn%C3%AD%20kultura");
        assert_eq!(encode_uri_component("a&b=c/d"), "a%26b%3Dc%2Fd");
        assert_eq!(encode_uri_component("it's (ok)!*~._-"), "it's%20(ok)!*~._-");
    }

    #[test]
    fn test_fallback_html_encodes_area_in_subject() {
        let html = fallback_html(Some("Plán & kapacity"));
        assert!(html.contains("<h4>Doporučení</h4>"));
        assert!(html.contains(
            "mailto:info@outofthebox.cz?subject=Konzultace%20–%20Pl%C3%A1n%20%26%20kapacity"
        ));
    }

    #[test]
    fn test_fallback_html_defaults_area() {
        assert!(fallback_html(None).contains("subject=Konzultace%20–%20Diagnostika"));
        assert_eq!(fallback_html(Some("")), fallback_html(None));
    }

    #[test]
    fn test_fallbacks_are_deterministic() {
        assert_eq!(fallback_html(Some("HR")), fallback_html(Some("HR")));
        assert!(!fallback_text().is_empty());
    }
}
