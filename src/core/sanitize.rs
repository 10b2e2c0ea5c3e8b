//! Minimal filter for model-generated HTML.
//!
//! Removes script elements, inline event-handler attributes and `javascript:`
//! schemes. Everything else passes through untouched; this is not an HTML
//! parser and does not check tag nesting.

use regex::Regex;
use std::sync::LazyLock;

static SCRIPT_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b.*?>.*?</script\s*>").expect("valid regex"));

// 沒有成對的 <script ...> 或 </script>
static SCRIPT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?script\b[^>]*>?").expect("valid regex"));

// 瀏覽器也接受 `/` 當屬性分隔字元，例如 <svg/onload=...>
static EVENT_HANDLER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)[\s/]+on[a-z0-9_]+\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#).expect("valid regex")
});

static JAVASCRIPT_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript\s*:").expect("valid regex"));

pub fn sanitize_html(input: &str) -> String {
    let mut current = strip_once(input);
    // 刪掉一段後，前後文字可能拼成新的 javascript: 或 <script>，重複到不再變動
    loop {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_once(input: &str) -> String {
    let without_scripts = SCRIPT_ELEMENT.replace_all(input, "");
    let without_tags = SCRIPT_TAG.replace_all(&without_scripts, "");
    let without_handlers = EVENT_HANDLER.replace_all(&without_tags, "");
    JAVASCRIPT_SCHEME
        .replace_all(&without_handlers, "")
        .into_owned()
}
