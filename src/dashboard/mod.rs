//! Dashboard module — the page that displays the view model
//!
//! A thin adapter: the page holds no formatting or validation logic.  It
//! applies every `VIEW_UPDATED` frame from `/ws/view` to the DOM and turns
//! clicks, Enter key presses and `online`/`offline` signals into POSTs
//! against the command endpoints.
//!
//! # Architecture
//! - `html.rs`: element skeleton (ids the script writes into)
//! - `js.rs`: socket handling, view application, command dispatch

use axum::response::Html;

mod html;
mod js;

/// Only the visibility rule the view model relies on; visual styling is not ours.
const STYLES: &str = ".hidden { display: none; }";

/// Generate the complete dashboard HTML page
pub fn dashboard_html() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>LazySignal</title>
    <style>{css}</style>
</head>
<body>
{html}
    <script>
{js}
    </script>
</body>
</html>"#,
        css = STYLES,
        html = html::TEMPLATE,
        js = js::SCRIPT
    )
}

/// GET /
pub async fn index() -> Html<String> {
    Html(dashboard_html())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_wires_every_command() {
        let page = dashboard_html();
        for needle in [
            "/ws/view",
            "/api/signal/load",
            "/api/subscribe",
            "/api/strategy/select",
            "/api/connectivity",
            "id=\"errorText\"",
            "id=\"maGrid\"",
        ] {
            assert!(page.contains(needle), "page is missing {needle}");
        }
    }

    #[test]
    fn test_custom_inputs_refilled_only_on_change() {
        let page = dashboard_html();
        assert!(page.contains("if (custom !== appliedCustom)"));
        assert!(!page.contains("toFixed(1)"));
    }
}
