//! Page rendering - root layout and home page
//!
//! The shell renders static markup only: a document layout carrying the
//! site metadata and the home page heading. No dynamic route data yet.

use axum::response::Html;

/// Document metadata exposed by the root layout
pub struct Metadata {
    pub title: &'static str,
    pub description: &'static str,
}

pub const METADATA: Metadata = Metadata {
    title: "Learning Trainer",
    description: "AI-powered learning agent system built on Axum and SQLite",
};

/// Wrap page markup in the root layout document
pub fn render_layout(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ja">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="{description}">
<link rel="stylesheet" href="/static/globals.css">
</head>
<body>{body}</body>
</html>
"#,
        title = METADATA.title,
        description = METADATA.description,
        body = body,
    )
}

/// Markup for the home page
pub fn home_markup() -> String {
    r#"<main class="home">
<div class="home-inner">
<h1>Learning Trainer</h1>
<p class="tagline">AI-powered learning agent system</p>
<div class="phase">
<p>Phase 1: Foundation</p>
<p class="stack">Rust &#8226; Axum &#8226; SQLite</p>
</div>
</div>
</main>"#
        .to_string()
}

/// GET / - the home page
pub async fn home() -> Html<String> {
    Html(render_layout(&home_markup()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_renders_main_heading() {
        let markup = home_markup();
        assert!(markup.contains("<h1>Learning Trainer</h1>"));
        assert!(markup.contains("AI-powered learning agent system"));
    }

    #[test]
    fn test_layout_metadata() {
        assert_eq!(METADATA.title, "Learning Trainer");
        assert!(METADATA.description.contains("AI-powered learning agent system"));
    }

    #[test]
    fn test_layout_document() {
        let document = render_layout(&home_markup());
        assert!(document.contains("<title>Learning Trainer</title>"));
        assert!(document.contains(r#"<html lang="ja">"#));
        assert!(document.contains(r#"name="description""#));
        assert!(document.contains("<h1>Learning Trainer</h1>"));
    }
}
