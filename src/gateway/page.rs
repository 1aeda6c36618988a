//! Server-rendered HTML form.

use crate::scoring::SimilarityScores;

/// Everything the form page shows.
#[derive(Debug, Default, Clone)]
pub struct PageModel {
    pub sentence: String,
    pub target_sentence: String,
    pub scores: Option<SimilarityScores>,
    pub error: Option<String>,
}

impl PageModel {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn scored(sentence: String, target_sentence: String, scores: SimilarityScores) -> Self {
        Self {
            sentence,
            target_sentence,
            scores: Some(scores),
            error: None,
        }
    }

    pub fn failed(sentence: String, target_sentence: String, error: String) -> Self {
        Self {
            sentence,
            target_sentence,
            scores: None,
            error: Some(error),
        }
    }
}

/// Escapes text for use in HTML element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_page(page: &PageModel) -> String {
    let output = match (&page.scores, &page.error) {
        (_, Some(error)) => format!(
            r#"<p class="error" role="alert">{}</p>"#,
            escape_html(error)
        ),
        (Some(scores), None) => format!(
            concat!(
                r#"<table class="scores">"#,
                r#"<tr><th>LaBSE</th><td id="labse">{:.4}</td></tr>"#,
                r#"<tr><th>PML</th><td id="pml">{:.4}</td></tr>"#,
                "</table>"
            ),
            scores.labse, scores.pml
        ),
        (None, None) => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="hi">
<head>
<meta charset="utf-8">
<title>Sentence similarity</title>
</head>
<body>
<h1>Sentence similarity</h1>
<form method="post" action="/">
<label for="sentence">Sentence</label>
<textarea id="sentence" name="sentence" rows="3" cols="60" required>{sentence}</textarea>
<label for="target_sentence">Target sentence</label>
<textarea id="target_sentence" name="target_sentence" rows="3" cols="60" required>{target}</textarea>
<button type="submit">Score</button>
</form>
<section id="output">{output}</section>
</body>
</html>
"#,
        sentence = escape_html(&page.sentence),
        target = escape_html(&page.target_sentence),
        output = output,
    )
}
