//! HTML rendering helpers
//!
//! Views are built from plain strings: every helper here escapes the
//! user-provided text it receives, and [`page`] wraps a body in the
//! shared document shell.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Escape text for use in element content and quoted attributes
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Full HTML document around `body` (already rendered markup)
pub fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n</head>\n<body>\n\
         <header><nav><a href=\"/\">Início</a> | <a href=\"/auth/logout\">Sair</a></nav></header>\n\
         <main>\n<h1>{title}</h1>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape(title),
    )
}

/// 200 page
pub fn page(title: &str, body: &str) -> Response {
    Html(document(title, body)).into_response()
}

/// Page with an explicit status (form re-render after a validation failure)
pub fn page_with_status(status: StatusCode, title: &str, body: &str) -> Response {
    (status, Html(document(title, body))).into_response()
}

/// `<ul class="errors">` block; empty input renders nothing
pub fn error_list(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}</li>", escape(e)))
        .collect();
    format!("<ul class=\"errors\">{items}</ul>\n")
}

pub fn paragraph(text: &str) -> String {
    format!("<p>{}</p>\n", escape(text))
}

pub fn link(href: &str, label: &str) -> String {
    format!("<a href=\"{}\">{}</a>", escape(href), escape(label))
}

// ============================================================================
// Forms
// ============================================================================

/// `<form method="post">` around `fields`; multipart when uploading files
pub fn form(action: &str, multipart: bool, fields: &str, submit: &str) -> String {
    let enctype = if multipart {
        " enctype=\"multipart/form-data\""
    } else {
        ""
    };
    format!(
        "<form method=\"post\" action=\"{}\"{enctype}>\n{fields}<button type=\"submit\">{}</button>\n</form>\n",
        escape(action),
        escape(submit),
    )
}

/// Single-button POST form (delete, apply, select)
pub fn post_button(action: &str, hidden: &[(&str, &str)], label: &str) -> String {
    let fields: String = hidden.iter().map(|(n, v)| hidden_input(n, v)).collect();
    format!(
        "<form method=\"post\" action=\"{}\" class=\"inline\">{fields}<button type=\"submit\">{}</button></form>",
        escape(action),
        escape(label),
    )
}

pub fn hidden_input(name: &str, value: &str) -> String {
    format!(
        "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
        escape(name),
        escape(value)
    )
}

/// Labelled `<input>`; `kind` is the HTML input type
pub fn input(kind: &str, label: &str, name: &str, value: &str) -> String {
    format!(
        "<label>{} <input type=\"{}\" name=\"{}\" value=\"{}\"></label><br>\n",
        escape(label),
        escape(kind),
        escape(name),
        escape(value),
    )
}

pub fn text_input(label: &str, name: &str, value: &str) -> String {
    input("text", label, name, value)
}

/// Password fields never echo their value back
pub fn password_input(label: &str, name: &str) -> String {
    input("password", label, name, "")
}

pub fn file_input(label: &str, name: &str, accept: &str) -> String {
    format!(
        "<label>{} <input type=\"file\" name=\"{}\" accept=\"{}\"></label><br>\n",
        escape(label),
        escape(name),
        escape(accept),
    )
}

pub fn textarea(label: &str, name: &str, value: &str) -> String {
    format!(
        "<label>{}<br><textarea name=\"{}\" rows=\"5\" cols=\"60\">{}</textarea></label><br>\n",
        escape(label),
        escape(name),
        escape(value),
    )
}

/// `<select>` with a leading blank option; `options` are `(value, label)`
pub fn select(label: &str, name: &str, options: &[(&str, &str)], selected: &str) -> String {
    let mut opts = String::from("<option value=\"\">--</option>");
    for (value, text) in options {
        let mark = if *value == selected { " selected" } else { "" };
        opts.push_str(&format!(
            "<option value=\"{}\"{mark}>{}</option>",
            escape(value),
            escape(text)
        ));
    }
    format!(
        "<label>{} <select name=\"{}\">{opts}</select></label><br>\n",
        escape(label),
        escape(name),
    )
}

/// `<table>` with escaped headers; rows are pre-rendered cells
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let head: String = headers
        .iter()
        .map(|h| format!("<th>{}</th>", escape(h)))
        .collect();
    let body: String = rows
        .iter()
        .map(|cells| {
            let tds: String = cells.iter().map(|c| format!("<td>{c}</td>")).collect();
            format!("<tr>{tds}</tr>\n")
        })
        .collect();
    format!("<table>\n<thead><tr>{head}</tr></thead>\n<tbody>\n{body}</tbody>\n</table>\n")
}
