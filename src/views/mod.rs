//! Server-rendered HTML for the public listing and the admin upload form.

pub mod admin;
pub mod catalog;

use std::fmt::Write;

const STYLE: &str = "
body { margin: 0; font-family: system-ui, sans-serif; background: #f9fafb; color: #111827; }
header { background: #fff; box-shadow: 0 1px 2px rgba(0,0,0,.08); }
header .bar { max-width: 72rem; margin: 0 auto; padding: 1.5rem 1rem; display: flex; justify-content: space-between; align-items: center; }
header h1 { margin: 0; font-size: 1.75rem; }
a { color: #4f46e5; text-decoration: none; }
main { max-width: 72rem; margin: 0 auto; padding: 1.5rem 1rem; }
form.search { display: flex; gap: .5rem; margin-bottom: 2rem; }
input, textarea, select { width: 100%; box-sizing: border-box; padding: .5rem; border: 1px solid #d1d5db; border-radius: .375rem; }
button { background: #4f46e5; color: #fff; border: 0; border-radius: .375rem; padding: .5rem 1rem; cursor: pointer; }
button:disabled { opacity: .6; cursor: wait; }
ul.documents { list-style: none; margin: 0; padding: 0; background: #fff; border-radius: .375rem; box-shadow: 0 1px 2px rgba(0,0,0,.08); }
ul.documents li + li { border-top: 1px solid #e5e7eb; }
ul.documents a { display: block; padding: 1rem 1.5rem; color: inherit; }
ul.documents a:hover { background: #f9fafb; }
.row { display: flex; justify-content: space-between; gap: 1rem; }
.title { color: #4f46e5; font-weight: 600; }
.badge { background: #d1fae5; color: #065f46; border-radius: 9999px; padding: 0 .5rem; font-size: .75rem; font-weight: 600; }
.muted { color: #6b7280; font-size: .875rem; margin-top: .5rem; }
.empty { padding: 2rem 1rem; text-align: center; color: #6b7280; }
.card { max-width: 28rem; margin: 2rem auto; background: #fff; padding: 1.5rem; border-radius: .5rem; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
.card label { display: block; font-size: .875rem; margin: 1rem 0 .25rem; }
.card button { width: 100%; margin-top: 1.5rem; }
.status { margin-top: 1rem; text-align: center; color: #4f46e5; font-weight: 500; }
";

/// Wraps `body` in the shared page shell. `title` is escaped here.
pub fn page(title: &str, body: &str, script: &str) -> String {
    let mut html = String::with_capacity(body.len() + STYLE.len() + 512);
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n",
        escape_html(title)
    );
    if !script.is_empty() {
        let _ = write!(html, "<script>{script}</script>\n");
    }
    html.push_str("</body>\n</html>\n");
    html
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
