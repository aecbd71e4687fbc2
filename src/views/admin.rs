use std::fmt::Write;

use super::{escape_html, page};

/// Options offered by the form. The server accepts any category text.
pub const CATEGORIES: [&str; 4] = ["Manual", "Procedure", "Form", "Record"];

const SUBMIT_FEEDBACK: &str = "document.getElementById('upload-form').addEventListener('submit', function () {
  var button = this.querySelector('button[type=submit]');
  button.disabled = true;
  document.getElementById('status').textContent = 'Uploading\u{2026}';
});";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Success,
    Failure,
}

impl UploadStatus {
    pub fn message(self) -> &'static str {
        match self {
            UploadStatus::Success => "Upload successful!",
            UploadStatus::Failure => "Upload failed.",
        }
    }
}

/// Text values echoed back into the form after a failed submission.
#[derive(Debug, Clone, Default)]
pub struct FormValues {
    pub title: String,
    pub description: String,
    pub category: String,
}

pub fn render_upload_form(site_title: &str, values: &FormValues, status: Option<UploadStatus>) -> String {
    let mut options = String::new();
    for category in CATEGORIES {
        let selected = if values.category == category { " selected" } else { "" };
        let _ = write!(options, "<option value=\"{category}\"{selected}>{category}</option>");
    }

    let body = format!(
        "<div class=\"card\">\n<h1>Admin Upload</h1>\n\
         <p><a href=\"/\">&larr; {site}</a></p>\n\
         <form id=\"upload-form\" method=\"post\" action=\"/admin\" enctype=\"multipart/form-data\">\n\
         <label for=\"title\">Title</label>\
         <input id=\"title\" name=\"title\" required value=\"{title}\">\n\
         <label for=\"description\">Description</label>\
         <textarea id=\"description\" name=\"description\">{description}</textarea>\n\
         <label for=\"category\">Category</label>\
         <select id=\"category\" name=\"category\">{options}</select>\n\
         <label for=\"file\">File</label>\
         <input id=\"file\" type=\"file\" name=\"file\" required>\n\
         <button type=\"submit\">Upload Document</button>\n\
         </form>\n<p id=\"status\" class=\"status\">{status}</p>\n</div>",
        site = escape_html(site_title),
        title = escape_html(&values.title),
        description = escape_html(&values.description),
        status = status.map(UploadStatus::message).unwrap_or_default(),
    );

    page(&format!("Admin Upload - {site_title}"), &body, SUBMIT_FEEDBACK)
}
