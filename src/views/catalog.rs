use std::fmt::Write;

use chrono::SecondsFormat;

use super::{escape_html, page};
use crate::db::models::document::Document;

const LOCALIZE_DATES: &str = "document.querySelectorAll('time[data-local-date]').forEach(function (t) {
  t.textContent = new Date(t.dateTime).toLocaleDateString();
});";

/// Public listing page: search box plus one entry per document.
pub fn render_listing(site_title: &str, query: Option<&str>, documents: &[Document]) -> String {
    let heading = escape_html(site_title);
    let mut body = String::new();

    let _ = write!(
        body,
        "<header><div class=\"bar\"><h1>{heading}</h1>\
         <a href=\"/admin\">Admin Upload</a></div></header>\n<main>\n\
         <form class=\"search\" method=\"get\" action=\"/\">\
         <input type=\"text\" name=\"q\" placeholder=\"Search documents...\" value=\"{}\">\
         <button type=\"submit\">Search</button></form>\n\
         <ul class=\"documents\">\n",
        escape_html(query.unwrap_or_default())
    );

    for doc in documents {
        render_entry(&mut body, doc);
    }

    if documents.is_empty() {
        body.push_str("<li class=\"empty\">No documents found.</li>\n");
    }

    body.push_str("</ul>\n</main>");

    page(site_title, &body, LOCALIZE_DATES)
}

fn render_entry(out: &mut String, doc: &Document) {
    let category = doc
        .category
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or("Uncategorized");

    let _ = write!(
        out,
        "<li><a href=\"{href}\" target=\"_blank\" rel=\"noopener noreferrer\">\
         <div class=\"row\"><span class=\"title\">{title}</span>\
         <span class=\"badge\">{category}</span></div>\
         <div class=\"row muted\"><span>{description}</span>\
         <span>{size} &middot; Uploaded on <time datetime=\"{datetime}\" data-local-date>{date}</time></span></div>\
         </a></li>\n",
        href = escape_html(&doc.file_url),
        title = escape_html(&doc.title),
        category = escape_html(category),
        description = escape_html(doc.description.as_deref().unwrap_or_default()),
        size = format_size(doc.size_bytes),
        datetime = doc.uploaded_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        date = doc.uploaded_at.format("%Y-%m-%d"),
    );
}

pub fn format_size(bytes: i64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn doc(title: &str, category: Option<&str>, description: Option<&str>) -> Document {
        Document {
            id: "id-1".to_string(),
            title: title.to_string(),
            description: description.map(str::to_string),
            file_url: "/uploads/1-2-sop.pdf".to_string(),
            file_name: "sop.pdf".to_string(),
            file_type: "application/pdf".to_string(),
            category: category.map(str::to_string),
            size_bytes: 2048,
            uploaded_at: Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(10), "10 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024 + 512 * 1024), "5.5 MB");
    }

    #[test]
    fn test_entry_links_to_file_in_new_tab() {
        let html = render_listing("Store", None, &[doc("Safety Manual", Some("Manual"), None)]);
        assert!(html.contains(
            "<a href=\"/uploads/1-2-sop.pdf\" target=\"_blank\" rel=\"noopener noreferrer\">"
        ));
        assert!(html.contains("Safety Manual"));
        assert!(html.contains("<span class=\"badge\">Manual</span>"));
        assert!(html.contains("datetime=\"2024-03-05T12:00:00Z\""));
        assert!(html.contains(">2024-03-05</time>"));
        assert!(html.contains("2.0 KB"));
        assert!(!html.contains("No documents found."));
    }

    #[test]
    fn test_missing_category_falls_back() {
        let html = render_listing("Store", None, &[doc("Untitled", None, Some("notes"))]);
        assert!(html.contains("<span class=\"badge\">Uncategorized</span>"));
        assert!(html.contains("<span>notes</span>"));
    }

    #[test]
    fn test_empty_state() {
        let html = render_listing("Store", Some("xyz"), &[]);
        assert!(html.contains("No documents found."));
        assert!(html.contains("value=\"xyz\""));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let html = render_listing(
            "Store",
            Some("\"><script>"),
            &[doc("<img src=x>", Some("<b>"), Some("a & b"))],
        );
        assert!(!html.contains("<img src=x>"));
        assert!(html.contains("&lt;img src=x&gt;"));
        assert!(html.contains("a &amp; b"));
        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;\""));
    }
}
