// Inline HTML rendering. Deliberately template-engine-free: the pages are
// small and the data is already shaped by the core crate.
use bizscout_core::{BusinessDetail, BusinessSummary, SearchQuery, SortBy};
use bizscout_store::Bookmark;

/// Escape text before it lands in markup. Applies to everything we
/// interpolate - API data included, since we don't control it.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{} - BizScout</title></head>\n<body><h1><a href=\"/\">BizScout</a></h1><nav><a href=\"/bookmarks\">Bookmarks</a></nav>\n{}\n</body></html>",
        escape(title),
        body
    )
}

fn search_form(query: Option<&SearchQuery>) -> String {
    let (term, location, sort) = match query {
        Some(q) => (q.term.as_str(), q.location.as_str(), q.sort),
        None => ("", "", SortBy::default()),
    };

    let selected = |s: SortBy| if s == sort { " selected" } else { "" };

    format!(
        "<form method=\"get\" action=\"/\">\
         <input name=\"term\" placeholder=\"coffee, pizza...\" value=\"{}\">\
         <input name=\"location\" placeholder=\"Des Moines, IA\" value=\"{}\">\
         <select name=\"sort\">\
         <option value=\"rating\"{}>Top rated</option>\
         <option value=\"reviews\"{}>Most reviewed</option>\
         </select>\
         <button type=\"submit\">Search</button></form>",
        escape(term),
        escape(location),
        selected(SortBy::Rating),
        selected(SortBy::Reviews),
    )
}

fn bookmark_button(summary: &BusinessSummary) -> String {
    let label = if summary.is_bookmarked {
        "Remove bookmark"
    } else {
        "Bookmark"
    };
    format!(
        "<form method=\"post\" action=\"/bookmark\">\
         <input type=\"hidden\" name=\"business_id\" value=\"{}\">\
         <input type=\"hidden\" name=\"name\" value=\"{}\">\
         <input type=\"hidden\" name=\"location\" value=\"{}\">\
         <input type=\"hidden\" name=\"rating\" value=\"{}\">\
         <input type=\"hidden\" name=\"review_count\" value=\"{}\">\
         <button type=\"submit\">{}</button></form>",
        escape(&summary.business.id),
        escape(&summary.business.name),
        escape(&summary.business.location),
        summary.business.rating,
        summary.business.review_count,
        label,
    )
}

fn result_row(summary: &BusinessSummary) -> String {
    let b = &summary.business;
    let deals = if b.deals.is_empty() {
        String::new()
    } else {
        format!(
            "<p class=\"deals\">Deals: {}</p>",
            b.deals
                .iter()
                .map(|d| escape(d))
                .collect::<Vec<_>>()
                .join(", ")
        )
    };

    format!(
        "<li><a href=\"/business/{}\">{}</a> ({}) - {} \
         <span>{:.1} stars, {} reviews</span>{}{}</li>",
        escape(&b.id),
        escape(&b.name),
        escape(&b.category),
        escape(&b.location),
        summary.combined_rating,
        summary.total_review_count(),
        deals,
        bookmark_button(summary),
    )
}

/// Home page: search form, and results if a search ran
pub fn search_page(
    query: Option<&SearchQuery>,
    results: Option<&[BusinessSummary]>,
    lookup_failed: bool,
) -> String {
    let mut body = search_form(query);

    if lookup_failed {
        body.push_str("<p class=\"error\">No results - the business lookup is unavailable. Try again.</p>");
    } else if let Some(rows) = results {
        if rows.is_empty() {
            body.push_str("<p>No businesses matched your search.</p>");
        } else {
            body.push_str("<ol>");
            for row in rows {
                body.push_str(&result_row(row));
            }
            body.push_str("</ol>");
        }
    }

    page("Search", &body)
}

fn review_form(business_id: &str) -> String {
    format!(
        "<form method=\"post\" action=\"/review\">\
         <input type=\"hidden\" name=\"business_id\" value=\"{}\">\
         <label>Rating <input name=\"rating\" type=\"number\" min=\"1\" max=\"5\" value=\"5\"></label>\
         <label>Comment <textarea name=\"comment\"></textarea></label>\
         <button type=\"submit\">Add review</button></form>",
        escape(business_id),
    )
}

/// Detail page: external record merged with local reviews and bookmark state
pub fn detail_page(detail: &BusinessDetail) -> String {
    let b = &detail.business;
    let mut body = format!(
        "<h2>{}</h2><p>{} - {}</p><p>{:.1} stars combined, {} reviews total</p>",
        escape(&b.name),
        escape(&b.category),
        escape(&b.location),
        detail.combined_rating,
        detail.total_reviews,
    );

    if detail.is_bookmarked {
        body.push_str("<p>Bookmarked</p>");
    }

    if !b.deals.is_empty() {
        body.push_str("<h3>Deals</h3><ul>");
        for deal in &b.deals {
            body.push_str(&format!("<li>{}</li>", escape(deal)));
        }
        body.push_str("</ul>");
    }

    body.push_str("<h3>Your reviews</h3>");
    if detail.reviews.is_empty() {
        body.push_str("<p>No local reviews yet.</p>");
    } else {
        body.push_str("<ul>");
        for review in &detail.reviews {
            body.push_str(&format!(
                "<li>{} stars - {} <em>({})</em></li>",
                review.rating,
                escape(&review.comment),
                escape(&review.created_at),
            ));
        }
        body.push_str("</ul>");
    }

    body.push_str(&review_form(&b.id));

    page(&b.name, &body)
}

/// Saved bookmarks, most recent first
pub fn bookmarks_page(bookmarks: &[Bookmark]) -> String {
    let mut body = String::new();
    if bookmarks.is_empty() {
        body.push_str("<p>No bookmarks yet. Go search for something.</p>");
    } else {
        body.push_str("<ul>");
        for b in bookmarks {
            body.push_str(&format!(
                "<li><a href=\"/business/{}\">{}</a> - {} ({:.1} stars, {} reviews)</li>",
                escape(&b.business_id),
                escape(&b.name),
                escape(&b.location),
                b.rating,
                b.review_count,
            ));
        }
        body.push_str("</ul>");
    }
    page("Bookmarks", &body)
}

pub fn validation_page(message: &str) -> String {
    page(
        "Invalid input",
        &format!("<p class=\"error\">{}</p><p><a href=\"javascript:history.back()\">Go back</a></p>", escape(message)),
    )
}

pub fn not_found_page(id: &str) -> String {
    page(
        "Not found",
        &format!("<p>No business with id {}.</p>", escape(id)),
    )
}

pub fn lookup_failed_page() -> String {
    page(
        "Unavailable",
        "<p>The business lookup is unavailable right now. Try again.</p>",
    )
}

pub fn failure_page() -> String {
    page("Error", "<p>Something went wrong on our side.</p>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizscout_core::Business;

    fn summary(name: &str, rating: f64) -> BusinessSummary {
        BusinessSummary {
            business: Business {
                id: "biz-1".into(),
                name: name.into(),
                category: "Coffee & Tea".into(),
                location: "Waukee, IA".into(),
                rating,
                review_count: 10,
                deals: vec![],
            },
            is_bookmarked: false,
            local_review_count: 0,
            combined_rating: rating,
        }
    }

    #[test]
    fn test_escape_covers_markup_characters() {
        assert_eq!(
            escape("<script>alert(\"x&y\")</script>"),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_result_rows_keep_given_order() {
        let rows = vec![summary("North Grounds", 4.8), summary("Mediocre Joe", 4.5)];
        let html = search_page(None, Some(&rows), false);

        let first = html.find("North Grounds").unwrap();
        let second = html.find("Mediocre Joe").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_lookup_failure_renders_try_again() {
        let html = search_page(None, None, true);
        assert!(html.contains("Try again"));
        assert!(!html.contains("<ol>"));
    }

    #[test]
    fn test_untrusted_business_name_is_escaped() {
        let rows = vec![summary("<img src=x>", 4.0)];
        let html = search_page(None, Some(&rows), false);
        assert!(!html.contains("<img src=x>"));
        assert!(html.contains("&lt;img src=x&gt;"));
    }
}
