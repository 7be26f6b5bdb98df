//! Link Density Testing
//!
//! Checks whether a node is rich in links (probably navigation or a
//! related-stories block) rather than prose.

use dom_query::Selection;

use crate::dom;

/// Collect heuristics on link text.
///
/// Returns `(total_link_words, non_empty_links)`.
fn collect_link_info(links: &Selection) -> (usize, usize) {
    let mut link_words = 0;
    let mut non_empty_links = 0;

    for node in links.nodes() {
        let link = Selection::from(*node);
        let text = dom::text_content(&link);
        let words = text.split_whitespace().count();
        if words == 0 {
            continue;
        }
        link_words += words;
        non_empty_links += 1;
    }

    (link_words, non_empty_links)
}

/// Ratio of link words to all words, multiplied by the number of links.
///
/// Returns `0.0` for nodes without links or without text.
#[must_use]
pub fn link_density_score(element: &Selection) -> f64 {
    let links = element.select("a");
    if links.is_empty() {
        return 0.0;
    }

    let text = dom::text_content(element);
    let words = text.split_whitespace().count();
    if words == 0 {
        return 0.0;
    }

    let (link_words, n_links) = collect_link_info(&links);
    (link_words as f64 / words as f64) * n_links as f64
}

/// True if the element should be treated as boilerplate due to its links.
#[must_use]
pub fn is_high_link_density(element: &Selection) -> bool {
    link_density_score(element) >= 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_density_nav_menu() {
        let doc = dom::parse(
            r#"<div><a href="/a">Home</a> <a href="/b">World</a> <a href="/c">Sports</a></div>"#,
        );
        assert!(is_high_link_density(&doc.select("div")));
    }

    #[test]
    fn test_link_density_article_paragraph() {
        let doc = dom::parse(
            r#"<p>The committee met on Tuesday to discuss the budget and, according to
            <a href="/report">the report</a>, agreed on a new spending plan for next year.</p>"#,
        );
        assert!(!is_high_link_density(&doc.select("p")));
    }

    #[test]
    fn test_link_density_no_links() {
        let doc = dom::parse("<p>Plain paragraph without links.</p>");
        assert_eq!(link_density_score(&doc.select("p")), 0.0);
    }

    #[test]
    fn test_empty_links_are_ignored() {
        let doc = dom::parse(r#"<p>Some words here and more words there. <a href="/x"></a></p>"#);
        assert!(!is_high_link_density(&doc.select("p")));
    }
}
