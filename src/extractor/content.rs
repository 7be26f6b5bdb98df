//! Best content node selection.
//!
//! Paragraph-like nodes are scored by stopword count and their scores flow
//! to the parent (in full) and grandparent (half). Scores are kept in a
//! `gravityscore` attribute so later stages (post cleanup, formatting) can
//! read them off the cloned top node.

use dom_query::{Document, Selection};

use crate::dom;
use crate::link_density;
use crate::stopwords::StopWords;

/// Attribute carrying a node's accumulated score.
pub const SCORE_ATTR: &str = "gravityscore";

const CANDIDATE_SELECTOR: &str = "p, pre, td";

/// Minimum stopwords for a candidate to count at all.
const MIN_CANDIDATE_STOPWORDS: usize = 2;

/// A preceding paragraph needs more stopwords than this to boost its sibling.
const MIN_BOOST_STOPWORDS: usize = 5;
const MAX_BOOST_STEPS: usize = 3;

/// Share of the top score a non-paragraph child needs to survive post cleanup.
const CHILD_SCORE_RATIO: f64 = 0.08;

/// Parsed `gravityscore` of the first node, `0.0` when absent.
#[must_use]
pub fn score_of(sel: &Selection) -> f64 {
    dom::get_attribute(sel, SCORE_ATTR)
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(0.0)
}

fn add_score(sel: &Selection, delta: f64) {
    let score = score_of(sel) + delta;
    sel.set_attr(SCORE_ATTR, &score.to_string());
}

/// A paragraph counts as connected when one of the few paragraphs before it
/// carries real prose. Lone captions under images do not.
fn is_boostable(node: &Selection, stopwords: &StopWords) -> bool {
    let Some(first) = node.nodes().first() else {
        return false;
    };

    let mut steps = 0;
    let mut sibling = first.prev_sibling();
    while let Some(current) = sibling {
        sibling = current.prev_sibling();
        if !current.is_element() {
            continue;
        }
        let el = Selection::from(current);
        if dom::tag_name(&el).as_deref() != Some("p") {
            continue;
        }
        if steps >= MAX_BOOST_STEPS {
            return false;
        }
        if stopwords.count(&dom::text_content(&el)) > MIN_BOOST_STOPWORDS {
            return true;
        }
        steps += 1;
    }
    false
}

/// Record a node the first time it receives a score.
fn track<'a>(scored: &mut Vec<Selection<'a>>, sel: &Selection<'a>) {
    if sel.has_attr(SCORE_ATTR) {
        return;
    }
    if let Some(node) = sel.nodes().first() {
        scored.push(Selection::from(*node));
    }
}

/// Pick the node most likely to hold the article body.
///
/// Scoring runs on a private copy of `doc`; the winner is returned as an
/// independent document (see [`dom::top_element`]). `None` when no candidate
/// paragraph qualifies.
#[must_use]
pub fn best_node(doc: &Document, stopwords: &StopWords) -> Option<Document> {
    let work = dom::clone_document(doc);
    work.select(&format!("[{SCORE_ATTR}]")).remove_attr(SCORE_ATTR);

    let mut with_text: Vec<(Selection, usize)> = Vec::new();
    for node in work.select(CANDIDATE_SELECTOR).nodes() {
        let sel = Selection::from(*node);
        let stop_count = stopwords.count(&dom::text_content(&sel));
        if stop_count > MIN_CANDIDATE_STOPWORDS && !link_density::is_high_link_density(&sel) {
            with_text.push((sel, stop_count));
        }
    }

    let count = with_text.len();
    if count == 0 {
        return None;
    }

    // the trailing quarter of a long page is usually comments or related links
    let bottom_negative = count as f64 * 0.25;
    let mut starting_boost = 1.0_f64;
    let mut scored: Vec<Selection> = Vec::new();

    for (i, (node, stop_count)) in with_text.iter().enumerate() {
        let mut boost = 0.0;
        if is_boostable(node, stopwords) {
            boost = 50.0 / starting_boost;
            starting_boost += 1.0;
        }
        if count > 15 {
            let remaining = (count - i) as f64;
            if remaining <= bottom_negative {
                let booster = bottom_negative - remaining;
                boost = -booster.powi(2);
                if boost.abs() > 40.0 {
                    boost = 5.0;
                }
            }
        }

        let upscore = *stop_count as f64 + boost;

        let parent = node.parent();
        if parent.is_empty() {
            continue;
        }
        track(&mut scored, &parent);
        add_score(&parent, upscore);

        let grandparent = parent.parent();
        if !grandparent.is_empty() {
            track(&mut scored, &grandparent);
            add_score(&grandparent, upscore / 2.0);
        }
    }

    let mut top: Option<(&Selection, f64)> = None;
    for candidate in &scored {
        let score = score_of(candidate);
        if top.is_none_or(|(_, best)| score > best) {
            top = Some((candidate, score));
        }
    }

    let (winner, score) = top?;
    tracing::debug!(
        tag = %dom::tag_name(winner).unwrap_or_default(),
        score,
        candidates = count,
        "selected best node"
    );
    Some(dom::clone_element(winner))
}

/// Remove boilerplate children from a chosen top node.
///
/// Non-paragraph children go when they are link-heavy, tables without
/// paragraphs, or score below a fraction of the top node.
#[must_use]
pub fn post_cleanup(top_node: &Document) -> Document {
    let cleaned = dom::clone_document(top_node);
    let top = dom::top_element(&cleaned);
    let threshold = score_of(&top) * CHILD_SCORE_RATIO;

    let children = top.children().nodes().to_vec();
    for node in children {
        let child = Selection::from(node);
        let tag = dom::tag_name(&child).unwrap_or_default();
        if tag == "p" {
            continue;
        }

        let table_without_text = tag == "table" && child.select("p").is_empty();
        if link_density::is_high_link_density(&child) || table_without_text || score_of(&child) < threshold {
            child.remove();
        }
    }

    cleaned
}
