/*!
 * Content extraction: turning an arbitrary page snapshot into a cleaned
 * article region.
 *
 * The extractor parses its own copy of the markup, strips noise elements,
 * selects the most likely article subtree via an ordered selector preference
 * list, and post-processes hyperlinks and empty elements. It never fails
 * outward: absence of content degrades to a minimal region that the caller
 * detects with a length check.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use markup5ever_rcdom::{Handle, RcDom};

use crate::dom::{
    detach_node, find_body, get_child_node_by_name, get_node_attr, get_node_name, html_to_dom,
    node_text, serialize_children, set_node_attr,
};

/// Minimum amount of text a candidate region must carry to be accepted.
/// Rejects near-empty false positives like a bare `<article>` shell.
pub const MIN_REGION_TEXT_LEN: usize = 140;

/// Tags that never carry article content
const NOISE_TAGS: &[&str] = &[
    "script", "style", "iframe", "form", "noscript", "link", "meta", "nav", "footer", "aside",
];

/// Class/id substrings that mark boilerplate
const NOISE_SUBSTRINGS: &[&str] = &[
    "advertisement",
    "social-share",
    "comment",
    "header-nav",
    "footer",
    "nav-bar",
    "menu-",
    "sidebar",
    "related",
    "newsletter",
    "popup",
    "modal",
    "cookie",
    "banner",
    "tracking",
    "analytics",
];

/// Query parameters deleted from hyperlinks (allow-list policy: everything
/// else in the query string survives)
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "ref",
    "source",
    "fbclid",
    "gclid",
];

static HIDDEN_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)display\s*:\s*none|visibility\s*:\s*hidden").unwrap()
});

/// Immutable-at-capture copy of a page's markup.
///
/// Extraction parses a fresh tree from this string on every run, so the
/// source of the snapshot is never touched while scanning.
#[derive(Debug, Clone)]
pub struct DocumentSnapshot {
    html: String,
}

impl DocumentSnapshot {
    /// Capture a snapshot from raw markup
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// The captured markup
    pub fn markup(&self) -> &str {
        &self.html
    }
}

/// The selected article subtree after noise removal.
///
/// Holds the parsed tree alive together with the chosen root. Invariant:
/// no element below `root` matches the noise-exclusion predicate.
pub struct ContentRegion {
    dom: RcDom,
    root: Handle,
}

impl ContentRegion {
    /// Root node of the selected subtree
    pub fn root(&self) -> &Handle {
        &self.root
    }

    /// Document title from the head, when the page carries one
    pub fn title(&self) -> Option<String> {
        let html = get_child_node_by_name(&self.dom.document, "html")?;
        let head = get_child_node_by_name(&html, "head")?;
        let title = get_child_node_by_name(&head, "title")?;
        let text = node_text(&title).trim().to_string();
        if text.is_empty() { None } else { Some(text) }
    }

    /// Concatenated text of the region
    pub fn text(&self) -> String {
        node_text(&self.root)
    }

    /// Serialized inner markup of the region
    pub fn inner_html(&self) -> String {
        serialize_children(&self.root)
    }

    /// Length of the region's trimmed text
    pub fn text_len(&self) -> usize {
        self.text().trim().chars().count()
    }
}

/// Ordered preference list entry for region selection
enum RegionSelector {
    /// Match by tag name
    Tag(&'static str),
    /// Match by ARIA role attribute
    Role(&'static str),
    /// Match by class or id containing the marker
    ClassOrId(&'static str),
}

/// Semantic containers first, ARIA roles second, common content class
/// names last. The first match with enough text wins.
const REGION_SELECTORS: &[RegionSelector] = &[
    RegionSelector::Tag("article"),
    RegionSelector::Role("main"),
    RegionSelector::Role("article"),
    RegionSelector::Tag("main"),
    RegionSelector::ClassOrId("article-body"),
    RegionSelector::ClassOrId("post-content"),
    RegionSelector::ClassOrId("entry-content"),
    RegionSelector::ClassOrId("article-content"),
    RegionSelector::ClassOrId("story-body"),
    RegionSelector::ClassOrId("main-content"),
    RegionSelector::ClassOrId("content"),
];

/// Extracts the readable article region from a document snapshot
pub struct ContentExtractor {
    min_region_text: usize,
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentExtractor {
    /// Create an extractor with the default region threshold
    pub fn new() -> Self {
        Self {
            min_region_text: MIN_REGION_TEXT_LEN,
        }
    }

    /// Override the minimum text length a candidate region must carry
    pub fn with_min_region_text(mut self, min_region_text: usize) -> Self {
        self.min_region_text = min_region_text;
        self
    }

    /// Extract the article region from a snapshot.
    ///
    /// Never raises: when no candidate qualifies the full cleaned body is
    /// the region, and an empty page yields an empty region detected by the
    /// caller through a length check.
    pub fn extract(&self, snapshot: &DocumentSnapshot) -> ContentRegion {
        let dom = html_to_dom(snapshot.markup());
        let body = find_body(&dom).unwrap_or_else(|| dom.document.clone());

        remove_noise(&body);

        let root = self.select_region(&body).unwrap_or_else(|| body.clone());

        clean_links(&root);
        prune_empty_children(&root);

        ContentRegion { dom, root }
    }

    /// Walk the preference list and return the first candidate whose text
    /// length clears the threshold
    fn select_region(&self, body: &Handle) -> Option<Handle> {
        for selector in REGION_SELECTORS {
            if let Some(candidate) = find_first(body, selector) {
                let text = node_text(&candidate);
                if text.trim().chars().count() >= self.min_region_text {
                    return Some(candidate);
                }
            }
        }
        None
    }
}

/// Noise-exclusion predicate (tag set, class/id markers, hidden state)
fn is_noise(node: &Handle) -> bool {
    let Some(name) = get_node_name(node) else {
        return false;
    };

    if NOISE_TAGS.contains(&name) {
        return true;
    }

    for attr in ["class", "id"] {
        if let Some(value) = get_node_attr(node, attr) {
            let value = value.to_lowercase();
            if NOISE_SUBSTRINGS.iter().any(|s| value.contains(s)) {
                return true;
            }
        }
    }

    if get_node_attr(node, "hidden").is_some() {
        return true;
    }

    if let Some(style) = get_node_attr(node, "style") {
        if HIDDEN_STYLE.is_match(&style) {
            return true;
        }
    }

    false
}

/// Detach every noise element below `node`. Children are snapshotted before
/// detaching so the walk never skips a sibling of a removed node.
fn remove_noise(node: &Handle) {
    let children: Vec<Handle> = node.children.borrow().iter().cloned().collect();
    for child in children {
        if is_noise(&child) {
            detach_node(&child);
        } else {
            remove_noise(&child);
        }
    }
}

/// Pre-order search for the first element matching the selector
fn find_first(node: &Handle, selector: &RegionSelector) -> Option<Handle> {
    if matches(node, selector) {
        return Some(node.clone());
    }
    let children: Vec<Handle> = node.children.borrow().iter().cloned().collect();
    for child in children {
        if let Some(found) = find_first(&child, selector) {
            return Some(found);
        }
    }
    None
}

fn matches(node: &Handle, selector: &RegionSelector) -> bool {
    let Some(name) = get_node_name(node) else {
        return false;
    };

    match selector {
        RegionSelector::Tag(tag) => name == *tag,
        RegionSelector::Role(role) => {
            get_node_attr(node, "role").is_some_and(|r| r.eq_ignore_ascii_case(role))
        }
        RegionSelector::ClassOrId(marker) => ["class", "id"].iter().any(|attr| {
            get_node_attr(node, attr).is_some_and(|v| v.to_lowercase().contains(marker))
        }),
    }
}

/// Strip tracking query parameters from every hyperlink in the region.
/// Relative URLs are left untouched: without a base they cannot be parsed,
/// and they carry no cross-site trackers worth scrubbing.
fn clean_links(node: &Handle) {
    if get_node_name(node) == Some("a") {
        if let Some(href) = get_node_attr(node, "href") {
            if let Some(cleaned) = strip_tracking_params(&href) {
                if cleaned != href {
                    set_node_attr(node, "href", Some(cleaned));
                }
            }
        }
    }

    let children: Vec<Handle> = node.children.borrow().iter().cloned().collect();
    for child in children {
        clean_links(&child);
    }
}

/// Rebuild a URL with its allow-listed tracking parameters deleted
pub fn strip_tracking_params(href: &str) -> Option<String> {
    let mut url = Url::parse(href).ok()?;

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| !TRACKING_PARAMS.contains(&k.as_ref()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }

    Some(url.to_string())
}

/// Recursively drop child elements that contribute nothing: no text, no
/// image, no link. The region root itself is never pruned.
fn prune_empty_children(node: &Handle) {
    let children: Vec<Handle> = node.children.borrow().iter().cloned().collect();
    for child in children {
        prune_empty_children(&child);
        if get_node_name(&child).is_some() && !has_substance(&child) {
            detach_node(&child);
        }
    }
}

fn has_substance(node: &Handle) -> bool {
    if matches!(get_node_name(node), Some("img") | Some("a")) {
        return true;
    }
    if !node_text(node).trim().is_empty() {
        return true;
    }
    let children = node.children.borrow();
    children.iter().any(has_substance)
}
