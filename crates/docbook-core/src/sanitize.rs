use ammonia::Builder;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// html5ever files `annotation` under MathML, and ammonia drops MathML
/// elements found directly in HTML content along with their text. The
/// element travels through the cleaner under a custom-element name instead.
const ANNOTATION_ALIAS: &str = "db-annotation";

static ANNOTATION_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(/?)annotation([\s/>])").expect("annotation pattern is valid"));
static ALIAS_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(/?)db-annotation([\s/>])").expect("alias pattern is valid"));

/// Cleans a produced fragment down to the markup the compiler and the tree
/// renderer emit. Anything else (scripts, event handlers, foreign tags)
/// is removed.
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&'static str> = [
        "a",
        ANNOTATION_ALIAS,
        "div",
        "h1",
        "h2",
        "h3",
        "h4",
        "h5",
        "h6",
        "hr",
        "p",
        "span",
    ]
    .into_iter()
    .collect();

    let mut generic_attributes: HashSet<&'static str> = HashSet::new();
    generic_attributes.insert("class");
    generic_attributes.insert("key");

    let mut tag_attributes = HashMap::new();
    tag_attributes.insert("a", ["href"].into_iter().collect::<HashSet<_>>());

    let mut generic_attribute_prefixes = HashSet::new();
    generic_attribute_prefixes.insert("data-");

    let aliased = ANNOTATION_TAG.replace_all(html, "<${1}db-annotation${2}");
    let cleaned = Builder::new()
        .tags(tags)
        .generic_attributes(generic_attributes)
        .tag_attributes(tag_attributes)
        .generic_attribute_prefixes(generic_attribute_prefixes)
        .link_rel(None)
        .clean(&aliased)
        .to_string();
    ALIAS_TAG.replace_all(&cleaned, "<${1}annotation${2}").into_owned()
}
