//! Markup snippets shared by the line compiler and the tree renderer.

use crate::model::{Author, Title};

pub(crate) const SEPARATOR: &str = "<span class='separator'>·</span>";
pub(crate) const IDEOGRAPHIC_INDENT: &str = "&#x3000;&#x3000;";
pub(crate) const SOURCE_LABEL: &str = "[来源]";
const DEFAULT_AUTHOR_TYPE: &str = "著";
const AUTHOR_JOINER: &str = "&nbsp;&nbsp;<span class=\"dot\">·</span>&nbsp;&nbsp;";

pub(crate) fn escape_attr(text: &str) -> String {
    let mut out = String::new();
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

pub(crate) fn data_id_attr(index: Option<usize>) -> String {
    index
        .map(|index| format!(" data-id=\"{}\"", index))
        .unwrap_or_default()
}

/// `前缀|书名|副标题` as written after a `#` mark.
pub(crate) fn header_content(content: &str) -> String {
    let parts: Vec<&str> = content.split('|').collect();
    match parts.as_slice() {
        [prefix, title] => format!("<span class='prefix'>{}</span>{}{}", prefix, SEPARATOR, title),
        [prefix, title, subtitle] => format!(
            "<span class='prefix'>{}</span>{}{}<span class='separator'>&nbsp;</span><span class='subtitle'>{}</span>",
            prefix, SEPARATOR, title, subtitle
        ),
        _ => content.to_string(),
    }
}

/// `朝代,官职,著作者,著作类型` and its shorter forms.
pub(crate) fn author_content(content: &str) -> String {
    let parts: Vec<&str> = content.split(',').collect();
    match parts.as_slice() {
        [name] => format!("<span class=\"name\">{}</span>", name),
        [name, kind] => format!(
            "<span class=\"name\">{}</span>&nbsp;<span class=\"type\">{}</span>",
            name, kind
        ),
        [dynasty, name, kind] => format!(
            "<span class=\"dynasty\">[{}]</span>&nbsp;<span class=\"name\">{}</span>&nbsp;<span class=\"type\">{}</span>",
            dynasty, name, kind
        ),
        [dynasty, position, name, kind] => format!(
            "<span class=\"dynasty\">[{}]</span>&nbsp;<span class=\"position\">{}</span>&nbsp;<span class=\"name\">{}</span>&nbsp;<span class=\"type\">{}</span>",
            dynasty, position, name, kind
        ),
        _ => content.to_string(),
    }
}

pub(crate) fn dynasty_content(dynasty: &str) -> String {
    format!("<span class='dynasty'>[{}]</span>", dynasty)
}

/// `主类,子类`.
pub(crate) fn category_content(content: &str) -> String {
    let parts: Vec<&str> = content.split(',').collect();
    match parts.as_slice() {
        [category] => format!("<span class='category'>{}</span>", category),
        [category, subcategory] => format!(
            "<span class='category'>{}</span>{}<span class='subcategory'>{}</span>",
            category, SEPARATOR, subcategory
        ),
        _ => content.to_string(),
    }
}

pub(crate) fn attributes_block(index: Option<usize>, content: &str) -> String {
    format!(
        "<p{} class=\"attributes\">{}</p>",
        data_id_attr(index),
        content
    )
}

pub(crate) fn source_link(index: Option<usize>, url: &str) -> String {
    format!(
        "<a{} href=\"{}\" class=\"attributes\">{}</a>",
        data_id_attr(index),
        escape_attr(url),
        SOURCE_LABEL
    )
}

/// Joins prefix, main text and subtitle. `main` may already carry spliced
/// annotations, so it is taken as rendered HTML rather than from `title`.
pub(crate) fn decorate_title(title: &Title, main: &str) -> String {
    if title.title.is_empty() {
        return String::new();
    }
    let mut items = Vec::with_capacity(3);
    if let Some(prefix) = title.prefix.as_deref().filter(|prefix| !prefix.is_empty()) {
        items.push(format!("<span class='prefix'>{}</span>", prefix));
    }
    items.push(main.to_string());
    if let Some(subtitle) = title
        .subtitle
        .as_deref()
        .filter(|subtitle| !subtitle.is_empty())
    {
        items.push(format!("<span class='subtitle'>{}</span>", subtitle));
    }
    items.join(SEPARATOR)
}

pub(crate) fn authors_line(authors: &[Author]) -> String {
    if authors.is_empty() {
        return String::new();
    }
    let items: Vec<String> = authors
        .iter()
        .map(|author| {
            let mut item = String::new();
            if let Some(dynasty) = author.dynasty.as_ref().filter(|d| !d.value.is_empty()) {
                item.push_str(&format!(
                    "<span class=\"dynasty\">[{}]</span>&nbsp;&nbsp;",
                    dynasty.value
                ));
            }
            let kind = if author.kind.is_empty() {
                DEFAULT_AUTHOR_TYPE
            } else {
                author.kind.as_str()
            };
            item.push_str(&format!(
                "<span class=\"name\">{}</span>&nbsp;<span class=\"type\">{}</span>",
                author.name, kind
            ));
            item
        })
        .collect();
    format!("<p class=\"authors\">{}</p>", items.join(AUTHOR_JOINER))
}

#[cfg(test)]
mod tests {
    use super::{author_content, category_content, header_content, source_link};

    #[test]
    fn header_splits_on_bar() {
        assert_eq!(header_content("毛诗正义"), "毛诗正义");
        assert_eq!(
            header_content("国风|邶风"),
            "<span class='prefix'>国风</span><span class='separator'>·</span>邶风"
        );
        assert!(header_content("a|b|c").ends_with("<span class='subtitle'>c</span>"));
        assert_eq!(header_content("a|b|c|d"), "a|b|c|d");
    }

    #[test]
    fn author_forms() {
        assert_eq!(author_content("司马迁"), "<span class=\"name\">司马迁</span>");
        assert_eq!(
            author_content("西汉,司马迁,撰"),
            "<span class=\"dynasty\">[西汉]</span>&nbsp;<span class=\"name\">司马迁</span>&nbsp;<span class=\"type\">撰</span>"
        );
        assert_eq!(author_content("a,b,c,d,e"), "a,b,c,d,e");
    }

    #[test]
    fn category_forms() {
        assert_eq!(
            category_content("史,二十四史"),
            "<span class='category'>史</span><span class='separator'>·</span><span class='subcategory'>二十四史</span>"
        );
    }

    #[test]
    fn source_url_is_attribute_escaped() {
        assert_eq!(
            source_link(Some(2), "https://x.org/a\"b"),
            "<a data-id=\"2\" href=\"https://x.org/a&quot;b\" class=\"attributes\">[来源]</a>"
        );
    }
}
