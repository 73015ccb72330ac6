use docbook_core::{
    CompileOptions, DiagnosticSeverity, E_ANNOTATION_ORPHAN, W_ANNOTATION_NESTING, compile,
    compile_lines, compile_with_options,
};

fn html_of(lines: &[&str]) -> String {
    compile_lines(lines.iter().copied(), &CompileOptions::default()).html
}

#[test]
fn header_author_and_paragraph() {
    let html = html_of(&["# 毛诗正义", "[author] 西汉,太史令,司马迁,撰", "二子乘舟，汎汎其景。"]);
    assert_eq!(
        html,
        "<h1 data-id=\"0\">毛诗正义</h1>\
         <p data-id=\"1\" class=\"attributes\"><span class=\"dynasty\">[西汉]</span>&nbsp;<span class=\"position\">太史令</span>&nbsp;<span class=\"name\">司马迁</span>&nbsp;<span class=\"type\">撰</span></p>\
         <div data-id=\"2\" class=\"paragraph-div\"><p><span class=\"id\">1</span></p><p class=\"paragraph\">&#x3000;&#x3000;二子乘舟，汎汎其景。</p></div>"
    );
}

#[test]
fn nested_annotation_header_and_content() {
    let html = html_of(&["!!! 毛亨,传", "    !!! 陆德明,音义", "    ::: 内容"]);
    assert_eq!(
        html,
        "<div data-id=\"0\" class=\"annotation style01\"><p><span class=\"annotator\">毛亨</span>&nbsp;<span class=\"type\">传</span></p>\
         <annotation data-id=\"1\" class=\"annotation inner style02\"><span class=\"annotator\">陆德明</span>&nbsp;<span class=\"type\">音义</span>\
         <span data-id=\"2\">内容</span></annotation></div>"
    );
}

#[test]
fn nested_header_on_empty_stack_is_reported_and_skipped() {
    let result = compile_lines(["    !!! 郑玄,笺"], &CompileOptions::default());
    assert_eq!(result.html, "");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, E_ANNOTATION_ORPHAN);
    assert_eq!(result.diagnostics[0].severity, DiagnosticSeverity::Error);
    assert_eq!(result.diagnostics[0].line, 0);
    assert!(result.has_errors());
}

#[test]
fn content_below_every_open_level_is_warned_and_skipped() {
    let result = compile_lines(
        ["经文", "        !!! 甲", "    !!! 乙", "::: 丙"],
        &CompileOptions::default(),
    );
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, W_ANNOTATION_NESTING);
    assert_eq!(result.diagnostics[0].severity, DiagnosticSeverity::Warning);
    assert_eq!(result.diagnostics[0].line, 3);
    assert!(!result.has_errors());
    assert!(!result.html.contains("丙"));
    assert!(!result.html.contains("data-id=\"3\""));
    assert!(result.html.ends_with("</annotation>"));
}

#[test]
fn blank_line_closes_open_paragraph() {
    let html = html_of(&["甲", "", "乙"]);
    assert_eq!(
        html,
        "<div data-id=\"0\" class=\"paragraph-div\"><p><span class=\"id\">1</span></p><p class=\"paragraph\">&#x3000;&#x3000;甲</p></div>\
         <div data-id=\"2\" class=\"paragraph-div\"><p><span class=\"id\">2</span></p><p class=\"paragraph\">&#x3000;&#x3000;乙</p></div>"
    );
}

#[test]
fn header_restarts_paragraph_numbering() {
    let html = html_of(&["甲", "乙", "## 卷二", "丙"]);
    assert!(html.contains("<span class=\"id\">2</span></p><p class=\"paragraph\">&#x3000;&#x3000;乙"));
    assert!(html.contains("<h2 data-id=\"2\">卷二</h2>"));
    assert!(html.ends_with(
        "<div data-id=\"3\" class=\"paragraph-div\"><p><span class=\"id\">1</span></p><p class=\"paragraph\">&#x3000;&#x3000;丙</p></div>"
    ));
}

#[test]
fn description_lines_share_one_container() {
    let html = html_of(&["[description] 第一行", "[description] 第二行", "---"]);
    assert_eq!(
        html,
        "<div data-id=\"0\" class=\"description-div\"><p class=\"description\">第一行</p>\
         <p data-id=\"1\" class=\"description\">第二行</p></div><hr data-id=\"2\" />"
    );
}

#[test]
fn date_category_and_source_lines() {
    let html = html_of(&["[date] 唐", "[category] 经,诗", "[source] https://example.org/a"]);
    assert_eq!(
        html,
        "<p data-id=\"0\" class=\"attributes\"><span class='dynasty'>[唐]</span></p>\
         <p data-id=\"1\" class=\"attributes\"><span class='category'>经</span><span class='separator'>·</span><span class='subcategory'>诗</span></p>\
         <a data-id=\"2\" href=\"https://example.org/a\" class=\"attributes\">[来源]</a>"
    );
}

#[test]
fn notes_produce_nothing_but_keep_line_numbers() {
    let html = html_of(&["// 校记", "# 序"]);
    assert_eq!(html, "<h1 data-id=\"1\">序</h1>");
}

#[test]
fn header_with_prefix_and_subtitle() {
    let html = html_of(&["### 国风|邶风|二子乘舟"]);
    assert_eq!(
        html,
        "<h3 data-id=\"0\"><span class='prefix'>国风</span><span class='separator'>·</span>邶风\
         <span class='separator'>&nbsp;</span><span class='subtitle'>二子乘舟</span></h3>"
    );
}

#[test]
fn annotation_kind_only_header() {
    let html = html_of(&["!!! 疏", "::: 正义曰"]);
    assert_eq!(
        html,
        "<div data-id=\"0\" class=\"annotation style01\"><p><span class=\"type\">疏</span></p>\
         <p data-id=\"1\">&#x3000;&#x3000;正义曰</p></div>"
    );
}

#[test]
fn block_annotation_closes_open_paragraph() {
    let html = html_of(&["经文", "!!! 毛亨,传", "::: 传文"]);
    assert_eq!(
        html,
        "<div data-id=\"0\" class=\"paragraph-div\"><p><span class=\"id\">1</span></p><p class=\"paragraph\">&#x3000;&#x3000;经文</p></div>\
         <div data-id=\"1\" class=\"annotation style01\"><p><span class=\"annotator\">毛亨</span>&nbsp;<span class=\"type\">传</span></p>\
         <p data-id=\"2\">&#x3000;&#x3000;传文</p></div>"
    );
}

#[test]
fn inline_content_without_header_inside_paragraph() {
    let html = html_of(&["经文", "    ::: 注"]);
    assert_eq!(
        html,
        "<div data-id=\"0\" class=\"paragraph-div\"><p><span class=\"id\">1</span></p><p class=\"paragraph\">&#x3000;&#x3000;经文\
         <annotation class=\"annotation inner style01\"><span data-id=\"1\">注</span></annotation></p></div>"
    );
}

#[test]
fn style_labels_repeat_for_the_same_pair() {
    let html = html_of(&["!!! 毛亨,传", "", "!!! 郑玄,笺", "", "!!! 毛亨,传"]);
    assert!(html.contains("<div data-id=\"0\" class=\"annotation style01\">"));
    assert!(html.contains("<div data-id=\"2\" class=\"annotation style02\">"));
    assert!(html.contains("<div data-id=\"4\" class=\"annotation style01\">"));
}

#[test]
fn empty_palette_leaves_bare_class() {
    let options = CompileOptions {
        palette: Vec::new(),
    };
    let result = compile_with_options("!!! 毛亨,传", &options);
    assert!(result.html.starts_with("<div data-id=\"0\" class=\"annotation\">"));
}

#[test]
fn crlf_line_endings() {
    let result = compile("# 序\r\n正文\r\n");
    assert_eq!(
        result.html,
        "<h1 data-id=\"0\">序</h1>\
         <div data-id=\"1\" class=\"paragraph-div\"><p><span class=\"id\">1</span></p><p class=\"paragraph\">&#x3000;&#x3000;正文</p></div>"
    );
    assert!(result.diagnostics.is_empty());
}

#[test]
fn sessions_do_not_share_styles() {
    let first = compile("!!! 郑玄,笺");
    let second = compile("!!! 毛亨,传");
    assert!(first.html.contains("style01"));
    assert!(second.html.contains("style01"));
}
