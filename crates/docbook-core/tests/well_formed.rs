use docbook_core::{
    CompileOptions, ContentPiece, Division, DivisionType, RenderOptions, Title, compile_lines,
    render_chapter,
};

const CASES: usize = 300;
const MAX_LINES: usize = 40;
const MAX_DEPTH: usize = 4;

const LINES: &[&str] = &[
    "# 毛诗正义",
    "## 国风|周南",
    "### 国风|邶风|二子乘舟",
    "#### 序",
    "[author] 西汉,毛亨,传",
    "[date] 唐",
    "[category] 经,诗",
    "[source] https://example.org/maoshi",
    "[description] 十三经注疏本",
    "!!! 毛亨,传",
    "!!! 笺",
    "!!! a,b,c",
    "    !!! 陆德明,音义",
    "        !!! 孔颖达,疏",
    "::: 兴也。",
    "    ::: ○为，于伪反。",
    "        ::: 正义曰",
    "            ::: 过深",
    "二子乘舟，汎汎其景。",
    "愿言思子，中心养养。",
    "---",
    "***",
    "// 校记",
    "",
];

#[test]
fn compiled_markup_is_balanced() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = Lcg::new(0x5eed_d0c0_b00c_2024);
    for case in 0..CASES {
        let count = rng.gen_range(0, MAX_LINES + 1);
        let lines: Vec<&str> = (0..count)
            .map(|_| LINES[rng.gen_range(0, LINES.len())])
            .collect();
        let result = compile_lines(lines.iter().copied(), &CompileOptions::default());
        if let Err(message) = check_balanced(&result.html) {
            return Err(format!(
                "unbalanced output for case {}: {}\nLines:\n{}\nHTML:\n{}",
                case,
                message,
                lines.join("\n"),
                result.html
            )
            .into());
        }
    }
    Ok(())
}

#[test]
fn rendered_tree_is_balanced() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = Lcg::new(0x0dd_ba11_cafe_f00d);
    for case in 0..CASES {
        let mut chapter = Division::new("c", DivisionType::Chapter);
        chapter.title = Some(Title::new("二子乘舟"));
        let count = rng.gen_range(0, 6);
        chapter.divisions = (0..count)
            .map(|_| random_piece(&mut rng, 0).into())
            .collect();
        let html = render_chapter(&chapter, &RenderOptions::default());
        if let Err(message) = check_balanced(&html) {
            return Err(format!("unbalanced tree output for case {}: {}\n{}", case, message, html).into());
        }
    }
    Ok(())
}

fn random_piece(rng: &mut Lcg, depth: usize) -> ContentPiece {
    const TEXTS: &[&str] = &["", "甲", "二子乘舟", "关关雎鸠\n在河之洲"];
    const KINDS: &[DivisionType] = &[
        DivisionType::Section,
        DivisionType::Paragraph,
        DivisionType::Annotation,
    ];
    let kind = KINDS[rng.gen_range(0, KINDS.len())];
    let content = TEXTS[rng.gen_range(0, TEXTS.len())];
    let mut piece = ContentPiece::new(kind, content);
    if kind == DivisionType::Annotation {
        piece.annotator = Some(["毛亨", "郑玄", ""][rng.gen_range(0, 3)].to_string());
        piece.authorship = Some(["传", "笺"][rng.gen_range(0, 2)].to_string());
    }
    piece.position = match rng.gen_range(0, 3) {
        0 => None,
        _ => Some(rng.gen_range(0, 6)),
    };
    if depth < MAX_DEPTH {
        let count = rng.gen_range(0, 4);
        piece.content_pieces = (0..count).map(|_| random_piece(rng, depth + 1)).collect();
    }
    piece
}

fn check_balanced(html: &str) -> Result<(), String> {
    let xml = format!("<root>{}</root>", html.replace("&nbsp;", "&#160;"));
    roxmltree::Document::parse(&xml)
        .map(|_| ())
        .map_err(|err| err.to_string())
}

struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state
    }

    fn gen_range(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }
        let span = max - min;
        let value = (self.next() >> 1) as usize;
        min + (value % span)
    }
}
