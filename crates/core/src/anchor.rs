//! Textual anchors used to locate insertion points.
//!
//! Each anchor is a standalone predicate over the file text. They only ever
//! report the *first* match; files with several candidates are patched at the
//! first one and nowhere else.

use std::{ops::Range, sync::LazyLock};

use regex::Regex;

/// `@theme { ... }`, optionally with modifiers such as `@theme inline { ... }`.
/// Non-greedy up to the first closing brace.
static THEME_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)@theme(?:\s+[A-Za-z][\w-]*)*\s*\{(.*?)\}").expect("valid regex")
});

static IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^import .*?;").expect("valid regex"));

static TOP_LEVEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:export const metadata|export default function)").expect("valid regex")
});

/// A body tag up to its `className=`. The value itself is scanned by hand so
/// that braces nested inside an expression stay balanced.
static BODY_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<body\b[^>]*?(?P<attr>className=)").expect("valid regex"));

static BODY_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<body\b(?P<attrs>[^>]*)>").expect("valid regex"));

/// A brace-delimited declaration block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMatch {
    /// The whole block, from the opening token through the closing brace.
    pub span: Range<usize>,
    /// The text between the braces.
    pub inner: Range<usize>,
}

/// Locate the first `@theme` block.
pub fn theme_block(text: &str) -> Option<BlockMatch> {
    let caps = THEME_BLOCK.captures(text)?;
    let whole = caps.get(0)?;
    let inner = caps.get(1)?;
    Some(BlockMatch { span: whole.range(), inner: inner.range() })
}

/// Span of the first statement starting a line with `import` and ending in `;`.
pub fn first_import(text: &str) -> Option<Range<usize>> {
    IMPORT.find(text).map(|m| m.range())
}

/// Offset of the first `export const metadata` or `export default function`,
/// including the whitespace run (blank lines too) that leads into it.
pub fn top_level(text: &str) -> Option<usize> {
    TOP_LEVEL.find(text).map(|m| m.start())
}

/// The value of a `className` attribute as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassValue<'a> {
    /// `"a b"` or `{"a b"}`.
    Double(&'a str),
    /// `'a b'` or `{'a b'}`.
    Single(&'a str),
    /// `` {`a ${b}`} ``.
    Template(&'a str),
    /// `{expr}`.
    Expression(&'a str),
}

impl ClassValue<'_> {
    /// Whether the value is plain text rather than an arbitrary expression.
    pub fn is_literal(&self) -> bool {
        !matches!(self, Self::Expression(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Double(s) | Self::Single(s) | Self::Template(s) | Self::Expression(s) => s,
        }
    }
}

/// A `className` attribute inside a body tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassAttr<'a> {
    /// From `className=` through the end of its value.
    pub span: Range<usize>,
    pub value: ClassValue<'a>,
}

/// An opening `<body>` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyTag<'a> {
    pub span: Range<usize>,
    /// Offset of the tag's closing `>`.
    pub close: usize,
    pub class: Option<ClassAttr<'a>>,
}

/// Locate the first body tag carrying a `className`, or failing that the first
/// body tag at all.
pub fn body_tag(text: &str) -> Option<BodyTag<'_>> {
    if let Some(tag) = body_with_class(text) {
        return Some(tag);
    }

    let caps = BODY_OPEN.captures(text)?;
    let whole = caps.get(0)?;
    Some(BodyTag { span: whole.range(), close: whole.end() - 1, class: None })
}

fn body_with_class(text: &str) -> Option<BodyTag<'_>> {
    let caps = BODY_CLASS.captures(text)?;
    let start = caps.get(0)?.start();
    let attr = caps.name("attr")?;

    let (value, end) = class_value(text, attr.end())?;
    let close = end + text[end..].find('>')?;

    Some(BodyTag {
        span: start..close + 1,
        close,
        class: Some(ClassAttr { span: attr.start()..end, value }),
    })
}

/// The attribute value starting at `start`, and the offset just past it.
fn class_value(text: &str, start: usize) -> Option<(ClassValue<'_>, usize)> {
    match *text.as_bytes().get(start)? {
        b'{' => {
            let end = closing_brace(text, start)?;
            Some((braced_value(text[start + 1..end].trim()), end + 1))
        }
        quote @ (b'"' | b'\'') => {
            let from = start + 1;
            let end = from + text[from..].find(char::from(quote))?;
            let value = &text[from..end];
            let value = if quote == b'"' {
                ClassValue::Double(value)
            } else {
                ClassValue::Single(value)
            };
            Some((value, end + 1))
        }
        _ => None,
    }
}

/// Offset of the `}` balancing the `{` at `open`. Quoted runs are skipped.
fn closing_brace(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote = None;
    for (i, b) in text.bytes().enumerate().skip(open) {
        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
            continue;
        }
        match b {
            b'"' | b'\'' | b'`' => quote = Some(b),
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// `{"a"}`, `{'a'}` and `` {`a`} `` unwrap to their text; anything else is an
/// expression.
fn braced_value(inner: &str) -> ClassValue<'_> {
    if let Some(s) = unquote(inner, '"') {
        ClassValue::Double(s)
    } else if let Some(s) = unquote(inner, '\'') {
        ClassValue::Single(s)
    } else if let Some(s) = unquote(inner, '`') {
        ClassValue::Template(s)
    } else {
        ClassValue::Expression(inner)
    }
}

fn unquote(text: &str, quote: char) -> Option<&str> {
    text.strip_prefix(quote)?.strip_suffix(quote).filter(|s| !s.contains(quote))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_block_spans() {
        let css = "a {}\n@theme {\n  --font-sans: x;\n}\nb {}";
        let block = theme_block(css).unwrap();
        assert_eq!(&css[block.span.clone()], "@theme {\n  --font-sans: x;\n}");
        assert_eq!(&css[block.inner], "\n  --font-sans: x;\n");
    }

    #[test]
    fn test_theme_block_with_modifier() {
        let css = "@theme inline {\n  --color: red;\n}\n";
        let block = theme_block(css).unwrap();
        assert_eq!(block.span.start, 0);
        assert_eq!(&css[block.inner], "\n  --color: red;\n");
    }

    #[test]
    fn test_theme_block_stops_at_first_brace() {
        let css = "@theme { --a: 1; }\n.x { color: red; }";
        let block = theme_block(css).unwrap();
        assert_eq!(&css[block.span], "@theme { --a: 1; }");
    }

    #[test]
    fn test_theme_block_absent() {
        assert!(theme_block("").is_none());
        assert!(theme_block(":root { --a: 1; }").is_none());
        assert!(theme_block("@themes { }").is_none());
    }

    #[test]
    fn test_first_import() {
        let src = "// header\nimport type { Metadata } from \"next\";\nimport \"./globals.css\";\n";
        let span = first_import(src).unwrap();
        assert_eq!(&src[span], "import type { Metadata } from \"next\";");
    }

    #[test]
    fn test_first_import_ignores_indented_and_unterminated() {
        assert!(first_import("  import x from 'y';").is_none());
        assert!(first_import("import x from 'y'\n").is_none());
    }

    #[test]
    fn test_first_import_is_single_line_and_terminated() {
        // Multi-line and semicolon-free imports are passed over on purpose;
        // the first single-line `import ...;` is the anchor.
        let src = "import {\n  a,\n} from 'a';\nimport b from 'b'\nimport c from 'c';\n";
        let span = first_import(src).unwrap();
        assert_eq!(&src[span], "import c from 'c';");
    }

    #[test]
    fn test_top_level_prefers_first_marker() {
        let src = "import a;\n\nexport const metadata = {};\n\nexport default function RootLayout() {}";
        let at = top_level(src).unwrap();
        assert_eq!(at, "import a;\n".len());
        assert!(src[at..].trim_start().starts_with("export const metadata"));

        let src = "import a;\nexport default function Layout() {}";
        assert_eq!(top_level(src), Some("import a;\n".len()));
    }

    #[test]
    fn test_top_level_absent() {
        assert!(top_level("export function Layout() {}").is_none());
    }

    #[test]
    fn test_body_tag_quoted_in_braces() {
        let src = r#"<body className={"dark"} id="x">"#;
        let tag = body_tag(src).unwrap();
        let class = tag.class.unwrap();
        assert_eq!(class.value, ClassValue::Double("dark"));
        assert_eq!(&src[class.span], r#"className={"dark"}"#);
        assert_eq!(tag.close, src.len() - 1);
    }

    #[test]
    fn test_body_tag_plain_string() {
        let src = "<body className='dark theme-x'>";
        let class = body_tag(src).unwrap().class.unwrap();
        assert_eq!(class.value, ClassValue::Single("dark theme-x"));
        assert_eq!(&src[class.span], "className='dark theme-x'");
    }

    #[test]
    fn test_body_tag_template_literal() {
        let src = "<body\n  className={`${inter.variable} antialiased`}\n>";
        let class = body_tag(src).unwrap().class.unwrap();
        assert_eq!(class.value, ClassValue::Template("${inter.variable} antialiased"));
    }

    #[test]
    fn test_body_tag_expression() {
        let src = r#"<body className={cn("min-h-screen", inter.className)}>"#;
        let class = body_tag(src).unwrap().class.unwrap();
        assert_eq!(class.value, ClassValue::Expression(r#"cn("min-h-screen", inter.className)"#));
        assert!(!class.value.is_literal());
    }

    #[test]
    fn test_body_tag_expression_with_nested_braces() {
        let src = r#"<body className={cn("base", { dark: isDark })} id="root">{children}"#;
        let tag = body_tag(src).unwrap();
        let class = tag.class.unwrap();
        assert_eq!(class.value, ClassValue::Expression(r#"cn("base", { dark: isDark })"#));
        assert_eq!(&src[class.span], r#"className={cn("base", { dark: isDark })}"#);
        assert_eq!(&src[tag.span], r#"<body className={cn("base", { dark: isDark })} id="root">"#);
    }

    #[test]
    fn test_body_tag_brace_inside_string() {
        let src = r#"<body className={cn("a}", x)}>"#;
        let class = body_tag(src).unwrap().class.unwrap();
        assert_eq!(class.value, ClassValue::Expression(r#"cn("a}", x)"#));
    }

    #[test]
    fn test_body_tag_unbalanced_falls_back_to_open_tag() {
        let src = "<body className={cn(\"a\">";
        let tag = body_tag(src).unwrap();
        assert!(tag.class.is_none());
        assert_eq!(tag.close, src.len() - 1);
    }

    #[test]
    fn test_body_tag_without_class() {
        let src = "<html><body data-x=\"1\">";
        let tag = body_tag(src).unwrap();
        assert!(tag.class.is_none());
        assert_eq!(&src[tag.span.clone()], "<body data-x=\"1\">");
        assert_eq!(tag.close, src.len() - 1);
    }

    #[test]
    fn test_body_tag_ignores_other_elements() {
        assert!(body_tag("<bodyguard className=\"x\">").is_none());
        assert!(body_tag("<div className=\"x\">").is_none());
    }
}
