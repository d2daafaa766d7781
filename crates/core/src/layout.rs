//! Font loader wiring in the root layout.
//!
//! Three insertions are computed against the text as read and written back in
//! one go:
//!
//! 1. an `import { Font } from 'next/font/google';` after the first import,
//! 2. a `const font = Font({ ... });` declaration before the metadata export or
//!    the default layout function, whichever comes first,
//! 3. a `${font.variable}` reference merged into the body's `className`.
//!
//! An anchor that cannot be found drops its insertion; the others still apply.
//! The import and the class reference are each skipped when already present,
//! so a layout patched without its declaration does not pick them up twice.

use std::{ops::Range, path::Path};

use log::{debug, info, warn};

use crate::{
    anchor::{BodyTag, body_tag, first_import, top_level},
    config::{APP_DIR, BASELINE_CLASS, FONT_LOADER_MODULE, LAYOUT_PATH},
    error::{Error, PatchResult, PatchStatus},
    fs::{FileSystem, TextFile},
    naming::{IdentifierStyle, to_variable_identifier},
    request::FontRequest,
};

/// Identifiers generated for one font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontIdentifiers {
    /// The loader function imported from `next/font/google`.
    pub component: String,
    /// The constant holding the loader's result.
    pub variable: String,
}

impl FontIdentifiers {
    pub fn new(display_name: &str, style: IdentifierStyle) -> Self {
        Self {
            component: style.component_identifier(display_name),
            variable: to_variable_identifier(display_name),
        }
    }

    /// The text whose presence marks the layout as already patched.
    pub fn declaration_marker(&self) -> String {
        format!("const {} = {}", self.variable, self.component)
    }

    /// `import { Font } from 'next/font/google';`
    pub fn import_statement(&self) -> String {
        format!("import {{ {} }} from '{FONT_LOADER_MODULE}';", self.component)
    }

    /// `${font.variable}`, as merged into the body's class list.
    pub fn class_reference(&self) -> String {
        format!("${{{}.variable}}", self.variable)
    }
}

/// Wire `request` into `<root>/app/layout.tsx`.
pub fn patch_layout(
    fs: &impl FileSystem,
    root: &Path,
    request: &FontRequest,
    style: IdentifierStyle,
) -> PatchResult {
    let app_dir = root.join(APP_DIR);
    if !fs.is_dir(&app_dir) {
        return Err(Error::NotAHostProject(app_dir));
    }

    let file = TextFile::new(fs, root.join(LAYOUT_PATH));
    let source = file.read()?;
    let ids = FontIdentifiers::new(&request.display_name, style);

    if source.contains(&ids.declaration_marker()) {
        debug!("{} already declared in {}", ids.variable, file.path().display());
        return Ok(PatchStatus::SkippedAlreadyPresent);
    }

    let splices = plan(&source, request, &ids);
    if splices.is_empty() {
        debug!("nothing left to insert into {}", file.path().display());
        return Ok(PatchStatus::SkippedAlreadyPresent);
    }

    info!(
        "wiring {} into {} ({} insertions)",
        ids.component,
        file.path().display(),
        splices.len()
    );
    file.write(&apply(&source, splices))?;
    Ok(PatchStatus::Applied)
}

/// A replacement of `range` in the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Splice {
    range: Range<usize>,
    text: String,
}

impl Splice {
    fn insert(at: usize, text: String) -> Self {
        Self { range: at..at, text }
    }
}

fn plan(source: &str, request: &FontRequest, ids: &FontIdentifiers) -> Vec<Splice> {
    let mut splices = Vec::with_capacity(3);

    let import = ids.import_statement();
    if source.contains(&import) {
        debug!("{} already imported", ids.component);
    } else {
        match first_import(source) {
            Some(span) => splices.push(Splice::insert(span.end, format!("\n{import}"))),
            None => warn!("no import statement found; skipping import of {}", ids.component),
        }
    }

    match top_level(source) {
        Some(at) => splices.push(Splice::insert(
            at,
            format!(
                "\nconst {} = {}({});\n",
                ids.variable,
                ids.component,
                loader_options(request)
            ),
        )),
        None => warn!(
            "no metadata export or default layout function found; skipping declaration of {}",
            ids.variable
        ),
    }

    match body_tag(source) {
        Some(tag) => match class_splice(&tag, &ids.class_reference()) {
            Some(splice) => splices.push(splice),
            None => debug!("{} already referenced in className", ids.variable),
        },
        None => warn!("no <body> tag found; skipping className merge"),
    }

    splices
}

/// `{ weight: ['400'], subsets: ['latin'], variable: '--font-alias' }`
fn loader_options(request: &FontRequest) -> String {
    let quoted = |items: &[&str]| {
        items.iter().map(|s| format!("'{s}'")).collect::<Vec<_>>().join(", ")
    };

    let weights = request.loader_weights();
    let weight = if weights.is_empty() {
        String::new()
    } else {
        format!("weight: [{}], ", quoted(&weights[..]))
    };
    let subsets: Vec<&str> = request.subsets.iter().map(String::as_str).collect();

    format!(
        "{{ {weight}subsets: [{}], variable: '{}' }}",
        quoted(&subsets[..]),
        request.property_key()
    )
}

/// Merge `reference` into the tag's class list, or `None` if it is already there.
fn class_splice(tag: &BodyTag<'_>, reference: &str) -> Option<Splice> {
    let Some(class) = &tag.class else {
        return Some(Splice::insert(
            tag.close,
            format!(" className={{`{reference} {BASELINE_CLASS}`}}"),
        ));
    };

    let existing = class.value.as_str().trim();
    if existing.contains(reference) {
        return None;
    }
    let existing = if class.value.is_literal() || existing.is_empty() {
        existing.to_owned()
    } else {
        format!("${{{existing}}}")
    };
    let merged = if existing.is_empty() {
        reference.to_owned()
    } else {
        format!("{reference} {existing}")
    };

    Some(Splice { range: class.span.clone(), text: format!("className={{`{merged}`}}") })
}

/// Apply non-overlapping splices, back to front so earlier offsets stay valid.
fn apply(source: &str, mut splices: Vec<Splice>) -> String {
    splices.sort_by(|a, b| b.range.start.cmp(&a.range.start));
    let mut out = source.to_owned();
    for splice in splices {
        out.replace_range(splice.range, &splice.text);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFs;

    const LAYOUT: &str = r#"import type { Metadata } from "next";
import "./globals.css";

export const metadata: Metadata = {
  title: "App",
};

export default function RootLayout({
  children,
}: Readonly<{
  children: React.ReactNode;
}>) {
  return (
    <html lang="en">
      <body className="dark theme-x">{children}</body>
    </html>
  );
}
"#;

    fn project(layout: &str) -> MemoryFs {
        MemoryFs::new().with_file("proj/app/layout.tsx", layout)
    }

    fn run(fs: &MemoryFs, request: &FontRequest) -> PatchResult {
        patch_layout(fs, Path::new("proj"), request, IdentifierStyle::LoaderExport)
    }

    #[test]
    fn test_requires_app_dir() {
        let fs = MemoryFs::new().with_dir("proj");
        let err = run(&fs, &FontRequest::new("Roboto", "primary")).unwrap_err();
        assert!(matches!(err, Error::NotAHostProject(p) if p == Path::new("proj/app")));
    }

    #[test]
    fn test_requires_layout() {
        let fs = MemoryFs::new().with_dir("proj/app");
        let err = run(&fs, &FontRequest::new("Roboto", "primary")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound(p) if p == Path::new("proj/app/layout.tsx")));
    }

    #[test]
    fn test_full_patch() {
        let fs = project(LAYOUT);
        let request = FontRequest::new("Roboto", "primary").with_weights(["regular", "700"]);
        assert_eq!(run(&fs, &request).unwrap(), PatchStatus::Applied);

        let out = fs.contents("proj/app/layout.tsx").unwrap();
        assert!(out.starts_with(
            "import type { Metadata } from \"next\";\nimport { Roboto } from 'next/font/google';\nimport \"./globals.css\";\n"
        ));
        assert!(out.contains(
            "\nconst roboto = Roboto({ weight: ['400', '700'], subsets: ['latin'], variable: '--font-primary' });\n\nexport const metadata"
        ));
        assert!(out.contains("<body className={`${roboto.variable} dark theme-x`}>{children}</body>"));
        assert_eq!(out.matches("dark theme-x").count(), 1);
        assert_eq!(out.matches("${roboto.variable}").count(), 1);
    }

    #[test]
    fn test_second_run_is_skipped() {
        let fs = project(LAYOUT);
        let request = FontRequest::new("Cabin Sketch", "display");
        run(&fs, &request).unwrap();
        let once = fs.contents("proj/app/layout.tsx").unwrap();
        assert!(once.contains("const cabinsketch = Cabin_Sketch("));

        let again = FontRequest::new("Cabin Sketch", "other").with_weights(["900"]);
        assert_eq!(run(&fs, &again).unwrap(), PatchStatus::SkippedAlreadyPresent);
        assert_eq!(fs.contents("proj/app/layout.tsx").unwrap(), once);
    }

    #[test]
    fn test_pascal_case_style() {
        let fs = project(LAYOUT);
        let request = FontRequest::new("Roboto Mono", "code");
        patch_layout(&fs, Path::new("proj"), &request, IdentifierStyle::PascalCase).unwrap();
        let out = fs.contents("proj/app/layout.tsx").unwrap();
        assert!(out.contains("import { RobotoMono } from 'next/font/google';"));
        assert!(out.contains("const robotomono = RobotoMono({"));
    }

    #[test]
    fn test_body_without_class() {
        let layout = "import a from 'a';\nexport default function L() {\n  return <html><body>{c}</body></html>;\n}\n";
        let fs = project(layout);
        run(&fs, &FontRequest::new("Inter", "sans")).unwrap();
        let out = fs.contents("proj/app/layout.tsx").unwrap();
        assert!(out.contains("<body className={`${inter.variable} antialiased`}>{c}</body>"));
    }

    #[test]
    fn test_template_and_expression_classes() {
        let template = "import a from 'a';\nexport default function L() {\n  return <body className={`${geist.variable} antialiased`}>x</body>;\n}\n";
        let fs = project(template);
        run(&fs, &FontRequest::new("Lora", "serif")).unwrap();
        let out = fs.contents("proj/app/layout.tsx").unwrap();
        assert!(out.contains("<body className={`${lora.variable} ${geist.variable} antialiased`}>"));

        let expression = "import a from 'a';\nexport default function L() {\n  return <body className={cn(\"min-h-screen\", x)}>y</body>;\n}\n";
        let fs = project(expression);
        run(&fs, &FontRequest::new("Lora", "serif")).unwrap();
        let out = fs.contents("proj/app/layout.tsx").unwrap();
        assert!(out.contains("<body className={`${lora.variable} ${cn(\"min-h-screen\", x)}`}>"));
    }

    #[test]
    fn test_nested_brace_expression_class() {
        let layout = "import a from 'a';\nexport default function L() {\n  return <body className={cn(\"a\", { dark: x })}>y</body>;\n}\n";
        let fs = project(layout);
        run(&fs, &FontRequest::new("Inter", "sans")).unwrap();
        let out = fs.contents("proj/app/layout.tsx").unwrap();
        assert!(out.contains("<body className={`${inter.variable} ${cn(\"a\", { dark: x })}`}>y</body>"));
    }

    #[test]
    fn test_rerun_without_declaration_anchor() {
        let layout = "import a from 'a';\nfunction L() {\n  return <body className=\"x\">{c}</body>;\n}\nexport default L;\n";
        let fs = project(layout);
        let request = FontRequest::new("Inter", "sans");

        assert_eq!(run(&fs, &request).unwrap(), PatchStatus::Applied);
        let once = fs.contents("proj/app/layout.tsx").unwrap();
        assert!(!once.contains("const inter"));
        assert_eq!(once.matches("import { Inter } from 'next/font/google';").count(), 1);
        assert!(once.contains("<body className={`${inter.variable} x`}>"));

        assert_eq!(run(&fs, &request).unwrap(), PatchStatus::SkippedAlreadyPresent);
        assert_eq!(fs.contents("proj/app/layout.tsx").unwrap(), once);
    }

    #[test]
    fn test_existing_import_is_not_repeated() {
        let layout = "import { Inter } from 'next/font/google';\nimport \"./globals.css\";\nexport default function L() {\n  return <body>{c}</body>;\n}\n";
        let fs = project(layout);
        assert_eq!(run(&fs, &FontRequest::new("Inter", "sans")).unwrap(), PatchStatus::Applied);
        let out = fs.contents("proj/app/layout.tsx").unwrap();
        assert_eq!(out.matches("import { Inter }").count(), 1);
        assert!(out.contains("const inter = Inter({"));
        assert!(out.contains("<body className={`${inter.variable} antialiased`}>"));
    }

    #[test]
    fn test_missing_anchors_are_omitted() {
        let layout = "export default function L() {\n  return <div />;\n}\n";
        let fs = project(layout);
        assert_eq!(run(&fs, &FontRequest::new("Inter", "sans")).unwrap(), PatchStatus::Applied);
        let out = fs.contents("proj/app/layout.tsx").unwrap();
        assert!(!out.contains("import { Inter }"));
        assert!(!out.contains("className"));
        assert_eq!(
            out,
            "\nconst inter = Inter({ weight: ['400'], subsets: ['latin'], variable: '--font-sans' });\nexport default function L() {\n  return <div />;\n}\n"
        );
    }

    #[test]
    fn test_only_first_body_is_patched() {
        let layout = "import a from 'a';\nexport default function L() {\n  return <><body className=\"one\" /><body className=\"two\" /></>;\n}\n";
        let fs = project(layout);
        run(&fs, &FontRequest::new("Inter", "sans")).unwrap();
        let out = fs.contents("proj/app/layout.tsx").unwrap();
        assert!(out.contains("<body className={`${inter.variable} one`} />"));
        assert!(out.contains("<body className=\"two\" />"));
    }

    #[test]
    fn test_loader_options() {
        let request = FontRequest::new("Roboto", "primary")
            .with_weights(["100", "regular"])
            .with_subsets(["latin", "cyrillic"]);
        assert_eq!(
            loader_options(&request),
            "{ weight: ['100', '400'], subsets: ['latin', 'cyrillic'], variable: '--font-primary' }"
        );

        let request = FontRequest::new("Roboto", "primary").with_weights(Vec::<String>::new());
        assert_eq!(loader_options(&request), "{ subsets: ['latin'], variable: '--font-primary' }");
    }
}
