//! Structural selector synthesis for extracted elements
//!
//! Produces a CSS locator that re-resolves to the same element within the
//! same document state. An element with a usable `id` attribute gets an id
//! selector; otherwise a bounded ancestor path with class tokens and
//! nth-of-type disambiguation is assembled.
//!
//! The locator is deterministic for a fixed document. It is not guaranteed
//! to stay unique if the document is mutated between generation and
//! re-resolution in ways that change sibling order or classes.

use scraper::ElementRef;

/// Generator for structural element locators.
#[derive(Debug, Clone)]
pub struct SelectorGenerator {
    root_tag: String,
    max_depth: usize,
}

impl Default for SelectorGenerator {
    fn default() -> Self {
        Self {
            root_tag: "body".to_string(),
            max_depth: 4,
        }
    }
}

impl SelectorGenerator {
    pub fn new(root_tag: impl Into<String>, max_depth: usize) -> Self {
        Self {
            root_tag: root_tag.into(),
            max_depth,
        }
    }

    /// Generate a locator for `element`.
    pub fn generate(&self, element: ElementRef<'_>) -> String {
        // An id attribute is the most specific locator: O(1) resolution,
        // immune to sibling reordering.
        if let Some(id) = element.value().id() {
            if is_css_identifier(id) {
                return format!("#{id}");
            }
        }

        let mut parts = Vec::new();
        let mut current = Some(element);

        while let Some(el) = current {
            let name = el.value().name();
            let mut part = name.to_string();

            for class in el.value().classes().filter(|c| is_css_identifier(c)) {
                part.push('.');
                part.push_str(class);
            }

            if let Some(index) = nth_of_type(el) {
                part.push_str(&format!(":nth-of-type({index})"));
            }

            parts.push(part);

            if name == self.root_tag || parts.len() >= self.max_depth {
                break;
            }

            current = el.parent().and_then(ElementRef::wrap);
        }

        parts.reverse();
        parts.join(" ")
    }
}

/// 1-based position among same-tag siblings, only when disambiguation is
/// needed (more than one sibling shares the tag).
fn nth_of_type(element: ElementRef<'_>) -> Option<usize> {
    let parent = element.parent()?;
    let name = element.value().name();

    let mut position = 0;
    let mut same_tag = 0;
    for sibling in parent.children() {
        if let Some(sibling_el) = ElementRef::wrap(sibling) {
            if sibling_el.value().name() == name {
                same_tag += 1;
                if sibling.id() == element.id() {
                    position = same_tag;
                }
            }
        }
    }

    (same_tag > 1).then_some(position)
}

/// Conservative CSS identifier check: tokens that need escaping are
/// dropped from the path rather than emitted as invalid selector syntax.
fn is_css_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn first_match<'a>(html: &'a Html, selector: &str) -> ElementRef<'a> {
        let sel = Selector::parse(selector).unwrap();
        html.select(&sel).next().unwrap()
    }

    #[test]
    fn id_attribute_wins() {
        let html = Html::parse_document(r#"<body><div><p id="intro">Hi</p></div></body>"#);
        let generator = SelectorGenerator::default();
        assert_eq!(generator.generate(first_match(&html, "p")), "#intro");
    }

    #[test]
    fn numeric_id_falls_back_to_path() {
        let html = Html::parse_document(r#"<body><p id="42">Hi</p></body>"#);
        let generator = SelectorGenerator::default();
        let selector = generator.generate(first_match(&html, "p"));
        assert!(!selector.starts_with('#'));
        assert!(selector.ends_with('p'));
    }

    #[test]
    fn classes_are_appended() {
        let html =
            Html::parse_document(r#"<body><button class="btn primary">Go</button></body>"#);
        let generator = SelectorGenerator::default();
        let selector = generator.generate(first_match(&html, "button"));
        assert!(selector.contains("button.btn.primary"), "got {selector}");
    }

    #[test]
    fn same_tag_siblings_get_nth_of_type() {
        let html = Html::parse_document(
            r#"<body><div><p>first</p><p>second</p><span>x</span></div></body>"#,
        );
        let generator = SelectorGenerator::default();

        let sel = Selector::parse("p").unwrap();
        let paragraphs: Vec<_> = html.select(&sel).collect();
        let first = generator.generate(paragraphs[0]);
        let second = generator.generate(paragraphs[1]);

        assert!(first.contains("p:nth-of-type(1)"), "got {first}");
        assert!(second.contains("p:nth-of-type(2)"), "got {second}");

        // lone span needs no disambiguation
        let span = generator.generate(first_match(&html, "span"));
        assert!(!span.contains("nth-of-type"), "got {span}");
    }

    #[test]
    fn path_stops_at_body_or_depth_cap() {
        let html = Html::parse_document(
            "<body><div><section><article><ul><li>deep</li></ul></article></section></div></body>",
        );
        let generator = SelectorGenerator::default();
        let selector = generator.generate(first_match(&html, "li"));

        assert!(selector.split(' ').count() <= 4, "got {selector}");
        assert!(!selector.contains("body"), "got {selector}");
    }

    #[test]
    fn generated_selector_resolves_back_to_the_same_element() {
        let html = Html::parse_document(
            r#"<body><div class="card"><p>one</p><p>target text</p></div></body>"#,
        );
        let generator = SelectorGenerator::default();

        let sel = Selector::parse("p").unwrap();
        let target = html.select(&sel).nth(1).unwrap();
        let generated = generator.generate(target);

        let resolved_sel = Selector::parse(&generated).unwrap();
        let resolved = html.select(&resolved_sel).next().unwrap();
        assert_eq!(resolved.id(), target.id());
        assert_eq!(resolved.text().collect::<String>(), "target text");
    }

    #[test]
    fn generation_is_deterministic() {
        let html = Html::parse_document(
            r#"<body><div class="hero"><h1>Title</h1><p>Copy</p></div></body>"#,
        );
        let generator = SelectorGenerator::default();
        let element = first_match(&html, "p");
        assert_eq!(generator.generate(element), generator.generate(element));
    }
}
