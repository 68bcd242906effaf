//! Figma document tree extraction
//!
//! Depth-first walk over a fetched Figma node tree. Any node exposing
//! literal character content yields a `ContentItem`. Figma nodes carry
//! stable native ids, so the identity is taken directly from the node
//! instead of synthesizing a structural path.

use crate::domain::content::{ContentAttributes, ContentItem, ScrapeResult};
use serde::Deserialize;
use tracing::debug;

/// One node of a Figma document tree, as returned by the files endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FigmaNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub node_type: String,
    /// Literal text content; present on TEXT nodes.
    #[serde(default)]
    pub characters: Option<String>,
    #[serde(default)]
    pub children: Vec<FigmaNode>,
}

/// Extractor for Figma document trees.
#[derive(Debug, Default)]
pub struct FigmaContentExtractor;

impl FigmaContentExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Walk the tree depth-first and collect every node with non-empty
    /// character content. Ids follow the `{document_name}_{counter}` run
    /// scheme; identity is the node's own id.
    pub fn extract(&self, document_name: &str, root: &FigmaNode) -> ScrapeResult {
        let mut items = Vec::new();
        let mut path = Vec::new();
        self.walk(document_name, root, &mut path, &mut items);

        debug!(
            "Extracted {} text nodes from Figma document {}",
            items.len(),
            document_name
        );
        ScrapeResult::new(document_name, items)
    }

    fn walk(
        &self,
        document_name: &str,
        node: &FigmaNode,
        path: &mut Vec<String>,
        items: &mut Vec<ContentItem>,
    ) {
        if let Some(characters) = &node.characters {
            let text = characters.trim();
            if !text.is_empty() {
                items.push(ContentItem {
                    id: format!("{document_name}_{}", items.len()),
                    identity: node.id.clone(),
                    tag: node.node_type.clone(),
                    original_text: text.to_string(),
                    attributes: ContentAttributes::default(),
                    path: Some(path.join(" > ")),
                    analysis: None,
                });
            }
        }

        path.push(node.name.clone());
        for child in &node.children {
            self.walk(document_name, child, path, items);
        }
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> FigmaNode {
        serde_json::from_str(
            r#"{
                "id": "0:0",
                "name": "Document",
                "type": "DOCUMENT",
                "children": [
                    {
                        "id": "1:0",
                        "name": "Login",
                        "type": "FRAME",
                        "children": [
                            {"id": "1:1", "name": "Title", "type": "TEXT", "characters": "Welcome back"},
                            {"id": "1:2", "name": "Spacer", "type": "TEXT", "characters": "   "},
                            {"id": "1:3", "name": "CTA", "type": "TEXT", "characters": "Sign in"}
                        ]
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn collects_text_nodes_depth_first() {
        let result = FigmaContentExtractor::new().extract("app", &sample_tree());

        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].original_text, "Welcome back");
        assert_eq!(result.items[0].identity, "1:1");
        assert_eq!(result.items[0].tag, "TEXT");
        assert_eq!(result.items[1].original_text, "Sign in");
    }

    #[test]
    fn whitespace_only_nodes_are_filtered() {
        let result = FigmaContentExtractor::new().extract("app", &sample_tree());
        assert!(result.items.iter().all(|i| i.identity != "1:2"));
    }

    #[test]
    fn ancestor_path_records_frame_names() {
        let result = FigmaContentExtractor::new().extract("app", &sample_tree());
        assert_eq!(result.items[0].path.as_deref(), Some("Document > Login"));
    }

    #[test]
    fn run_ids_use_document_prefix() {
        let result = FigmaContentExtractor::new().extract("app", &sample_tree());
        assert_eq!(result.items[0].id, "app_0");
        assert_eq!(result.items[1].id, "app_1");
    }

    #[test]
    fn extraction_is_deterministic() {
        let tree = sample_tree();
        let extractor = FigmaContentExtractor::new();
        let a = extractor.extract("app", &tree);
        let b = extractor.extract("app", &tree);
        let ids = |r: &ScrapeResult| {
            r.items
                .iter()
                .map(|i| (i.id.clone(), i.identity.clone(), i.original_text.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(&a), ids(&b));
    }
}
