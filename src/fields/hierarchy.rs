//! Dotted-name tree construction
//!
//! Nodes live in an arena indexed by their canonical path. Every proper
//! prefix of a field key becomes a node, parents are created on demand, and
//! each field is referenced from the node named by its `parent`.

use crate::config::ROOT_KEY;
use crate::fields::types::{FieldRecord, FieldRef, HierarchyNode, PageRecord};
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Clone, Default)]
struct NodeEntry {
    path: String,
    children: BTreeSet<String>,
    fields: Vec<FieldRef>,
}

/// Incremental builder for the path -> node mapping
#[derive(Debug, Clone)]
pub struct HierarchyBuilder {
    nodes: Vec<NodeEntry>,
    index: HashMap<String, usize>,
}

impl Default for HierarchyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyBuilder {
    /// Create a builder holding only the root node
    pub fn new() -> Self {
        let mut builder = Self {
            nodes: Vec::new(),
            index: HashMap::new(),
        };
        builder.ensure_node(ROOT_KEY);
        builder
    }

    /// Return the arena slot for `path`, creating an empty node if absent
    pub fn ensure_node(&mut self, path: &str) -> usize {
        if let Some(&slot) = self.index.get(path) {
            return slot;
        }
        let slot = self.nodes.len();
        self.nodes.push(NodeEntry {
            path: path.to_string(),
            ..NodeEntry::default()
        });
        self.index.insert(path.to_string(), slot);
        slot
    }

    /// Register every proper prefix of `key` as a node and link each one
    /// to its parent. Registration is idempotent.
    pub fn register_prefixes(&mut self, key: &str) {
        let mut parent_slot = self.ensure_node(ROOT_KEY);
        let mut end = 0;

        for (offset, _) in key.match_indices('.') {
            let prefix = &key[..offset];
            let segment = &key[end..offset];
            end = offset + 1;

            let slot = self.ensure_node(prefix);
            // a leading "root" segment resolves to the root node itself
            if slot != parent_slot {
                self.nodes[parent_slot].children.insert(segment.to_string());
            }
            parent_slot = slot;
        }
    }

    /// Add one field: register its prefixes and reference it from its parent node
    pub fn add_field(&mut self, page: u32, field: &FieldRecord) {
        if field.key.split('.').any(str::is_empty) {
            tracing::debug!(key = %field.key, "Field key contains empty segments");
        }
        if field.key.contains('.') && field.key.split('.').next() == Some(ROOT_KEY) {
            tracing::warn!(key = %field.key, "Field key starts with the root sentinel segment");
        }

        self.register_prefixes(&field.key);
        let slot = self.ensure_node(&field.parent);
        self.nodes[slot].fields.push(FieldRef {
            page,
            key: field.key.clone(),
            field_type: field.field_type,
        });
    }

    /// Add every field of a page, in page order
    pub fn add_page(&mut self, page: &PageRecord) {
        for field in &page.fields {
            self.add_field(page.page_number, field);
        }
    }

    /// Whether a node exists at `path`
    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    /// Number of nodes, including the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Finish into a deterministic path -> node mapping with sorted children
    pub fn build(self) -> BTreeMap<String, HierarchyNode> {
        self.nodes
            .into_iter()
            .map(|entry| {
                (
                    entry.path,
                    HierarchyNode {
                        children: entry.children.into_iter().collect(),
                        fields: entry.fields,
                    },
                )
            })
            .collect()
    }
}

/// Build the hierarchy for a sequence of pages
pub fn build_hierarchy(pages: &[PageRecord]) -> BTreeMap<String, HierarchyNode> {
    let mut builder = HierarchyBuilder::new();
    for page in pages {
        builder.add_page(page);
    }
    builder.build()
}
