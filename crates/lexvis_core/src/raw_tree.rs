//! Collapsible JSON tree for the "Raw Data" view.
//!
//! The tree is a flat list of lines produced depth-first from a JSON value.
//! Nodes are addressed by their child-index path from the root; a node is
//! expanded when its depth is below the collapse depth, unless the caller
//! has toggled it.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use serde_json::Value;

use crate::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeLineKind {
    /// Expanded container header, followed by its children and a `Close` line.
    Open,
    /// Container shown folded on one line.
    Collapsed,
    /// Closing bracket of an expanded container.
    Close,
    /// Scalar or empty container.
    Leaf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    pub path: Vec<usize>,
    pub depth: usize,
    pub kind: TreeLineKind,
    pub text: String,
}

impl TreeLine {
    pub fn is_toggleable(&self) -> bool {
        matches!(self.kind, TreeLineKind::Open | TreeLineKind::Collapsed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTreeRenderer {
    root_name: String,
    collapse_depth: usize,
    show_data_types: bool,
    show_object_size: bool,
}

impl Default for RawTreeRenderer {
    fn default() -> Self {
        Self::new("tokens", 1)
    }
}

impl RawTreeRenderer {
    pub fn new(root_name: impl Into<String>, collapse_depth: usize) -> Self {
        Self {
            root_name: root_name.into(),
            collapse_depth,
            show_data_types: false,
            show_object_size: true,
        }
    }

    /// Process-wide renderer used by the raw view. Built on first use.
    pub fn acquire() -> &'static RawTreeRenderer {
        static RENDERER: OnceLock<RawTreeRenderer> = OnceLock::new();
        RENDERER.get_or_init(RawTreeRenderer::default)
    }

    pub fn with_data_types(mut self, show: bool) -> Self {
        self.show_data_types = show;
        self
    }

    pub fn with_object_size(mut self, show: bool) -> Self {
        self.show_object_size = show;
        self
    }

    pub fn collapse_depth(&self) -> usize {
        self.collapse_depth
    }

    pub fn is_expanded(&self, path: &[usize], toggled: &BTreeSet<Vec<usize>>) -> bool {
        let by_default = path.len() < self.collapse_depth;
        by_default != toggled.contains(path)
    }

    pub fn render(&self, tokens: &[Token], toggled: &BTreeSet<Vec<usize>>) -> Vec<TreeLine> {
        let value = Value::Array(tokens.iter().map(Token::to_json).collect());
        self.render_value(&value, toggled)
    }

    pub fn render_value(&self, value: &Value, toggled: &BTreeSet<Vec<usize>>) -> Vec<TreeLine> {
        let mut lines = Vec::new();
        let mut path = Vec::new();
        self.push_node(&mut lines, &mut path, &self.root_name, value, toggled);
        lines
    }

    fn push_node(
        &self,
        lines: &mut Vec<TreeLine>,
        path: &mut Vec<usize>,
        key: &str,
        value: &Value,
        toggled: &BTreeSet<Vec<usize>>,
    ) {
        let depth = path.len();
        let (open, close, len) = match value {
            Value::Array(items) => ('[', ']', items.len()),
            Value::Object(map) => ('{', '}', map.len()),
            scalar => {
                lines.push(TreeLine {
                    path: path.clone(),
                    depth,
                    kind: TreeLineKind::Leaf,
                    text: format!("{key}: {}", self.scalar_text(scalar)),
                });
                return;
            }
        };

        if len == 0 {
            lines.push(TreeLine {
                path: path.clone(),
                depth,
                kind: TreeLineKind::Leaf,
                text: format!("{key}: {open}{close}"),
            });
            return;
        }

        let size = if self.show_object_size {
            format!(" {}", item_count(len))
        } else {
            String::new()
        };

        if !self.is_expanded(path, toggled) {
            lines.push(TreeLine {
                path: path.clone(),
                depth,
                kind: TreeLineKind::Collapsed,
                text: format!("{key}: {open}…{close}{size}"),
            });
            return;
        }

        lines.push(TreeLine {
            path: path.clone(),
            depth,
            kind: TreeLineKind::Open,
            text: format!("{key}: {open}{size}"),
        });
        match value {
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    path.push(index);
                    self.push_node(lines, path, &index.to_string(), item, toggled);
                    path.pop();
                }
            }
            Value::Object(map) => {
                for (index, (child_key, child)) in map.iter().enumerate() {
                    path.push(index);
                    self.push_node(lines, path, child_key, child, toggled);
                    path.pop();
                }
            }
            _ => {}
        }
        lines.push(TreeLine {
            path: path.clone(),
            depth,
            kind: TreeLineKind::Close,
            text: close.to_string(),
        });
    }

    fn scalar_text(&self, value: &Value) -> String {
        // `Value`'s Display is compact JSON, so strings come out quoted.
        if !self.show_data_types {
            return value.to_string();
        }
        let label = match value {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(n) if n.is_f64() => "float",
            Value::Number(_) => "int",
            Value::String(_) => "string",
            Value::Array(_) | Value::Object(_) => "",
        };
        format!("{label} {value}")
    }
}

fn item_count(len: usize) -> String {
    if len == 1 {
        "1 item".to_string()
    } else {
        format!("{len} items")
    }
}
