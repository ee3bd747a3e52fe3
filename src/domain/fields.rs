//! Detail-panel field trees
//!
//! A detail view is described by a tree of field nodes rather than probed at
//! runtime: leaves name a value by id, groups collect related leaves under a
//! heading. Preprocessing flattens the tree into renderable rows, dropping
//! optional leaves with no value and groups left empty by that filtering.

/// One concrete field in a detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub id: &'static str,
    pub label: &'static str,
    /// Hidden when the record has no value for this id.
    pub optional: bool,
}

/// Node in a detail-view layout tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldNode {
    Leaf(FieldDef),
    Group {
        label: &'static str,
        children: Vec<FieldNode>,
    },
}

impl FieldNode {
    pub fn leaf(id: &'static str, label: &'static str) -> Self {
        FieldNode::Leaf(FieldDef {
            id,
            label,
            optional: false,
        })
    }

    pub fn optional(id: &'static str, label: &'static str) -> Self {
        FieldNode::Leaf(FieldDef {
            id,
            label,
            optional: true,
        })
    }

    pub fn group(label: &'static str, children: Vec<FieldNode>) -> Self {
        FieldNode::Group { label, children }
    }
}

/// A flattened row ready for the detail panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRow {
    Heading(&'static str),
    Value { label: &'static str, value: String },
}

/// Flatten a layout tree into rows using `lookup` to fetch values by id.
/// `lookup` returning `None` (or an empty string for an optional leaf)
/// hides that leaf; a group whose children are all hidden is dropped,
/// heading included.
pub fn preprocess<F>(nodes: &[FieldNode], lookup: &F) -> Vec<FieldRow>
where
    F: Fn(&str) -> Option<String>,
{
    let mut rows = Vec::new();
    for node in nodes {
        flatten(node, lookup, &mut rows);
    }
    rows
}

fn flatten<F>(node: &FieldNode, lookup: &F, out: &mut Vec<FieldRow>)
where
    F: Fn(&str) -> Option<String>,
{
    match node {
        FieldNode::Leaf(def) => match lookup(def.id) {
            Some(v) => {
                if !(def.optional && v.is_empty()) {
                    out.push(FieldRow::Value {
                        label: def.label,
                        value: v,
                    });
                }
            }
            None => {
                if !def.optional {
                    out.push(FieldRow::Value {
                        label: def.label,
                        value: String::new(),
                    });
                }
            }
        },
        FieldNode::Group { label, children } => {
            let mut inner = Vec::new();
            for child in children {
                flatten(child, lookup, &mut inner);
            }
            if !inner.is_empty() {
                out.push(FieldRow::Heading(label));
                out.append(&mut inner);
            }
        }
    }
}
