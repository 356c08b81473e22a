use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::error::Result;

/// An element in our DOM tree, reduced to what grid inference reads.
/// Text, comments and doctypes are dropped during conversion.
#[derive(Debug, Clone)]
pub struct DomNode {
    pub tag: String,
    /// Class tokens in source order, split on ASCII whitespace.
    pub classes: Vec<String>,
    pub children: Vec<DomNode>,
    pub node_type: NodeType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeType {
    Element,
    Document,
}

impl DomNode {
    pub fn new_element(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            children: Vec::new(),
            node_type: NodeType::Element,
        }
    }

    pub fn new_document() -> Self {
        Self {
            tag: String::new(),
            classes: Vec::new(),
            children: Vec::new(),
            node_type: NodeType::Document,
        }
    }

    /// Builder-style helper for assembling trees by hand.
    pub fn with_class(mut self, class: &str) -> Self {
        self.set_classes(class);
        self
    }

    pub fn with_child(mut self, child: DomNode) -> Self {
        self.children.push(child);
        self
    }

    /// Find the `<body>` element, if the document has one.
    pub fn body(&self) -> Option<&DomNode> {
        if self.node_type == NodeType::Element && self.tag == "body" {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.body())
    }

    fn set_classes(&mut self, value: &str) {
        self.classes = value.split_ascii_whitespace().map(str::to_string).collect();
    }
}

/// Parse an HTML string into a DomNode tree.
pub fn parse_html(html: &str) -> Result<DomNode> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())?;

    Ok(convert_node(&dom.document).unwrap_or_else(DomNode::new_document))
}

fn convert_node(handle: &Handle) -> Option<DomNode> {
    match &handle.data {
        NodeData::Document => {
            let mut doc = DomNode::new_document();
            doc.children = convert_children(handle);
            Some(doc)
        }
        NodeData::Element { name, attrs, .. } => {
            let tag = name.local.to_string();
            let mut node = DomNode::new_element(&tag);
            if let Some(class) = attrs.borrow().iter().find(|a| &*a.name.local == "class") {
                node.set_classes(&class.value);
            }

            // Never holds layout containers
            if tag == "script" || tag == "style" || tag == "template" || tag == "svg" {
                return Some(node);
            }

            node.children = convert_children(handle);
            Some(node)
        }
        _ => None, // Text, comments, PIs → ignored
    }
}

fn convert_children(handle: &Handle) -> Vec<DomNode> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(convert_node)
        .collect()
}
