//! Arena-based mutable DOM.
//!
//! html5ever parses straight into this arena (see [`super::tree_sink`]). The
//! rebuild passes then splice nodes around in place: every node lives in one
//! contiguous vector and parent/child/sibling links are indices into it, so
//! moving a node is a handful of link updates and `NodeId`s stay stable.

use html5ever::{LocalName, QualName, ns};

/// Unique identifier for a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value for no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this is a valid node ID.
    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    /// Check if this is the sentinel value.
    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }

    fn option(self) -> Option<NodeId> {
        self.is_some().then_some(self)
    }
}

/// Node payload.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root.
    Document,
    /// Element with name and attributes.
    Element {
        name: QualName,
        attrs: Vec<Attribute>,
    },
    /// Text content.
    Text(String),
    /// Comment. Kept so the emitter can round-trip them.
    Comment(String),
    /// Document type declaration.
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
}

/// HTML attribute.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

/// A node in the arena.
#[derive(Debug)]
pub struct Node {
    pub data: NodeData,
    pub parent: NodeId,
    pub first_child: NodeId,
    pub last_child: NodeId,
    pub prev_sibling: NodeId,
    pub next_sibling: NodeId,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
        }
    }
}

/// Build an html-namespace element name.
pub fn html_name(local: &str) -> QualName {
    QualName::new(None, ns!(html), LocalName::from(local))
}

/// Build a no-namespace attribute name.
pub fn attr_name(local: &str) -> QualName {
    QualName::new(None, ns!(), LocalName::from(local))
}

/// Arena-based DOM tree.
///
/// Detached nodes stay in the arena (they are simply unreachable from the
/// document), so a `NodeId` never dangles.
pub struct Dom {
    nodes: Vec<Node>,
    document: NodeId,
}

impl Dom {
    /// Create a new empty DOM with a document root.
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            document: NodeId::NONE,
        };
        dom.document = dom.alloc(Node::new(NodeData::Document));
        dom
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the document root ID.
    pub fn document(&self) -> NodeId {
        self.document
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Create a new element node.
    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> NodeId {
        self.alloc(Node::new(NodeData::Element { name, attrs }))
    }

    /// Create an html element from a tag and `(name, value)` attribute pairs.
    pub fn element(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let attrs = attrs
            .iter()
            .map(|(name, value)| Attribute {
                name: attr_name(name),
                value: (*value).to_string(),
            })
            .collect();
        self.create_element(html_name(tag), attrs)
    }

    /// Create a new text node.
    pub fn create_text(&mut self, text: String) -> NodeId {
        self.alloc(Node::new(NodeData::Text(text)))
    }

    /// Create a new comment node.
    pub fn create_comment(&mut self, text: String) -> NodeId {
        self.alloc(Node::new(NodeData::Comment(text)))
    }

    /// Create a doctype node.
    pub fn create_doctype(&mut self, name: String, public_id: String, system_id: String) -> NodeId {
        self.alloc(Node::new(NodeData::Doctype {
            name,
            public_id,
            system_id,
        }))
    }

    /// Append a child to a parent node, detaching it from wherever it was.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);

        let last_child = self.get(parent).map(|n| n.last_child).unwrap_or(NodeId::NONE);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = parent;
            child_node.prev_sibling = last_child;
        }

        if let Some(last_node) = self.get_mut(last_child) {
            last_node.next_sibling = child;
        }

        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }
    }

    /// Insert a node before a sibling, detaching it from wherever it was.
    pub fn insert_before(&mut self, sibling: NodeId, new_node: NodeId) {
        if sibling == new_node {
            return;
        }
        self.detach(new_node);

        let (parent, prev) = match self.get(sibling) {
            Some(n) => (n.parent, n.prev_sibling),
            None => return,
        };

        if let Some(new) = self.get_mut(new_node) {
            new.parent = parent;
            new.prev_sibling = prev;
            new.next_sibling = sibling;
        }

        if let Some(sib) = self.get_mut(sibling) {
            sib.prev_sibling = new_node;
        }

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = new_node;
            }
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = new_node;
        }
    }

    /// Append text to an existing trailing text node, or create a new one.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        let last_child = self.get(parent).map(|n| n.last_child).unwrap_or(NodeId::NONE);

        if let Some(last) = self.get_mut(last_child)
            && let NodeData::Text(ref mut existing) = last.data
        {
            existing.push_str(text);
            return;
        }

        let text_node = self.create_text(text.to_string());
        self.append(parent, text_node);
    }

    /// Unlink a node from its parent and siblings. Its own subtree is kept.
    pub fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = match self.get(id) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };
        if parent.is_none() && prev.is_none() && next.is_none() {
            return;
        }

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = next;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.first_child = next;
        }

        if next.is_some() {
            if let Some(n) = self.get_mut(next) {
                n.prev_sibling = prev;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.last_child = prev;
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }
    }

    /// Relink `parent` so that its children are exactly `children`, in order.
    ///
    /// Former children missing from the list end up detached. Used by the
    /// rebuild passes to apply a whole pass as one batch.
    pub fn replace_children(&mut self, parent: NodeId, children: &[NodeId]) {
        for old in self.child_vec(parent) {
            if let Some(node) = self.get_mut(old) {
                node.parent = NodeId::NONE;
                node.prev_sibling = NodeId::NONE;
                node.next_sibling = NodeId::NONE;
            }
        }
        if let Some(p) = self.get_mut(parent) {
            p.first_child = NodeId::NONE;
            p.last_child = NodeId::NONE;
        }
        for &child in children {
            self.append(parent, child);
        }
    }

    /// Move every child of `from` to the end of `to`, preserving order.
    pub fn move_children(&mut self, from: NodeId, to: NodeId) {
        for child in self.child_vec(from) {
            self.append(to, child);
        }
    }

    /// Get the number of nodes ever allocated.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the DOM is empty (only has document root).
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Parent of a node, if attached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent.option())
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: NodeId) -> ChildrenIter<'_> {
        let first = self.get(parent).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        ChildrenIter {
            dom: self,
            current: first,
        }
    }

    /// Snapshot of a node's children.
    pub fn child_vec(&self, parent: NodeId) -> Vec<NodeId> {
        self.children(parent).collect()
    }

    /// All descendants of `root` in document order, excluding `root` itself.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.child_vec(root);
        stack.reverse();
        while let Some(id) = stack.pop() {
            out.push(id);
            let mut children = self.child_vec(id);
            children.reverse();
            stack.extend(children);
        }
        out
    }

    /// Find the first node under the document matching a predicate (DFS).
    pub fn find<F>(&self, predicate: F) -> Option<NodeId>
    where
        F: Fn(&Node) -> bool,
    {
        self.descendants(self.document)
            .into_iter()
            .find(|&id| self.get(id).is_some_and(&predicate))
    }

    /// Find element by tag name (first match).
    pub fn find_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.find(|node| match &node.data {
            NodeData::Element { name, .. } => name.local.as_ref() == tag,
            _ => false,
        })
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over children of a node.
pub struct ChildrenIter<'a> {
    dom: &'a Dom,
    current: NodeId,
}

impl Iterator for ChildrenIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self
            .dom
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(NodeId::NONE);
        Some(id)
    }
}

/// Convenience methods for element and text nodes.
impl Dom {
    /// Element's local name (tag).
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { name, .. } => Some(name.local.as_ref()),
            _ => None,
        })
    }

    /// Check whether a node is an element with one of the given tags.
    pub fn is_tag(&self, id: NodeId, tags: &[&str]) -> bool {
        self.tag(id).is_some_and(|t| tags.contains(&t))
    }

    /// Get an attribute value.
    pub fn get_attr(&self, id: NodeId, attr: &str) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name.local.as_ref() == attr)
                .map(|a| a.value.as_str()),
            _ => None,
        })
    }

    /// Set (or replace) an attribute value.
    pub fn set_attr(&mut self, id: NodeId, attr: &str, value: &str) {
        if let Some(node) = self.get_mut(id)
            && let NodeData::Element { attrs, .. } = &mut node.data
        {
            match attrs.iter_mut().find(|a| a.name.local.as_ref() == attr) {
                Some(existing) => existing.value = value.to_string(),
                None => attrs.push(Attribute {
                    name: attr_name(attr),
                    value: value.to_string(),
                }),
            }
        }
    }

    /// Element's classes.
    pub fn classes(&self, id: NodeId) -> Vec<&str> {
        self.get_attr(id, "class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Check for a class.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.classes(id).contains(&class)
    }

    /// Add a class, keeping existing ones. No-op if already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if self.has_class(id, class) {
            return;
        }
        let value = match self.get_attr(id, "class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
            _ => class.to_string(),
        };
        self.set_attr(id, "class", &value);
    }

    /// Check if node is an element.
    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, NodeData::Element { .. }))
    }

    /// Own text of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Concatenated text of a node and all its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.text(id) {
            return text.to_string();
        }
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.text(d))
            .collect()
    }

    /// Whitespace-only text and comments. Layout noise between block elements.
    pub fn is_blank(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| match &n.data {
            NodeData::Text(s) => s.trim().is_empty(),
            NodeData::Comment(_) => true,
            _ => false,
        })
    }

    /// First element among the descendants, in document order.
    pub fn first_element_descendant(&self, id: NodeId) -> Option<NodeId> {
        self.descendants(id).into_iter().find(|&d| self.is_element(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_children() {
        let mut dom = Dom::new();

        let parent = dom.element("div", &[]);
        let child1 = dom.element("p", &[]);
        let child2 = dom.element("p", &[]);

        dom.append(dom.document(), parent);
        dom.append(parent, child1);
        dom.append(parent, child2);

        assert_eq!(dom.child_vec(parent), vec![child1, child2]);
        assert_eq!(dom.parent(child2), Some(parent));
    }

    #[test]
    fn test_text_merging() {
        let mut dom = Dom::new();

        let p = dom.element("p", &[]);
        dom.append(dom.document(), p);

        dom.append_text(p, "Hello, ");
        dom.append_text(p, "World!");

        let children = dom.child_vec(p);
        assert_eq!(children.len(), 1);
        assert_eq!(dom.text(children[0]), Some("Hello, World!"));
    }

    #[test]
    fn test_append_moves_between_parents() {
        let mut dom = Dom::new();
        let a = dom.element("div", &[]);
        let b = dom.element("div", &[]);
        let p = dom.element("p", &[]);
        dom.append(a, p);
        dom.append(b, p);

        assert!(dom.child_vec(a).is_empty());
        assert_eq!(dom.child_vec(b), vec![p]);
    }

    #[test]
    fn test_detach_middle_child() {
        let mut dom = Dom::new();
        let div = dom.element("div", &[]);
        let kids: Vec<_> = (0..3).map(|_| dom.element("p", &[])).collect();
        for &k in &kids {
            dom.append(div, k);
        }

        dom.detach(kids[1]);

        assert_eq!(dom.child_vec(div), vec![kids[0], kids[2]]);
        assert_eq!(dom.parent(kids[1]), None);
        assert_eq!(dom.get(kids[2]).unwrap().prev_sibling, kids[0]);
    }

    #[test]
    fn test_insert_before_first() {
        let mut dom = Dom::new();
        let div = dom.element("div", &[]);
        let p = dom.element("p", &[]);
        let h = dom.element("h1", &[]);
        dom.append(div, p);
        dom.insert_before(p, h);

        assert_eq!(dom.child_vec(div), vec![h, p]);
    }

    #[test]
    fn test_replace_children_reorders_and_drops() {
        let mut dom = Dom::new();
        let div = dom.element("div", &[]);
        let kids: Vec<_> = (0..3).map(|_| dom.element("p", &[])).collect();
        for &k in &kids {
            dom.append(div, k);
        }

        dom.replace_children(div, &[kids[2], kids[0]]);

        assert_eq!(dom.child_vec(div), vec![kids[2], kids[0]]);
        assert_eq!(dom.parent(kids[1]), None);
        assert_eq!(dom.get(div).unwrap().last_child, kids[0]);
    }

    #[test]
    fn test_class_helpers() {
        let mut dom = Dom::new();
        let ul = dom.element("ul", &[("class", "a")]);
        dom.add_class(ul, "list-inline");
        dom.add_class(ul, "list-inline");

        assert_eq!(dom.get_attr(ul, "class"), Some("a list-inline"));
        assert!(dom.has_class(ul, "a"));

        dom.set_attr(ul, "class", "b");
        assert_eq!(dom.classes(ul), vec!["b"]);
    }

    #[test]
    fn test_text_content_and_blank() {
        let mut dom = Dom::new();
        let p = dom.element("p", &[]);
        dom.append_text(p, "Hello ");
        let b = dom.element("strong", &[]);
        dom.append(p, b);
        dom.append_text(b, "World");
        let ws = dom.create_text("\n  ".into());

        assert_eq!(dom.text_content(p), "Hello World");
        assert!(dom.is_blank(ws));
        assert!(!dom.is_blank(p));
        assert_eq!(dom.first_element_descendant(p), Some(b));
    }
}
