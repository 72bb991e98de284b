use indexmap::IndexMap;
use tracing::trace;

use crate::error::{ChartError, ChartResult};

use super::{DrawingHost, NodeId};

/// One element in a `Document`.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attributes: IndexMap<String, String>,
    styles: IndexMap<String, String>,
    text: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Element {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_owned(),
            attributes: IndexMap::new(),
            styles: IndexMap::new(),
            text: None,
            children: Vec::new(),
            parent,
        }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn style(&self, name: &str) -> Option<&str> {
        self.styles.get(name).map(String::as_str)
    }

    pub fn styles(&self) -> impl Iterator<Item = (&str, &str)> {
        self.styles
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

/// In-memory retained element tree.
///
/// Stands in for the host document in headless use and tests. Storage of
/// removed elements is recycled under a bumped generation, so stale handles
/// are always detected.
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                generation: 0,
                element: Some(Element::new("body", None)),
            }],
            free: Vec::new(),
            root: NodeId::new(0, 0),
        }
    }

    #[must_use]
    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.slots
            .get(node.index() as usize)
            .filter(|slot| slot.generation == node.generation())
            .and_then(|slot| slot.element.as_ref())
    }

    pub fn get(&self, node: NodeId) -> ChartResult<&Element> {
        self.element(node)
            .ok_or(ChartError::StaleNode { id: node })
    }

    fn get_mut(&mut self, node: NodeId) -> ChartResult<&mut Element> {
        self.slots
            .get_mut(node.index() as usize)
            .filter(|slot| slot.generation == node.generation())
            .and_then(|slot| slot.element.as_mut())
            .ok_or(ChartError::StaleNode { id: node })
    }

    /// Number of attached elements, the root included.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.element.is_some())
            .count()
    }

    fn allocate(&mut self, element: Element) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.element = Some(element);
            return NodeId::new(index, slot.generation);
        }

        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 0,
            element: Some(element),
        });
        NodeId::new(index, 0)
    }

    fn collect_descendants(
        &self,
        scope: NodeId,
        tag: &str,
        first_only: bool,
        found: &mut Vec<NodeId>,
    ) -> ChartResult<()> {
        for &child in self.get(scope)?.children() {
            if first_only && !found.is_empty() {
                return Ok(());
            }
            if self.get(child)?.tag() == tag {
                found.push(child);
                if first_only {
                    return Ok(());
                }
            }
            self.collect_descendants(child, tag, first_only, found)?;
        }
        Ok(())
    }

    fn drop_subtree(&mut self, node: NodeId) {
        let element = self
            .slots
            .get_mut(node.index() as usize)
            .filter(|slot| slot.generation == node.generation())
            .and_then(|slot| slot.element.take());
        let Some(element) = element else {
            return;
        };
        self.free.push(node.index());
        for child in element.children {
            self.drop_subtree(child);
        }
    }
}

impl DrawingHost for Document {
    fn root(&self) -> NodeId {
        self.root
    }

    fn contains(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    fn select_first(&self, scope: NodeId, tag: &str) -> ChartResult<Option<NodeId>> {
        let mut found = Vec::with_capacity(1);
        self.collect_descendants(scope, tag, true, &mut found)?;
        Ok(found.first().copied())
    }

    fn select_all(&self, scope: NodeId, tag: &str) -> ChartResult<Vec<NodeId>> {
        let mut found = Vec::new();
        self.collect_descendants(scope, tag, false, &mut found)?;
        Ok(found)
    }

    fn children(&self, node: NodeId) -> ChartResult<Vec<NodeId>> {
        Ok(self.get(node)?.children().to_vec())
    }

    fn append(&mut self, parent: NodeId, tag: &str) -> ChartResult<NodeId> {
        self.get(parent)?;
        let node = self.allocate(Element::new(tag, Some(parent)));
        self.get_mut(parent)?.children.push(node);
        trace!(%node, %parent, tag, "append element");
        Ok(node)
    }

    fn remove(&mut self, node: NodeId) -> ChartResult<()> {
        if node == self.root {
            return Err(ChartError::RootRemoval);
        }
        let parent = self.get(node)?.parent();
        if let Some(parent) = parent {
            self.get_mut(parent)?.children.retain(|&child| child != node);
        }
        self.drop_subtree(node);
        trace!(%node, "remove element");
        Ok(())
    }

    fn set_attr(&mut self, node: NodeId, name: &str, value: String) -> ChartResult<()> {
        self.get_mut(node)?.attributes.insert(name.to_owned(), value);
        Ok(())
    }

    fn attr(&self, node: NodeId, name: &str) -> ChartResult<Option<String>> {
        Ok(self.get(node)?.attribute(name).map(str::to_owned))
    }

    fn set_style(&mut self, node: NodeId, name: &str, value: String) -> ChartResult<()> {
        self.get_mut(node)?.styles.insert(name.to_owned(), value);
        Ok(())
    }

    fn style(&self, node: NodeId, name: &str) -> ChartResult<Option<String>> {
        Ok(self.get(node)?.style(name).map(str::to_owned))
    }

    fn set_text(&mut self, node: NodeId, text: String) -> ChartResult<()> {
        self.get_mut(node)?.text = Some(text);
        Ok(())
    }

    fn text(&self, node: NodeId) -> ChartResult<Option<String>> {
        Ok(self.get(node)?.text().map(str::to_owned))
    }
}

#[cfg(test)]
mod tests {
    use super::Document;
    use crate::error::ChartError;
    use crate::surface::DrawingHost;

    #[test]
    fn select_first_walks_in_document_order() {
        let mut doc = Document::new();
        let root = doc.root();
        let outer = doc.append(root, "div").expect("append div");
        let nested = doc.append(outer, "svg").expect("append nested svg");
        let sibling = doc.append(root, "svg").expect("append sibling svg");

        assert_eq!(doc.select_first(root, "svg").expect("select"), Some(nested));
        assert_eq!(
            doc.select_all(root, "svg").expect("select all"),
            vec![nested, sibling]
        );
    }

    #[test]
    fn removing_subtree_invalidates_every_handle() {
        let mut doc = Document::new();
        let root = doc.root();
        let svg = doc.append(root, "svg").expect("svg");
        let group = doc.append(svg, "g").expect("g");

        doc.remove(svg).expect("remove svg");

        assert!(!doc.contains(svg));
        assert!(!doc.contains(group));
        assert_eq!(doc.live_count(), 1);
        assert!(matches!(
            doc.set_attr(group, "class", "x".to_owned()),
            Err(ChartError::StaleNode { id }) if id == group
        ));
    }

    #[test]
    fn root_cannot_be_removed() {
        let mut doc = Document::new();
        let root = doc.root();
        assert!(matches!(doc.remove(root), Err(ChartError::RootRemoval)));
        assert!(doc.contains(root));
    }

    #[test]
    fn recycled_slot_does_not_revive_old_handle() {
        let mut doc = Document::new();
        let root = doc.root();
        let first = doc.append(root, "svg").expect("first");
        doc.remove(first).expect("remove");
        let second = doc.append(root, "svg").expect("second");

        assert_eq!(first.index(), second.index());
        assert_ne!(first, second);
        assert!(!doc.contains(first));
        assert!(doc.contains(second));
        assert_eq!(doc.live_count(), 2);
    }
}
