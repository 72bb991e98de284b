use std::fmt::Write as _;

use crate::error::ChartResult;

use super::{Document, NodeId};

impl Document {
    /// Serializes `node` and its subtree as SVG/HTML text.
    ///
    /// Attributes and inline styles keep insertion order so snapshots are stable.
    pub fn to_markup(&self, node: NodeId) -> ChartResult<String> {
        let mut out = String::new();
        self.write_markup(node, &mut out)?;
        Ok(out)
    }

    fn write_markup(&self, node: NodeId, out: &mut String) -> ChartResult<()> {
        let element = self.get(node)?;
        out.push('<');
        out.push_str(element.tag());
        for (name, value) in element.attributes() {
            let _ = write!(out, " {name}=\"{}\"", escape(value));
        }
        let style = element
            .styles()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("; ");
        if !style.is_empty() {
            let _ = write!(out, " style=\"{}\"", escape(&style));
        }

        if element.text().is_none() && element.children().is_empty() {
            out.push_str("/>");
            return Ok(());
        }

        out.push('>');
        if let Some(text) = element.text() {
            out.push_str(&escape(text));
        }
        for &child in element.children() {
            self.write_markup(child, out)?;
        }
        let _ = write!(out, "</{}>", element.tag());
        Ok(())
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape;
    use crate::surface::{Document, DrawingHost};

    #[test]
    fn escapes_markup_sensitive_characters() {
        assert_eq!(escape(r#"a<b & "c">"#), "a&lt;b &amp; &quot;c&quot;&gt;");
    }

    #[test]
    fn writes_attributes_styles_and_children_in_order() {
        let mut doc = Document::new();
        let root = doc.root();
        let svg = doc
            .append_node(root, "svg")
            .and_then(|node| node.attr("width", 400))
            .and_then(|node| node.attr("height", 300))
            .map(|node| node.id())
            .expect("svg");
        doc.append_node(svg, "text")
            .and_then(|node| node.style("fill", "red"))
            .and_then(|node| node.text("1 < 2"))
            .expect("text");

        assert_eq!(
            doc.to_markup(svg).expect("markup"),
            r#"<svg width="400" height="300"><text style="fill: red">1 &lt; 2</text></svg>"#
        );
    }
}
