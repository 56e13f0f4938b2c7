//! Append-only markup writer and the write plan renderer.

use crate::codec::plan::{Emitted, Out, Plan};
use crate::codec::reference;
use crate::schema::Placement;

const DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Builds a markup document one event at a time.
///
/// Elements that receive neither text nor children are closed as `<x/>`.
#[derive(Debug, Default)]
pub struct XmlWriter {
    out: String,
    stack: Vec<String>,
    tag_open: bool,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the document with the `<?xml ...?>` declaration.
    pub fn with_declaration() -> Self {
        Self {
            out: DECLARATION.to_string(),
            ..Self::default()
        }
    }

    pub fn start_element(&mut self, name: &str) {
        self.close_start_tag();
        self.out.push('<');
        self.out.push_str(name);
        self.stack.push(name.to_string());
        self.tag_open = true;
    }

    /// Adds an attribute to the element just started.
    ///
    /// Ignored once the element has text or children.
    pub fn attribute(&mut self, name: &str, value: &str) {
        if !self.tag_open {
            return;
        }
        self.out.push(' ');
        self.out.push_str(name);
        self.out.push_str("=\"");
        escape_into(&mut self.out, value, true);
        self.out.push('"');
    }

    pub fn text(&mut self, text: &str) {
        self.close_start_tag();
        escape_into(&mut self.out, text, false);
    }

    pub fn end_element(&mut self) {
        let Some(name) = self.stack.pop() else {
            return;
        };
        if self.tag_open {
            self.out.push_str("/>");
            self.tag_open = false;
        } else {
            self.out.push_str("</");
            self.out.push_str(&name);
            self.out.push('>');
        }
    }

    /// Writes `<name>text</name>`.
    pub fn element(&mut self, name: &str, text: &str) {
        self.start_element(name);
        self.text(text);
        self.end_element();
    }

    /// Closes any open elements and returns the document.
    pub fn finish(mut self) -> String {
        while !self.stack.is_empty() {
            self.end_element();
        }
        self.out
    }

    fn close_start_tag(&mut self) {
        if self.tag_open {
            self.out.push('>');
            self.tag_open = false;
        }
    }
}

/// Escapes markup characters. Carriage returns, and inside attribute values
/// also newlines and tabs, are written as character references so parsing
/// gives them back unchanged.
fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\r' => out.push_str("&#13;"),
            '\n' if attribute => out.push_str("&#10;"),
            '\t' if attribute => out.push_str("&#9;"),
            c => out.push(c),
        }
    }
}

/// Renders a record plan as the element `name`.
///
/// Attributes go first, then the text content, then child elements in plan
/// order.
pub(crate) fn write_record(writer: &mut XmlWriter, name: &str, plan: &Plan) {
    writer.start_element(name);
    for emitted in plan.placed(Placement::Attribute) {
        if let Out::Scalar(scalar) = &emitted.value {
            writer.attribute(emitted.key, &scalar.text());
        }
    }
    for emitted in plan.placed(Placement::Content) {
        if let Out::Scalar(scalar) = &emitted.value {
            writer.text(&scalar.text());
        }
    }
    for emitted in plan.placed(Placement::Element) {
        write_emitted(writer, emitted);
    }
    writer.end_element();
}

fn write_emitted(writer: &mut XmlWriter, emitted: &Emitted) {
    match &emitted.value {
        Out::Scalar(scalar) => writer.element(emitted.key, &scalar.text()),
        Out::Reference(r) => reference::write_xml(writer, emitted.key, r),
        Out::Records { item, items } => {
            writer.start_element(emitted.key);
            writer.attribute("type", "array");
            for plan in items {
                write_record(writer, item, plan);
            }
            writer.end_element();
        }
        Out::List { item, values } => {
            writer.start_element(emitted.key);
            writer.attribute("type", "array");
            for value in values {
                writer.element(item, &value.text());
            }
            writer.end_element();
        }
    }
}
