//! Minimal document model the page is rendered into.
//!
//! Elements are kept in document order. Each element owns a list of markup
//! fragments as its children, which is all the loaders and the language
//! controller need to manipulate.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Attribute that tags an element with a translation key.
pub const TRANSLATION_KEY_ATTR: &str = "data-lang-key";

/// How a translated string is written into an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Buttons and submit inputs; the string goes into `value`.
    Control,
    /// `<meta name="description">`; the string goes into `content`.
    MetaDescription,
    /// Everything else; the string replaces the inner markup.
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    id: Option<String>,
    tag: String,
    attributes: BTreeMap<String, String>,
    value: Option<String>,
    children: Vec<String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            id: None,
            tag: tag.into().to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            value: None,
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_key(self, key: impl Into<String>) -> Self {
        self.with_attr(TRANSLATION_KEY_ATTR, key)
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.set_inner_html(html);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn translation_key(&self) -> Option<&str> {
        self.attr(TRANSLATION_KEY_ATTR)
    }

    pub fn kind(&self) -> ElementKind {
        match self.tag.as_str() {
            "button" => ElementKind::Control,
            "input" if self.attr("type") == Some("submit") => ElementKind::Control,
            "meta" if self.attr("name") == Some("description") => ElementKind::MetaDescription,
            _ => ElementKind::Content,
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    pub fn children(&self) -> &[String] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    pub fn append_html(&mut self, html: impl Into<String>) {
        self.children.push(html.into());
    }

    pub fn set_inner_html(&mut self, html: impl Into<String>) {
        self.children.clear();
        let html = html.into();
        if !html.is_empty() {
            self.children.push(html);
        }
    }

    pub fn inner_html(&self) -> String {
        self.children.concat()
    }

    /// Writes a resolved translation into the slot matching this element's kind.
    pub fn write_translation(&mut self, text: &str) {
        match self.kind() {
            ElementKind::Control => self.set_value(text),
            ElementKind::MetaDescription => self.set_attr("content", text),
            ElementKind::Content => self.set_inner_html(text),
        }
    }

    /// The text a reader sees for this element: value, meta content or inner markup.
    pub fn display_text(&self) -> String {
        match self.kind() {
            ElementKind::Control => self.value.clone().unwrap_or_else(|| self.inner_html()),
            ElementKind::MetaDescription => self.attr("content").unwrap_or_default().to_string(),
            ElementKind::Content => self.inner_html(),
        }
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if let Some(id) = &self.id {
            out.push_str(&format!(" id=\"{id}\""));
        }
        for (name, value) in &self.attributes {
            out.push_str(&format!(" {name}=\"{value}\""));
        }
        if let Some(value) = &self.value {
            out.push_str(&format!(" value=\"{value}\""));
        }
        if is_void(&self.tag) {
            out.push('>');
            return;
        }
        out.push('>');
        for child in &self.children {
            out.push_str(child);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "meta" | "input" | "img" | "br" | "hr" | "link")
}

/// The whole page: the root language attribute plus elements in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lang: String,
    elements: Vec<Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: Element) -> &mut Self {
        self.elements.push(element);
        self
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn set_lang(&mut self, lang: impl Into<String>) {
        self.lang = lang.into();
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|el| el.id() == Some(id))
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.id() == Some(id))
    }

    /// Every element carrying a translation key, in document order.
    pub fn translatable(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|el| el.translation_key().is_some())
    }

    pub fn translatable_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.elements
            .iter_mut()
            .filter(|el| el.translation_key().is_some())
    }

    /// Serializes the page. Children are emitted as stored, without escaping.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>\n");
        if self.lang.is_empty() {
            out.push_str("<html>\n");
        } else {
            out.push_str(&format!("<html lang=\"{}\">\n", self.lang));
        }
        for element in &self.elements {
            element.write_html(&mut out);
            out.push('\n');
        }
        out.push_str("</html>\n");
        out
    }

    /// Reads a page layout from a TOML file.
    pub fn load_layout(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read page layout: {}", path.display()))?;
        Self::from_layout_str(&raw)
            .with_context(|| format!("failed to parse page layout: {}", path.display()))
    }

    /// Parses `[[element]]` tables (`id`, `tag`, `attributes`, `html`).
    pub fn from_layout_str(raw: &str) -> Result<Self> {
        let layout: Layout = toml::from_str(raw)?;
        let mut document = Document::new();
        for spec in layout.element {
            let mut element = Element::new(spec.tag);
            element.id = spec.id;
            element.attributes = spec.attributes;
            if let Some(html) = spec.html {
                element.set_inner_html(html);
            }
            document.push(element);
        }
        Ok(document)
    }
}

#[derive(Deserialize)]
struct Layout {
    #[serde(default)]
    element: Vec<ElementSpec>,
}

#[derive(Deserialize)]
struct ElementSpec {
    #[serde(default)]
    id: Option<String>,
    tag: String,
    #[serde(default)]
    attributes: BTreeMap<String, String>,
    #[serde(default)]
    html: Option<String>,
}
