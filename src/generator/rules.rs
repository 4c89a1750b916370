//! Per-tag rendering rules registered with `html2md`. Tags without a rule
//! here fall through to html2md's built-in handlers.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use html2md::{Handle, NodeData, StructuredPrinter, TagHandler, TagHandlerFactory};

use super::html2md::{ConverterOptions, HeadingStyle, LinkStyle};

/// Link targets collected while rendering reference-style links, in order of
/// first appearance.
pub type References = Rc<RefCell<Vec<String>>>;

struct RuleFactory<F>(F);

impl<F> TagHandlerFactory for RuleFactory<F>
where
    F: Fn() -> Box<dyn TagHandler>,
{
    fn instantiate(&self) -> Box<dyn TagHandler> {
        (self.0)()
    }
}

fn factory<F>(f: F) -> Box<dyn TagHandlerFactory>
where
    F: Fn() -> Box<dyn TagHandler> + 'static,
{
    Box::new(RuleFactory(f))
}

/// Builds the handler table for one conversion.
pub fn rule_set(
    options: &ConverterOptions,
    references: &References,
) -> HashMap<String, Box<dyn TagHandlerFactory>> {
    let mut rules: HashMap<String, Box<dyn TagHandlerFactory>> = HashMap::new();

    for tag in ["strong", "b"] {
        let delimiter = options.strong_delimiter.clone();
        rules.insert(
            tag.to_string(),
            factory(move || -> Box<dyn TagHandler> {
                Box::new(DelimiterHandler::new(&delimiter))
            }),
        );
    }
    for tag in ["em", "i"] {
        let delimiter = options.em_delimiter.clone();
        rules.insert(
            tag.to_string(),
            factory(move || -> Box<dyn TagHandler> {
                Box::new(DelimiterHandler::new(&delimiter))
            }),
        );
    }

    for tag in ["h1", "h2", "h3", "h4", "h5", "h6"] {
        let style = options.heading_style;
        rules.insert(
            tag.to_string(),
            factory(move || -> Box<dyn TagHandler> {
                Box::new(HeadingHandler::new(style))
            }),
        );
    }

    let style = options.link_style;
    let refs = Rc::clone(references);
    rules.insert(
        "a".to_string(),
        factory(move || -> Box<dyn TagHandler> {
            Box::new(LinkHandler::new(style, Rc::clone(&refs)))
        }),
    );

    // explicit overrides win over every rule above
    for (tag, replacement) in &options.tag_overrides {
        let replacement = replacement.clone();
        rules.insert(
            tag.to_ascii_lowercase(),
            factory(move || -> Box<dyn TagHandler> {
                Box::new(ReplaceHandler::new(&replacement))
            }),
        );
    }

    rules
}

fn tag_name(tag: &Handle) -> String {
    match tag.data {
        NodeData::Element { ref name, .. } => name.local.to_string(),
        _ => String::new(),
    }
}

fn tag_attr(tag: &Handle, attr_name: &str) -> Option<String> {
    match tag.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == attr_name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// Wraps the element's content in a fixed delimiter, e.g. `**bold**`.
struct DelimiterHandler {
    delimiter: String,
}

impl DelimiterHandler {
    fn new(delimiter: &str) -> Self {
        Self {
            delimiter: delimiter.to_string(),
        }
    }
}

impl TagHandler for DelimiterHandler {
    fn handle(&mut self, _tag: &Handle, printer: &mut StructuredPrinter) {
        printer.append_str(&self.delimiter);
    }

    fn after_handle(&mut self, printer: &mut StructuredPrinter) {
        printer.append_str(&self.delimiter);
    }
}

struct HeadingHandler {
    style: HeadingStyle,
    level: usize,
    start: usize,
}

impl HeadingHandler {
    fn new(style: HeadingStyle) -> Self {
        Self {
            style,
            level: 1,
            start: 0,
        }
    }

    fn underlined(&self) -> bool {
        self.style == HeadingStyle::Setext && self.level <= 2
    }
}

impl TagHandler for HeadingHandler {
    fn handle(&mut self, tag: &Handle, printer: &mut StructuredPrinter) {
        self.level = tag_name(tag)
            .trim_start_matches('h')
            .parse()
            .unwrap_or(1);

        printer.append_str("\n\n");
        if !self.underlined() {
            printer.append_str(&"#".repeat(self.level));
            printer.append_str(" ");
        }
        self.start = printer.data.len();
    }

    fn after_handle(&mut self, printer: &mut StructuredPrinter) {
        if self.underlined() {
            let text = printer.data.get(self.start..).unwrap_or_default();
            let width = text.trim().chars().count().max(3);
            let marker = if self.level == 1 { "=" } else { "-" };
            printer.append_str("\n");
            printer.append_str(&marker.repeat(width));
        }
        printer.append_str("\n\n");
    }
}

struct LinkHandler {
    style: LinkStyle,
    references: References,
    href: Option<String>,
    start: usize,
}

impl LinkHandler {
    fn new(style: LinkStyle, references: References) -> Self {
        Self {
            style,
            references,
            href: None,
            start: 0,
        }
    }
}

impl TagHandler for LinkHandler {
    fn handle(&mut self, tag: &Handle, printer: &mut StructuredPrinter) {
        self.href = tag_attr(tag, "href").filter(|href| !href.trim().is_empty());
        self.start = printer.data.len();
    }

    fn after_handle(&mut self, printer: &mut StructuredPrinter) {
        let Some(href) = self.href.take() else {
            // no target, keep the text only
            return;
        };
        if !printer.data.is_char_boundary(self.start) {
            return;
        }
        let text = printer.data.split_off(self.start);
        let text = text.trim();

        match self.style {
            LinkStyle::Inlined => {
                printer.append_str(&format!("[{}]({})", text, href));
            }
            LinkStyle::Referenced => {
                let mut references = self.references.borrow_mut();
                let index = match references.iter().position(|known| *known == href) {
                    Some(pos) => pos + 1,
                    None => {
                        references.push(href);
                        references.len()
                    }
                };
                printer.append_str(&format!("[{}][{}]", text, index));
            }
        }
    }
}

/// Replaces the element and everything inside it with literal text.
struct ReplaceHandler {
    replacement: String,
}

impl ReplaceHandler {
    fn new(replacement: &str) -> Self {
        Self {
            replacement: replacement.to_string(),
        }
    }
}

impl TagHandler for ReplaceHandler {
    fn handle(&mut self, _tag: &Handle, printer: &mut StructuredPrinter) {
        printer.append_str(&self.replacement);
    }

    fn after_handle(&mut self, _printer: &mut StructuredPrinter) {}

    fn skip_descendants(&self) -> bool {
        true
    }
}

/// Renders the collected reference targets as a trailing definition list.
pub fn reference_list(references: &[String]) -> String {
    references
        .iter()
        .enumerate()
        .map(|(i, href)| format!("[{}]: {}", i + 1, href))
        .collect::<Vec<String>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_list() {
        let refs = vec!["https://a.example".to_string(), "/b".to_string()];
        assert_eq!(reference_list(&refs), "[1]: https://a.example\n[2]: /b");
        assert_eq!(reference_list(&[]), "");
    }

    #[test]
    fn test_rule_set_registers_overrides() {
        let mut options = ConverterOptions::default();
        options
            .tag_overrides
            .insert("HR".to_string(), "\n***\n".to_string());
        let refs = References::default();
        let rules = rule_set(&options, &refs);

        for tag in ["strong", "b", "em", "i", "h1", "h6", "a", "br", "hr"] {
            assert!(rules.contains_key(tag), "missing rule for {}", tag);
        }
    }
}
