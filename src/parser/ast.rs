//! Tree-sitter extraction strategy
//!
//! Walks the full Java grammar tree, so declarations are recognized
//! regardless of nesting depth or line breaks in the header. Each type
//! declaration node yields one group; every method declaration in its
//! subtree is attributed to it, which scopes nested types correctly where
//! the line scanner cannot.

use super::{SourceParser, TypeGroup};
use crate::record::{ClassRecord, MethodRecord, Visibility};
use crate::{Error, Result};
use std::sync::Mutex;
use tree_sitter::{Node, Parser};

/// Declaration node kinds that open a type.
///
/// The grammar also exposes `record_declaration`; the record model's kind
/// field is an open tag, so it passes through as "record".
const TYPE_KINDS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
];

/// Tree-sitter based extraction strategy
pub struct AstParser {
    parser: Mutex<Parser>,
}

impl AstParser {
    /// Create a new AST parser with the Java grammar loaded
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_java::LANGUAGE.into())
            .map_err(|e| Error::Grammar(e.to_string()))?;
        Ok(Self {
            parser: Mutex::new(parser),
        })
    }

    /// Extract a class record from a type declaration node.
    ///
    /// A node without a name identifier is a classification failure and
    /// yields `None`; the caller skips it and keeps walking.
    fn classify_type(node: Node, source: &str, path: &str) -> Option<ClassRecord> {
        let name = node
            .child_by_field_name("name")?
            .utf8_text(source.as_bytes())
            .ok()?;
        let kind = node.kind().trim_end_matches("_declaration");
        let line = node.start_position().row as u32 + 1;

        let mut record = ClassRecord::new(name, path, line, kind);

        if let Some(superclass) = node.child_by_field_name("superclass") {
            if let Ok(text) = superclass.utf8_text(source.as_bytes()) {
                let supertype = text.trim_start_matches("extends").trim();
                if !supertype.is_empty() {
                    record = record.with_superclass(supertype);
                }
            }
        }

        if let Some(interfaces) = node.child_by_field_name("interfaces") {
            if let Ok(text) = interfaces.utf8_text(source.as_bytes()) {
                let list: Vec<String> = text
                    .trim_start_matches("implements")
                    .split(',')
                    .map(|part| part.trim().to_string())
                    .filter(|part| !part.is_empty())
                    .collect();
                if !list.is_empty() {
                    record = record.with_interfaces(list);
                }
            }
        }

        Some(record)
    }

    /// Extract a method record from a `method_declaration` node.
    fn classify_method(node: Node, source: &str) -> Option<MethodRecord> {
        let name = node
            .child_by_field_name("name")?
            .utf8_text(source.as_bytes())
            .ok()?;
        let line = node.start_position().row as u32 + 1;

        let mut record = MethodRecord::new(name, line);

        if let Some(type_node) = node.child_by_field_name("type") {
            if let Ok(text) = type_node.utf8_text(source.as_bytes()) {
                record = record.with_return_type(text.trim());
            }
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() != "modifiers" {
                continue;
            }
            let mut modifier_cursor = child.walk();
            for modifier in child.children(&mut modifier_cursor) {
                match modifier.kind() {
                    "static" => record = record.with_static(true),
                    "public" | "private" | "protected" => {
                        if let Ok(vis) = modifier
                            .utf8_text(source.as_bytes())
                            .unwrap_or_default()
                            .parse::<Visibility>()
                        {
                            record = record.with_visibility(vis);
                        }
                    }
                    _ => {}
                }
            }
        }

        Some(record)
    }

    /// Collect nodes of the given kinds in pre-order.
    fn collect_nodes<'tree>(node: Node<'tree>, kinds: &[&str], out: &mut Vec<Node<'tree>>) {
        if kinds.contains(&node.kind()) {
            out.push(node);
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            Self::collect_nodes(child, kinds, out);
        }
    }
}

impl SourceParser for AstParser {
    fn strategy_name(&self) -> &str {
        "ast"
    }

    fn parse(&self, path: &str, source: &str) -> Result<Vec<TypeGroup>> {
        let tree = {
            let mut parser = self
                .parser
                .lock()
                .map_err(|_| Error::Parse("tree-sitter parser lock poisoned".to_string()))?;
            parser
                .parse(source, None)
                .ok_or_else(|| Error::Parse(format!("tree-sitter could not parse {}", path)))?
        };

        let mut type_nodes = Vec::new();
        Self::collect_nodes(tree.root_node(), TYPE_KINDS, &mut type_nodes);

        let mut groups = Vec::new();
        for type_node in type_nodes {
            let Some(class) = Self::classify_type(type_node, source, path) else {
                tracing::debug!(
                    "{}:{}: unnamed {} skipped",
                    path,
                    type_node.start_position().row + 1,
                    type_node.kind()
                );
                continue;
            };
            let mut group = TypeGroup::new(class);

            let mut method_nodes = Vec::new();
            Self::collect_nodes(type_node, &["method_declaration"], &mut method_nodes);
            for method_node in method_nodes {
                match Self::classify_method(method_node, source) {
                    Some(method) => group.methods.push(method),
                    None => tracing::debug!(
                        "{}:{}: unnamed method skipped",
                        path,
                        method_node.start_position().row + 1
                    ),
                }
            }

            groups.push(group);
        }
        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{KIND_CLASS, KIND_INTERFACE, KIND_RECORD};

    fn parse(source: &str) -> Vec<TypeGroup> {
        AstParser::new().unwrap().parse("Test.java", source).unwrap()
    }

    #[test]
    fn test_empty_class() {
        let groups = parse("public class Empty { }");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].class.name, "Empty");
        assert_eq!(groups[0].class.kind, KIND_CLASS);
        assert_eq!(groups[0].class.line, 1);
        assert!(groups[0].methods.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_malformed_input_yields_nothing() {
        let groups = parse("%%% this is not java at all ((( }");
        assert!(groups.is_empty());
    }

    #[test]
    fn test_interface_with_method() {
        let groups = parse("public interface I { void m(); }");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].class.kind, KIND_INTERFACE);
        let method = &groups[0].methods[0];
        assert_eq!(method.name, "m");
        assert_eq!(method.return_type.as_deref(), Some("void"));
        assert!(!method.is_static);
    }

    #[test]
    fn test_static_and_visibility() {
        let groups = parse("public class U { public static double pi() { return 3.14; } }");
        let method = &groups[0].methods[0];
        assert_eq!(method.name, "pi");
        assert_eq!(method.visibility, Some(Visibility::Public));
        assert!(method.is_static);
        assert_eq!(method.return_type.as_deref(), Some("double"));
    }

    #[test]
    fn test_extends_and_implements() {
        let source = "\
public class Child extends Parent implements Runnable, Comparable<Child> {
}
";
        let groups = parse(source);
        let class = &groups[0].class;
        assert_eq!(class.superclass.as_deref(), Some("Parent"));
        assert_eq!(
            class.interfaces,
            Some(vec!["Runnable".to_string(), "Comparable<Child>".to_string()])
        );
    }

    #[test]
    fn test_header_split_across_lines() {
        // The line scanner cannot see this declaration; the tree walker
        // consumes the whole node.
        let source = "\
public class Wide
        extends Base {
    void m() { }
}
";
        let groups = parse(source);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].class.name, "Wide");
        assert_eq!(groups[0].class.superclass.as_deref(), Some("Base"));
        assert_eq!(groups[0].methods.len(), 1);
    }

    #[test]
    fn test_nested_type_subtree_scoping() {
        let source = "\
class Outer {
    class Inner {
        void innerMethod() { }
    }
    void outerMethod() { }
}
";
        let groups = parse(source);
        assert_eq!(groups.len(), 2);

        // Pre-order: outer first, then the nested type.
        assert_eq!(groups[0].class.name, "Outer");
        assert_eq!(groups[1].class.name, "Inner");

        // Inner's group holds exactly its own method.
        let inner_names: Vec<&str> = groups[1].methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(inner_names, vec!["innerMethod"]);

        // Outer's subtree contains both declarations.
        let outer_names: Vec<&str> = groups[0].methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(outer_names, vec!["innerMethod", "outerMethod"]);
    }

    #[test]
    fn test_record_declaration_kind_passes_through() {
        let groups = parse("public record Point(int x, int y) { }");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].class.kind, KIND_RECORD);
        assert_eq!(groups[0].class.name, "Point");
    }

    #[test]
    fn test_no_false_positive_on_expression_lines() {
        // `word word(` inside a body fools the line scanner, not the tree.
        let source = "\
class Caller {
    void run() {
        Object obj = new Object();
    }
}
";
        let groups = parse(source);
        assert_eq!(groups[0].class.name, "Caller");
        let names: Vec<&str> = groups[0].methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["run"]);
    }
}
