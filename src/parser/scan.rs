//! Line-oriented regex extraction strategy
//!
//! Scans a source unit one physical line at a time, recognizing type
//! declarations and method signatures with compiled patterns and binding
//! each method to the most recently opened type. The enclosing-type state
//! is a local accumulator scoped to one `parse` call; nothing leaks across
//! files or threads.
//!
//! Known limitations, accepted for this strategy:
//! - declaration headers split across lines are not recognized
//! - methods of a nested type are folded into the nearest preceding open
//!   type's group, since braces are not tracked
//! - multi-token expressions matching `word word(` can produce false
//!   positive method records; the AST strategy has neither problem

use super::{SourceParser, TypeGroup};
use crate::Result;
use crate::record::{ClassRecord, MethodRecord, Visibility};
use once_cell::sync::Lazy;
use regex::Regex;

static TYPE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^\s*
        (?:(?:public|protected|private|abstract|final|static)\s+)*  # leading modifiers, any order/subset
        (class|interface|enum)\s+(\w+)                              # declaration kind and name
        (?:\s+extends\s+(\w+))?                                     # optional supertype
        (?:\s+implements\s+([\w\s,]+))?                             # optional interface list
        ",
    )
    .expect("type pattern is valid")
});

static METHOD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        (?:(public|private|protected)\s+|(static)\s+)*  # visibility and static, order-independent
        ([\w.<>\[\]]+)\s+                               # return type, incl. generics/arrays
        (\w+)\s*                                        # method name
        \(                                              # opening of the parameter list
        ",
    )
    .expect("method pattern is valid")
});

/// Regex/state-machine extraction strategy
#[derive(Debug, Default)]
pub struct ScanParser;

impl ScanParser {
    /// Create a new scan parser
    pub fn new() -> Self {
        Self
    }

    /// Recognize a type declaration opening on this line.
    ///
    /// Returns `None` when the line does not open a declaration; this is
    /// not an error.
    fn classify_type(line: &str, path: &str, line_no: u32) -> Option<ClassRecord> {
        let caps = TYPE_PATTERN.captures(line)?;

        let kind = caps.get(1)?.as_str();
        let name = caps.get(2)?.as_str();

        let mut record = ClassRecord::new(name, path, line_no, kind);
        if let Some(superclass) = caps.get(3) {
            record = record.with_superclass(superclass.as_str());
        }
        if let Some(list) = caps.get(4) {
            let interfaces: Vec<String> = list
                .as_str()
                .split(',')
                .map(|part| part.trim().to_string())
                .filter(|part| !part.is_empty())
                .collect();
            record = record.with_interfaces(interfaces);
        }
        Some(record)
    }

    /// Recognize a method signature on this line.
    ///
    /// The pattern searches anywhere in the line, so single-line bodies
    /// like `interface I { void m(); }` still yield their method.
    fn classify_method(line: &str, line_no: u32) -> Option<MethodRecord> {
        let caps = METHOD_PATTERN.captures(line)?;

        let name = caps.get(4)?.as_str();
        let return_type = caps.get(3)?.as_str();

        let mut record = MethodRecord::new(name, line_no)
            .with_return_type(return_type)
            .with_static(caps.get(2).is_some());
        if let Some(vis) = caps.get(1) {
            if let Ok(visibility) = vis.as_str().parse::<Visibility>() {
                record = record.with_visibility(visibility);
            }
        }
        Some(record)
    }
}

impl SourceParser for ScanParser {
    fn strategy_name(&self) -> &str {
        "scan"
    }

    fn parse(&self, path: &str, source: &str) -> Result<Vec<TypeGroup>> {
        let mut groups = Vec::new();
        // The enclosing-type accumulator: flushed when the next type opens
        // or input ends.
        let mut open: Option<TypeGroup> = None;

        for (idx, line) in source.lines().enumerate() {
            let line_no = idx as u32 + 1;

            if let Some(class) = Self::classify_type(line, path, line_no) {
                if let Some(finished) = open.replace(TypeGroup::new(class)) {
                    groups.push(finished);
                }
            }

            if let Some(method) = Self::classify_method(line, line_no) {
                match open.as_mut() {
                    Some(group) => group.methods.push(method),
                    // A method before any type declaration has no owner
                    // and is dropped by policy, not errored.
                    None => tracing::debug!(
                        "{}:{}: method-like line outside any type, dropped",
                        path,
                        line_no
                    ),
                }
            }
        }

        if let Some(finished) = open {
            groups.push(finished);
        }
        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{KIND_CLASS, KIND_ENUM, KIND_INTERFACE};

    fn parse(source: &str) -> Vec<TypeGroup> {
        ScanParser::new().parse("Test.java", source).unwrap()
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
    fn test_no_declarations() {
        let groups = parse("// just a comment\nint x = 1;\n");
        assert!(groups.is_empty());
    }

    #[test]
    fn test_two_sibling_classes_in_order() {
        let source = "\
class First {
    void one() { }
}
class Second {
    void two() { }
}
";
        let groups = parse(source);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].class.name, "First");
        assert_eq!(groups[0].methods.len(), 1);
        assert_eq!(groups[0].methods[0].name, "one");
        assert_eq!(groups[1].class.name, "Second");
        assert_eq!(groups[1].methods.len(), 1);
        assert_eq!(groups[1].methods[0].name, "two");
    }

    #[test]
    fn test_interface_with_method() {
        let groups = parse("public interface I { void m(); }");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].class.kind, KIND_INTERFACE);
        let method = &groups[0].methods[0];
        assert_eq!(method.name, "m");
        assert_eq!(method.return_type.as_deref(), Some("void"));
        assert_eq!(method.visibility, None);
        assert!(!method.is_static);
    }

    #[test]
    fn test_static_and_visibility_are_independent() {
        let groups = parse("public class U { public static double pi() { return 3.14; } }");
        let method = &groups[0].methods[0];
        assert_eq!(method.name, "pi");
        assert_eq!(method.visibility, Some(Visibility::Public));
        assert!(method.is_static);
        assert_eq!(method.return_type.as_deref(), Some("double"));
    }

    #[test]
    fn test_static_before_visibility() {
        let groups = parse("class C {\n    static protected int n() { return 0; }\n}");
        let method = &groups[0].methods[0];
        assert_eq!(method.visibility, Some(Visibility::Protected));
        assert!(method.is_static);
    }

    #[test]
    fn test_extends_and_implements() {
        let groups = parse("public class Child extends Parent implements Runnable, Serializable {");
        let class = &groups[0].class;
        assert_eq!(class.superclass.as_deref(), Some("Parent"));
        assert_eq!(
            class.interfaces,
            Some(vec!["Runnable".to_string(), "Serializable".to_string()])
        );
    }

    #[test]
    fn test_enum_declaration() {
        let groups = parse("enum Color {\n    RED, GREEN;\n    String hex() { return null; }\n}");
        assert_eq!(groups[0].class.kind, KIND_ENUM);
        assert_eq!(groups[0].methods.len(), 1);
        assert_eq!(groups[0].methods[0].name, "hex");
    }

    #[test]
    fn test_method_before_any_type_is_dropped() {
        let source = "\
void orphan() { }
class Late {
    void kept() { }
}
";
        let groups = parse(source);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].methods.len(), 1);
        assert_eq!(groups[0].methods[0].name, "kept");
    }

    #[test]
    fn test_generic_and_array_return_types() {
        let source = "\
class Box {
    public List<String> names() { return null; }
    int[] sizes() { return null; }
}
";
        let groups = parse(source);
        let methods = &groups[0].methods;
        assert_eq!(methods[0].return_type.as_deref(), Some("List<String>"));
        assert_eq!(methods[1].return_type.as_deref(), Some("int[]"));
    }

    #[test]
    fn test_line_numbers_are_one_based() {
        let source = "\n\nclass Later {\n    void m() { }\n}\n";
        let groups = parse(source);
        assert_eq!(groups[0].class.line, 3);
        assert_eq!(groups[0].methods[0].line, 4);
    }

    // Residual overmatch of the line pattern: `new Object(` reads as
    // `type name(`. Precision/recall tradeoff of this strategy; the AST
    // strategy does not produce the extra record.
    #[test]
    fn test_known_overmatch_on_expression_lines() {
        let source = "\
class Caller {
    void run() {
        Object obj = new Object();
    }
}
";
        let groups = parse(source);
        let names: Vec<&str> = groups[0].methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["run", "Object"]);
    }

    // Nested types fold into the enclosing group: the scanner has no brace
    // tracking, so Inner's method never returns to Outer. This asymmetry
    // with the AST strategy is intentional.
    #[test]
    fn test_nested_type_methods_fold_into_inner_group() {
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
        assert_eq!(groups[0].class.name, "Outer");
        assert!(groups[0].methods.is_empty());
        assert_eq!(groups[1].class.name, "Inner");
        let names: Vec<&str> = groups[1].methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["innerMethod", "outerMethod"]);
    }
}
