//! Emission of the typed constants module.
//!
//! Renders a define mapping as a JavaScript module of documented,
//! type-annotated constant declarations for a Closure-style checking
//! toolchain. Every member carries a one-line doc comment asserting its
//! inferred type; structs are annotated as such and documented member by
//! member.

use std::collections::BTreeMap;

use codeweave_config::DefineValue;

/// Banner line opening the generated module.
pub const MODULE_BANNER: &str = "// Generated build-time constant definitions. Do not edit.\n";

/// Indentation unit for nested struct blocks.
const INDENT: &str = "    ";

/// Renders the complete constants module for a define mapping.
///
/// Top-level keys become exported, type-annotated constant declarations,
/// separated by one blank line. Iteration order of the mapping is already
/// deterministic, so identical input yields byte-identical output.
pub fn emit_defines_module(defines: &BTreeMap<String, DefineValue>) -> String {
    let mut out = String::from(MODULE_BANNER);
    for (key, value) in defines {
        out.push('\n');
        out.push_str(&doc_comment(value, 0));
        out.push_str(&format!("export const {} = {};\n", key, render_value(value, 0)));
    }
    out
}

/// Renders the one-line doc comment for a member of the given value.
///
/// Structs get a struct marker since their members are documented
/// individually; every other tag gets a typed-constant marker carrying the
/// inferred tag string.
fn doc_comment(value: &DefineValue, depth: usize) -> String {
    let indent = INDENT.repeat(depth);
    if value.is_struct() {
        format!("{}/** @struct */\n", indent)
    } else {
        format!("{}/** @const {{{}}} */\n", indent, value.type_tag())
    }
}

/// Renders a value literal at the given nesting depth.
///
/// Numbers and function text are emitted verbatim; function text in
/// particular is a deliberate trust boundary and is never validated or
/// escaped. Every other scalar is JSON-escaped.
fn render_value(value: &DefineValue, depth: usize) -> String {
    match value {
        DefineValue::Null => "null".to_string(),
        DefineValue::Bool(b) => b.to_string(),
        DefineValue::Number(n) => n.to_string(),
        DefineValue::String(s) => serde_json::Value::String(s.clone()).to_string(),
        DefineValue::Function(text) => text.clone(),
        DefineValue::Array(items) => {
            let rendered: Vec<String> = items
                .iter()
                .map(|item| render_value(item, depth))
                .collect();
            format!("[{}]", rendered.join(", "))
        }
        DefineValue::Struct(members) => render_struct(members, depth),
    }
}

/// Renders a struct as a brace-delimited block with documented members.
fn render_struct(members: &BTreeMap<String, DefineValue>, depth: usize) -> String {
    if members.is_empty() {
        return "{}".to_string();
    }

    let mut out = String::from("{\n");
    for (key, value) in members {
        out.push_str(&doc_comment(value, depth + 1));
        out.push_str(&format!(
            "{}{}: {},\n",
            INDENT.repeat(depth + 1),
            member_key(key),
            render_value(value, depth + 1)
        ));
    }
    out.push_str(&INDENT.repeat(depth));
    out.push('}');
    out
}

/// Renders a struct member key, quoting it when it is not a plain
/// identifier.
fn member_key(key: &str) -> String {
    let plain = !key.is_empty()
        && key
            .chars()
            .next()
            .map(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
            .unwrap_or(false)
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if plain {
        key.to_string()
    } else {
        serde_json::Value::String(key.to_string()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn defines(pairs: &[(&str, serde_json::Value)]) -> BTreeMap<String, DefineValue> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), DefineValue::from_json(value.clone())))
            .collect()
    }

    #[test]
    fn test_primitive_constants() {
        let module = emit_defines_module(&defines(&[("FOO", json!(1)), ("BAR", json!("x"))]));
        assert!(module.contains("/** @const {string} */\nexport const BAR = \"x\";\n"));
        assert!(module.contains("/** @const {number} */\nexport const FOO = 1;\n"));
    }

    #[test]
    fn test_heterogeneous_array_constant() {
        let module = emit_defines_module(&defines(&[("BAZ", json!([1, "a", null]))]));
        assert!(module.contains("export const BAZ = [1, \"a\", null];\n"));

        let tag_line = module
            .lines()
            .find(|line| line.starts_with("/** @const {Array<"))
            .expect("array tag line");
        let union = tag_line
            .trim_start_matches("/** @const {Array<")
            .trim_end_matches(">} */");
        let members: Vec<&str> = union.split('|').collect();
        assert_eq!(members.len(), 3);
        assert!(members.contains(&"number"));
        assert!(members.contains(&"string"));
        assert!(members.contains(&"null"));
    }

    #[test]
    fn test_empty_array_is_wildcard() {
        let module = emit_defines_module(&defines(&[("EMPTY", json!([]))]));
        assert!(module.contains("/** @const {Array<*>} */\nexport const EMPTY = [];\n"));
    }

    #[test]
    fn test_struct_members_documented_individually() {
        let module = emit_defines_module(&defines(&[(
            "CFG",
            json!({ "name": "demo", "limits": { "fps": 60 } }),
        )]));
        let expected = "\
/** @struct */
export const CFG = {
    /** @struct */
    limits: {
        /** @const {number} */
        fps: 60,
    },
    /** @const {string} */
    name: \"demo\",
};
";
        assert!(module.contains(expected), "module was:\n{}", module);
    }

    #[test]
    fn test_function_text_is_verbatim() {
        let mut map = BTreeMap::new();
        map.insert(
            "ON_BOOT".to_string(),
            DefineValue::function("function () { return \"raw\"; }"),
        );
        let module = emit_defines_module(&map);
        assert!(module.contains(
            "/** @const {Function} */\nexport const ON_BOOT = function () { return \"raw\"; };\n"
        ));
    }

    #[test]
    fn test_string_values_are_escaped() {
        let module = emit_defines_module(&defines(&[("MSG", json!("a \"quoted\" line\n"))]));
        assert!(module.contains(r#"export const MSG = "a \"quoted\" line\n";"#));
    }

    #[test]
    fn test_non_identifier_member_keys_are_quoted() {
        let module = emit_defines_module(&defines(&[("CFG", json!({ "not-plain": 1 }))]));
        assert!(module.contains("\"not-plain\": 1,"));
    }

    #[test]
    fn test_declarations_separated_by_blank_line() {
        let module = emit_defines_module(&defines(&[("A", json!(1)), ("B", json!(2))]));
        assert!(module.contains("export const A = 1;\n\n/** @const {number} */\nexport const B = 2;\n"));
    }

    #[test]
    fn test_emission_is_deterministic() {
        let mapping = defines(&[("B", json!([1, "a"])), ("A", json!({ "k": null }))]);
        assert_eq!(emit_defines_module(&mapping), emit_defines_module(&mapping));
    }

    #[test]
    fn test_empty_mapping_is_banner_only() {
        assert_eq!(emit_defines_module(&BTreeMap::new()), MODULE_BANNER);
    }
}
