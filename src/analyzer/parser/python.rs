//! Python Module Evaluator
//!
//! Reduces the top-level statements of a Python module to [`Bindings`]
//! without running any code. Only the constructs projects use to declare
//! metadata are understood: literal assignments, small getter functions,
//! string joins, and re-exports from sibling modules. Everything else
//! becomes [`AttrValue::Opaque`].

use std::collections::HashMap;

use tree_sitter::Node;

use super::{Bindings, ImportRef, ImportResolver, ParseResult, Parser, create_ts_parser, get_node_text};
use crate::analyzer::value::{AttrValue, SeqKind};
use crate::types::{Result, SphinxMeError};

/// Call nesting limit for module-defined functions
const MAX_CALL_DEPTH: usize = 8;

pub struct PythonParser;

impl PythonParser {
    pub fn new() -> Result<Self> {
        // Validate that the language is available
        let _ = create_ts_parser(tree_sitter_python::LANGUAGE, "Python")?;
        Ok(Self)
    }
}

impl Parser for PythonParser {
    fn parse(
        &self,
        path: &str,
        content: &str,
        imports: &dyn ImportResolver,
    ) -> Result<ParseResult> {
        let mut parser =
            create_ts_parser(tree_sitter_python::LANGUAGE, "Python").map_err(|mut e| {
                if let SphinxMeError::Parse {
                    path: ref mut p, ..
                } = e
                {
                    *p = path.to_string();
                }
                e
            })?;

        let tree = parser
            .parse(content, None)
            .ok_or_else(|| SphinxMeError::Parse {
                message: "Failed to parse Python file".to_string(),
                path: path.to_string(),
            })?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(SphinxMeError::Parse {
                message: "Syntax error".to_string(),
                path: path.to_string(),
            });
        }

        let mut evaluator = Evaluator::new(content.as_bytes(), imports);
        evaluator.block(root);
        evaluator.finish();

        Ok(ParseResult {
            bindings: evaluator.bindings,
        })
    }
}

// =============================================================================
// Evaluator
// =============================================================================

#[derive(Clone, Copy)]
enum FnBody<'t> {
    Def(Node<'t>),
    Lambda(Node<'t>),
}

struct Scope<'s> {
    locals: Option<&'s Bindings>,
    globals: &'s Bindings,
}

impl<'s> Scope<'s> {
    fn module(globals: &'s Bindings) -> Self {
        Self {
            locals: None,
            globals,
        }
    }

    fn lookup(&self, name: &str) -> Option<&'s AttrValue> {
        self.locals
            .and_then(|l| l.get(name))
            .or_else(|| self.globals.get(name))
    }

    fn is_local(&self, name: &str) -> bool {
        self.locals.is_some_and(|l| l.contains_key(name))
    }
}

struct Evaluator<'t, 'r> {
    src: &'t [u8],
    imports: &'r dyn ImportResolver,
    bindings: Bindings,
    functions: HashMap<String, FnBody<'t>>,
}

impl<'t, 'r> Evaluator<'t, 'r> {
    fn new(src: &'t [u8], imports: &'r dyn ImportResolver) -> Self {
        Self {
            src,
            imports,
            bindings: Bindings::new(),
            functions: HashMap::new(),
        }
    }

    fn text(&self, node: Node<'t>) -> &'t str {
        get_node_text(node, self.src)
    }

    fn bind(&mut self, name: &str, value: AttrValue) {
        self.functions.remove(name);
        self.bindings.insert(name.to_string(), value);
    }

    fn bind_function(&mut self, name: &str, body: FnBody<'t>) {
        self.bindings
            .insert(name.to_string(), AttrValue::callable(None));
        self.functions.insert(name.to_string(), body);
    }

    /// Evaluate module functions against the final globals, so later
    /// lookups see their return values.
    fn finish(&mut self) {
        let resolved: Vec<(String, AttrValue)> = self
            .functions
            .iter()
            .map(|(name, body)| {
                let ret = self.invoke(*body, &self.bindings, 0);
                (name.clone(), ret)
            })
            .collect();

        for (name, ret) in resolved {
            let value = match ret {
                AttrValue::Opaque => AttrValue::callable(None),
                other => AttrValue::callable(Some(other)),
            };
            self.bindings.insert(name, value);
        }
    }

    // -------------------------------------------------------------------------
    // Statements
    // -------------------------------------------------------------------------

    fn block(&mut self, node: Node<'t>) {
        let mut cursor = node.walk();
        let statements: Vec<Node<'t>> = node.named_children(&mut cursor).collect();
        for stmt in statements {
            self.statement(stmt);
        }
    }

    fn statement(&mut self, stmt: Node<'t>) {
        match stmt.kind() {
            "expression_statement" => {
                let mut cursor = stmt.walk();
                let children: Vec<Node<'t>> = stmt.named_children(&mut cursor).collect();
                for child in children {
                    if child.kind() == "assignment" {
                        self.assignment(child);
                    }
                }
            }
            "function_definition" => self.function_definition(stmt),
            "class_definition" => {
                if let Some(name) = stmt.child_by_field_name("name") {
                    self.bind(self.text(name), AttrValue::Opaque);
                }
            }
            "decorated_definition" => {
                if let Some(def) = stmt.child_by_field_name("definition") {
                    self.statement(def);
                }
            }
            "import_from_statement" => self.import_from(stmt),
            "import_statement" => self.import(stmt),
            "try_statement" => {
                if let Some(body) = stmt.child_by_field_name("body") {
                    self.block(body);
                }
            }
            _ => {}
        }
    }

    /// Returns the assigned value so chained assignments share it
    fn assignment(&mut self, node: Node<'t>) -> Option<AttrValue> {
        let left = node.child_by_field_name("left")?;
        let right = node.child_by_field_name("right")?;

        if right.kind() == "lambda" && left.kind() == "identifier" {
            self.bind_function(self.text(left), FnBody::Lambda(right));
            return Some(AttrValue::callable(None));
        }

        let value = if right.kind() == "assignment" {
            self.assignment(right)?
        } else {
            self.expr(right, &Scope::module(&self.bindings), 0)
        };

        self.bind_target(left, value.clone());
        Some(value)
    }

    fn bind_target(&mut self, target: Node<'t>, value: AttrValue) {
        match target.kind() {
            "identifier" => self.bind(self.text(target), value),
            "pattern_list" | "tuple_pattern" | "list_pattern" => {
                let names = named_children(target);
                match value {
                    AttrValue::Seq { items, .. } if items.len() == names.len() => {
                        for (name, item) in names.into_iter().zip(items) {
                            self.bind_target(name, item);
                        }
                    }
                    _ => {
                        for name in names {
                            self.bind_target(name, AttrValue::Opaque);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn function_definition(&mut self, node: Node<'t>) {
        if let Some(name) = node.child_by_field_name("name") {
            self.bind_function(self.text(name), FnBody::Def(node));
        }
    }

    fn import(&mut self, node: Node<'t>) {
        let mut cursor = node.walk();
        let names: Vec<Node<'t>> = node.children_by_field_name("name", &mut cursor).collect();
        for name in names {
            let bound = match name.kind() {
                "aliased_import" => name.child_by_field_name("alias").map(|a| self.text(a)),
                _ => self.text(name).split('.').next(),
            };
            if let Some(bound) = bound {
                self.bind(bound, AttrValue::Opaque);
            }
        }
    }

    fn import_from(&mut self, node: Node<'t>) {
        let Some(module) = node.child_by_field_name("module_name") else {
            return;
        };

        let import = match module.kind() {
            "relative_import" => {
                let mut level = 0;
                let mut path = None;
                for child in named_children(module) {
                    match child.kind() {
                        "import_prefix" => level = self.text(child).matches('.').count(),
                        "dotted_name" => path = Some(self.text(child)),
                        _ => {}
                    }
                }
                ImportRef::relative(level, path)
            }
            _ => ImportRef::absolute(self.text(module)),
        };

        let target = self.imports.resolve(&import);
        tracing::trace!(?import, found = target.is_some(), "from-import");

        if named_children(node)
            .iter()
            .any(|c| c.kind() == "wildcard_import")
        {
            if let Some(target) = target {
                for (name, value) in target {
                    if !name.starts_with('_') {
                        self.bind(&name, value);
                    }
                }
            }
            return;
        }

        let mut cursor = node.walk();
        let names: Vec<Node<'t>> = node.children_by_field_name("name", &mut cursor).collect();
        for name in names {
            let (imported, alias) = match name.kind() {
                "aliased_import" => {
                    let imported = name.child_by_field_name("name").map(|n| self.text(n));
                    let alias = name.child_by_field_name("alias").map(|n| self.text(n));
                    match (imported, alias) {
                        (Some(i), Some(a)) => (i, a),
                        _ => continue,
                    }
                }
                _ => (self.text(name), self.text(name)),
            };
            let value = target
                .as_ref()
                .and_then(|t| t.get(imported).cloned())
                .unwrap_or(AttrValue::Opaque);
            self.bind(alias, value);
        }
    }

    // -------------------------------------------------------------------------
    // Calls
    // -------------------------------------------------------------------------

    fn invoke(&self, body: FnBody<'t>, globals: &Bindings, depth: usize) -> AttrValue {
        if depth > MAX_CALL_DEPTH {
            return AttrValue::Opaque;
        }

        match body {
            FnBody::Lambda(node) => {
                if node
                    .child_by_field_name("parameters")
                    .is_some_and(|p| has_required_params(p))
                {
                    return AttrValue::Opaque;
                }
                match node.child_by_field_name("body") {
                    Some(expr) => self.expr(expr, &Scope::module(globals), depth),
                    None => AttrValue::Opaque,
                }
            }
            FnBody::Def(node) => {
                if node
                    .child_by_field_name("parameters")
                    .is_some_and(|p| has_required_params(p))
                {
                    return AttrValue::Opaque;
                }
                let Some(body) = node.child_by_field_name("body") else {
                    return AttrValue::Opaque;
                };
                self.function_body(body, globals, depth)
            }
        }
    }

    fn function_body(&self, body: Node<'t>, globals: &Bindings, depth: usize) -> AttrValue {
        let mut locals = Bindings::new();

        for stmt in named_children(body) {
            match stmt.kind() {
                "return_statement" => {
                    let scope = Scope {
                        locals: Some(&locals),
                        globals,
                    };
                    return match named_children(stmt).first() {
                        Some(expr) => self.expr(*expr, &scope, depth),
                        None => AttrValue::Null,
                    };
                }
                "expression_statement" => {
                    for child in named_children(stmt) {
                        match child.kind() {
                            "string" | "concatenated_string" => {}
                            "assignment" => {
                                let (Some(left), Some(right)) = (
                                    child.child_by_field_name("left"),
                                    child.child_by_field_name("right"),
                                ) else {
                                    return AttrValue::Opaque;
                                };
                                if left.kind() != "identifier" {
                                    return AttrValue::Opaque;
                                }
                                let scope = Scope {
                                    locals: Some(&locals),
                                    globals,
                                };
                                let value = self.expr(right, &scope, depth);
                                locals.insert(self.text(left).to_string(), value);
                            }
                            _ => return AttrValue::Opaque,
                        }
                    }
                }
                "pass_statement" | "comment" => {}
                _ => return AttrValue::Opaque,
            }
        }

        AttrValue::Null
    }

    fn call(&self, node: Node<'t>, scope: &Scope<'_>, depth: usize) -> AttrValue {
        let (Some(function), Some(arguments)) = (
            node.child_by_field_name("function"),
            node.child_by_field_name("arguments"),
        ) else {
            return AttrValue::Opaque;
        };

        match function.kind() {
            "identifier" => {
                let name = self.text(function);
                let args = positional_args(arguments);
                let no_args = args.as_ref().is_some_and(|a| a.is_empty());

                if !scope.is_local(name) {
                    if let Some(body) = self.functions.get(name) {
                        if no_args {
                            return self.invoke(*body, scope.globals, depth + 1);
                        }
                        return AttrValue::Opaque;
                    }
                    if name == "str" && scope.lookup(name).is_none() {
                        return match args.as_deref() {
                            Some([arg]) => self
                                .expr(*arg, scope, depth)
                                .to_text()
                                .map(AttrValue::Str)
                                .unwrap_or(AttrValue::Opaque),
                            Some([]) => AttrValue::str(""),
                            _ => AttrValue::Opaque,
                        };
                    }
                }

                match scope.lookup(name) {
                    Some(value) if value.is_callable() && no_args => {
                        value.call()
                    }
                    _ => AttrValue::Opaque,
                }
            }
            "attribute" => {
                let (Some(object), Some(attribute)) = (
                    function.child_by_field_name("object"),
                    function.child_by_field_name("attribute"),
                ) else {
                    return AttrValue::Opaque;
                };
                if self.text(attribute) != "join" {
                    return AttrValue::Opaque;
                }
                let AttrValue::Str(separator) = self.expr(object, scope, depth) else {
                    return AttrValue::Opaque;
                };
                self.join(&separator, arguments, scope, depth)
            }
            _ => AttrValue::Opaque,
        }
    }

    /// `sep.join(...)` over a string sequence, `map(str, seq)`, or a
    /// `str(v) for v in seq` comprehension
    fn join(
        &self,
        separator: &str,
        arguments: Node<'t>,
        scope: &Scope<'_>,
        depth: usize,
    ) -> AttrValue {
        let parts = match arguments.kind() {
            "generator_expression" => self.comprehension_texts(arguments, scope, depth),
            _ => match positional_args(arguments).as_deref() {
                Some([arg]) => self.join_operand(*arg, scope, depth),
                _ => None,
            },
        };

        parts
            .map(|p| AttrValue::Str(p.join(separator)))
            .unwrap_or(AttrValue::Opaque)
    }

    fn join_operand(&self, arg: Node<'t>, scope: &Scope<'_>, depth: usize) -> Option<Vec<String>> {
        match arg.kind() {
            "generator_expression" | "list_comprehension" => {
                self.comprehension_texts(arg, scope, depth)
            }
            "call" if self.is_map_str(arg) => {
                let args = positional_args(arg.child_by_field_name("arguments")?)?;
                let AttrValue::Seq { items, .. } = self.expr(*args.get(1)?, scope, depth) else {
                    return None;
                };
                items.iter().map(AttrValue::to_text).collect()
            }
            _ => {
                let AttrValue::Seq { items, .. } = self.expr(arg, scope, depth) else {
                    return None;
                };
                items
                    .into_iter()
                    .map(|item| match item {
                        AttrValue::Str(s) => Some(s),
                        _ => None,
                    })
                    .collect()
            }
        }
    }

    fn is_map_str(&self, call: Node<'t>) -> bool {
        let function = call.child_by_field_name("function");
        let args = call
            .child_by_field_name("arguments")
            .and_then(positional_args);
        match (function, args.as_deref()) {
            (Some(f), Some([conv, _])) => {
                self.text(f) == "map" && self.text(*conv) == "str"
            }
            _ => false,
        }
    }

    fn comprehension_texts(
        &self,
        node: Node<'t>,
        scope: &Scope<'_>,
        depth: usize,
    ) -> Option<Vec<String>> {
        let body = node.child_by_field_name("body")?;
        let clauses: Vec<Node<'t>> = named_children(node)
            .into_iter()
            .filter(|c| c.kind().ends_with("_clause"))
            .collect();
        let [clause] = clauses.as_slice() else {
            return None;
        };
        if clause.kind() != "for_in_clause" {
            return None;
        }

        let var = clause.child_by_field_name("left")?;
        let source = clause.child_by_field_name("right")?;
        if var.kind() != "identifier" {
            return None;
        }
        let var = self.text(var);

        let AttrValue::Seq { items, .. } = self.expr(source, scope, depth) else {
            return None;
        };

        let converts = match body.kind() {
            "identifier" if self.text(body) == var => false,
            "call" => {
                let f = body.child_by_field_name("function")?;
                let args = positional_args(body.child_by_field_name("arguments")?)?;
                match args.as_slice() {
                    [arg] if self.text(f) == "str" && self.text(*arg) == var => true,
                    _ => return None,
                }
            }
            _ => return None,
        };

        items
            .iter()
            .map(|item| match item {
                AttrValue::Str(s) => Some(s.clone()),
                other if converts => other.to_text(),
                _ => None,
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Expressions
    // -------------------------------------------------------------------------

    fn expr(&self, node: Node<'t>, scope: &Scope<'_>, depth: usize) -> AttrValue {
        match node.kind() {
            "string" => self.string(node),
            "concatenated_string" => {
                let mut out = String::new();
                for part in named_children(node) {
                    match self.string(part) {
                        AttrValue::Str(s) => out.push_str(&s),
                        _ => return AttrValue::Opaque,
                    }
                }
                AttrValue::Str(out)
            }
            "integer" => parse_int(self.text(node)),
            "float" => AttrValue::Float(self.text(node).to_string()),
            "true" => AttrValue::Bool(true),
            "false" => AttrValue::Bool(false),
            "none" => AttrValue::Null,
            "identifier" => scope
                .lookup(self.text(node))
                .cloned()
                .unwrap_or(AttrValue::Opaque),
            "parenthesized_expression" => match named_children(node).first() {
                Some(inner) => self.expr(*inner, scope, depth),
                None => AttrValue::Opaque,
            },
            "tuple" | "expression_list" => AttrValue::Seq {
                kind: SeqKind::Tuple,
                items: self.items(node, scope, depth),
            },
            "list" => AttrValue::Seq {
                kind: SeqKind::List,
                items: self.items(node, scope, depth),
            },
            "unary_operator" => {
                let operator = node.child_by_field_name("operator").map(|o| self.text(o));
                let Some(argument) = node.child_by_field_name("argument") else {
                    return AttrValue::Opaque;
                };
                match (operator, self.expr(argument, scope, depth)) {
                    (Some("-"), AttrValue::Int(i)) => {
                        i.checked_neg().map(AttrValue::Int).unwrap_or(AttrValue::Opaque)
                    }
                    (Some("-"), AttrValue::Float(f)) => AttrValue::Float(format!("-{}", f)),
                    (Some("+"), v @ (AttrValue::Int(_) | AttrValue::Float(_))) => v,
                    _ => AttrValue::Opaque,
                }
            }
            "binary_operator" => self.binary(node, scope, depth),
            "call" => self.call(node, scope, depth),
            _ => AttrValue::Opaque,
        }
    }

    fn items(&self, node: Node<'t>, scope: &Scope<'_>, depth: usize) -> Vec<AttrValue> {
        named_children(node)
            .into_iter()
            .map(|item| self.expr(item, scope, depth))
            .collect()
    }

    fn binary(&self, node: Node<'t>, scope: &Scope<'_>, depth: usize) -> AttrValue {
        let (Some(left), Some(operator), Some(right)) = (
            node.child_by_field_name("left"),
            node.child_by_field_name("operator"),
            node.child_by_field_name("right"),
        ) else {
            return AttrValue::Opaque;
        };

        if self.text(operator) != "+" {
            return AttrValue::Opaque;
        }

        match (
            self.expr(left, scope, depth),
            self.expr(right, scope, depth),
        ) {
            (AttrValue::Str(a), AttrValue::Str(b)) => AttrValue::Str(a + &b),
            (AttrValue::Int(a), AttrValue::Int(b)) => a
                .checked_add(b)
                .map(AttrValue::Int)
                .unwrap_or(AttrValue::Opaque),
            (
                AttrValue::Seq {
                    kind: ka,
                    items: mut a,
                },
                AttrValue::Seq { kind: kb, items: b },
            ) if ka == kb => {
                a.extend(b);
                AttrValue::Seq { kind: ka, items: a }
            }
            _ => AttrValue::Opaque,
        }
    }

    fn string(&self, node: Node<'t>) -> AttrValue {
        if node.kind() != "string" {
            return AttrValue::Opaque;
        }
        if named_children(node)
            .iter()
            .any(|c| c.kind() == "interpolation")
        {
            return AttrValue::Opaque;
        }
        parse_string_literal(self.text(node))
            .map(AttrValue::Str)
            .unwrap_or(AttrValue::Opaque)
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .collect();
    children
}

/// Positional arguments of a call, or `None` when keyword or splat
/// arguments are present
fn positional_args(arguments: Node<'_>) -> Option<Vec<Node<'_>>> {
    if arguments.kind() != "argument_list" {
        return None;
    }
    let args = named_children(arguments);
    if args.iter().any(|a| {
        matches!(
            a.kind(),
            "keyword_argument" | "list_splat" | "dictionary_splat"
        )
    }) {
        return None;
    }
    Some(args)
}

fn has_required_params(parameters: Node<'_>) -> bool {
    named_children(parameters).iter().any(|p| match p.kind() {
        "identifier" => true,
        "typed_parameter" => named_children(*p)
            .first()
            .is_some_and(|inner| inner.kind() == "identifier"),
        _ => false,
    })
}

fn parse_int(text: &str) -> AttrValue {
    let cleaned: String = text
        .trim_end_matches(['l', 'L'])
        .chars()
        .filter(|c| *c != '_')
        .collect::<String>()
        .to_ascii_lowercase();

    let parsed = if let Some(hex) = cleaned.strip_prefix("0x") {
        i64::from_str_radix(hex, 16)
    } else if let Some(oct) = cleaned.strip_prefix("0o") {
        i64::from_str_radix(oct, 8)
    } else if let Some(bin) = cleaned.strip_prefix("0b") {
        i64::from_str_radix(bin, 2)
    } else {
        cleaned.parse::<i64>()
    };

    parsed.map(AttrValue::Int).unwrap_or(AttrValue::Opaque)
}

/// Decode a single Python string literal, prefix and quotes included
pub fn parse_string_literal(literal: &str) -> Option<String> {
    let quote_at = literal.find(['\'', '"'])?;
    let (prefix, quoted) = literal.split_at(quote_at);
    let raw = prefix.chars().any(|c| c == 'r' || c == 'R');

    let quote_len = if quoted.starts_with("\"\"\"") || quoted.starts_with("'''") {
        3
    } else {
        1
    };
    if quoted.len() < quote_len * 2 {
        return None;
    }
    let body = &quoted[quote_len..quoted.len() - quote_len];

    Some(if raw {
        body.to_string()
    } else {
        unescape(body)
    })
}

fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\n') => {}
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('a') => out.push('\x07'),
            Some('b') => out.push('\x08'),
            Some('f') => out.push('\x0c'),
            Some('v') => out.push('\x0b'),
            Some(kind @ ('x' | 'u' | 'U')) => {
                let width = match kind {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let digits: String = (0..width).filter_map(|_| chars.next()).collect();
                match u32::from_str_radix(&digits, 16)
                    .ok()
                    .and_then(char::from_u32)
                {
                    Some(decoded) if digits.len() == width => out.push(decoded),
                    _ => {
                        out.push('\\');
                        out.push(kind);
                        out.push_str(&digits);
                    }
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::parser::NoImports;

    fn parse(source: &str) -> Bindings {
        PythonParser::new()
            .unwrap()
            .parse("test.py", source, &NoImports)
            .unwrap()
            .bindings
    }

    #[test]
    fn test_string_assignment() {
        let b = parse("__version__ = '1.2.3'\n__author__ = \"Jane Doe\"\n");
        assert_eq!(b["__version__"], AttrValue::str("1.2.3"));
        assert_eq!(b["__author__"], AttrValue::str("Jane Doe"));
    }

    #[test]
    fn test_annotated_and_chained_assignment() {
        let b = parse("__version__: str = '2.0'\nversion = VERSION = '3.1'\n");
        assert_eq!(b["__version__"], AttrValue::str("2.0"));
        assert_eq!(b["version"], AttrValue::str("3.1"));
        assert_eq!(b["VERSION"], AttrValue::str("3.1"));
    }

    #[test]
    fn test_tuple_assignment() {
        let b = parse("VERSION = (1, 2, 3)\nLIST = [0, 'dev']\n");
        assert_eq!(
            b["VERSION"],
            AttrValue::tuple(vec![
                AttrValue::Int(1),
                AttrValue::Int(2),
                AttrValue::Int(3)
            ])
        );
        assert_eq!(
            b["LIST"],
            AttrValue::list(vec![AttrValue::Int(0), AttrValue::str("dev")])
        );
    }

    #[test]
    fn test_getter_function() {
        let b = parse("def get_version():\n    \"\"\"Doc.\"\"\"\n    return '4.5'\n");
        assert_eq!(b["get_version"].call(), AttrValue::str("4.5"));
    }

    #[test]
    fn test_function_reads_later_global() {
        let b = parse("def get_version():\n    return __version__\n\n__version__ = '0.9'\n");
        assert_eq!(b["get_version"].call(), AttrValue::str("0.9"));
    }

    #[test]
    fn test_function_with_required_params_is_opaque() {
        let b = parse("def get_version(v):\n    return '1'\n");
        assert!(b["get_version"].is_callable());
        assert_eq!(b["get_version"].call(), AttrValue::Opaque);
    }

    #[test]
    fn test_function_with_default_params() {
        let b = parse("def get_version(full=False):\n    return '1.0'\n");
        assert_eq!(b["get_version"].call(), AttrValue::str("1.0"));
    }

    #[test]
    fn test_lambda() {
        let b = parse("get_version = lambda: '5.0'\n");
        assert_eq!(b["get_version"].call(), AttrValue::str("5.0"));
    }

    #[test]
    fn test_join_map_str() {
        let b = parse("VERSION = (1, 4, 0)\n__version__ = '.'.join(map(str, VERSION))\n");
        assert_eq!(b["__version__"], AttrValue::str("1.4.0"));
    }

    #[test]
    fn test_join_generator() {
        let b = parse("VERSION = (2, 0)\n__version__ = '.'.join(str(v) for v in VERSION)\n");
        assert_eq!(b["__version__"], AttrValue::str("2.0"));
    }

    #[test]
    fn test_module_level_call() {
        let b = parse("def get_version():\n    return '7.1'\n__version__ = get_version()\n");
        assert_eq!(b["__version__"], AttrValue::str("7.1"));
    }

    #[test]
    fn test_function_locals() {
        let b = parse("def get_version():\n    v = (3, 1)\n    return '.'.join(map(str, v))\n");
        assert_eq!(b["get_version"].call(), AttrValue::str("3.1"));
    }

    #[test]
    fn test_control_flow_in_function_is_opaque() {
        let b = parse("def get_version():\n    if X:\n        return '1'\n    return '2'\n");
        assert_eq!(b["get_version"].call(), AttrValue::Opaque);
    }

    #[test]
    fn test_string_forms() {
        let b = parse(
            "a = r'c:\\new'\nb = 'x' 'y'\nc = '''tri'''\nd = f'{a}'\ne = u'\\u00e9'\nf = 'a' + 'b'\n",
        );
        assert_eq!(b["a"], AttrValue::str("c:\\new"));
        assert_eq!(b["b"], AttrValue::str("xy"));
        assert_eq!(b["c"], AttrValue::str("tri"));
        assert_eq!(b["d"], AttrValue::Opaque);
        assert_eq!(b["e"], AttrValue::str("é"));
        assert_eq!(b["f"], AttrValue::str("ab"));
    }

    #[test]
    fn test_numbers() {
        let b = parse("a = 1_000\nb = -2\nc = 0x10\nd = 1.5\n");
        assert_eq!(b["a"], AttrValue::Int(1000));
        assert_eq!(b["b"], AttrValue::Int(-2));
        assert_eq!(b["c"], AttrValue::Int(16));
        assert_eq!(b["d"], AttrValue::Float("1.5".to_string()));
    }

    #[test]
    fn test_integer_overflow_is_opaque() {
        let b = parse("a = -9223372036854775807 + -1
b = -(-9223372036854775807 + -1)
");
        assert_eq!(b["a"], AttrValue::Int(i64::MIN));
        assert_eq!(b["b"], AttrValue::Opaque);
    }

    #[test]
    fn test_reassignment_replaces_function() {
        let b = parse("def version():\n    return '1'\nversion = '2'\n");
        assert_eq!(b["version"], AttrValue::str("2"));
    }

    #[test]
    fn test_classes_and_imports_are_opaque() {
        let b = parse("import os.path\nimport json as j\nclass VERSION:\n    pass\n");
        assert_eq!(b["os"], AttrValue::Opaque);
        assert_eq!(b["j"], AttrValue::Opaque);
        assert_eq!(b["VERSION"], AttrValue::Opaque);
    }

    #[test]
    fn test_try_body_is_evaluated() {
        let b = parse("try:\n    __version__ = '1.1'\nexcept ImportError:\n    __version__ = 'unknown'\n");
        assert_eq!(b["__version__"], AttrValue::str("1.1"));
    }

    #[test]
    fn test_syntax_error() {
        let result = PythonParser::new()
            .unwrap()
            .parse("bad.py", "def (:\n", &NoImports);
        assert!(matches!(result, Err(SphinxMeError::Parse { .. })));
    }

    #[test]
    fn test_parse_string_literal() {
        assert_eq!(parse_string_literal("'a\\tb'").as_deref(), Some("a\tb"));
        assert_eq!(parse_string_literal("b\"x\"").as_deref(), Some("x"));
        assert_eq!(parse_string_literal("\"\"").as_deref(), Some(""));
        assert_eq!(parse_string_literal("abc"), None);
    }
}
