//! # Value Catalog
//!
//! Derives, for each script binding the template may read, a finite ordered
//! list of candidate literal values. The catalog is the only thing the rest
//! of the pipeline learns from `<script setup>`.
//!
//! ## Domain rules, in priority order
//!
//! 1. literal-union / boolean type annotation
//! 2. destructuring default (`const { a = 'x' } = defineProps<...>()`)
//! 3. `withDefaults` default
//! 4. literal or literal-array initializer, optionally wrapped in `ref(...)`
//! 5. for declared props only, the placeholder `mock-<prop>`
//!
//! Plain variables that match none of the rules are left out. Props come
//! first in the catalog, then variables, each in statement order.

use indexmap::IndexMap;
use oxc_allocator::Allocator;
use oxc_ast::ast::{
    BindingPattern, Expression, ObjectExpression, ObjectPattern,
    ObjectPropertyKind, PropertyKey, Statement, TSLiteral, TSSignature, TSType,
};
use oxc_parser::Parser;
use oxc_span::SourceType;
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::bindings::{
    callee_name, classify_bindings, find_define_props, member_name, BindingMap, TypeScope,
};
use crate::config::MOCK_PREFIX;

// ═══════════════════════════════════════════════════════════════════════════════
// VALUES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    Num(f64),
    Bool(bool),
}

impl fmt::Display for Literal {
    /// Formats the value the way JavaScript's `String(value)` does.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Str(s) => f.write_str(s),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Num(n) => f.write_str(&js_number(*n)),
        }
    }
}

fn js_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        (if n > 0.0 { "Infinity" } else { "-Infinity" }).to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if (1e-6..1e21).contains(&n.abs()) {
        format!("{n}")
    } else {
        // Exponent form with an explicit sign: `1e-7`, `1.5e+21`.
        let exp = format!("{n:e}");
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Literal),
    Array(Vec<Literal>),
}

impl Value {
    pub fn as_array(&self) -> Option<&[Literal]> {
        match self {
            Value::Array(items) => Some(items),
            Value::Scalar(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(lit) => lit.fmt(f),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    item.fmt(f)?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::Str(s.to_string())
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Literal::Num(n)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueCatalog {
    /// Binding name to its candidate values. Never holds an empty list.
    pub definitions: IndexMap<String, Vec<Value>>,
    /// Arrays taken from a bare literal, so known to be non-empty.
    pub static_arrays: HashSet<String>,
}

impl ValueCatalog {
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Replaces the domain of `name`, keeping its original position.
    pub fn define(&mut self, name: impl Into<String>, values: Vec<Value>) {
        if !values.is_empty() {
            self.definitions.insert(name.into(), values);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// BUILDER
// ═══════════════════════════════════════════════════════════════════════════════

/// Build the value catalog for the content of a `<script setup>` block.
///
/// Script that fails to parse yields an empty catalog.
pub fn build_catalog(script: &str) -> ValueCatalog {
    if script.trim().is_empty() {
        return ValueCatalog::default();
    }

    let allocator = Allocator::default();
    let source_type = SourceType::default().with_module(true).with_typescript(true);
    let ret = Parser::new(&allocator, script, source_type).parse();
    if !ret.errors.is_empty() {
        tracing::debug!(
            errors = ret.errors.len(),
            "script setup failed to parse, continuing with an empty value catalog"
        );
        return ValueCatalog::default();
    }

    let body = &ret.program.body;
    let types = TypeScope::collect(body);
    let bindings = classify_bindings(body, &types);

    let mut builder = CatalogBuilder {
        catalog: ValueCatalog::default(),
        types: &types,
    };
    for stmt in body.iter() {
        builder.collect_props(stmt);
    }
    for stmt in body.iter() {
        builder.collect_variables(stmt, &bindings);
    }

    tracing::trace!(
        bindings = builder.catalog.definitions.len(),
        static_arrays = builder.catalog.static_arrays.len(),
        "value catalog built"
    );
    builder.catalog
}

struct CatalogBuilder<'t, 's, 'a> {
    catalog: ValueCatalog,
    types: &'t TypeScope<'s, 'a>,
}

impl<'t, 's, 'a> CatalogBuilder<'t, 's, 'a> {
    fn collect_props(&mut self, stmt: &'s Statement<'a>) {
        match stmt {
            Statement::ExpressionStatement(expr_stmt) => {
                self.collect_define_props(&expr_stmt.expression, None);
            }
            Statement::VariableDeclaration(decl) => {
                for declarator in &decl.declarations {
                    let Some(init) = &declarator.init else {
                        continue;
                    };
                    let destructured = match &declarator.id {
                        BindingPattern::ObjectPattern(pattern) => Some(&**pattern),
                        _ => None,
                    };
                    self.collect_define_props(init, destructured);
                }
            }
            _ => {}
        }
    }

    fn collect_define_props(&mut self, expr: &'s Expression<'a>, destructured: Option<&ObjectPattern<'a>>) {
        let Some(props) = find_define_props(expr) else {
            return;
        };
        let Some(members) = props.members(self.types) else {
            return;
        };
        let destructure_defaults = destructured.map(destructure_defaults).unwrap_or_default();
        self.add_props(members, props.defaults, &destructure_defaults);
    }

    fn add_props(
        &mut self,
        members: &[TSSignature<'a>],
        defaults: Option<&ObjectExpression<'a>>,
        destructure_defaults: &HashMap<String, Literal>,
    ) {
        for member in members {
            let TSSignature::TSPropertySignature(sig) = member else {
                continue;
            };
            let Some(key) = member_name(member) else {
                continue;
            };

            let domain = sig
                .type_annotation
                .as_ref()
                .and_then(|ann| literals_from_type(&ann.type_annotation))
                .or_else(|| destructure_defaults.get(key).map(|lit| vec![lit.clone()]))
                .or_else(|| default_for(defaults, key).map(|lit| vec![lit]))
                .unwrap_or_else(|| vec![Literal::Str(format!("{MOCK_PREFIX}{key}"))]);

            self.catalog
                .define(key, domain.into_iter().map(Value::Scalar).collect());
        }
    }

    fn collect_variables(&mut self, stmt: &'s Statement<'a>, bindings: &BindingMap) {
        let Statement::VariableDeclaration(decl) = stmt else {
            return;
        };
        for declarator in &decl.declarations {
            let BindingPattern::BindingIdentifier(id) = &declarator.id else {
                continue;
            };
            let name = id.name.as_str();
            if !bindings.get(name).map_or(true, |kind| kind.holds_values()) {
                continue;
            }

            let typed = declarator
                .type_annotation
                .as_ref()
                .and_then(|ann| literals_from_type(&ann.type_annotation));
            if let Some(values) = typed {
                self.catalog
                    .define(name, values.into_iter().map(Value::Scalar).collect());
                continue;
            }

            match declarator.init.as_ref().and_then(initial_value) {
                Some(Initial::Scalar(lit)) => self.catalog.define(name, vec![Value::Scalar(lit)]),
                Some(Initial::Array { items, via_ref }) => {
                    self.catalog.define(name, vec![Value::Array(items)]);
                    if !via_ref {
                        self.catalog.static_arrays.insert(name.to_string());
                    }
                }
                None => {}
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LITERAL EXTRACTION
// ═══════════════════════════════════════════════════════════════════════════════

/// Literal values named by a type: unions of literal types and `boolean`.
fn literals_from_type(ty: &TSType<'_>) -> Option<Vec<Literal>> {
    let values = match ty {
        TSType::TSUnionType(union) => {
            let mut values = Vec::new();
            for member in &union.types {
                match member {
                    TSType::TSLiteralType(lit) => values.extend(literal_from_ts(&lit.literal)),
                    TSType::TSBooleanKeyword(_) => values.extend([Literal::Bool(true), Literal::Bool(false)]),
                    _ => {}
                }
            }
            values
        }
        TSType::TSLiteralType(lit) => literal_from_ts(&lit.literal).into_iter().collect(),
        TSType::TSBooleanKeyword(_) => vec![Literal::Bool(true), Literal::Bool(false)],
        _ => Vec::new(),
    };
    (!values.is_empty()).then_some(values)
}

fn literal_from_ts(literal: &TSLiteral<'_>) -> Option<Literal> {
    match literal {
        TSLiteral::StringLiteral(s) => Some(Literal::Str(s.value.to_string())),
        TSLiteral::NumericLiteral(n) => Some(Literal::Num(n.value)),
        TSLiteral::BooleanLiteral(b) => Some(Literal::Bool(b.value)),
        _ => None,
    }
}

fn literal_from_expr(expr: &Expression<'_>) -> Option<Literal> {
    match expr {
        Expression::StringLiteral(s) => Some(Literal::Str(s.value.to_string())),
        Expression::NumericLiteral(n) => Some(Literal::Num(n.value)),
        Expression::BooleanLiteral(b) => Some(Literal::Bool(b.value)),
        _ => None,
    }
}

/// String and number elements of an array literal; `None` if there are none.
fn array_literal(expr: &Expression<'_>) -> Option<Vec<Literal>> {
    let Expression::ArrayExpression(array) = expr else {
        return None;
    };
    let items: Vec<Literal> = array
        .elements
        .iter()
        .filter_map(|el| el.as_expression())
        .filter_map(|el| match el {
            Expression::StringLiteral(_) | Expression::NumericLiteral(_) => literal_from_expr(el),
            _ => None,
        })
        .collect();
    (!items.is_empty()).then_some(items)
}

enum Initial {
    Scalar(Literal),
    Array { items: Vec<Literal>, via_ref: bool },
}

fn initial_value(init: &Expression<'_>) -> Option<Initial> {
    if let Some(lit) = literal_from_expr(init) {
        return Some(Initial::Scalar(lit));
    }
    if let Expression::CallExpression(call) = init {
        if callee_name(call) != Some("ref") {
            return None;
        }
        let arg = call.arguments.first()?.as_expression()?;
        if let Some(lit) = literal_from_expr(arg) {
            return Some(Initial::Scalar(lit));
        }
        return array_literal(arg).map(|items| Initial::Array { items, via_ref: true });
    }
    array_literal(init).map(|items| Initial::Array {
        items,
        via_ref: false,
    })
}

fn default_for(defaults: Option<&ObjectExpression<'_>>, prop: &str) -> Option<Literal> {
    defaults?.properties.iter().find_map(|kind| match kind {
        ObjectPropertyKind::ObjectProperty(p) => match &p.key {
            PropertyKey::StaticIdentifier(id) if id.name.as_str() == prop => literal_from_expr(&p.value),
            _ => None,
        },
        ObjectPropertyKind::SpreadProperty(_) => None,
    })
}

fn destructure_defaults(pattern: &ObjectPattern<'_>) -> HashMap<String, Literal> {
    let mut defaults = HashMap::new();
    for prop in &pattern.properties {
        let PropertyKey::StaticIdentifier(key) = &prop.key else {
            continue;
        };
        if let BindingPattern::AssignmentPattern(assign) = &prop.value {
            if let Some(lit) = literal_from_expr(&assign.right) {
                defaults.insert(key.name.to_string(), lit);
            }
        }
    }
    defaults
}
