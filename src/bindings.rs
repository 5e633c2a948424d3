//! Script setup bindings: identifier roles and prop declarations.
//!
//! Classifies every top-level binding of `<script setup>` the way the Vue
//! compiler does, and locates `defineProps` declarations together with the
//! type literal that describes them.

use indexmap::IndexMap;
use oxc_ast::ast::{
    BindingPattern, CallExpression, Declaration, Expression, ObjectExpression, PropertyKey,
    Statement, TSSignature, TSType, TSTypeName, VariableDeclaration, VariableDeclarationKind,
};
use serde::Serialize;
use std::collections::HashMap;

/// Role of a top-level script setup binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BindingKind {
    /// Declared prop (type member of `defineProps`, or destructured from it).
    Props,
    /// `reactive()` results and the props object itself.
    SetupReactiveConst,
    /// `const` initialized with a literal.
    LiteralConst,
    /// `const` whose initializer can never be a ref; functions and classes.
    SetupConst,
    /// `ref()`, `computed()` and friends.
    SetupRef,
    /// Any other `const`.
    SetupMaybeRef,
    /// `let` / `var`.
    SetupLet,
}

impl BindingKind {
    /// Whether a binding of this role may carry literal candidate values.
    pub fn holds_values(self) -> bool {
        !matches!(self, BindingKind::Props | BindingKind::SetupReactiveConst)
    }
}

pub type BindingMap = IndexMap<String, BindingKind>;

const REF_CALLS: &[&str] = &["ref", "shallowRef", "computed", "customRef", "toRef"];
const REACTIVE_CALLS: &[&str] = &["reactive", "shallowReactive", "defineProps", "withDefaults"];

// ═══════════════════════════════════════════════════════════════════════════════
// TYPE SCOPE
// ═══════════════════════════════════════════════════════════════════════════════

/// Top-level interfaces and type-literal aliases, by name.
pub struct TypeScope<'s, 'a> {
    literals: HashMap<String, &'s [TSSignature<'a>]>,
}

impl<'s, 'a> TypeScope<'s, 'a> {
    pub fn collect(body: &'s [Statement<'a>]) -> Self {
        let mut literals = HashMap::new();
        for stmt in body {
            match stmt {
                Statement::TSInterfaceDeclaration(decl) => {
                    let members: &'s [TSSignature<'a>] = &decl.body.body;
                    literals.insert(decl.id.name.to_string(), members);
                }
                Statement::TSTypeAliasDeclaration(alias) => {
                    if let TSType::TSTypeLiteral(lit) = &alias.type_annotation {
                        let members: &'s [TSSignature<'a>] = &lit.members;
                        literals.insert(alias.id.name.to_string(), members);
                    }
                }
                Statement::ExportNamedDeclaration(export) => match &export.declaration {
                    Some(Declaration::TSInterfaceDeclaration(decl)) => {
                        let members: &'s [TSSignature<'a>] = &decl.body.body;
                        literals.insert(decl.id.name.to_string(), members);
                    }
                    Some(Declaration::TSTypeAliasDeclaration(alias)) => {
                        if let TSType::TSTypeLiteral(lit) = &alias.type_annotation {
                            let members: &'s [TSSignature<'a>] = &lit.members;
                            literals.insert(alias.id.name.to_string(), members);
                        }
                    }
                    _ => {}
                },
                _ => {}
            }
        }
        Self { literals }
    }

    /// Resolves a `defineProps` type argument to its members: an inline type
    /// literal, or a reference to a collected interface / alias.
    pub fn resolve(&self, ty: &'s TSType<'a>) -> Option<&'s [TSSignature<'a>]> {
        match ty {
            TSType::TSTypeLiteral(lit) => {
                let members: &'s [TSSignature<'a>] = &lit.members;
                Some(members)
            }
            TSType::TSTypeReference(reference) => match &reference.type_name {
                TSTypeName::IdentifierReference(id) => self.literals.get(id.name.as_str()).copied(),
                _ => None,
            },
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DEFINE PROPS
// ═══════════════════════════════════════════════════════════════════════════════

pub struct DefinePropsCall<'s, 'a> {
    pub call: &'s CallExpression<'a>,
    /// Second argument of a wrapping `withDefaults(...)`.
    pub defaults: Option<&'s ObjectExpression<'a>>,
}

impl<'s, 'a> DefinePropsCall<'s, 'a> {
    pub fn members(&self, types: &TypeScope<'s, 'a>) -> Option<&'s [TSSignature<'a>]> {
        let params = &self.call.type_arguments.as_ref()?.params;
        types.resolve(params.first()?)
    }
}

pub fn callee_name<'s>(call: &'s CallExpression<'_>) -> Option<&'s str> {
    match &call.callee {
        Expression::Identifier(id) => Some(id.name.as_str()),
        _ => None,
    }
}

/// Matches `defineProps<T>()` and `withDefaults(defineProps<T>(), { ... })`.
pub fn find_define_props<'s, 'a>(expr: &'s Expression<'a>) -> Option<DefinePropsCall<'s, 'a>> {
    let Expression::CallExpression(call) = expr else {
        return None;
    };
    match callee_name(call)? {
        "defineProps" => Some(DefinePropsCall {
            call,
            defaults: None,
        }),
        "withDefaults" => {
            let inner = call.arguments.first()?.as_expression()?;
            let Expression::CallExpression(inner_call) = inner else {
                return None;
            };
            let defaults = call
                .arguments
                .get(1)
                .and_then(|arg| arg.as_expression())
                .and_then(|arg| match arg {
                    Expression::ObjectExpression(obj) => Some(&**obj),
                    _ => None,
                });
            Some(DefinePropsCall {
                call: inner_call,
                defaults,
            })
        }
        _ => None,
    }
}

pub fn member_name<'s>(member: &'s TSSignature<'_>) -> Option<&'s str> {
    match member {
        TSSignature::TSPropertySignature(sig) => match &sig.key {
            PropertyKey::StaticIdentifier(id) => Some(id.name.as_str()),
            _ => None,
        },
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CLASSIFICATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Classify every top-level binding of a script setup program.
pub fn classify_bindings<'s, 'a>(body: &'s [Statement<'a>], types: &TypeScope<'s, 'a>) -> BindingMap {
    let mut bindings = BindingMap::new();
    for stmt in body {
        match stmt {
            Statement::ExpressionStatement(expr_stmt) => {
                if let Some(props) = find_define_props(&expr_stmt.expression) {
                    register_props(&props, types, &mut bindings);
                }
            }
            Statement::VariableDeclaration(decl) => {
                classify_declaration(decl, types, &mut bindings);
            }
            Statement::FunctionDeclaration(func) => {
                if let Some(id) = &func.id {
                    bindings.insert(id.name.to_string(), BindingKind::SetupConst);
                }
            }
            Statement::ClassDeclaration(class) => {
                if let Some(id) = &class.id {
                    bindings.insert(id.name.to_string(), BindingKind::SetupConst);
                }
            }
            _ => {}
        }
    }
    bindings
}

fn register_props<'s, 'a>(props: &DefinePropsCall<'s, 'a>, types: &TypeScope<'s, 'a>, bindings: &mut BindingMap) {
    for name in props.members(types).unwrap_or_default().iter().filter_map(member_name) {
        bindings.insert(name.to_string(), BindingKind::Props);
    }
}

fn classify_declaration<'s, 'a>(
    decl: &'s VariableDeclaration<'a>,
    types: &TypeScope<'s, 'a>,
    bindings: &mut BindingMap,
) {
    let is_const = decl.kind == VariableDeclarationKind::Const;
    for declarator in &decl.declarations {
        let props = declarator.init.as_ref().and_then(find_define_props);
        if let Some(props) = &props {
            register_props(props, types, bindings);
        }

        match &declarator.id {
            BindingPattern::BindingIdentifier(id) => {
                let kind = classify_init(is_const, declarator.init.as_ref());
                bindings.insert(id.name.to_string(), kind);
            }
            pattern => {
                let kind = match (&props, is_const) {
                    (Some(_), _) => BindingKind::Props,
                    (None, true) => BindingKind::SetupMaybeRef,
                    (None, false) => BindingKind::SetupLet,
                };
                let mut names = Vec::new();
                collect_binding_names(pattern, &mut names);
                for name in names {
                    bindings.insert(name, kind);
                }
            }
        }
    }
}

fn classify_init(is_const: bool, init: Option<&Expression<'_>>) -> BindingKind {
    if !is_const {
        return BindingKind::SetupLet;
    }
    let Some(init) = init else {
        return BindingKind::SetupConst;
    };
    match init {
        Expression::CallExpression(call) => match callee_name(call) {
            Some(name) if REACTIVE_CALLS.contains(&name) => BindingKind::SetupReactiveConst,
            Some(name) if REF_CALLS.contains(&name) => BindingKind::SetupRef,
            _ => BindingKind::SetupMaybeRef,
        },
        Expression::StringLiteral(_)
        | Expression::NumericLiteral(_)
        | Expression::BooleanLiteral(_)
        | Expression::NullLiteral(_)
        | Expression::BigIntLiteral(_) => BindingKind::LiteralConst,
        Expression::TemplateLiteral(tpl) if tpl.expressions.is_empty() => BindingKind::LiteralConst,
        Expression::ObjectExpression(_)
        | Expression::ArrayExpression(_)
        | Expression::FunctionExpression(_)
        | Expression::ArrowFunctionExpression(_)
        | Expression::ClassExpression(_)
        | Expression::TemplateLiteral(_)
        | Expression::UnaryExpression(_)
        | Expression::BinaryExpression(_)
        | Expression::UpdateExpression(_) => BindingKind::SetupConst,
        _ => BindingKind::SetupMaybeRef,
    }
}

fn collect_binding_names(pattern: &BindingPattern<'_>, names: &mut Vec<String>) {
    match pattern {
        BindingPattern::BindingIdentifier(id) => names.push(id.name.to_string()),
        BindingPattern::ObjectPattern(obj) => {
            for prop in &obj.properties {
                collect_binding_names(&prop.value, names);
            }
            if let Some(rest) = &obj.rest {
                collect_binding_names(&rest.argument, names);
            }
        }
        BindingPattern::ArrayPattern(arr) => {
            for pattern in arr.elements.iter().flatten() {
                collect_binding_names(pattern, names);
            }
            if let Some(rest) = &arr.rest {
                collect_binding_names(&rest.argument, names);
            }
        }
        BindingPattern::AssignmentPattern(assign) => collect_binding_names(&assign.left, names),
    }
}
