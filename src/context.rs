//! Render contexts: one concrete value per catalog binding.

use indexmap::IndexMap;

use crate::catalog::Value;

/// Binding name to the single value it takes in one rendering.
pub type RenderContext = IndexMap<String, Value>;

/// Cartesian product of the catalog domains, in key order then value order.
///
/// No bindings yields exactly one empty context.
pub fn generate_contexts(definitions: &IndexMap<String, Vec<Value>>) -> Vec<RenderContext> {
    definitions
        .iter()
        .fold(vec![RenderContext::new()], |contexts, (key, values)| {
            contexts
                .iter()
                .flat_map(|ctx| {
                    values.iter().map(move |value| {
                        let mut next = ctx.clone();
                        next.insert(key.clone(), value.clone());
                        next
                    })
                })
                .collect()
        })
}
