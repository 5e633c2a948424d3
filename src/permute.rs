//! # Permutation Engine
//!
//! Expands grouped segments under one render context into every structurally
//! distinct instantiation of a sibling list. Segments are folded left to
//! right: starting from a single empty partial result, each segment
//! multiplies the running set by its own possibilities.
//!
//! Possibilities per segment:
//!
//! - static element: one per combination of its permuted children
//! - `v-if` chain: one per branch and child combination; the implicit else
//!   contributes an empty possibility, and a `<template>` branch is unwrapped
//! - `v-show`: every child combination present, then the hidden case
//! - `v-for`: the empty case (unless the source is known to be non-empty),
//!   then either one instance per known item or a singular and a plural
//!   instance bound to `mock-<iterator>`
//!
//! Instantiations borrow the template tree and never modify it.

use std::collections::HashSet;

use crate::catalog::Literal;
use crate::config::{MOCK_PREFIX, TEMPLATE_TAG};
use crate::context::RenderContext;
use crate::ir::{ElementNode, TemplateNode};
use crate::segment::{group_segments, Branch, ForBlock, Segment};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopBinding {
    pub iterator: String,
    pub value: String,
}

/// One concrete instantiation of a template node.
#[derive(Debug, Clone, PartialEq)]
pub enum PermutedNode<'t> {
    Element {
        element: &'t ElementNode,
        binding: Option<LoopBinding>,
        children: Vec<PermutedNode<'t>>,
    },
    /// Text, comment or interpolation, rendered as is.
    Leaf(&'t TemplateNode),
}

/// Ordered siblings of one scenario at one nesting level.
pub type PermutationResult<'t> = Vec<PermutedNode<'t>>;

pub struct PermutationEngine<'c> {
    context: &'c RenderContext,
    static_arrays: &'c HashSet<String>,
}

impl<'c> PermutationEngine<'c> {
    pub fn new(context: &'c RenderContext, static_arrays: &'c HashSet<String>) -> Self {
        Self {
            context,
            static_arrays,
        }
    }

    /// Every instantiation of `nodes` under this engine's context.
    pub fn permute<'t>(&self, nodes: &'t [TemplateNode]) -> Vec<PermutationResult<'t>> {
        group_segments(nodes)
            .iter()
            .fold(vec![Vec::new()], |results, segment| match segment {
                Segment::Static(node) => self.expand_static(*node, results),
                Segment::IfBlock(branches) => self.expand_if(branches, results),
                Segment::ShowBlock(element) => self.expand_show(*element, results),
                Segment::ForBlock(block) => self.expand_for(block, results),
            })
    }

    fn expand_static<'t>(
        &self,
        node: &'t TemplateNode,
        results: Vec<PermutationResult<'t>>,
    ) -> Vec<PermutationResult<'t>> {
        let TemplateNode::Element(element) = node else {
            return results
                .into_iter()
                .map(|mut res| {
                    res.push(PermutedNode::Leaf(node));
                    res
                })
                .collect();
        };

        let child_perms = self.permute(&element.children);
        let mut next = Vec::with_capacity(results.len() * child_perms.len());
        for res in &results {
            for children in &child_perms {
                next.push(with_node(res, instance(element, None, children)));
            }
        }
        next
    }

    fn expand_if<'t>(
        &self,
        branches: &[Branch<'t>],
        results: Vec<PermutationResult<'t>>,
    ) -> Vec<PermutationResult<'t>> {
        let branch_perms: Vec<Option<(&'t ElementNode, Vec<PermutationResult<'t>>)>> = branches
            .iter()
            .map(|branch| match branch {
                Branch::Element(element) => Some((*element, self.permute(&element.children))),
                Branch::ImplicitElse => None,
            })
            .collect();

        let mut next = Vec::new();
        for res in &results {
            for branch in &branch_perms {
                let &Some((element, ref child_perms)) = branch else {
                    next.push(res.clone());
                    continue;
                };
                for children in child_perms {
                    if element.tag == TEMPLATE_TAG {
                        let mut unwrapped = res.clone();
                        unwrapped.extend(children.iter().cloned());
                        next.push(unwrapped);
                    } else {
                        next.push(with_node(res, instance(element, None, children)));
                    }
                }
            }
        }
        next
    }

    fn expand_show<'t>(
        &self,
        element: &'t ElementNode,
        results: Vec<PermutationResult<'t>>,
    ) -> Vec<PermutationResult<'t>> {
        let child_perms = self.permute(&element.children);
        let mut next = Vec::with_capacity(results.len() * (child_perms.len() + 1));
        for res in results {
            for children in &child_perms {
                next.push(with_node(&res, instance(element, None, children)));
            }
            next.push(res);
        }
        next
    }

    fn expand_for<'t>(
        &self,
        block: &ForBlock<'t>,
        results: Vec<PermutationResult<'t>>,
    ) -> Vec<PermutationResult<'t>> {
        let items: Option<&[Literal]> = block.inline_array.as_deref().or_else(|| {
            self.context
                .get(&block.source)
                .and_then(|value| value.as_array())
        });
        let proven_non_empty =
            block.inline_array.is_some() || self.static_arrays.contains(&block.source);

        let mut next = Vec::new();
        if !proven_non_empty {
            next.extend(results.iter().cloned());
        }

        let element = block.element;
        let child_perms = self.permute(&element.children);
        match items.filter(|items| !items.is_empty()) {
            Some(items) => {
                for res in &results {
                    for children in &child_perms {
                        let mut expanded = res.clone();
                        expanded.extend(items.iter().map(|item| {
                            instance(element, Some(binding(&block.iterator, item.to_string())), children)
                        }));
                        next.push(expanded);
                    }
                }
            }
            None => {
                let mock = format!("{MOCK_PREFIX}{}", block.iterator);
                for res in &results {
                    for children in &child_perms {
                        let copy = || instance(element, Some(binding(&block.iterator, mock.clone())), children);
                        next.push(with_node(res, copy()));

                        let mut plural = res.clone();
                        plural.push(copy());
                        plural.push(copy());
                        next.push(plural);
                    }
                }
            }
        }
        next
    }
}

fn instance<'t>(
    element: &'t ElementNode,
    binding: Option<LoopBinding>,
    children: &PermutationResult<'t>,
) -> PermutedNode<'t> {
    PermutedNode::Element {
        element,
        binding,
        children: children.clone(),
    }
}

fn binding(iterator: &str, value: String) -> LoopBinding {
    LoopBinding {
        iterator: iterator.to_string(),
        value,
    }
}

fn with_node<'t>(res: &PermutationResult<'t>, node: PermutedNode<'t>) -> PermutationResult<'t> {
    let mut next = Vec::with_capacity(res.len() + 1);
    next.extend(res.iter().cloned());
    next.push(node);
    next
}
