// Copyright 2026 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::slice;

use super::shadow::ShadowNode;

/// A pre-order iterator over a node's subtree, excluding the node itself.
///
/// Created by [`ShadowNode::descendants`]. Uses an explicit stack of child
/// iterators, so depth is bounded by heap rather than call stack.
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<slice::Iter<'a, Arc<ShadowNode>>>,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(node: &'a ShadowNode) -> Self {
        let mut stack = Vec::new();
        stack.push(node.children().iter());
        Self { stack }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Arc<ShadowNode>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(child) => {
                    if !child.children().is_empty() {
                        self.stack.push(child.children().iter());
                    }
                    return Some(child);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::node::Tag;
    use crate::testing::Fixture;

    #[test]
    fn visits_in_tree_order() {
        let fx = Fixture::new();
        let tags: Vec<Tag> = fx.revision.root().descendants().map(|n| n.tag()).collect();
        assert_eq!(
            tags,
            [
                fx.container.tag(),
                fx.first.tag(),
                fx.second.tag(),
                fx.label.tag(),
                fx.label.children()[0].tag(),
                fx.label.children()[1].tag(),
            ]
        );
    }

    #[test]
    fn leaf_has_no_descendants() {
        let fx = Fixture::new();
        assert_eq!(fx.first.descendants().count(), 0);
    }
}
