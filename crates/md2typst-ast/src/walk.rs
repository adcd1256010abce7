//! Enter/exit traversal
//!
//! Pre-order, depth-first: every node is entered, its children are walked
//! in order, then it is exited. Leaf kinds get both events back to back.
//! The walk keeps an explicit stack so deeply nested input cannot exhaust
//! the call stack.

use crate::ast::{Node, Root};

/// Which side of a node the visitor is called for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Enter,
    Exit,
}

impl Visit {
    pub fn is_enter(self) -> bool {
        self == Visit::Enter
    }
}

/// Walk every node below `root`, calling `visitor` on enter and on exit.
///
/// The first error returned by the visitor stops the walk and is returned.
pub fn walk<E>(
    root: &Root,
    mut visitor: impl FnMut(&Node, Visit) -> Result<(), E>,
) -> Result<(), E> {
    let mut stack: Vec<(&Node, std::slice::Iter<'_, Node>)> = Vec::new();

    for top in &root.children {
        visitor(top, Visit::Enter)?;
        stack.push((top, top.children().iter()));

        while let Some((node, children)) = stack.last_mut() {
            match children.next() {
                Some(child) => {
                    visitor(child, Visit::Enter)?;
                    stack.push((child, child.children().iter()));
                }
                None => {
                    let node = *node;
                    stack.pop();
                    visitor(node, Visit::Exit)?;
                }
            }
        }
    }

    Ok(())
}
