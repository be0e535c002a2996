use std::cmp::Ordering;

type Link = Option<Box<ClueNode>>;

#[derive(Debug)]
struct ClueNode {
    clue: String,
    left: Link,
    right: Link,
}

/// Unbalanced binary search tree of the clues the player picked up.
///
/// Clues are ordered byte-wise (case-sensitive) and stored once; inserting a
/// clue that is already present changes nothing.
#[derive(Debug, Default)]
pub struct ClueLedger {
    root: Link,
    len: usize,
}

impl ClueLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if a new node was allocated for `clue`.
    pub fn insert(&mut self, clue: impl Into<String>) -> bool {
        let clue = clue.into();
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match clue.as_str().cmp(node.clue.as_str()) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return false,
            };
        }
        *link = Some(Box::new(ClueNode {
            clue,
            left: None,
            right: None,
        }));
        self.len += 1;
        true
    }

    pub fn contains(&self, clue: &str) -> bool {
        let mut link = &self.root;
        while let Some(node) = link {
            link = match clue.cmp(node.clue.as_str()) {
                Ordering::Less => &node.left,
                Ordering::Greater => &node.right,
                Ordering::Equal => return true,
            };
        }
        false
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Clues in ascending order. Each call starts a fresh walk.
    pub fn in_order(&self) -> InOrder<'_> {
        let mut iter = InOrder { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }
}

impl Drop for ClueLedger {
    fn drop(&mut self) {
        // A ledger fed sorted input degenerates into a list; unlink nodes one
        // by one instead of letting Box recurse down the chain.
        let mut stack: Vec<Box<ClueNode>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

pub struct InOrder<'a> {
    stack: Vec<&'a ClueNode>,
}

impl<'a> InOrder<'a> {
    fn push_left_spine(&mut self, mut node: Option<&'a ClueNode>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(node.clue.as_str())
    }
}

impl<'a> IntoIterator for &'a ClueLedger {
    type Item = &'a str;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.in_order()
    }
}

impl<S: Into<String>> Extend<S> for ClueLedger {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for clue in iter {
            self.insert(clue);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for ClueLedger {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut ledger = Self::new();
        ledger.extend(iter);
        ledger
    }
}
