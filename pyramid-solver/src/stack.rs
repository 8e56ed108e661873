use std::fmt;

/// Errors returned by [`DLStack`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StackError {
    #[error("the stack is empty")]
    Empty,
    #[error("invalid index {index} for stack of size {len}")]
    InvalidIndex { index: usize, len: usize },
}

/// Slot index into the node arena.
type Link = Option<usize>;

#[derive(Debug, Clone)]
struct Node<T> {
    element: T,
    previous: Link, // toward the bottom
    next: Link,     // toward the top
}

/// A stack built on doubly-linked nodes.
///
/// Nodes live in an arena owned by the stack and refer to each other by slot
/// index. Released slots are recycled by later pushes.
#[derive(Debug, Clone)]
pub struct DLStack<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    top: Link,
    num_items: usize,
}

impl<T> Default for DLStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DLStack<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            top: None,
            num_items: 0,
        }
    }

    pub fn push(&mut self, element: T) {
        let node = Node {
            element,
            previous: self.top,
            next: None,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                slot
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };
        if let Some(old_top) = self.top {
            self.node_mut(old_top).next = Some(slot);
        }
        self.top = Some(slot);
        self.num_items += 1;
    }

    pub fn pop(&mut self) -> Result<T, StackError> {
        let top = self.top.ok_or(StackError::Empty)?;
        Ok(self.unlink(top))
    }

    pub fn peek(&self) -> Result<&T, StackError> {
        let top = self.top.ok_or(StackError::Empty)?;
        Ok(&self.node(top).element)
    }

    /// Removes the element at depth `k` counted from the top, starting at 1.
    ///
    /// `pop_at(1)` is the same as [`DLStack::pop`]. Any `k` outside
    /// `1..=size()` fails with [`StackError::InvalidIndex`].
    pub fn pop_at(&mut self, k: usize) -> Result<T, StackError> {
        if k == 0 || k > self.num_items {
            return Err(StackError::InvalidIndex {
                index: k,
                len: self.num_items,
            });
        }

        let mut curr = self.top;
        let mut traversed = 1;
        while let Some(slot) = curr {
            if traversed == k {
                return Ok(self.unlink(slot));
            }
            curr = self.node(slot).previous;
            traversed += 1;
        }

        // count and chain disagree; the index check above rules this out
        Err(StackError::InvalidIndex {
            index: k,
            len: self.num_items,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.num_items == 0
    }

    pub fn size(&self) -> usize {
        self.num_items
    }

    /// Iterates from the top of the stack down to the bottom.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            stack: self,
            curr: self.top,
            remaining: self.num_items,
        }
    }

    /// Drains the stack into a vector ordered bottom first.
    pub fn into_bottom_up(mut self) -> Vec<T> {
        let mut items = Vec::with_capacity(self.num_items);
        while let Ok(element) = self.pop() {
            items.push(element);
        }
        items.reverse();
        items
    }

    /// Bridges the neighbours of `slot` over it and releases the slot.
    fn unlink(&mut self, slot: usize) -> T {
        let Some(node) = self.slots[slot].take() else {
            unreachable!("linked slot {slot} is vacant");
        };

        match node.next {
            Some(above) => self.node_mut(above).previous = node.previous,
            None => self.top = node.previous,
        }
        if let Some(below) = node.previous {
            self.node_mut(below).next = node.next;
        }

        self.free.push(slot);
        self.num_items -= 1;
        node.element
    }

    fn node(&self, slot: usize) -> &Node<T> {
        match &self.slots[slot] {
            Some(node) => node,
            None => unreachable!("linked slot {slot} is vacant"),
        }
    }

    fn node_mut(&mut self, slot: usize) -> &mut Node<T> {
        match &mut self.slots[slot] {
            Some(node) => node,
            None => unreachable!("linked slot {slot} is vacant"),
        }
    }
}

pub struct Iter<'a, T> {
    stack: &'a DLStack<T>,
    curr: Link,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.curr?;
        let node = self.stack.node(slot);
        self.curr = node.previous;
        self.remaining -= 1;
        Some(&node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a DLStack<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pushes items in iteration order, so the last item ends up on top.
impl<T> FromIterator<T> for DLStack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = Self::new();
        for element in iter {
            stack.push(element);
        }
        stack
    }
}

/// `[top ... bottom]`, or nothing at all for an empty stack.
impl<T: fmt::Display> fmt::Display for DLStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        write!(f, "[")?;
        for (i, element) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", element)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn top_down<T: Clone>(stack: &DLStack<T>) -> Vec<T> {
        stack.iter().cloned().collect()
    }

    #[test]
    fn test_push_pop_lifo() {
        let mut stack = DLStack::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);
        assert_eq!(stack.size(), 3);
        assert_eq!(stack.pop(), Ok(3));
        assert_eq!(stack.pop(), Ok(2));
        stack.push(4);
        assert_eq!(stack.peek(), Ok(&4));
        assert_eq!(stack.pop(), Ok(4));
        assert_eq!(stack.pop(), Ok(1));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_empty_stack_errors() {
        let mut stack: DLStack<u32> = DLStack::new();
        assert_eq!(stack.pop(), Err(StackError::Empty));
        assert_eq!(stack.peek(), Err(StackError::Empty));
        assert_eq!(
            stack.pop_at(1),
            Err(StackError::InvalidIndex { index: 1, len: 0 })
        );
    }

    #[test]
    fn test_pop_at_middle() {
        // A at the bottom, C on top
        let mut stack: DLStack<&str> = ["A", "B", "C"].into_iter().collect();
        assert_eq!(stack.pop_at(2), Ok("B"));
        assert_eq!(stack.size(), 2);
        assert_eq!(top_down(&stack), vec!["C", "A"]);
        assert_eq!(stack.pop(), Ok("C"));
        assert_eq!(stack.pop(), Ok("A"));
    }

    #[test]
    fn test_pop_at_bottom_keeps_links() {
        let mut stack: DLStack<i32> = (1..=4).collect();
        assert_eq!(stack.pop_at(4), Ok(1));
        assert_eq!(top_down(&stack), vec![4, 3, 2]);
        stack.push(5);
        assert_eq!(stack.pop_at(3), Ok(3));
        assert_eq!(top_down(&stack), vec![5, 4, 2]);
    }

    #[test]
    fn test_pop_at_one_matches_pop() {
        let mut a: DLStack<i32> = (0..5).collect();
        let mut b = a.clone();
        assert_eq!(a.pop_at(1), b.pop());
        assert_eq!(top_down(&a), top_down(&b));
    }

    #[test]
    fn test_pop_at_out_of_range() {
        let mut stack: DLStack<i32> = (0..3).collect();
        assert_eq!(
            stack.pop_at(0),
            Err(StackError::InvalidIndex { index: 0, len: 3 })
        );
        assert_eq!(
            stack.pop_at(4),
            Err(StackError::InvalidIndex { index: 4, len: 3 })
        );
        assert_eq!(stack.size(), 3);
    }

    #[test]
    fn test_display() {
        let mut stack = DLStack::new();
        assert_eq!(stack.to_string(), "");
        stack.push("x");
        assert_eq!(stack.to_string(), "[x]");
        stack.push("y");
        stack.push("z");
        assert_eq!(stack.to_string(), "[z y x]");
    }

    #[test]
    fn test_into_bottom_up() {
        let stack: DLStack<i32> = vec![7, 8, 9].into_iter().collect();
        assert_eq!(stack.iter().len(), 3);
        assert_eq!(stack.into_bottom_up(), vec![7, 8, 9]);
    }

    #[test]
    fn test_slots_are_reused() {
        let mut stack = DLStack::new();
        for i in 0..10 {
            stack.push(i);
        }
        for _ in 0..10 {
            stack.pop().unwrap();
        }
        for i in 0..10 {
            stack.push(i);
        }
        assert_eq!(stack.slots.len(), 10);
        assert_eq!(stack.size(), 10);
    }

    #[test]
    fn test_random_ops_against_vec() {
        let mut rng = StdRng::seed_from_u64(2025);
        let mut stack = DLStack::new();
        // model keeps the bottom at index 0
        let mut model: Vec<u32> = Vec::new();
        let mut pushes = 0usize;
        let mut removals = 0usize;

        for step in 0..5000u32 {
            match rng.gen_range(0..4) {
                0 | 1 => {
                    stack.push(step);
                    model.push(step);
                    pushes += 1;
                }
                2 => {
                    let expected = model.pop().ok_or(StackError::Empty);
                    if expected.is_ok() {
                        removals += 1;
                    }
                    assert_eq!(stack.pop(), expected);
                }
                _ => {
                    let k = rng.gen_range(0..=model.len() + 1);
                    let result = stack.pop_at(k);
                    if k == 0 || k > model.len() {
                        assert_eq!(
                            result,
                            Err(StackError::InvalidIndex {
                                index: k,
                                len: model.len()
                            })
                        );
                    } else {
                        let expected = model.remove(model.len() - k);
                        assert_eq!(result, Ok(expected));
                        removals += 1;
                    }
                }
            }

            assert_eq!(stack.size(), pushes - removals);
            assert_eq!(stack.is_empty(), stack.size() == 0);
            assert_eq!(stack.peek().ok(), model.last());
        }

        let top_down_model: Vec<u32> = model.iter().rev().copied().collect();
        assert_eq!(top_down(&stack), top_down_model);
    }
}
