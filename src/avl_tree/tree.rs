use crate::avl_tree::node::Node;
use crate::entry::Entry;
use log::{debug, trace};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

pub type Tree<K, V> = Option<Box<Node<K, V>>>;

/// The number of single rotations performed on a tree, by direction. A double rotation counts as
/// one rotation in each direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RotationCounts {
    /// The number of left rotations.
    pub left: usize,
    /// The number of right rotations.
    pub right: usize,
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

// Nodes detached on the way down, each paired with the side the descent continued on.
type Path<K, V> = Vec<(Box<Node<K, V>>, Side)>;

pub fn height<K, V>(tree: &Tree<K, V>) -> i32 {
    match tree {
        None => -1,
        Some(node) => node.height,
    }
}

fn rotate_left<K, V>(mut node: Box<Node<K, V>>, counts: &mut RotationCounts) -> Box<Node<K, V>> {
    let mut child = match node.right.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.right = child.left.take();
    node.update();
    child.left = Some(node);
    child.update();
    counts.left += 1;
    trace!("rotated left, subtree height is now {}", child.height);
    child
}

fn rotate_right<K, V>(mut node: Box<Node<K, V>>, counts: &mut RotationCounts) -> Box<Node<K, V>> {
    let mut child = match node.left.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.left = child.right.take();
    node.update();
    child.right = Some(node);
    child.update();
    counts.right += 1;
    trace!("rotated right, subtree height is now {}", child.height);
    child
}

fn balance<K, V>(mut node: Box<Node<K, V>>, counts: &mut RotationCounts) -> Box<Node<K, V>> {
    node.update();

    if node.balance() > 1 {
        if let Some(child) = node.left.take() {
            if child.balance() < 0 {
                debug!("rebalancing left-right heavy node of height {}", node.height);
                node.left = Some(rotate_left(child, counts));
            } else {
                debug!("rebalancing left-left heavy node of height {}", node.height);
                node.left = Some(child);
            }
        }
        node = rotate_right(node, counts);
    } else if node.balance() < -1 {
        if let Some(child) = node.right.take() {
            if child.balance() > 0 {
                debug!("rebalancing right-left heavy node of height {}", node.height);
                node.right = Some(rotate_right(child, counts));
            } else {
                debug!("rebalancing right-right heavy node of height {}", node.height);
                node.right = Some(child);
            }
        }
        node = rotate_left(node, counts);
    }

    node
}

// Reattaches every node on the path to the subtree below it, rebalancing from the bottom up.
fn unwind<K, V>(mut path: Path<K, V>, mut tree: Tree<K, V>, counts: &mut RotationCounts) -> Tree<K, V> {
    while let Some((mut node, side)) = path.pop() {
        match side {
            Side::Left => node.left = tree,
            Side::Right => node.right = tree,
        }
        tree = Some(balance(node, counts));
    }
    tree
}

fn remove_min<K, V>(node: Box<Node<K, V>>, counts: &mut RotationCounts) -> (Tree<K, V>, Entry<K, V>) {
    let mut path = Vec::new();
    let mut curr = node;
    while let Some(left) = curr.left.take() {
        path.push((curr, Side::Left));
        curr = left;
    }
    let Node { entry, right, .. } = *curr;
    (unwind(path, right, counts), entry)
}

// Removes the root of a subtree, returning the remaining subtree and the removed entry.
fn remove_root<K, V>(mut node: Box<Node<K, V>>, counts: &mut RotationCounts) -> (Tree<K, V>, Entry<K, V>) {
    match (node.left.take(), node.right.take()) {
        (None, right) => {
            let Node { entry, .. } = *node;
            (right, entry)
        },
        (left, None) => {
            let Node { entry, .. } = *node;
            (left, entry)
        },
        (left, Some(right)) => {
            let (right, successor) = remove_min(right, counts);
            let entry = mem::replace(&mut node.entry, successor);
            node.left = left;
            node.right = right;
            (Some(balance(node, counts)), entry)
        },
    }
}

/// Inserts `new_node` into the tree. If a node with an equal key exists, only its value is
/// replaced and the old value is returned.
pub fn insert<K, V>(tree: &mut Tree<K, V>, new_node: Node<K, V>, counts: &mut RotationCounts) -> Option<V>
where
    K: Ord,
{
    let mut path = Vec::new();
    let mut curr = tree.take();
    while let Some(mut node) = curr.take() {
        match new_node.entry.key.cmp(&node.entry.key) {
            Ordering::Less => {
                curr = node.left.take();
                path.push((node, Side::Left));
            },
            Ordering::Greater => {
                curr = node.right.take();
                path.push((node, Side::Right));
            },
            Ordering::Equal => {
                let old_value = mem::replace(&mut node.entry.value, new_node.entry.value);
                *tree = unwind(path, Some(node), counts);
                return Some(old_value);
            },
        }
    }

    *tree = unwind(path, Some(Box::new(new_node)), counts);
    None
}

/// Removes the node with a particular key from the tree. The tree is left untouched if the key
/// does not exist.
pub fn remove<K, V, Q>(tree: &mut Tree<K, V>, key: &Q, counts: &mut RotationCounts) -> Option<Entry<K, V>>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut path = Vec::new();
    let mut curr = tree.take();
    let mut ret = None;
    while let Some(mut node) = curr.take() {
        match key.cmp(node.entry.key.borrow()) {
            Ordering::Less => {
                curr = node.left.take();
                path.push((node, Side::Left));
            },
            Ordering::Greater => {
                curr = node.right.take();
                path.push((node, Side::Right));
            },
            Ordering::Equal => {
                let (subtree, entry) = remove_root(node, counts);
                curr = subtree;
                ret = Some(entry);
                break;
            },
        }
    }

    *tree = unwind(path, curr, counts);
    ret
}

pub fn get<'a, K, V, Q>(tree: &'a Tree<K, V>, key: &Q) -> Option<&'a Entry<K, V>>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut curr = tree;
    while let Some(node) = curr {
        match key.cmp(node.entry.key.borrow()) {
            Ordering::Less => curr = &node.left,
            Ordering::Greater => curr = &node.right,
            Ordering::Equal => return Some(&node.entry),
        }
    }
    None
}

pub fn get_mut<'a, K, V, Q>(tree: &'a mut Tree<K, V>, key: &Q) -> Option<&'a mut Entry<K, V>>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut curr = tree.as_mut();
    while let Some(node) = curr {
        match key.cmp(node.entry.key.borrow()) {
            Ordering::Less => curr = node.left.as_mut(),
            Ordering::Greater => curr = node.right.as_mut(),
            Ordering::Equal => return Some(&mut node.entry),
        }
    }
    None
}

pub fn ceil<'a, K, V, Q>(tree: &'a Tree<K, V>, key: &Q) -> Option<&'a Entry<K, V>>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut curr = tree;
    let mut best = None;
    while let Some(node) = curr {
        match key.cmp(node.entry.key.borrow()) {
            Ordering::Greater => curr = &node.right,
            Ordering::Less => {
                best = Some(&node.entry);
                curr = &node.left;
            },
            Ordering::Equal => return Some(&node.entry),
        }
    }
    best
}

pub fn floor<'a, K, V, Q>(tree: &'a Tree<K, V>, key: &Q) -> Option<&'a Entry<K, V>>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut curr = tree;
    let mut best = None;
    while let Some(node) = curr {
        match key.cmp(node.entry.key.borrow()) {
            Ordering::Less => curr = &node.left,
            Ordering::Greater => {
                best = Some(&node.entry);
                curr = &node.right;
            },
            Ordering::Equal => return Some(&node.entry),
        }
    }
    best
}

pub fn min<K, V>(tree: &Tree<K, V>) -> Option<&Entry<K, V>> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.entry
    })
}

pub fn max<K, V>(tree: &Tree<K, V>) -> Option<&Entry<K, V>> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        &curr.entry
    })
}

#[cfg(test)]
mod tests {
    use super::{height, insert, remove, RotationCounts, Tree};
    use crate::avl_tree::node::Node;

    fn build(keys: &[u32], counts: &mut RotationCounts) -> Tree<u32, u32> {
        let mut tree = None;
        for &key in keys {
            insert(&mut tree, Node::new(key, key * 10), counts);
        }
        tree
    }

    fn key(tree: &Tree<u32, u32>) -> Option<u32> {
        tree.as_ref().map(|node| node.entry.key)
    }

    fn children(tree: &Tree<u32, u32>) -> (Option<u32>, Option<u32>) {
        match tree {
            Some(node) => (key(&node.left), key(&node.right)),
            None => (None, None),
        }
    }

    #[test]
    fn test_height_empty() {
        let tree: Tree<u32, u32> = None;
        assert_eq!(height(&tree), -1);
    }

    #[test]
    fn test_right_right_case() {
        let mut counts = RotationCounts::default();
        let tree = build(&[5, 7, 9], &mut counts);
        assert_eq!(counts, RotationCounts { left: 1, right: 0 });
        assert_eq!(key(&tree), Some(7));
        assert_eq!(children(&tree), (Some(5), Some(9)));
        assert_eq!(height(&tree), 1);
    }

    #[test]
    fn test_left_left_case() {
        let mut counts = RotationCounts::default();
        let tree = build(&[9, 7, 5], &mut counts);
        assert_eq!(counts, RotationCounts { left: 0, right: 1 });
        assert_eq!(key(&tree), Some(7));
        assert_eq!(children(&tree), (Some(5), Some(9)));
    }

    #[test]
    fn test_left_right_case() {
        let mut counts = RotationCounts::default();
        let tree = build(&[9, 5, 7], &mut counts);
        assert_eq!(counts, RotationCounts { left: 1, right: 1 });
        assert_eq!(key(&tree), Some(7));
        assert_eq!(children(&tree), (Some(5), Some(9)));
    }

    #[test]
    fn test_right_left_case() {
        let mut counts = RotationCounts::default();
        let tree = build(&[5, 9, 7], &mut counts);
        assert_eq!(counts, RotationCounts { left: 1, right: 1 });
        assert_eq!(key(&tree), Some(7));
        assert_eq!(children(&tree), (Some(5), Some(9)));
    }

    #[test]
    fn test_insert_existing_keeps_shape() {
        let mut counts = RotationCounts::default();
        let mut tree = build(&[5, 3, 7], &mut counts);
        assert_eq!(insert(&mut tree, Node::new(3, 0), &mut counts), Some(30));
        assert_eq!(key(&tree), Some(5));
        assert_eq!(children(&tree), (Some(3), Some(7)));
        assert_eq!(counts, RotationCounts::default());
    }

    #[test]
    fn test_remove_two_children_uses_successor() {
        let mut counts = RotationCounts::default();
        let mut tree = build(&[5, 3, 7, 2, 4, 6, 8], &mut counts);
        let entry = remove(&mut tree, &5, &mut counts).map(|entry| entry.into_pair());
        assert_eq!(entry, Some((5, 50)));
        assert_eq!(key(&tree), Some(6));
        assert_eq!(children(&tree), (Some(3), Some(7)));
        assert_eq!(height(&tree), 2);
    }

    #[test]
    fn test_remove_prefers_single_rotation_on_tie() {
        let mut counts = RotationCounts::default();
        let mut tree = build(&[5, 3, 8, 7, 9], &mut counts);
        assert_eq!(counts, RotationCounts::default());

        remove(&mut tree, &3, &mut counts);
        assert_eq!(counts, RotationCounts { left: 1, right: 0 });
        assert_eq!(key(&tree), Some(8));
        assert_eq!(children(&tree), (Some(5), Some(9)));
        if let Some(ref root) = tree {
            assert_eq!(children(&root.left), (None, Some(7)));
        }
        assert_eq!(height(&tree), 2);
    }

    #[test]
    fn test_remove_missing_keeps_shape() {
        let mut counts = RotationCounts::default();
        let mut tree = build(&[5, 3, 7], &mut counts);
        assert!(remove(&mut tree, &4, &mut counts).is_none());
        assert_eq!(key(&tree), Some(5));
        assert_eq!(children(&tree), (Some(3), Some(7)));
    }

    #[test]
    fn test_remove_leaf_and_one_child() {
        let mut counts = RotationCounts::default();
        let mut tree = build(&[5, 3, 7, 4], &mut counts);

        assert!(remove(&mut tree, &3, &mut counts).is_some());
        assert_eq!(children(&tree), (Some(4), Some(7)));

        assert!(remove(&mut tree, &7, &mut counts).is_some());
        assert_eq!(children(&tree), (Some(4), None));
        assert_eq!(height(&tree), 1);
    }
}
