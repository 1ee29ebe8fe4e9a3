//! Read-only diagnostics over a tree. Heights are recomputed from the structure itself rather than
//! read from the cached heights maintained by mutations.

use crate::avl_tree::tree::Tree;
use std::cmp;
use std::fmt::Display;

// Returns the recomputed height and node count of a subtree, or `None` if any node violates the
// ordering bounds, the balance invariant, or caches a stale height.
fn check_subtree<'a, K, V>(
    tree: &'a Tree<K, V>,
    lower: Option<&'a K>,
    upper: Option<&'a K>,
) -> Option<(i32, usize)>
where
    K: Ord,
{
    let node = match tree {
        Some(node) => node,
        None => return Some((-1, 0)),
    };

    let key = &node.entry.key;
    if lower.map_or(false, |lower| key <= lower) || upper.map_or(false, |upper| key >= upper) {
        return None;
    }

    let (left_height, left_len) = check_subtree(&node.left, lower, Some(key))?;
    let (right_height, right_len) = check_subtree(&node.right, Some(key), upper)?;
    let height = cmp::max(left_height, right_height) + 1;

    if (left_height - right_height).abs() > 1 || node.height != height {
        return None;
    }

    Some((height, left_len + right_len + 1))
}

pub fn is_valid<K, V>(tree: &Tree<K, V>, len: usize) -> bool
where
    K: Ord,
{
    match check_subtree(tree, None, None) {
        Some((_, count)) => count == len,
        None => false,
    }
}

fn collect_balance_factors<K, V>(tree: &Tree<K, V>, factors: &mut Vec<i32>) -> i32 {
    match tree {
        None => -1,
        Some(node) => {
            let index = factors.len();
            factors.push(0);
            let left_height = collect_balance_factors(&node.left, factors);
            let right_height = collect_balance_factors(&node.right, factors);
            factors[index] = left_height - right_height;
            cmp::max(left_height, right_height) + 1
        },
    }
}

/// Returns the balance factor of every node in pre-order.
pub fn balance_factors<K, V>(tree: &Tree<K, V>) -> Vec<i32> {
    let mut factors = Vec::new();
    collect_balance_factors(tree, &mut factors);
    factors
}

fn draw_subtree<K, V>(tree: &Tree<K, V>, prefix: &str, is_tail: bool, lines: &mut Vec<String>)
where
    K: Display,
{
    if let Some(node) = tree {
        lines.push(format!(
            "{}{}{}(h={},bf={})",
            prefix,
            if is_tail { "└── " } else { "├── " },
            node.entry.key,
            node.height,
            node.balance(),
        ));

        let child_prefix = format!("{}{}", prefix, if is_tail { "    " } else { "│   " });
        draw_subtree(&node.right, &child_prefix, false, lines);
        draw_subtree(&node.left, &child_prefix, true, lines);
    }
}

pub fn draw<K, V>(tree: &Tree<K, V>) -> String
where
    K: Display,
{
    if tree.is_none() {
        return String::from("(empty)");
    }

    let mut lines = Vec::new();
    draw_subtree(tree, "", true, &mut lines);
    lines.join("\n")
}
