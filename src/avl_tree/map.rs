use crate::avl_tree::inspect;
use crate::avl_tree::node::Node;
use crate::avl_tree::tree::{self, RotationCounts};
use crate::entry::Entry;
use crate::error::{Error, Result};
use std::borrow::Borrow;
use std::fmt::{self, Debug, Display};
use std::iter::FromIterator;
use std::ops::{Index, IndexMut};

/// An ordered map implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of two child subtrees of any node differ by at most one. After each insertion or
/// removal, the nodes on the path to the root are rebalanced with rotations.
///
/// # Examples
///
/// ```
/// use avl_collections::avl_tree::AvlMap;
/// use avl_collections::Error;
///
/// let mut map = AvlMap::new();
/// map.put(0, 1);
/// map.put(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), Err(Error::KeyNotFound));
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min_key(), Ok(&0));
/// assert_eq!(map.ceil(&2), Some(&3));
///
/// map[&0] = 2;
/// assert_eq!(map.remove(&0), Ok((0, 2)));
/// assert_eq!(map.remove(&1), Err(Error::KeyNotFound));
/// ```
pub struct AvlMap<K, V> {
    tree: tree::Tree<K, V>,
    len: usize,
    rotations: RotationCounts,
}

impl<K, V> AvlMap<K, V> {
    /// Constructs a new, empty `AvlMap<K, V>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let map: AvlMap<u32, u32> = AvlMap::new();
    /// ```
    pub fn new() -> Self {
        AvlMap {
            tree: None,
            len: 0,
            rotations: RotationCounts::default(),
        }
    }

    /// Inserts a key-value pair into the map. If the key already exists in the map, its value is
    /// replaced and the old value is returned. The stored key is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.put(1, 1), None);
    /// assert_eq!(map.get(&1), Ok(&1));
    /// assert_eq!(map.put(1, 2), Some(1));
    /// assert_eq!(map.get(&1), Ok(&2));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        let AvlMap { tree, len, rotations } = self;
        let new_node = Node::new(key, value);
        let ret = tree::insert(tree, new_node, rotations);
        if ret.is_none() {
            *len += 1;
        }
        ret
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `Error::KeyNotFound` and leave the map
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    /// use avl_collections::Error;
    ///
    /// let mut map = AvlMap::new();
    /// map.put(1, 1);
    /// assert_eq!(map.remove(&1), Ok((1, 1)));
    /// assert_eq!(map.remove(&1), Err(Error::KeyNotFound));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Result<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let AvlMap { tree, len, rotations } = self;
        match tree::remove(tree, key, rotations) {
            Some(entry) => {
                *len -= 1;
                Ok(entry.into_pair())
            },
            None => Err(Error::KeyNotFound),
        }
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.put(1, 1);
    /// assert!(!map.contains(&0));
    /// assert!(map.contains(&1));
    /// ```
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        tree::get(&self.tree, key).is_some()
    }

    /// Returns an immutable reference to the value associated with a particular key. Returns
    /// `Error::KeyNotFound` if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    /// use avl_collections::Error;
    ///
    /// let mut map = AvlMap::new();
    /// map.put(1, 1);
    /// assert_eq!(map.get(&0), Err(Error::KeyNotFound));
    /// assert_eq!(map.get(&1), Ok(&1));
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        tree::get(&self.tree, key)
            .map(|entry| &entry.value)
            .ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns
    /// `Error::KeyNotFound` if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.put(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Ok(&2));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        tree::get_mut(&mut self.tree, key)
            .map(|entry| &mut entry.value)
            .ok_or(Error::KeyNotFound)
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.put(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let map: AvlMap<u32, u32> = AvlMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the map, removing all values and resetting the rotation counts.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.put(1, 1);
    /// map.put(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree = None;
        self.len = 0;
        self.rotations = RotationCounts::default();
    }

    /// Returns the height of the tree. A tree with a single node has a height of `0` and an empty
    /// tree has a height of `-1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.height(), -1);
    /// map.put(1, 1);
    /// assert_eq!(map.height(), 0);
    /// map.put(2, 2);
    /// assert_eq!(map.height(), 1);
    /// ```
    pub fn height(&self) -> i32 {
        tree::height(&self.tree)
    }

    /// Returns the number of rotations performed on the tree since it was constructed or last
    /// cleared.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.put(5, ());
    /// map.put(7, ());
    /// map.put(9, ());
    /// assert_eq!(map.rotations().left, 1);
    /// assert_eq!(map.rotations().right, 0);
    /// ```
    pub fn rotations(&self) -> RotationCounts {
        self.rotations
    }

    /// Returns a key in the map that is less than or equal to a particular key. Returns `None` if
    /// such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.put(1, 1);
    /// assert_eq!(map.floor(&0), None);
    /// assert_eq!(map.floor(&2), Some(&1));
    /// ```
    pub fn floor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        tree::floor(&self.tree, key).map(|entry| &entry.key)
    }

    /// Returns a key in the map that is greater than or equal to a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.put(1, 1);
    /// assert_eq!(map.ceil(&0), Some(&1));
    /// assert_eq!(map.ceil(&2), None);
    /// ```
    pub fn ceil<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        tree::ceil(&self.tree, key).map(|entry| &entry.key)
    }

    /// Returns the minimum key of the map. Returns `Error::EmptyTree` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    /// use avl_collections::Error;
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.min_key(), Err(Error::EmptyTree));
    /// map.put(1, 1);
    /// map.put(3, 3);
    /// assert_eq!(map.min_key(), Ok(&1));
    /// ```
    pub fn min_key(&self) -> Result<&K> {
        tree::min(&self.tree)
            .map(|entry| &entry.key)
            .ok_or(Error::EmptyTree)
    }

    /// Returns the maximum key of the map. Returns `Error::EmptyTree` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    /// use avl_collections::Error;
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.max_key(), Err(Error::EmptyTree));
    /// map.put(1, 1);
    /// map.put(3, 3);
    /// assert_eq!(map.max_key(), Ok(&3));
    /// ```
    pub fn max_key(&self) -> Result<&K> {
        tree::max(&self.tree)
            .map(|entry| &entry.key)
            .ok_or(Error::EmptyTree)
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal. Each call starts a new traversal from the smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.put(1, 1);
    /// map.put(2, 2);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> AvlMapIter<K, V> {
        AvlMapIter {
            current: &self.tree,
            stack: Vec::new(),
        }
    }

    /// Returns an in-order traversal of the map. Equivalent to `iter`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// for key in vec![5, 3, 7] {
    ///     map.put(key, key * 2);
    /// }
    /// let keys: Vec<u32> = map.inorder_traversal().map(|(key, _)| *key).collect();
    /// assert_eq!(keys, vec![3, 5, 7]);
    /// ```
    pub fn inorder_traversal(&self) -> AvlMapIter<K, V> {
        self.iter()
    }

    /// Returns a mutable iterator over the map. The iterator will yield key-value pairs using
    /// in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.put(1, 1);
    /// map.put(2, 2);
    ///
    /// for (key, value) in &mut map {
    ///     *value += 1;
    /// }
    ///
    /// let mut iterator = map.iter_mut();
    /// assert_eq!(iterator.next(), Some((&1, &mut 2)));
    /// assert_eq!(iterator.next(), Some((&2, &mut 3)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter_mut(&mut self) -> AvlMapIterMut<K, V> {
        AvlMapIterMut {
            current: self.tree.as_mut().map(|node| &mut **node),
            stack: Vec::new(),
        }
    }

    /// Checks that every node is ordered with respect to its ancestors, that the heights of the
    /// two subtrees of every node differ by at most one, and that the cached heights and length
    /// agree with the structure. Heights are recomputed from scratch.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// for key in 0..100 {
    ///     map.put(key, key);
    ///     assert!(map.is_valid_avl());
    /// }
    /// ```
    pub fn is_valid_avl(&self) -> bool
    where
        K: Ord,
    {
        inspect::is_valid(&self.tree, self.len)
    }

    /// Returns the balance factor of every node in pre-order. The balance factor of a node is the
    /// height of its left subtree minus the height of its right subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.put(5, ());
    /// map.put(3, ());
    /// map.put(7, ());
    /// map.put(2, ());
    /// assert_eq!(map.balance_factor_distribution(), vec![1, 1, 0, 0]);
    /// ```
    pub fn balance_factor_distribution(&self) -> Vec<i32> {
        inspect::balance_factors(&self.tree)
    }

    /// Returns a text drawing of the tree with the height and balance factor of every node. Right
    /// subtrees are drawn above left subtrees.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.visualize(), "(empty)");
    /// map.put(5, ());
    /// map.put(3, ());
    /// assert_eq!(map.visualize(), "└── 5(h=1,bf=1)\n    └── 3(h=0,bf=0)");
    /// ```
    pub fn visualize(&self) -> String
    where
        K: Display,
    {
        inspect::draw(&self.tree)
    }
}

impl<K, V> IntoIterator for AvlMap<K, V> {
    type Item = (K, V);
    type IntoIter = AvlMapIntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            current: self.tree,
            stack: Vec::new(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a AvlMap<K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a V);
    type IntoIter = AvlMapIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut AvlMap<K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a mut V);
    type IntoIter = AvlMapIterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An owning iterator for `AvlMap<K, V>`.
///
/// This iterator traverses the elements of the map in-order and yields owned entries.
pub struct AvlMapIntoIter<K, V> {
    current: tree::Tree<K, V>,
    stack: Vec<Node<K, V>>,
}

impl<K, V> Iterator for AvlMapIntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(*node);
        }
        self.stack.pop().map(|node| {
            let Node {
                entry: Entry { key, value },
                right,
                ..
            } = node;
            self.current = right;
            (key, value)
        })
    }
}

/// An iterator for `AvlMap<K, V>`.
///
/// This iterator traverses the elements of the map in-order and yields immutable references.
pub struct AvlMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    current: &'a tree::Tree<K, V>,
    stack: Vec<&'a Node<K, V>>,
}

impl<'a, K, V> Iterator for AvlMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.current = &node.left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            self.current = &node.right;
            (&node.entry.key, &node.entry.value)
        })
    }
}

/// A mutable iterator for `AvlMap<K, V>`.
///
/// This iterator traverses the elements of the map in-order and yields mutable references.
pub struct AvlMapIterMut<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    current: Option<&'a mut Node<K, V>>,
    stack: Vec<(&'a K, &'a mut V, Option<&'a mut Node<K, V>>)>,
}

impl<'a, K, V> Iterator for AvlMapIterMut<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current.take() {
            let Node { entry, left, right, .. } = node;
            let Entry { key, value } = entry;
            self.current = left.as_mut().map(|node| &mut **node);
            self.stack.push((key, value, right.as_mut().map(|node| &mut **node)));
        }
        self.stack.pop().map(|(key, value, right)| {
            self.current = right;
            (key, value)
        })
    }
}

impl<K, V> Default for AvlMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Debug for AvlMap<K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for AvlMap<K, V>
where
    K: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = AvlMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for AvlMap<K, V>
where
    K: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<'a, K, V, Q> Index<&'a Q> for AvlMap<K, V>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, K, V, Q> IndexMut<&'a Q> for AvlMap<K, V>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    fn index_mut(&mut self, key: &Q) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}
