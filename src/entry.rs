/// A key-value pair stored in a node of the tree.
#[derive(Debug)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    pub fn into_pair(self) -> (K, V) {
        let Entry { key, value } = self;
        (key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::Entry;

    #[test]
    fn test_into_pair() {
        let entry = Entry { key: 1, value: "one" };
        assert_eq!(entry.into_pair(), (1, "one"));
    }
}
