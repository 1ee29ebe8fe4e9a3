//! Ordered collections backed by an avl tree, together with diagnostics for inspecting how the
//! tree keeps itself balanced.
//!
//! # Examples
//!
//! ```
//! use avl_collections::avl_tree::AvlMap;
//!
//! let mut map = AvlMap::new();
//! for key in 0..100 {
//!     map.put(key, key * key);
//! }
//!
//! assert_eq!(map.get(&7), Ok(&49));
//! assert!(map.height() <= 9);
//! assert!(map.is_valid_avl());
//! ```

mod entry;
mod error;
pub mod avl_tree;

pub use self::error::{Error, Result};
