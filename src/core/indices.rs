use hashbrown::HashMap;

use crate::types::PlayerId;

/// Secondary index from a key to player ids in insertion order.
pub type VecIndex<K> = HashMap<K, Vec<PlayerId>>;
