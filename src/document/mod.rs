//! Tree documents: the node model and the key sets traversals work with.

pub mod key_set;
pub mod node;
