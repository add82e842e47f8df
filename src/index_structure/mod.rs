pub mod prefix_index;
pub mod trie_node;
