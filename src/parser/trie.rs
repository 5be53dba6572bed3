//! Keyword table with longest-match lookup

use rustc_hash::FxHashMap;

#[derive(Debug, Default, Clone)]
struct TrieNode {
    children: FxHashMap<char, usize>,
    terminal: bool,
}

/// Prefix tree over the keywords of a notation.
///
/// Nodes live in one arena; node 0 is the root.
#[derive(Debug, Clone)]
pub struct KeywordTrie {
    nodes: Vec<TrieNode>,
}

impl Default for KeywordTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordTrie {
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }

    pub fn insert(&mut self, keyword: &str) {
        if keyword.is_empty() {
            return;
        }
        let mut node = 0;
        for ch in keyword.chars() {
            node = match self.nodes[node].children.get(&ch) {
                Some(&next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children.insert(ch, next);
                    next
                }
            };
        }
        self.nodes[node].terminal = true;
    }

    /// Byte length of the longest keyword that prefixes `text`
    pub fn longest_match(&self, text: &str) -> Option<usize> {
        let mut node = 0;
        let mut longest = None;
        for (index, ch) in text.char_indices() {
            let Some(&next) = self.nodes[node].children.get(&ch) else {
                break;
            };
            node = next;
            if self.nodes[node].terminal {
                longest = Some(index + ch.len_utf8());
            }
        }
        longest
    }

    pub fn contains(&self, keyword: &str) -> bool {
        !keyword.is_empty() && self.longest_match(keyword) == Some(keyword.len())
    }
}

impl<'a> FromIterator<&'a str> for KeywordTrie {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut trie = Self::new();
        for keyword in iter {
            trie.insert(keyword);
        }
        trie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_match_prefers_longer_keyword() {
        let trie: KeywordTrie = ["R", "R2", "R2'", "+", "++"].into_iter().collect();
        assert_eq!(trie.longest_match("R2' U"), Some(3));
        assert_eq!(trie.longest_match("R2 U"), Some(2));
        assert_eq!(trie.longest_match("R3"), Some(1));
        assert_eq!(trie.longest_match("++r"), Some(2));
        assert_eq!(trie.longest_match("x"), None);
    }

    #[test]
    fn test_incomplete_prefix_is_not_a_match() {
        let trie: KeywordTrie = ["T2R"].into_iter().collect();
        assert_eq!(trie.longest_match("T2"), None);
        assert!(trie.contains("T2R"));
        assert!(!trie.contains("T2"));
        assert!(!trie.contains(""));
    }
}
