// WHY: sequence alignment shared by sentence-level and word-level diffing
// Longest matching block first, then recurse left and right; no element is ever junked.
// Ties go to the block starting earliest in `a`, then earliest in `b`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// Kind of an edit-script range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpTag {
    Equal,
    Delete,
    Insert,
    Replace,
}

/// One labeled range pair: `left[i1..i2]` against `right[j1..j2]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub tag: OpTag,
    pub i1: usize,
    pub i2: usize,
    pub j1: usize,
    pub j2: usize,
}

impl Opcode {
    fn new(tag: OpTag, i1: usize, i2: usize, j1: usize, j2: usize) -> Self {
        Self { tag, i1, i2, j1, j2 }
    }
}

/// `left[a..a + size] == right[b..b + size]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchBlock {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

/// Aligner over two borrowed sequences
pub struct SequenceAligner<'a, T> {
    a: &'a [T],
    b: &'a [T],
    /// Positions of each right-hand element, ascending
    b2j: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Eq + Hash> SequenceAligner<'a, T> {
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        let mut b2j: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, item) in b.iter().enumerate() {
            b2j.entry(item).or_default().push(j);
        }
        Self { a, b, b2j }
    }

    /// Longest block with `alo <= a < ahi` and `blo <= b < bhi`.
    /// Size 0 when the ranges share nothing.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> MatchBlock {
        let mut best = MatchBlock { a: alo, b: blo, size: 0 };
        // j2len[j] = length of the match ending at a[i - 1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next_j2len = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_j2len.insert(j, k);
                    if k > best.size {
                        best = MatchBlock { a: i + 1 - k, b: j + 1 - k, size: k };
                    }
                }
            }
            j2len = next_j2len;
        }

        best
    }

    /// Non-overlapping matching blocks in ascending order, adjacent blocks merged,
    /// terminated by the sentinel `(len(a), len(b), 0)`
    pub fn matching_blocks(&self) -> Vec<MatchBlock> {
        let (la, lb) = (self.a.len(), self.b.len());
        let mut queue = vec![(0, la, 0, lb)];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let found = self.find_longest_match(alo, ahi, blo, bhi);
            if found.size == 0 {
                continue;
            }
            blocks.push(found);
            if alo < found.a && blo < found.b {
                queue.push((alo, found.a, blo, found.b));
            }
            if found.a + found.size < ahi && found.b + found.size < bhi {
                queue.push((found.a + found.size, ahi, found.b + found.size, bhi));
            }
        }
        blocks.sort();

        let mut merged: Vec<MatchBlock> = Vec::with_capacity(blocks.len() + 1);
        for block in blocks {
            match merged.last_mut() {
                Some(last) if last.a + last.size == block.a && last.b + last.size == block.b => {
                    last.size += block.size;
                }
                _ => merged.push(block),
            }
        }
        merged.push(MatchBlock { a: la, b: lb, size: 0 });
        merged
    }

    /// Edit script turning the left sequence into the right one
    pub fn opcodes(&self) -> Vec<Opcode> {
        let mut opcodes = Vec::new();
        let (mut i, mut j) = (0, 0);

        for block in self.matching_blocks() {
            let tag = match (i < block.a, j < block.b) {
                (true, true) => Some(OpTag::Replace),
                (true, false) => Some(OpTag::Delete),
                (false, true) => Some(OpTag::Insert),
                (false, false) => None,
            };
            if let Some(tag) = tag {
                opcodes.push(Opcode::new(tag, i, block.a, j, block.b));
            }
            i = block.a + block.size;
            j = block.b + block.size;
            if block.size > 0 {
                opcodes.push(Opcode::new(OpTag::Equal, block.a, i, block.b, j));
            }
        }

        opcodes
    }

    /// `2 * M / T` where M is the matched element count and T the combined length.
    /// Two empty sequences are identical (1.0).
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matches: usize = self.matching_blocks().iter().map(|block| block.size).sum();
        2.0 * matches as f64 / total as f64
    }
}

/// Edit script between two sequences
pub fn opcodes<T: Eq + Hash>(a: &[T], b: &[T]) -> Vec<Opcode> {
    SequenceAligner::new(a, b).opcodes()
}

/// Character-level similarity ratio between two strings
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    // Lengths are counted in characters, not bytes
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    SequenceAligner::new(&a, &b).ratio()
}
