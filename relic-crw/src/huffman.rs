//! Huffman decode trees.
//!
//! A table specification consists of 16 bytes holding the number of codes of
//! each length from 1 to 16, followed by the leaf values. Leaves are assigned
//! canonically: shorter codes first, and codes of the same length in increasing
//! order. For example, the specification
//!
//! ```text
//! 0,1,4,2,3,1,2,0,0,0,0,0,0,0,0,0,
//! 0x04,0x03,0x05,0x06,0x02,0x07,0x01,0x08,0x09,0x00,0x0a,0x0b,0xff
//! ```
//!
//! results in the following codes:
//!
//! ```text
//! 00       0x04
//! 010      0x03
//! 011      0x05
//! 100      0x06
//! 101      0x02
//! 1100     0x07
//! 1101     0x01
//! 11100    0x08
//! 11101    0x09
//! 11110    0x00
//! 111110   0x0a
//! 1111110  0x0b
//! 1111111  0xff
//! ```

use relic_common::bail;
use relic_common::bit::StuffedBitReader;
use relic_common::{HuffmanError, Result};

/// The number of code lengths in a table specification.
const NUM_LENGTHS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    /// A branch node, holding the indices of the `0` and `1` children.
    Branch([u32; 2]),
    /// A leaf node holding the decoded symbol.
    Leaf(u8),
}

/// A Huffman decode tree, stored as an arena of nodes. The root is at index 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
}

impl HuffmanTree {
    /// Build a tree from a table specification.
    pub fn build(spec: &[u8]) -> Result<Self> {
        let Some((counts, leaves)) = spec.split_at_checked(NUM_LENGTHS) else {
            bail!(HuffmanError::InvalidTable);
        };

        let num_leaves = counts.iter().map(|c| *c as usize).sum::<usize>();

        let Some(leaves) = leaves.get(..num_leaves) else {
            bail!(HuffmanError::InvalidTable);
        };

        let mut builder = TreeBuilder {
            counts,
            leaves,
            placed: 0,
            nodes: Vec::with_capacity(2 * num_leaves + 1),
        };
        builder.build_node(0);

        Ok(Self {
            nodes: builder.nodes,
        })
    }

    /// Decode a single symbol by walking down the tree, one bit per level.
    #[inline]
    pub fn decode_symbol(&self, reader: &mut StuffedBitReader<'_>) -> Result<u8> {
        let mut node = self.nodes[0];

        loop {
            match node {
                Node::Leaf(symbol) => return Ok(symbol),
                Node::Branch(children) => {
                    let bit = reader.read_bit()?;
                    node = self.nodes[children[bit as usize] as usize];
                }
            }
        }
    }
}

struct TreeBuilder<'a> {
    counts: &'a [u8],
    leaves: &'a [u8],
    /// How many leaves have been placed so far.
    placed: usize,
    nodes: Vec<Node>,
}

impl TreeBuilder<'_> {
    /// Build the subtree rooted at the given depth, returning the index of its root.
    ///
    /// Subtrees are filled depth-first from the left, so each leaf ends up at the
    /// leftmost free position of its code length. Nodes that no leaf reaches
    /// (because the table doesn't use all codes) decode as symbol 0.
    fn build_node(&mut self, level: usize) -> u32 {
        let idx = self.nodes.len() as u32;
        self.nodes.push(Node::Leaf(0));

        // Find the depth at which the next leaf must appear.
        let mut cumulative = 0;
        let mut depth = 0;

        while cumulative <= self.placed && depth < NUM_LENGTHS {
            cumulative += self.counts[depth] as usize;
            depth += 1;
        }

        if cumulative > self.placed {
            if level < depth {
                let zero = self.build_node(level + 1);
                let one = self.build_node(level + 1);
                self.nodes[idx as usize] = Node::Branch([zero, one]);
            } else {
                self.nodes[idx as usize] = Node::Leaf(self.leaves[self.placed]);
                self.placed += 1;
            }
        }

        idx
    }
}
