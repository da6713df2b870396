use std::fmt;

use log::{debug, trace};

use super::frequency::FrequencyTable;
use super::queue::PriorityQueue;
use super::{Symbol, Weight, ALPHABET_SIZE};
use crate::error::Error;

#[derive(Clone, Copy, Debug)]
enum NodeKind {
    Leaf { symbol: Symbol },
    Inner { left: usize, right: usize },
}

#[derive(Clone, Copy, Debug)]
struct Node {
    weight: Weight,
    index: usize,
    /// only for diagnostics, children are owned through `Inner`
    parent: Option<usize>,
    kind: NodeKind,
}

/// Huffman tree stored as an arena of nodes addressed by index.
///
/// Merging takes the two lightest trees from a [`PriorityQueue`]; the one
/// extracted first becomes the right child. Equal weights leave the queue in
/// insertion order, so identical weight lists always give identical trees.
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root_index: usize,
    leaf_count: usize,
}

impl HuffmanTree {
    pub fn from_frequency_table(table: &FrequencyTable) -> HuffmanTree {
        let symbols_and_weights: Vec<(Symbol, Weight)> = table.entries().collect();
        // a frequency table has 256 distinct symbols with non-zero weights
        match Self::new(&symbols_and_weights) {
            Ok(tree) => tree,
            Err(e) => unreachable!("frequency table produced an invalid tree: {}", e),
        }
    }

    /// Builds a tree from symbol and weight pairs. Symbols with weight zero
    /// do not get a leaf.
    pub fn new(symbols_and_weights: &[(Symbol, Weight)]) -> crate::Result<HuffmanTree> {
        let mut seen = [false; ALPHABET_SIZE];
        let mut nodes: Vec<Node> = Vec::with_capacity(2 * symbols_and_weights.len());
        let mut queue = PriorityQueue::with_capacity(symbols_and_weights.len());

        for &(symbol, weight) in symbols_and_weights {
            if seen[symbol as usize] {
                return Err(Error::DuplicateSymbol(symbol));
            }
            seen[symbol as usize] = true;
            if weight == 0 {
                continue;
            }
            let node = Node {
                weight,
                index: nodes.len(),
                parent: None,
                kind: NodeKind::Leaf { symbol },
            };
            queue.insert(weight, node.index);
            nodes.push(node);
        }
        let leaf_count = nodes.len();

        let root_index = loop {
            let first = queue.extract_min().ok_or(Error::EmptyAlphabet)?;
            let Some(second) = queue.extract_min() else {
                break first;
            };
            let index = nodes.len();
            let weight = nodes[first]
                .weight
                .checked_add(nodes[second].weight)
                .ok_or(Error::WeightOverflow)?;
            trace!(
                "Merging node {} (w:{}) and node {} (w:{}) into node {}",
                second,
                nodes[second].weight,
                first,
                nodes[first].weight,
                index
            );
            nodes[first].parent = Some(index);
            nodes[second].parent = Some(index);
            nodes.push(Node {
                weight,
                index,
                parent: None,
                kind: NodeKind::Inner {
                    left: second,
                    right: first,
                },
            });
            queue.insert(weight, index);
        };

        let tree = HuffmanTree {
            nodes,
            root_index,
            leaf_count,
        };
        debug!(
            "Built huffman tree with {} leaves, depth {}",
            tree.leaf_count,
            tree.depth()
        );
        Ok(tree)
    }

    pub fn root(&self) -> usize {
        self.root_index
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    pub fn weight(&self, index: usize) -> Weight {
        self.nodes[index].weight
    }

    /// None for inner nodes
    pub fn symbol(&self, index: usize) -> Option<Symbol> {
        match self.nodes[index].kind {
            NodeKind::Leaf { symbol } => Some(symbol),
            NodeKind::Inner { .. } => None,
        }
    }

    pub fn is_leaf(&self, index: usize) -> bool {
        matches!(self.nodes[index].kind, NodeKind::Leaf { .. })
    }

    pub fn left_child(&self, index: usize) -> Option<usize> {
        match self.nodes[index].kind {
            NodeKind::Inner { left, .. } => Some(left),
            NodeKind::Leaf { .. } => None,
        }
    }

    pub fn right_child(&self, index: usize) -> Option<usize> {
        match self.nodes[index].kind {
            NodeKind::Inner { right, .. } => Some(right),
            NodeKind::Leaf { .. } => None,
        }
    }

    /// (left, right) of an inner node
    pub fn children(&self, index: usize) -> Option<(usize, usize)> {
        match self.nodes[index].kind {
            NodeKind::Inner { left, right } => Some((left, right)),
            NodeKind::Leaf { .. } => None,
        }
    }

    pub fn parent(&self, index: usize) -> Option<usize> {
        self.nodes[index].parent
    }

    pub fn contains_symbol(&self, symbol: Symbol) -> bool {
        self.nodes[..self.leaf_count]
            .iter()
            .any(|node| matches!(node.kind, NodeKind::Leaf { symbol: s } if s == symbol))
    }

    /// Number of edges on the longest root to leaf path.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root_index, 0)];
        while let Some((index, depth)) = stack.pop() {
            match self.nodes[index].kind {
                NodeKind::Leaf { .. } => max_depth = max_depth.max(depth),
                NodeKind::Inner { left, right } => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
            }
        }
        max_depth
    }
}

const BOX_DRAWINGS_DOUBLE_HORIZONTAL: &str = "═";
const SPACE: &str = " ";

/// Column the parent connector attaches to: the node marker of an inner node,
/// the middle of a leaf label.
fn anchor_of(line: &str) -> usize {
    line.chars().position(|c| c == '•').unwrap_or_else(|| {
        let indent = line.chars().take_while(|&c| c == ' ').count();
        indent + line.trim().chars().count() / 2
    })
}

// Node & Tree visualization
impl Node {
    fn get_string(&self, tree: &HuffmanTree) -> Vec<String> {
        match self.kind {
            NodeKind::Leaf { symbol } => vec![format!("(s:{},w:{})", symbol, self.weight)],
            NodeKind::Inner { left, right } => {
                let left_box = tree.nodes[left].get_string(tree);
                let right_box = tree.nodes[right].get_string(tree);
                let label = format!("w:{}", self.weight);
                let left_width = left_box[0].chars().count();
                // the weight label hangs over the right subtree and may widen it
                let right_width = right_box[0].chars().count().max(label.chars().count());
                let mut rows = Vec::with_capacity(3 + left_box.len().max(right_box.len()));

                rows.push(format!(
                    "{}•{:<width$}",
                    SPACE.repeat(left_width),
                    label,
                    width = right_width
                ));
                rows.push(format!(
                    "{}║{}",
                    SPACE.repeat(left_width),
                    SPACE.repeat(right_width)
                ));

                let left_anchor = anchor_of(&left_box[0]);
                let right_anchor = anchor_of(&right_box[0]);
                rows.push(format!(
                    "{}╔{}╩{}╗{}",
                    SPACE.repeat(left_anchor),
                    BOX_DRAWINGS_DOUBLE_HORIZONTAL.repeat(left_width - left_anchor - 1),
                    BOX_DRAWINGS_DOUBLE_HORIZONTAL.repeat(right_anchor),
                    SPACE.repeat(right_width - right_anchor - 1)
                ));

                let blank_left = SPACE.repeat(left_width);
                for row in 0..left_box.len().max(right_box.len()) {
                    rows.push(format!(
                        "{} {:<width$}",
                        left_box.get(row).unwrap_or(&blank_left),
                        right_box.get(row).map(String::as_str).unwrap_or(""),
                        width = right_width
                    ));
                }
                rows
            }
        }
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strs = self.nodes[self.root_index].get_string(self);
        for s in strs.iter() {
            writeln!(f, "{}", s)?;
        }
        Ok(())
    }
}
