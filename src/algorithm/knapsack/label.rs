//! # Labels
//!
//! Sub-problems are named after their path from the root: the root is "0", its children "1" and
//! "2", the children of "1" are "1.1" and "1.2". Candidates get letters in order of discovery.
use std::fmt;

use itertools::Itertools;

/// Path of a sub-problem in the tree, used for display only.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SubProblemLabel {
    path: Vec<usize>,
}

impl SubProblemLabel {
    /// Label of the root sub-problem.
    pub fn root() -> Self {
        Self::default()
    }

    /// Label of the `k`-th child, counting from one.
    pub fn child(&self, k: usize) -> Self {
        debug_assert!(k > 0);

        let mut path = self.path.clone();
        path.push(k);
        Self { path }
    }

    /// Distance to the root.
    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

impl fmt::Display for SubProblemLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str("0")
        } else {
            write!(f, "{}", self.path.iter().join("."))
        }
    }
}

/// Letter label of the `index`-th candidate: A, B, ..., Z, AA, AB, ...
pub fn candidate_label(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(char::from(b'A' + (index % 26) as u8));
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }

    letters.into_iter().rev().collect()
}

#[cfg(test)]
mod test {
    use crate::algorithm::knapsack::label::{candidate_label, SubProblemLabel};

    #[test]
    fn paths() {
        let root = SubProblemLabel::root();
        assert_eq!(root.to_string(), "0");
        assert_eq!(root.child(1).to_string(), "1");
        assert_eq!(root.child(1).child(2).to_string(), "1.2");
        assert_eq!(root.child(2).child(1).child(1).depth(), 3);
    }

    #[test]
    fn letters() {
        assert_eq!(candidate_label(0), "A");
        assert_eq!(candidate_label(25), "Z");
        assert_eq!(candidate_label(26), "AA");
        assert_eq!(candidate_label(27), "AB");
        assert_eq!(candidate_label(701), "ZZ");
        assert_eq!(candidate_label(702), "AAA");
    }
}
