//! Human-readable rendering of a tree's structure.
//!
//! Not a stable format: it exists for debugging and for the CLI.
//!
//! ```text
//! [d]
//! ├── [b]
//! │   ├── [a]
//! │   └── [c]
//! └── [f]
//!     ├── [e]
//!     └── [g, h, i]
//! ```

use std::fmt;

use crate::index::btree::node::Node;
use crate::index::btree::tree::BTree;

impl fmt::Display for BTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            None => writeln!(f, "(empty)"),
            Some(root) => write_subtree(f, root, "", ""),
        }
    }
}

fn write_subtree(f: &mut fmt::Formatter<'_>, node: &Node, line: &str, indent: &str) -> fmt::Result {
    write!(f, "{line}[")?;
    for (i, item) in node.items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", String::from_utf8_lossy(&item.key))?;
    }
    writeln!(f, "]")?;

    let last = node.children.len().saturating_sub(1);
    for (i, child) in node.children.iter().enumerate() {
        let (branch, pad) = if i == last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        write_subtree(f, child, &format!("{indent}{branch}"), &format!("{indent}{pad}"))?;
    }
    Ok(())
}
