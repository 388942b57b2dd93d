//! Pre-flight endpoint validation.
//!
//! Problems with the root or target are always reported before the first
//! step is taken. Running out of frontier is not an error: it ends the step
//! sequence without a `found` event.

use std::fmt;

use stepfind_core::Node;

use crate::traits::Pather;

/// A root or target that cannot start a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidEndpoint {
    RootUnset,
    TargetUnset,
    RootOutOfBounds(Node),
    TargetOutOfBounds(Node),
}

impl fmt::Display for InvalidEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootUnset => f.write_str("root is not set"),
            Self::TargetUnset => f.write_str("target is not set"),
            Self::RootOutOfBounds(n) => write!(f, "root {n} is out of bounds"),
            Self::TargetOutOfBounds(n) => write!(f, "target {n} is out of bounds"),
        }
    }
}

impl std::error::Error for InvalidEndpoint {}

/// Check that both endpoints are set and inside `pather`.
pub fn check_endpoints<P: Pather + ?Sized>(
    pather: &P,
    root: Option<Node>,
    target: Option<Node>,
) -> Result<(Node, Node), InvalidEndpoint> {
    let root = root.ok_or(InvalidEndpoint::RootUnset)?;
    let target = target.ok_or(InvalidEndpoint::TargetUnset)?;
    if !pather.contains(root) {
        return Err(InvalidEndpoint::RootOutOfBounds(root));
    }
    if !pather.contains(target) {
        return Err(InvalidEndpoint::TargetOutOfBounds(target));
    }
    Ok((root, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepfind_core::GraphGrid;

    #[test]
    fn unset_endpoints() {
        let g = GraphGrid::build(3, 3).unwrap();
        let n = Node::new(1, 1);
        assert_eq!(
            check_endpoints(&g, None, Some(n)),
            Err(InvalidEndpoint::RootUnset)
        );
        assert_eq!(
            check_endpoints(&g, Some(n), None),
            Err(InvalidEndpoint::TargetUnset)
        );
    }

    #[test]
    fn out_of_bounds_endpoints() {
        let g = GraphGrid::build(3, 3).unwrap();
        let inside = Node::new(0, 0);
        let outside = Node::new(3, 0);
        assert_eq!(
            check_endpoints(&g, Some(outside), Some(inside)),
            Err(InvalidEndpoint::RootOutOfBounds(outside))
        );
        assert_eq!(
            check_endpoints(&g, Some(inside), Some(Node::new(0, -1))),
            Err(InvalidEndpoint::TargetOutOfBounds(Node::new(0, -1)))
        );
    }

    #[test]
    fn valid_endpoints() {
        let g = GraphGrid::build(2, 2).unwrap();
        let (r, t) = check_endpoints(&g, Some(Node::new(0, 0)), Some(Node::new(1, 1))).unwrap();
        assert_eq!(r, Node::new(0, 0));
        assert_eq!(t, Node::new(1, 1));
    }

    #[test]
    fn empty_grid_rejects_everything() {
        let g = GraphGrid::build(0, 0).unwrap();
        assert!(check_endpoints(&g, Some(Node::new(0, 0)), Some(Node::new(0, 0))).is_err());
    }
}
