//! Page hierarchy algorithms: cycle detection for re-parenting and
//! construction of the nested tree view for a space.
//!
//! These operate on lightweight [`PageLink`] snapshots rather than full page
//! rows so the repository layer can run them against whatever consistent view
//! of a space it holds (typically inside a transaction). Both algorithms are
//! defensive about malformed data: a pre-existing cyclic or dangling parent
//! chain must never cause an infinite walk or a silently dropped page.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::types::DbId;

/// Minimal projection of a page used by the tree algorithms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub id: DbId,
    pub parent_id: Option<DbId>,
    pub space_id: DbId,
    pub title: String,
}

/// A node in the nested hierarchy returned by [`build_tree`].
#[derive(Debug, Clone, Serialize)]
pub struct PageTreeNode {
    pub id: DbId,
    pub title: String,
    pub parent_id: Option<DbId>,
    pub children: Vec<PageTreeNode>,
}

/// Would setting `page_id`'s parent to `candidate_parent` create a cycle?
///
/// Walks the ancestor chain starting at `candidate_parent`; if `page_id` is
/// encountered the move would place the page inside its own subtree. The
/// direct self-parent case (`candidate_parent == page_id`) is included.
///
/// The walk tracks visited ids so it terminates even if `links` already
/// contains a cyclic chain produced elsewhere.
pub fn would_cycle(links: &[PageLink], page_id: DbId, candidate_parent: DbId) -> bool {
    if candidate_parent == page_id {
        return true;
    }

    let parents: HashMap<DbId, Option<DbId>> =
        links.iter().map(|l| (l.id, l.parent_id)).collect();

    let mut visited = HashSet::new();
    let mut current = candidate_parent;
    loop {
        if current == page_id {
            return true;
        }
        if !visited.insert(current) {
            // Pre-existing cycle that does not involve page_id.
            return false;
        }
        match parents.get(&current) {
            Some(Some(next)) => current = *next,
            // Root reached, or parent points outside the known set.
            Some(None) | None => return false,
        }
    }
}

/// Build the nested page hierarchy for one space.
///
/// Children at every level are ordered by title ascending (ties broken by id
/// for determinism). Pages whose parent cannot be resolved within `links`
/// (a missing id, a parent in another space, or membership in a parent
/// cycle) are surfaced as additional roots rather than dropped.
pub fn build_tree(links: &[PageLink]) -> Vec<PageTreeNode> {
    let ids: HashSet<DbId> = links.iter().map(|l| l.id).collect();

    let mut by_parent: HashMap<Option<DbId>, Vec<&PageLink>> = HashMap::new();
    for link in links {
        // Treat a dangling parent reference as "no parent".
        let key = link.parent_id.filter(|p| ids.contains(p));
        by_parent.entry(key).or_default().push(link);
    }

    let mut visited = HashSet::new();
    let mut roots = assemble(None, &by_parent, &mut visited);

    // Anything not reachable from a root sits on a parent cycle; emit each
    // such page as a root so no page is ever lost from the view.
    let mut stranded: Vec<&PageLink> = links
        .iter()
        .filter(|l| !visited.contains(&l.id))
        .collect();
    sort_siblings(&mut stranded);
    for link in stranded {
        if visited.insert(link.id) {
            let children = assemble(Some(link.id), &by_parent, &mut visited);
            roots.push(PageTreeNode {
                id: link.id,
                title: link.title.clone(),
                parent_id: link.parent_id,
                children,
            });
        }
    }

    roots
}

fn assemble(
    parent: Option<DbId>,
    by_parent: &HashMap<Option<DbId>, Vec<&PageLink>>,
    visited: &mut HashSet<DbId>,
) -> Vec<PageTreeNode> {
    let Some(children) = by_parent.get(&parent) else {
        return Vec::new();
    };

    let mut siblings: Vec<&PageLink> = children
        .iter()
        .filter(|l| !visited.contains(&l.id))
        .copied()
        .collect();
    sort_siblings(&mut siblings);

    siblings
        .into_iter()
        .filter_map(|link| {
            // The visited guard bounds recursion on malformed cyclic chains.
            if !visited.insert(link.id) {
                return None;
            }
            Some(PageTreeNode {
                id: link.id,
                title: link.title.clone(),
                parent_id: link.parent_id,
                children: assemble(Some(link.id), by_parent, visited),
            })
        })
        .collect()
}

fn sort_siblings(siblings: &mut [&PageLink]) {
    siblings.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(id: DbId, parent: Option<DbId>, title: &str) -> PageLink {
        PageLink {
            id,
            parent_id: parent,
            space_id: 1,
            title: title.to_string(),
        }
    }

    // -- would_cycle ---------------------------------------------------------

    #[test]
    fn self_parent_is_a_cycle() {
        let links = vec![link(1, None, "a")];
        assert!(would_cycle(&links, 1, 1));
    }

    #[test]
    fn moving_under_own_descendant_is_a_cycle() {
        // 1 -> 2 -> 3; moving 1 under 3 would close the loop.
        let links = vec![link(1, None, "a"), link(2, Some(1), "b"), link(3, Some(2), "c")];
        assert!(would_cycle(&links, 1, 3));
        assert!(would_cycle(&links, 1, 2));
    }

    #[test]
    fn moving_under_sibling_is_not_a_cycle() {
        let links = vec![link(1, None, "a"), link(2, None, "b"), link(3, Some(1), "c")];
        assert!(!would_cycle(&links, 2, 3));
        assert!(!would_cycle(&links, 3, 2));
    }

    #[test]
    fn walk_terminates_on_preexisting_cycle() {
        // 2 and 3 already form a cycle that does not involve page 1.
        let links = vec![link(1, None, "a"), link(2, Some(3), "b"), link(3, Some(2), "c")];
        assert!(!would_cycle(&links, 1, 2));
    }

    #[test]
    fn walk_terminates_on_dangling_parent() {
        let links = vec![link(1, None, "a"), link(2, Some(99), "b")];
        assert!(!would_cycle(&links, 1, 2));
    }

    // -- build_tree ----------------------------------------------------------

    #[test]
    fn nests_children_under_parents() {
        let links = vec![
            link(1, None, "root"),
            link(2, Some(1), "child"),
            link(3, Some(2), "grandchild"),
        ];
        let tree = build_tree(&links);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, 1);
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].id, 2);
        assert_eq!(tree[0].children[0].children[0].id, 3);
    }

    #[test]
    fn siblings_sorted_by_title() {
        let links = vec![
            link(1, None, "root"),
            link(2, Some(1), "zebra"),
            link(3, Some(1), "apple"),
            link(4, Some(1), "mango"),
        ];
        let tree = build_tree(&links);
        let titles: Vec<&str> = tree[0].children.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["apple", "mango", "zebra"]);
    }

    #[test]
    fn orphan_with_missing_parent_becomes_root() {
        let links = vec![
            link(1, None, "root"),
            link(2, Some(1), "child"),
            link(3, Some(2), "grandchild"),
            link(4, Some(999), "bad"),
        ];
        let tree = build_tree(&links);
        let root_ids: Vec<DbId> = tree.iter().map(|n| n.id).collect();
        assert!(root_ids.contains(&1));
        assert!(root_ids.contains(&4), "orphan must surface as a root");
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn cyclic_pages_are_not_lost() {
        // 2 <-> 3 form a malformed cycle; both must still appear somewhere.
        let links = vec![link(1, None, "a"), link(2, Some(3), "b"), link(3, Some(2), "c")];
        let tree = build_tree(&links);

        fn collect(nodes: &[PageTreeNode], out: &mut Vec<DbId>) {
            for n in nodes {
                out.push(n.id);
                collect(&n.children, out);
            }
        }
        let mut seen = Vec::new();
        collect(&tree, &mut seen);
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn empty_space_builds_empty_tree() {
        assert!(build_tree(&[]).is_empty());
    }
}
