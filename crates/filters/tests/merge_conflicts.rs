//! Tests for merging workspace filters and the duplicate-root policy.
//!
//! `merge` is all-or-nothing: every incoming root is validated against the
//! registered sets before anything is appended. `add`, by contrast, applies
//! no uniqueness check at all; the asymmetry is part of the engine's
//! contract and both sides are pinned down here.

use treepack_filters::{MergeError, PathFilterSet, PathMatcher, WorkspaceFilter};

fn set(root: &str) -> PathFilterSet {
    PathFilterSet::new(root).expect("valid root")
}

#[test]
fn merge_appends_all_sets_in_order() {
    let mut target = WorkspaceFilter::new();
    target.add(set("/apps"));

    let mut other = WorkspaceFilter::new();
    other.add(set("/content"));
    other.add(set("/etc/designs"));

    target.merge(other).expect("roots are disjoint");

    let roots: Vec<_> = target
        .filter_sets()
        .iter()
        .map(PathFilterSet::root)
        .collect();
    assert_eq!(roots, ["/apps", "/content", "/etc/designs"]);
}

#[test]
fn duplicate_root_fails_and_names_the_root() {
    let mut target = WorkspaceFilter::new();
    target.add(set("/apps/foo"));

    let mut other = WorkspaceFilter::new();
    other.add(set("/apps/foo"));

    let error = target.merge(other).unwrap_err();
    assert!(matches!(error, MergeError::DuplicateRoot { root } if root == "/apps/foo"));
}

#[test]
fn failed_merge_leaves_the_target_unchanged() {
    let mut target = WorkspaceFilter::new();
    target.add(set("/apps/foo"));

    // The conflicting set sits behind a conflict-free one; nothing from
    // `other` may be appended regardless of position.
    let mut other = WorkspaceFilter::new();
    other.add(set("/content"));
    other.add(set("/apps/foo"));

    assert!(target.merge(other).is_err());
    assert_eq!(target.filter_sets().len(), 1);
    assert_eq!(target.filter_sets()[0].root(), "/apps/foo");
}

#[test]
fn merge_into_an_empty_filter_copies_everything() {
    let mut source = WorkspaceFilter::new();
    let mut rules = set("/apps/site");
    rules.add_include(PathMatcher::new("/apps/site(/.*)?").expect("pattern compiles"));
    source.add(rules);

    let mut target = WorkspaceFilter::new();
    target.merge(source).expect("target is empty");

    assert!(target.contains("/apps/site/page"));
}

#[test]
fn merged_sets_serialize_after_the_existing_ones() {
    let mut target = WorkspaceFilter::new();
    target.add(set("/apps"));

    let mut other = WorkspaceFilter::new();
    other.add(set("/content"));
    target.merge(other).expect("roots are disjoint");

    let text = target.source_as_string();
    let apps = text.find(r#"root="/apps""#).expect("apps serialized");
    let content = text.find(r#"root="/content""#).expect("content serialized");
    assert!(apps < content);
}

#[test]
fn add_tolerates_duplicate_roots() {
    let mut filter = WorkspaceFilter::new();
    filter.add(set("/apps/foo"));
    filter.add(set("/apps/foo"));
    assert_eq!(filter.filter_sets().len(), 2);

    // A later merge of the same root still fails against either duplicate.
    let mut other = WorkspaceFilter::new();
    other.add(set("/apps/foo"));
    assert!(filter.merge(other).is_err());
}

#[test]
fn trailing_slash_roots_collide_after_normalization() {
    let mut target = WorkspaceFilter::new();
    target.add(set("/apps/foo"));

    let mut other = WorkspaceFilter::new();
    other.add(set("/apps/foo/"));

    assert!(matches!(
        target.merge(other),
        Err(MergeError::DuplicateRoot { .. })
    ));
}
