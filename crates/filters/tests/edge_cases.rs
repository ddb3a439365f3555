//! Edge cases across the filter engine: unusual roots, parser leniency,
//! escaping, the global ignore and string entry parsing.

use treepack_filters::{
    ConfigError, ImportMode, PathFilterSet, PathMatcher, StringFilterSet, WorkspaceFilter, vcs,
};

fn matcher(pattern: &str) -> PathMatcher {
    PathMatcher::new(pattern).expect("pattern compiles")
}

// =============================================================================
// Roots
// =============================================================================

#[test]
fn trailing_slashes_are_trimmed_from_roots() {
    assert_eq!(PathFilterSet::new("/apps/foo/").expect("valid").root(), "/apps/foo");
    assert_eq!(PathFilterSet::new("/apps/foo//").expect("valid").root(), "/apps/foo");
    assert_eq!(PathFilterSet::new("/").expect("valid").root(), "/");
}

#[test]
fn invalid_roots_are_rejected_at_construction() {
    assert!(matches!(PathFilterSet::new(""), Err(ConfigError::EmptyRoot)));
    assert!(matches!(
        PathFilterSet::new("relative/root"),
        Err(ConfigError::RelativeRoot { .. })
    ));
}

// =============================================================================
// Parser Leniency
// =============================================================================

#[test]
fn comments_whitespace_and_declarations_are_tolerated() {
    let source = br#"<?xml version="1.0" encoding="UTF-8"?>
<!-- package content -->
<workspaceFilter version="1.0">
    <!-- the application -->
    <filter root="/apps/site">
        <include pattern="/apps/site(/.*)?"/>
    </filter>
</workspaceFilter>
"#;
    let filter = WorkspaceFilter::from_source(source).expect("loads");
    assert!(filter.contains("/apps/site/page"));
}

#[test]
fn empty_documents_yield_empty_filters() {
    let filter = WorkspaceFilter::from_source(b"<workspaceFilter/>").expect("loads");
    assert!(filter.filter_sets().is_empty());
    assert!(!filter.contains("/anything"));
    assert!(!filter.covers("/anything"));
}

#[test]
fn empty_root_attribute_defaults_to_slash() {
    let filter =
        WorkspaceFilter::from_source(br#"<workspaceFilter><filter root=""/></workspaceFilter>"#)
            .expect("loads");
    assert_eq!(filter.filter_sets()[0].root(), "/");
    assert!(filter.contains("/anything/at/all"));
}

#[test]
fn mode_names_are_case_insensitive() {
    let source = br#"<workspaceFilter>
    <filter root="/a" mode="MERGE"/>
    <filter root="/b" mode="Merge_Properties"/>
</workspaceFilter>"#;
    let filter = WorkspaceFilter::from_source(source).expect("loads");
    assert_eq!(filter.filter_sets()[0].import_mode(), ImportMode::Merge);
    assert_eq!(
        filter.filter_sets()[1].import_mode(),
        ImportMode::MergeProperties
    );
}

#[test]
fn entry_elements_may_use_explicit_end_tags() {
    let source = br#"<workspaceFilter>
    <filter root="/a">
        <include pattern="/a(/.*)?"></include>
    </filter>
</workspaceFilter>"#;
    let filter = WorkspaceFilter::from_source(source).expect("loads");
    assert!(filter.contains("/a/child"));
}

// =============================================================================
// Escaping
// =============================================================================

#[test]
fn escaped_attribute_values_round_trip() {
    let mut set = PathFilterSet::new("/apps").expect("valid root");
    set.add_include(matcher("/apps/a&b<c>(/.*)?"));
    let mut filter = WorkspaceFilter::new();
    filter.add(set);

    let source = filter.generate_source().to_vec();
    let text = String::from_utf8(source.clone()).expect("utf-8");
    assert!(text.contains("&amp;"));
    assert!(text.contains("&lt;"));

    let reloaded = WorkspaceFilter::from_source(&source).expect("loads");
    assert_eq!(
        reloaded.filter_sets()[0].entries().entries()[0]
            .matcher()
            .pattern(),
        "/apps/a&b<c>(/.*)?"
    );
}

// =============================================================================
// Global Ignore
// =============================================================================

#[test]
fn stock_vcs_ignore_hides_metadata_everywhere() {
    let mut filter = WorkspaceFilter::new();
    let mut set = PathFilterSet::new("/apps").expect("valid root");
    set.add_include(matcher("/apps(/.*)?"));
    filter.add(set);
    filter.set_global_ignored(vcs::default_ignored().expect("stock pattern compiles"));

    assert!(filter.contains("/apps/site"));
    assert!(!filter.contains("/apps/.svn"));
    assert!(!filter.contains("/apps/site/.git/config"));
    assert!(filter.covering_filter_set("/apps/.svn/entries").is_none());
}

#[test]
fn global_ignore_is_not_serialized() {
    let mut filter = WorkspaceFilter::new();
    filter.add(PathFilterSet::new("/apps").expect("valid root"));
    filter.set_global_ignored(vcs::default_ignored().expect("stock pattern compiles"));

    let text = filter.source_as_string();
    assert!(!text.contains("svn"));

    let reloaded = WorkspaceFilter::from_source(text.as_bytes()).expect("loads");
    assert!(reloaded.global_ignored().is_none());
}

// =============================================================================
// String Entries
// =============================================================================

#[test]
fn string_entries_trim_whitespace_and_honor_tilde() {
    let mut filter = StringFilterSet::new();
    filter
        .add_entries("  alpha , ~beta ,gamma  ")
        .expect("entries compile");

    assert!(filter.contains("alpha"));
    assert!(!filter.contains("beta"));
    assert!(filter.contains("gamma"));
    assert!(!filter.contains("delta"));
}

#[test]
fn string_entries_support_regex_patterns() {
    let mut filter = StringFilterSet::new();
    filter
        .add_entries("release-.*, ~release-snapshot")
        .expect("entries compile");

    assert!(filter.contains("release-2024"));
    assert!(!filter.contains("release-snapshot"));
    assert!(!filter.contains("nightly"));
}
