//! Listing behavior against an in-memory store.

use s3ls::{list, Entry, Error, ListOptions, MemoryStore};

fn paths(entries: &[Entry]) -> Vec<String> {
    entries.iter().map(Entry::path).collect()
}

fn logs_store() -> MemoryStore {
    MemoryStore::new()
        .with_object("bucket", "logs/2023/error.txt", 10)
        .with_object("bucket", "logs/2023/info.txt", 20)
        .with_object("bucket", "logs/2024/error.txt", 30)
        .with_object("bucket", "logs/2024/nested/error.txt", 40)
        .with_object("bucket", "other/error.txt", 50)
        .with_object("bucket", "readme.md", 60)
}

#[tokio::test]
async fn test_wildcard_scenario() {
    let store = MemoryStore::new()
        .with_object("bucket", "logs/2023/error.txt", 1)
        .with_object("bucket", "logs/2023/info.txt", 2)
        .with_object("bucket", "logs/2024/error.txt", 3);

    let entries = list(&store, "s3://bucket/logs/*/error.txt", &ListOptions::new())
        .await
        .unwrap();

    assert_eq!(
        paths(&entries),
        vec![
            "s3://bucket/logs/2023/error.txt",
            "s3://bucket/logs/2024/error.txt",
        ]
    );
    assert!(entries.iter().all(|e| !e.is_dir()));
}

#[tokio::test]
async fn test_wildcard_star_spans_delimiters() {
    let entries = list(&logs_store(), "s3://bucket/logs/*/error.txt", &ListOptions::new())
        .await
        .unwrap();

    assert_eq!(
        paths(&entries),
        vec![
            "s3://bucket/logs/2023/error.txt",
            "s3://bucket/logs/2024/error.txt",
            "s3://bucket/logs/2024/nested/error.txt",
        ]
    );
}

#[tokio::test]
async fn test_wildcard_skips_non_matching_subtrees() {
    let store = logs_store();
    list(&store, "s3://bucket/logs/2023/*", &ListOptions::new())
        .await
        .unwrap();

    // The walk starts at logs/2023/ and never leaves it.
    assert_eq!(store.listed_prefixes(), vec!["logs/2023/"]);
}

#[tokio::test]
async fn test_wildcard_result_is_subset_of_recursive_listing() {
    let store = logs_store();
    let pattern = "s3://bucket/*error*";

    let matched = list(&store, pattern, &ListOptions::new()).await.unwrap();
    let everything = list(&store, "s3://bucket/", &ListOptions::new().with_recursive(true))
        .await
        .unwrap();

    let glob = glob::Pattern::new(pattern).unwrap();
    let expected: Vec<String> = paths(&everything)
        .into_iter()
        .filter(|p| glob.matches(p))
        .collect();

    assert_eq!(paths(&matched), expected);
    assert_eq!(matched.len(), 4);
}

#[tokio::test]
async fn test_wildcard_in_first_segment() {
    let entries = list(&logs_store(), "s3://bucket/re*", &ListOptions::new())
        .await
        .unwrap();
    assert_eq!(paths(&entries), vec!["s3://bucket/readme.md"]);
}

#[tokio::test]
async fn test_wildcard_keeps_matching_directories() {
    let entries = list(&logs_store(), "s3://bucket/logs/*/", &ListOptions::new())
        .await
        .unwrap();

    assert_eq!(
        paths(&entries),
        vec![
            "s3://bucket/logs/2023/",
            "s3://bucket/logs/2024/",
            "s3://bucket/logs/2024/nested/",
        ]
    );
}

#[tokio::test]
async fn test_non_recursive_returns_direct_children_only() {
    let entries = list(&logs_store(), "s3://bucket/logs/", &ListOptions::new())
        .await
        .unwrap();

    assert_eq!(
        paths(&entries),
        vec!["s3://bucket/logs/2023/", "s3://bucket/logs/2024/"]
    );
    assert!(entries.iter().all(|e| e.container() == "bucket"));
}

#[tokio::test]
async fn test_root_listing() {
    let entries = list(&logs_store(), "s3://bucket/", &ListOptions::new())
        .await
        .unwrap();

    assert_eq!(
        paths(&entries),
        vec![
            "s3://bucket/logs/",
            "s3://bucket/other/",
            "s3://bucket/readme.md",
        ]
    );
}

#[tokio::test]
async fn test_directories_sort_before_files() {
    let store = MemoryStore::new()
        .with_object("b", "z", 1)
        .with_object("b", "a", 1)
        .with_object("b", "a/x", 1);

    let entries = list(&store, "s3://b/", &ListOptions::new()).await.unwrap();
    assert_eq!(paths(&entries), vec!["s3://b/a/", "s3://b/a", "s3://b/z"]);
    assert!(entries[0].is_dir());
}

#[tokio::test]
async fn test_pagination_matches_single_page() {
    let build = |page_size| {
        MemoryStore::new()
            .with_page_size(page_size)
            .with_object("b", "d/1", 1)
            .with_object("b", "d/2", 2)
            .with_object("b", "d/3", 3)
            .with_object("b", "d/sub/4", 4)
            .with_object("b", "d/sub/5", 5)
    };

    let options = ListOptions::new().with_recursive(true);
    let paged_store = build(2);
    let paged = list(&paged_store, "s3://b/d/", &options).await.unwrap();
    let single = list(&build(1000), "s3://b/d/", &options).await.unwrap();

    assert_eq!(paths(&paged), paths(&single));
    assert_eq!(paged.len(), 6);
    // d/ spans two pages, d/sub/ one.
    assert_eq!(paged_store.list_calls(), 3);
}

#[tokio::test]
async fn test_large_listing_is_not_capped() {
    let mut store = MemoryStore::new().with_page_size(1000);
    for i in 0..2500 {
        store = store.with_object("b", &format!("many/{i:05}"), 1);
    }

    let entries = list(&store, "s3://b/many/", &ListOptions::new())
        .await
        .unwrap();
    assert_eq!(entries.len(), 2500);
    assert_eq!(store.list_calls(), 3);
}

#[tokio::test]
async fn test_repeated_calls_are_identical() {
    let store = logs_store();
    let options = ListOptions::new().with_recursive(true);

    let first = list(&store, "s3://bucket/", &options).await.unwrap();
    let second = list(&store, "s3://bucket/", &options).await.unwrap();
    assert_eq!(paths(&first), paths(&second));
}

#[tokio::test]
async fn test_each_directory_listed_once() {
    let store = logs_store();
    list(&store, "s3://bucket/", &ListOptions::new().with_recursive(true))
        .await
        .unwrap();

    let mut prefixes = store.listed_prefixes();
    prefixes.sort();
    assert_eq!(
        prefixes,
        vec!["", "logs/", "logs/2023/", "logs/2024/", "logs/2024/nested/", "other/"]
    );
}

#[tokio::test]
async fn test_store_failure_aborts_listing() {
    let store = logs_store().with_failure("bucket", "logs/2024/");

    let err = list(&store, "s3://bucket/", &ListOptions::new().with_recursive(true))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Store(_)));
}

#[tokio::test]
async fn test_custom_delimiter() {
    let store = MemoryStore::new()
        .with_object("b", "a|b|c", 1)
        .with_object("b", "a|d", 1);

    let entries = list(&store, "s3://b/a|", &ListOptions::new().with_delimiter("|"))
        .await
        .unwrap();
    assert_eq!(paths(&entries), vec!["s3://b/a|b|", "s3://b/a|d"]);
}

#[tokio::test]
async fn test_invalid_path_is_rejected() {
    let err = list(&logs_store(), "bucket/logs", &ListOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPath(_)));
}

#[tokio::test]
async fn test_star_run_lists_like_single_star() {
    let store = MemoryStore::new()
        .with_object("b", "data1", 1)
        .with_object("b", "data/x", 2)
        .with_object("b", "other", 3);

    let entries = list(&store, "s3://b/data**", &ListOptions::new())
        .await
        .unwrap();

    assert_eq!(
        paths(&entries),
        vec!["s3://b/data/", "s3://b/data/x", "s3://b/data1"]
    );
    assert!(entries[0].is_dir());
}

#[tokio::test]
async fn test_double_star_component_skips_root_level_match() {
    let store = MemoryStore::new()
        .with_object("b", "x.txt", 1)
        .with_object("b", "d/x.txt", 2);

    let entries = list(&store, "s3://b/**/x.txt", &ListOptions::new())
        .await
        .unwrap();

    assert_eq!(paths(&entries), vec!["s3://b/d/x.txt"]);
}

#[tokio::test]
async fn test_question_mark_pattern_matches_across_delimiter() {
    let store = MemoryStore::new().with_object("b", "a/c/x", 1);

    let options = ListOptions::new()
        .with_recursive(true)
        .with_pattern("s3://b/a?c/x");
    let entries = list(&store, "s3://b/", &options).await.unwrap();

    assert_eq!(paths(&entries), vec!["s3://b/a/c/x"]);
}

#[tokio::test]
async fn test_directory_marker_object_is_not_listed_twice() {
    let store = MemoryStore::new()
        .with_object("b", "a/", 0)
        .with_object("b", "a/x", 1)
        .with_object("b", "b/", 0);

    let options = ListOptions::new().with_recursive(true);
    let entries = list(&store, "s3://b/", &options).await.unwrap();

    assert_eq!(paths(&entries), vec!["s3://b/a/", "s3://b/b/", "s3://b/a/x"]);
    assert!(entries[0].is_dir());
    assert!(entries[1].is_dir());
}
