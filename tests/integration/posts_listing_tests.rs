/*!
 * Integration tests for listing posts with view counts
 */

use anyhow::Result;
use std::collections::HashMap;

use postmill::posts::load_posts;

use crate::common;

#[test]
fn test_load_posts_withMixedSources_shouldSortNewestFirst() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_post(root, "2024", "hello", common::SAMPLE_POST)?;
    common::create_post(root, "2024", "second", common::LITERAL_ONLY_POST)?;
    common::create_post(root, "2023", "older", "---\ntitle: \"旧的\"\npublishedAt: \"2023/12/31\"\n---\n")?;

    let posts = load_posts(root, "page.mdx", &HashMap::new());
    let ids: Vec<&str> = posts.iter().map(|p| p.id()).collect();

    assert_eq!(ids, vec!["second", "hello", "older"]);
    assert_eq!(posts[0].metadata.title, "第二篇");
    assert_eq!(posts[0].metadata.date, "March 10, 2024");
    assert_eq!(posts[1].metadata.date, "January 5, 2024");
    assert_eq!(posts[2].metadata.date, "December 31, 2023");
    Ok(())
}

#[test]
fn test_load_posts_withViewCounts_shouldAttachAndFormat() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_post(root, "2024", "hello", common::SAMPLE_POST)?;
    common::create_post(root, "2024", "second", common::LITERAL_ONLY_POST)?;

    let views = HashMap::from([("hello".to_string(), 1_234_567u64)]);
    let posts = load_posts(root, "page.mdx", &views);

    let hello = posts.iter().find(|p| p.id() == "hello").unwrap();
    assert_eq!(hello.views, 1_234_567);
    assert_eq!(hello.views_formatted, "1,234,567");

    let second = posts.iter().find(|p| p.id() == "second").unwrap();
    assert_eq!(second.views, 0);
    assert_eq!(second.views_formatted, "0");
    Ok(())
}

#[test]
fn test_load_posts_withUnlistablePosts_shouldSkipThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_post(root, "2024", "hello", common::SAMPLE_POST)?;
    common::create_post(root, "2024", "draft", common::UNDATED_POST)?;
    common::create_post(root, "2024", "bad-date", "---\ntitle: \"坏日期\"\npublishedAt: \"someday\"\n---\n")?;
    common::create_post(root, "2024", "untitled", "---\npublishedAt: \"2024-02-01\"\n---\n")?;

    let posts = load_posts(root, "page.mdx", &HashMap::new());

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id(), "hello");
    Ok(())
}

#[test]
fn test_load_posts_withMissingRoot_shouldReturnEmpty() {
    let posts = load_posts("/nonexistent/postmill/posts", "page.mdx", &HashMap::new());
    assert!(posts.is_empty());
}

#[test]
fn test_post_serialization_shouldFlattenMetadata() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_post(root, "2024", "second", common::LITERAL_ONLY_POST)?;

    let posts = load_posts(root, "page.mdx", &HashMap::new());
    let json = serde_json::to_value(&posts[0])?;

    assert_eq!(json["id"], "second");
    assert_eq!(json["title"], "第二篇");
    assert_eq!(json["localized_title"], "第二篇");
    assert_eq!(json["date"], "March 10, 2024");
    assert_eq!(json["views"], 0);
    assert!(json.get("published_at").is_none());
    Ok(())
}
