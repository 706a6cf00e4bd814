/*!
 * Tests for post metadata extraction
 */

use postmill::document::frontmatter::{format_frontmatter, parse_frontmatter};
use postmill::document::metadata::{format_post_date, parse_published_at};
use postmill::document::{PostMetadata, extract_post_metadata, find_object_literal};

use crate::common;

#[test]
fn test_find_object_literal_withBracesInString_shouldReturnWholeLiteral() {
    let text = r#"export const metadata = { title: "a { b } c" };"#;
    assert_eq!(find_object_literal(text, 0), Some(r#"{ title: "a { b } c" }"#));
}

#[test]
fn test_find_object_literal_withEscapedQuote_shouldNotEndString() {
    let text = r#"export const metadata = { title: "say \"}\" twice" }; rest"#;
    assert_eq!(find_object_literal(text, 0), Some(r#"{ title: "say \"}\" twice" }"#));
}

#[test]
fn test_extract_withFrontmatterOnly_shouldUseTitleForBoth() {
    let meta = extract_post_metadata("---\ntitle: \"Hello\"\n---\n");
    assert_eq!(meta.title.as_deref(), Some("Hello"));
    assert_eq!(meta.localized_title.as_deref(), Some("Hello"));
}

#[test]
fn test_extract_withLiteralAndFrontmatter_shouldPreferLiteral() {
    let doc = "---\ntitle: \"Front\"\nlocalizedTitle: \"前\"\npublishedAt: \"2023-01-01\"\n---\n\nexport const metadata = { title: \"Literal\", publishedAt: \"2024-02-02\" };\n";
    let meta = extract_post_metadata(doc);

    assert_eq!(meta.title.as_deref(), Some("Literal"));
    assert_eq!(meta.localized_title.as_deref(), Some("前"));
    assert_eq!(meta.published_at.as_deref(), Some("2024-02-02"));
}

#[test]
fn test_extract_withTitleObject_shouldUseDefault() {
    let meta = extract_post_metadata(common::LITERAL_ONLY_POST);
    assert_eq!(meta.title.as_deref(), Some("第二篇"));
    assert_eq!(meta.published_at.as_deref(), Some("2024-03-10T08:00:00Z"));
}

#[test]
fn test_extract_withLegacyLocalizedKey_shouldReadIt() {
    let meta = extract_post_metadata("export const metadata = { title: \"Hi\", zhTitle: \"嗨\" }");
    assert_eq!(meta.localized_title.as_deref(), Some("嗨"));
}

#[test]
fn test_extract_withUnparsableLiteral_shouldFallBackToFrontmatter() {
    let doc = "---\ntitle: \"Front\"\n---\nexport const metadata = { title: getTitle() };";
    assert_eq!(extract_post_metadata(doc).title.as_deref(), Some("Front"));
}

#[test]
fn test_post_metadata_from_document_withMissingTitleOrDate_shouldFilter() {
    assert!(PostMetadata::from_document("draft", common::UNDATED_POST).is_none());
    assert!(PostMetadata::from_document("untitled", "---\npublishedAt: 2024-01-01\n---\n").is_none());
    assert!(
        PostMetadata::from_document("bad-date", "---\ntitle: x\npublishedAt: someday\n---\n").is_none()
    );
}

#[test]
fn test_post_metadata_from_document_withValidPost_shouldFormatDate() {
    let meta = PostMetadata::from_document("hello", common::SAMPLE_POST).unwrap();
    assert_eq!(meta.id, "hello");
    assert_eq!(meta.title, "你好世界");
    assert_eq!(meta.localized_title, "你好世界");
    assert_eq!(meta.date, "January 5, 2024");
}

#[test]
fn test_parse_published_at_withSupportedFormats_shouldParse() {
    for raw in [
        "2024-01-05",
        "2024/01/05",
        "2024-01-05 10:30",
        "2024-01-05T10:30:00",
        "2024-01-05T10:30:00+08:00",
    ] {
        let parsed = parse_published_at(raw).unwrap_or_else(|| panic!("failed to parse {}", raw));
        assert_eq!(format_post_date(&parsed), "January 5, 2024", "input {}", raw);
    }
    assert!(parse_published_at("").is_none());
    assert!(parse_published_at("2024-13-40").is_none());
}

#[test]
fn test_frontmatter_format_shouldBeIdempotentAfterFirstPass() {
    let source = "---\ntitle: 'Hello'\n  date : 2024-01-05\nnot a pair\n---\nbody";
    let once = format_frontmatter(&parse_frontmatter(source));
    let twice = format_frontmatter(&parse_frontmatter(&once));

    assert_eq!(once, twice);
    assert_eq!(once, "---\ntitle: \"Hello\"\ndate: \"2024-01-05\"\n---\n\n");
}

#[test]
fn test_extract_withDeeplyNestedLiteral_shouldFallBackToFrontmatter() {
    let nested = format!("{}1{}", "{a:".repeat(2_000), "}".repeat(2_000));
    let doc = format!(
        "---\ntitle: \"Front\"\npublishedAt: \"2023-06-01\"\n---\n\nexport const metadata = {{ title: \"Deep\", extra: {} }};\n",
        nested
    );

    let meta = extract_post_metadata(&doc);
    assert_eq!(meta.title.as_deref(), Some("Front"));
    assert_eq!(meta.published_at.as_deref(), Some("2023-06-01"));

    let post = PostMetadata::from_document("deep", &doc).unwrap();
    assert_eq!(post.date, "June 1, 2023");
}
