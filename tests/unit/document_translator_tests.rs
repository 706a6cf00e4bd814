/*!
 * Tests for whole-document translation
 */

use std::sync::Arc;

use postmill::providers::mock::MockProvider;
use postmill::translation::DocumentTranslator;

use crate::common;

fn translator() -> DocumentTranslator {
    DocumentTranslator::new(Arc::new(common::mock_service(MockProvider::working())))
}

fn fenced_block(text: &str) -> &str {
    let start = text.find("```rust").unwrap();
    let end = text[start + 3..].find("```").unwrap() + start + 6;
    &text[start..end]
}

#[tokio::test]
async fn test_translate_document_withSamplePost_shouldKeepCodeBlockIdentical() {
    let output = translator().translate_document(common::SAMPLE_POST, "en").await;
    assert_eq!(fenced_block(&output), fenced_block(common::SAMPLE_POST));
}

#[tokio::test]
async fn test_translate_document_withSamplePost_shouldTranslateProse() {
    let output = translator().translate_document(common::SAMPLE_POST, "en").await;

    assert!(output.contains("\n## [en] 你好 世界\n"));
    assert!(output.contains("\n[en] 这是正文。\n"));
    assert!(output.contains("\n- [en] 第一项\n"));
    assert!(output.contains("![[en] 一只猫](/images/cat.png)"));
}

#[tokio::test]
async fn test_translate_document_withSamplePost_shouldKeepTablesLinksAndImports() {
    let output = translator().translate_document(common::SAMPLE_POST, "en").await;

    assert!(output.contains("\n| 名称 | 值 |\n| --- | --- |\n| 甲 | 1 |\n"));
    assert!(output.contains("\n- 参见 [文档](https://example.com)\n"));
    assert!(output.contains("\nimport Figure from '../components/figure'\n"));
}

#[tokio::test]
async fn test_translate_document_withSamplePost_shouldRewriteMetadata() {
    let output = translator().translate_document(common::SAMPLE_POST, "en").await;

    assert!(output.starts_with(
        "---\ntitle: \"[en] 你好世界\"\npublishedAt: \"2024-01-05\"\nlocalizedTitle: \"你好世界\"\n---\n\n"
    ));
    assert!(output.contains(
        "export const metadata = {\n  title: \"[en] 你好世界\",\n  description: \"[en] 第一篇文章\",\n  publishedAt: \"2024-01-05\",\n  localizedTitle: \"你好世界\"\n};\n"
    ));
    assert!(output.ends_with('\n'));
}

#[tokio::test]
async fn test_translate_document_withTitleObject_shouldKeepShapeAndLocalizedTitle() {
    let output = translator().translate_document(common::LITERAL_ONLY_POST, "en").await;

    assert!(output.contains("  title: {\n    default: \"[en] 第二篇\",\n    template: \"%s | 博客\"\n  },\n"));
    assert!(output.contains("  localizedTitle: \"第二篇\",\n"));
    assert!(output.contains("[en] 正文内容"));
}

#[tokio::test]
async fn test_translate_document_withFailingProvider_shouldReturnSourceText() {
    let translator = DocumentTranslator::new(Arc::new(common::mock_service(MockProvider::failing())));
    let source = "## 你好\n\n正文\n";

    assert_eq!(translator.translate_document(source, "en").await, source);
}

#[tokio::test]
async fn test_translate_document_withPlainText_shouldEndWithNewline() {
    let output = translator().translate_document("只有一行", "en").await;
    assert_eq!(output, "[en] 只有一行\n");
}

#[tokio::test]
async fn test_translate_document_withIdentityProvider_shouldKeepBodyText() {
    let translator = DocumentTranslator::new(Arc::new(common::mock_service(MockProvider::identity())));
    let output = translator.translate_document(common::SAMPLE_POST, "en").await;

    let body_start = common::SAMPLE_POST.find("## 你好 世界").unwrap();
    assert!(output.ends_with(&common::SAMPLE_POST[body_start..]));
}

#[tokio::test]
async fn test_translate_document_withDeeplyNestedLiteral_shouldKeepLiteralVerbatim() {
    let literal = format!("{{ title: \"深\", extra: {}1{} }}", "[".repeat(2_000), "]".repeat(2_000));
    let doc = format!("export const metadata = {};\n\n正文\n", literal);

    let output = translator().translate_document(&doc, "en").await;

    assert!(output.contains(&format!("export const metadata = {};\n", literal)));
    assert!(output.contains("[en] 正文"));
}
