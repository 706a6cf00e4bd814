/*!
 * Common test utilities for the postmill test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use postmill::app_config::{Config, TranslationProvider};
use postmill::providers::mock::MockProvider;
use postmill::translation::{TranslationCache, TranslationOptions, TranslationService};

/// A post with frontmatter, a metadata literal and a mixed body
pub const SAMPLE_POST: &str = r#"---
title: "你好世界"
publishedAt: "2024-01-05"
---

import Figure from '../components/figure'

export const metadata = {
  title: "你好世界",
  description: "第一篇文章",
  publishedAt: "2024-01-05",
};

## 你好 世界

这是正文。

```rust
fn main() {
    println!("你好");
}
```

| 名称 | 值 |
| --- | --- |
| 甲 | 1 |

- 第一项
- 参见 [文档](https://example.com)

![一只猫](/images/cat.png)
"#;

/// A post described only by its metadata literal
pub const LITERAL_ONLY_POST: &str = r#"export const metadata = {
  title: { default: "第二篇", template: "%s | 博客" },
  localizedTitle: "第二篇",
  publishedAt: "2024-03-10T08:00:00Z",
};

正文内容
"#;

/// A post without a publish date, never listed
pub const UNDATED_POST: &str = "---\ntitle: \"草稿\"\n---\n\n还没写完\n";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates `<root>/<year>/<slug>/page.mdx`
pub fn create_post(root: &Path, year: &str, slug: &str, content: &str) -> Result<PathBuf> {
    create_test_file(root, &format!("{}/{}/page.mdx", year, slug), content)
}

/// Configuration pointing at `zh` and `en` trees under `root`
pub fn test_config(root: &Path) -> Config {
    let mut config = Config::default();
    config.content.source_dir = root.join("zh").to_string_lossy().into_owned();
    config.content.target_dir = root.join("en").to_string_lossy().into_owned();
    config.translation.provider = TranslationProvider::Passthrough;
    config
}

/// Options with short timeouts and backoff for fast tests
pub fn fast_options() -> TranslationOptions {
    TranslationOptions {
        timeout: Duration::from_millis(200),
        retry_count: 1,
        retry_backoff_ms: 1,
        max_concurrent_requests: 4,
    }
}

/// Translation service over a mock provider
pub fn mock_service(provider: MockProvider) -> TranslationService {
    TranslationService::new(Arc::new(provider), fast_options(), TranslationCache::new(true))
}
