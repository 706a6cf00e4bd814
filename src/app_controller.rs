use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::app_config::Config;
use crate::errors::ProviderError;
use crate::file_utils::{FileManager, PostDocument};
use crate::language_utils;
use crate::translation::{CacheStats, DocumentTranslator, TranslationService};

// @module: Application controller for mirroring a post tree into another locale

/// Options for a single run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Regenerate posts whose mirror already exists
    pub force: bool,
    /// Translate but do not write anything
    pub dry_run: bool,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

/// Outcome of a run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Posts written, or that would be written in a dry run
    pub created: usize,
    /// Posts left alone because their mirror exists
    pub skipped: usize,
    /// Posts that could not be read or written
    pub failed: usize,
    /// Text spans kept untranslated after provider failures
    pub translation_failures: usize,
    pub cache: CacheStats,
    pub dry_run: bool,
}

/// Main application controller for post translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Shared translation service, one per run
    service: Arc<TranslationService>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let service = TranslationService::from_config(&config.translation)?;
        Ok(Self::with_service(config, service))
    }

    /// Create a controller over an existing translation service
    pub fn with_service(config: Config, service: TranslationService) -> Self {
        Self {
            config,
            service: Arc::new(service),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> &TranslationService {
        &self.service
    }

    /// Document translator configured for this run
    pub fn document_translator(&self) -> DocumentTranslator {
        let source_language = if language_utils::is_auto(&self.config.source_language) {
            None
        } else {
            Some(self.config.source_language.clone())
        };

        DocumentTranslator::new(self.service.clone())
            .with_source_language(source_language)
            .with_source_title_key(self.config.translation.source_title_key.clone())
            .with_max_concurrent_requests(self.service.options.max_concurrent_requests)
    }

    /// Check that the configured provider answers, logging the outcome.
    ///
    /// A failure is only reported: the run can still proceed and keep
    /// untranslated text where calls fail.
    pub async fn check_provider(&self) -> Result<(), ProviderError> {
        let provider = self.config.translation.provider.display_name();
        match self.service.test_connection().await {
            Ok(()) => {
                debug!("{} provider is reachable", provider);
                Ok(())
            }
            Err(e) => {
                warn!("{} provider check failed: {}", provider, e);
                Err(e)
            }
        }
    }

    /// Mirror every source post into the target tree
    pub async fn run(&self, options: RunOptions) -> Result<RunSummary> {
        let start_time = Instant::now();
        let content = &self.config.content;
        let source_root = Path::new(&content.source_dir);
        let target_root = Path::new(&content.target_dir);

        if !FileManager::dir_exists(source_root) {
            warn!("Source directory {:?} not found, nothing to translate", source_root);
        }

        let documents = FileManager::find_post_documents(source_root, &content.document_name);
        info!(
            "Found {} post(s) in {:?} ({} -> {}, provider: {})",
            documents.len(),
            source_root,
            self.config.source_language,
            self.config.target_language,
            self.service.provider_name()
        );

        let progress_bar = self.progress_bar(documents.len() as u64, options.show_progress);
        let translator = self.document_translator();

        let mut summary = RunSummary {
            created: 0,
            skipped: 0,
            failed: 0,
            translation_failures: 0,
            cache: self.service.cache.stats(),
            dry_run: options.dry_run,
        };

        for document in &documents {
            progress_bar.set_message(format!("{}/{}", document.year, document.slug));
            let target_path = document.mirror_path(target_root, &content.document_name);

            if !options.force && FileManager::file_exists(&target_path) {
                debug!("Skipping {}/{}: {:?} exists", document.year, document.slug, target_path);
                summary.skipped += 1;
                progress_bar.inc(1);
                continue;
            }

            match self
                .translate_post(&translator, document, &target_path, options.dry_run)
                .await
            {
                Ok(()) => summary.created += 1,
                Err(e) => {
                    error!("Failed to translate {:?}: {:#}", document.path, e);
                    summary.failed += 1;
                }
            }
            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();

        summary.translation_failures = self.service.failure_count();
        summary.cache = self.service.cache.stats();
        self.log_summary(&summary, start_time);

        Ok(summary)
    }

    /// Translate one post and write its mirror unless `dry_run`
    pub async fn translate_post(
        &self,
        translator: &DocumentTranslator,
        document: &PostDocument,
        target_path: &Path,
        dry_run: bool,
    ) -> Result<()> {
        let source = FileManager::read_to_string(&document.path)?;
        let translated = translator
            .translate_document(&source, &self.config.target_language)
            .await;

        if dry_run {
            debug!("Dry run: would write {:?}", target_path);
            return Ok(());
        }

        FileManager::write_to_file(target_path, &translated)?;
        debug!("Wrote {:?}", target_path);
        Ok(())
    }

    fn progress_bar(&self, len: u64, visible: bool) -> ProgressBar {
        if !visible {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(len);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} posts ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar
    }

    fn log_summary(&self, summary: &RunSummary, start_time: Instant) {
        let action = if summary.dry_run { "would create" } else { "created" };
        info!("Posts {}: {}", action, summary.created);
        if summary.skipped > 0 {
            info!("Skipped existing posts: {}", summary.skipped);
        }
        if summary.failed > 0 {
            error!("Failed posts: {}", summary.failed);
        }
        if summary.translation_failures > 0 {
            warn!(
                "{} text span(s) kept untranslated after provider failures",
                summary.translation_failures
            );
        }
        debug!(
            "Cache: {} hit(s), {} miss(es), {} entr(ies), hit rate {:.1}%",
            summary.cache.hits,
            summary.cache.misses,
            summary.cache.entries,
            summary.cache.hit_rate() * 100.0
        );
        info!("Finished in {:.2?}", start_time.elapsed());
    }
}
