//! End-to-end tagging orchestration.

use crate::core::{
    CancelToken, ClassifierHandle, ClassifierProvider, TagError, TaggerConfig,
};
use crate::domain::TagPrediction;
use crate::pipeline::{aggregate, normalize, runner};
use crate::processors::resize_to_footprint;
use crate::utils::decode_image;
use image::{DynamicImage, RgbImage};
use tracing::{debug, warn};

/// Source of the image handed to the pipeline.
enum ImageSource<'a> {
    /// Raw encoded payload (JPEG, PNG, ...).
    Bytes(&'a [u8]),
    /// An image the caller already decoded.
    Decoded(&'a DynamicImage),
}

impl ImageSource<'_> {
    fn decode(&self) -> Result<RgbImage, TagError> {
        match self {
            ImageSource::Bytes(bytes) => decode_image(bytes),
            ImageSource::Decoded(image) => Ok(image.to_rgb8()),
        }
    }
}

/// End-to-end photo tagger.
///
/// Owns the lazily-loaded classifier capability and the pipeline
/// configuration. A single instance is intended to live for the process
/// lifetime and serve concurrent calls; all per-call state (base image,
/// variants, predictions) is call-local.
///
/// Classification is all-or-nothing: any stage failure surfaces as a
/// single [`TagError::ClassificationFailed`] carrying the original
/// cause, and every decoded image created during the call is released
/// on every exit path. An empty result is returned only when inference
/// succeeded and no label cleared the confidence cutoff.
#[derive(Debug)]
pub struct PhotoTagger {
    config: TaggerConfig,
    handle: ClassifierHandle,
}

impl PhotoTagger {
    /// Creates a tagger from a provider and a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `TagError::Config` if the configuration is invalid.
    pub fn new(
        provider: Box<dyn ClassifierProvider>,
        config: TaggerConfig,
    ) -> Result<Self, TagError> {
        config.validate()?;
        Ok(Self {
            config,
            handle: ClassifierHandle::new(provider),
        })
    }

    /// Returns a builder for configuring a tagger.
    pub fn builder() -> PhotoTaggerBuilder {
        PhotoTaggerBuilder::new()
    }

    /// The active configuration.
    pub fn config(&self) -> &TaggerConfig {
        &self.config
    }

    /// Eagerly loads the classifier backend.
    ///
    /// Optional: the first tagging call loads it on demand. Useful at
    /// application startup to front-load the (possibly slow) model
    /// fetch.
    ///
    /// # Errors
    ///
    /// Propagates the provider's load error; a later call retries.
    pub fn warm_up(&self) -> Result<(), TagError> {
        self.handle.get_or_load().map(|_| ())
    }

    /// Classifies an in-memory image payload into at most
    /// `max_results` cleaned, confidence-ranked tags.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::ClassificationFailed`] wrapping the failing
    /// stage's error.
    pub fn tag_bytes(&self, bytes: &[u8]) -> Result<Vec<TagPrediction>, TagError> {
        self.tag_bytes_with_cancel(bytes, &CancelToken::new())
    }

    /// Like [`tag_bytes`](Self::tag_bytes), checking the token between
    /// pipeline stages. In-flight variant inference is joined, not
    /// forcibly aborted.
    pub fn tag_bytes_with_cancel(
        &self,
        bytes: &[u8],
        cancel: &CancelToken,
    ) -> Result<Vec<TagPrediction>, TagError> {
        self.run_pipeline(ImageSource::Bytes(bytes), cancel)
            .map_err(TagError::classification_failed)
    }

    /// Classifies an image the caller already decoded.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::ClassificationFailed`] wrapping the failing
    /// stage's error.
    pub fn tag_image(&self, image: &DynamicImage) -> Result<Vec<TagPrediction>, TagError> {
        self.tag_image_with_cancel(image, &CancelToken::new())
    }

    /// Like [`tag_image`](Self::tag_image), checking the token between
    /// pipeline stages.
    pub fn tag_image_with_cancel(
        &self,
        image: &DynamicImage,
        cancel: &CancelToken,
    ) -> Result<Vec<TagPrediction>, TagError> {
        self.run_pipeline(ImageSource::Decoded(image), cancel)
            .map_err(TagError::classification_failed)
    }

    fn run_pipeline(
        &self,
        source: ImageSource<'_>,
        cancel: &CancelToken,
    ) -> Result<Vec<TagPrediction>, TagError> {
        let classifier = self.handle.get_or_load()?;
        cancel.check()?;

        // The full-size decode is dropped here; only the footprint-sized
        // base survives into the inference phase.
        let base = {
            let decoded = source.decode()?;
            resize_to_footprint(
                &decoded,
                self.config.input_edge,
                self.config.resize_filter.into(),
            )
        };
        debug!(
            width = base.width(),
            height = base.height(),
            "prepared base image"
        );
        cancel.check()?;

        let variant_lists = runner::run_variants(
            classifier.as_ref(),
            &base,
            &self.config.photometric_configs,
            self.config.top_k,
            self.config.jpeg_quality,
        )?;
        drop(base);
        cancel.check()?;

        let aggregated = aggregate::combine(&variant_lists, self.config.max_results);
        debug!(labels = aggregated.len(), "aggregated variant predictions");

        let results = normalize::finalize(
            aggregated,
            self.config.score_threshold,
            self.config.sigmoid_steepness,
        );
        if results.is_empty() {
            warn!("no label cleared the confidence cutoff");
        }
        Ok(results)
    }
}

/// Builder for [`PhotoTagger`].
///
/// The classifier provider is required; everything else defaults to the
/// stock configuration.
pub struct PhotoTaggerBuilder {
    config: TaggerConfig,
    provider: Option<Box<dyn ClassifierProvider>>,
}

impl PhotoTaggerBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: TaggerConfig::default(),
            provider: None,
        }
    }

    /// Sets the classifier provider.
    pub fn provider(mut self, provider: impl ClassifierProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: TaggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the score cutoff applied before confidence remapping.
    pub fn score_threshold(mut self, threshold: f32) -> Self {
        self.config.score_threshold = threshold;
        self
    }

    /// Sets the sigmoid steepness of the confidence remap.
    pub fn sigmoid_steepness(mut self, steepness: f32) -> Self {
        self.config.sigmoid_steepness = steepness;
        self
    }

    /// Sets the number of candidates requested per variant.
    pub fn top_k(mut self, top_k: usize) -> Self {
        self.config.top_k = top_k;
        self
    }

    /// Sets the maximum number of returned tags.
    pub fn max_results(mut self, max_results: usize) -> Self {
        self.config.max_results = max_results;
        self
    }

    /// Builds the tagger.
    ///
    /// # Errors
    ///
    /// Returns `TagError::Config` if no provider was set or the
    /// configuration is invalid.
    pub fn build(self) -> Result<PhotoTagger, TagError> {
        let provider = self
            .provider
            .ok_or_else(|| TagError::config("classifier provider is required"))?;
        PhotoTagger::new(provider, self.config)
    }
}

impl Default for PhotoTaggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
