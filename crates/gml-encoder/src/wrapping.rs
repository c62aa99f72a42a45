//! Open/close protocol around the collection, each feature and each tuple

use crate::Result;
use crate::writer::MarkupWriter;

/// Markup emitted around the features of a collection
///
/// The engine calls `start_features` once, then `start_feature` /
/// `end_feature` around every feature, then `end_features` once. Calling out
/// of order is a bug in the engine, not a condition implementations recover
/// from.
pub trait FeatureWrapping {
    /// Collection-level opening markup beyond the collection root
    fn start_features(&self, writer: &mut dyn MarkupWriter) -> Result<()>;

    /// Open the member element of one feature
    fn start_feature(&self, writer: &mut dyn MarkupWriter) -> Result<()>;

    /// Close the member element opened by `start_feature`
    fn end_feature(&self, writer: &mut dyn MarkupWriter) -> Result<()>;

    fn end_features(&self, writer: &mut dyn MarkupWriter) -> Result<()>;

    /// Whether each coordinate tuple is written as its own element.
    /// `start_tuple`/`end_tuple` must only be called when this is true.
    fn supports_tuples(&self) -> bool;

    fn start_tuple(&self, writer: &mut dyn MarkupWriter) -> Result<()>;

    fn end_tuple(&self, writer: &mut dyn MarkupWriter) -> Result<()>;
}

/// Where the engine is in the wrapping protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrappingState {
    #[default]
    CollectionNotStarted,
    CollectionOpen,
    FeatureOpen,
    CollectionClosed,
}

/// A call of the wrapping protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrappingStep {
    StartFeatures,
    StartFeature,
    EndFeature,
    EndFeatures,
}

impl WrappingState {
    /// State after `step`, or `None` if `step` is not allowed here
    pub fn advance(self, step: WrappingStep) -> Option<WrappingState> {
        use WrappingState::*;
        match (self, step) {
            (CollectionNotStarted, WrappingStep::StartFeatures) => Some(CollectionOpen),
            (CollectionOpen, WrappingStep::StartFeature) => Some(FeatureOpen),
            (FeatureOpen, WrappingStep::EndFeature) => Some(CollectionOpen),
            (CollectionOpen, WrappingStep::EndFeatures) => Some(CollectionClosed),
            _ => None,
        }
    }
}
