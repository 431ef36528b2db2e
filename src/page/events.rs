use crate::feed::FeedCompletion;
use crate::i18n::LanguageCode;

/// Everything the page's event loop reacts to.
#[derive(Debug)]
pub enum PageEvent {
    /// The document is ready; restore the language and start the first loads.
    Ready,
    /// The user picked a language in the selector.
    LanguageSelected(LanguageCode),
    /// A background feed fetch finished.
    FeedLoaded(FeedCompletion),
}
