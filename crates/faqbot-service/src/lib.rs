//! faqbot-service
//!
//! The single `answer(query) -> text` surface handed to the chat loop. Any
//! retriever failure is contained here and turned into a polite message.

use tracing::error;

use faqbot_core::config::{ChatSettings, Settings};
use faqbot_core::traits::{AnswerRetriever, CorpusSupplier, Responder};
use faqbot_core::corpus::load_or_default;
use faqbot_text::FaqRetriever;

pub struct FaqService<R> where R: AnswerRetriever {
    retriever: R,
    fallback_message: String,
    error_message: String,
}

impl<R> FaqService<R> where R: AnswerRetriever {
    pub fn new(retriever: R, chat: &ChatSettings) -> Self {
        Self {
            retriever,
            fallback_message: chat.fallback_message.clone(),
            error_message: chat.error_message.clone(),
        }
    }

    pub fn retriever(&self) -> &R { &self.retriever }
}

impl FaqService<FaqRetriever> {
    /// Loads the corpus (built-in FAQs on failure) and builds the index.
    pub fn from_supplier<S: CorpusSupplier + ?Sized>(supplier: &S, settings: &Settings) -> Self {
        let entries = load_or_default(supplier);
        Self::new(FaqRetriever::from_settings(entries, &settings.matcher), &settings.chat)
    }
}

impl<R> Responder for FaqService<R> where R: AnswerRetriever {
    fn answer(&self, query: &str) -> String {
        match self.retriever.retrieve(query) {
            Ok(Some(hit)) => hit.answer,
            Ok(None) => self.fallback_message.clone(),
            Err(e) => {
                error!(error = %e, "failed to answer query");
                self.error_message.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faqbot_core::config::{DEFAULT_ERROR_MESSAGE, DEFAULT_FALLBACK_MESSAGE};
    use faqbot_core::corpus::StaticCorpus;
    use faqbot_core::error::Error;
    use faqbot_core::types::{FaqEntry, MatchHit};

    struct BrokenRetriever;

    impl AnswerRetriever for BrokenRetriever {
        fn retrieve(&self, _query: &str) -> anyhow::Result<Option<MatchHit>> {
            Err(Error::Match("non-finite similarity NaN for entry 0".to_string()).into())
        }
    }

    fn default_service() -> FaqService<FaqRetriever> {
        // An empty supplier falls back to the built-in corpus.
        FaqService::from_supplier(&StaticCorpus::default(), &Settings::default())
    }

    #[test]
    fn answers_water_question() {
        let service = default_service();
        assert_eq!(
            service.answer("How many glasses of water per day?"),
            "Adults should drink 8-10 glasses (2-3 liters) of water daily."
        );
    }

    #[test]
    fn gibberish_gets_fallback() {
        assert_eq!(default_service().answer("asdkjhasdkjh"), DEFAULT_FALLBACK_MESSAGE);
    }

    #[test]
    fn empty_query_gets_fallback() {
        assert_eq!(default_service().answer(""), DEFAULT_FALLBACK_MESSAGE);
    }

    #[test]
    fn empty_index_always_falls_back() {
        let settings = Settings::default();
        let service = FaqService::new(FaqRetriever::from_settings(vec![], &settings.matcher), &settings.chat);
        assert!(service.retriever().index().is_empty());
        assert_eq!(service.answer("How much water should I drink daily?"), DEFAULT_FALLBACK_MESSAGE);
    }

    #[test]
    fn retriever_errors_are_contained() {
        let service = FaqService::new(BrokenRetriever, &ChatSettings::default());
        assert_eq!(service.answer("anything"), DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn custom_messages_are_used() {
        let mut settings = Settings::default();
        settings.chat.fallback_message = "Try again.".to_string();
        let corpus = StaticCorpus::new(vec![FaqEntry::new("Recommended sleep duration?", "7-9 hours per night for adults")]);
        let service = FaqService::from_supplier(&corpus, &settings);
        assert_eq!(service.answer("How long should I sleep? duration"), "7-9 hours per night for adults");
        assert_eq!(service.answer("asdkjh"), "Try again.");
    }
}
