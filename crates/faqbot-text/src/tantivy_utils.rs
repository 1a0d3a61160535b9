use tantivy::tokenizer::{
	Language, SimpleTokenizer, Stemmer, TextAnalyzer, TokenStream, WhitespaceTokenizer,
};

/// Splits on every non-alphanumeric character; case is left untouched.
pub fn word_analyzer() -> TextAnalyzer {
	TextAnalyzer::builder(SimpleTokenizer::default()).build()
}

/// Stems whitespace-separated, lower-cased words with the English Snowball stemmer.
pub fn stem_analyzer() -> TextAnalyzer {
	TextAnalyzer::builder(WhitespaceTokenizer::default())
		.filter(Stemmer::new(Language::English))
		.build()
}

pub fn collect_tokens(analyzer: &mut TextAnalyzer, text: &str) -> Vec<String> {
	let mut stream = analyzer.token_stream(text);
	let mut tokens = Vec::new();
	while stream.advance() { tokens.push(stream.token().text.clone()); }
	tokens
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn word_analyzer_drops_punctuation() {
		let tokens = collect_tokens(&mut word_analyzer(), "what's up, doc?");
		assert_eq!(tokens, vec!["what", "s", "up", "doc"]);
	}

	#[test]
	fn stem_analyzer_collapses_variants() {
		let tokens = collect_tokens(&mut stem_analyzer(), "running runs symptoms");
		assert_eq!(tokens, vec!["run", "run", "symptom"]);
	}
}
