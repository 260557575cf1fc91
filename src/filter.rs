//! Dropping (or keeping) tokens by set membership
use stopwords::StopWords;
use tokenize::TokenRow;

/// Rows whose token is not a stop word, in their original order
pub fn remove_stop_words<'s, I>(tokens: I, stop_words: &'s StopWords)
    -> impl Iterator<Item = TokenRow> + 's
    where I: IntoIterator<Item = TokenRow>, I::IntoIter: 's {
    tokens.into_iter().filter(move |row| !stop_words.contains(&row.token))
}

/// Rows whose token is in the set, e.g. to pick out terms from a word list
pub fn keep_only<'s, I>(tokens: I, words: &'s StopWords)
    -> impl Iterator<Item = TokenRow> + 's
    where I: IntoIterator<Item = TokenRow>, I::IntoIter: 's {
    tokens.into_iter().filter(move |row| words.contains(&row.token))
}
