use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Token used for anything the vocabulary does not know.
pub const UNK: &str = "<unk>";

/// Token vocabulary
///
/// Indices follow the lexicographic order of the kept tokens, which always
/// include [`UNK`] and any reserved tokens. Tokens seen fewer than `min_freq`
/// times are dropped and map to [`UNK`].
///
/// Serialized as the token list and frequencies only. Deserializing rejects a
/// token list without [`UNK`] or with duplicate tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "VocabRecord", into = "VocabRecord")]
pub struct Vocab {
    idx_to_token: Vec<String>,
    token_to_idx: HashMap<String, usize>,
    token_freqs: Vec<(String, usize)>,
    unk: usize,
}

/// On-disk form of [`Vocab`]; the reverse index is rebuilt on load.
#[derive(Serialize, Deserialize)]
struct VocabRecord {
    idx_to_token: Vec<String>,
    token_freqs: Vec<(String, usize)>,
}

impl From<Vocab> for VocabRecord {
    fn from(vocab: Vocab) -> Self {
        Self {
            idx_to_token: vocab.idx_to_token,
            token_freqs: vocab.token_freqs,
        }
    }
}

impl TryFrom<VocabRecord> for Vocab {
    type Error = String;

    fn try_from(record: VocabRecord) -> Result<Self, Self::Error> {
        Vocab::from_parts(record.idx_to_token, record.token_freqs)
    }
}

impl Vocab {
    /// Build a vocabulary from a token stream.
    ///
    /// # Arguments
    /// * `tokens` - Tokens of the corpus, in any order
    /// * `min_freq` - Minimum count for a token to get its own index
    /// * `reserved` - Extra tokens that always get an index
    pub fn new<I, S>(tokens: I, min_freq: usize, reserved: &[&str]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for token in tokens {
            *counts.entry(token.as_ref().to_owned()).or_insert(0) += 1;
        }

        let mut token_freqs: Vec<(String, usize)> = counts.into_iter().collect();
        // Most frequent first, ties broken by token for a stable order
        token_freqs.sort_by(|(a_tok, a_freq), (b_tok, b_freq)| {
            b_freq.cmp(a_freq).then_with(|| a_tok.cmp(b_tok))
        });

        let mut kept: BTreeSet<String> = BTreeSet::new();
        kept.insert(UNK.to_owned());
        kept.extend(reserved.iter().map(|t| (*t).to_owned()));
        kept.extend(
            token_freqs
                .iter()
                .filter(|(_, freq)| *freq >= min_freq)
                .map(|(token, _)| token.clone()),
        );

        let idx_to_token: Vec<String> = kept.into_iter().collect();
        let token_to_idx: HashMap<String, usize> = idx_to_token
            .iter()
            .enumerate()
            .map(|(idx, token)| (token.clone(), idx))
            .collect();
        let unk = token_to_idx[UNK];

        Self {
            idx_to_token,
            token_to_idx,
            token_freqs,
            unk,
        }
    }

    fn from_parts(
        idx_to_token: Vec<String>,
        token_freqs: Vec<(String, usize)>,
    ) -> Result<Self, String> {
        let mut token_to_idx = HashMap::with_capacity(idx_to_token.len());
        for (idx, token) in idx_to_token.iter().enumerate() {
            if token_to_idx.insert(token.clone(), idx).is_some() {
                return Err(format!("duplicate vocabulary token {:?}", token));
            }
        }
        let unk = *token_to_idx
            .get(UNK)
            .ok_or_else(|| format!("vocabulary is missing {:?}", UNK))?;

        Ok(Self {
            idx_to_token,
            token_to_idx,
            token_freqs,
            unk,
        })
    }

    /// Number of tokens, including [`UNK`]
    pub fn len(&self) -> usize {
        self.idx_to_token.len()
    }

    /// Always false: [`UNK`] is present in every vocabulary
    pub fn is_empty(&self) -> bool {
        self.idx_to_token.is_empty()
    }

    /// Index of [`UNK`]
    pub fn unk(&self) -> usize {
        self.unk
    }

    /// Index of `token`, falling back to [`UNK`]
    pub fn index(&self, token: &str) -> usize {
        self.token_to_idx
            .get(token)
            .copied()
            .unwrap_or(self.unk)
    }

    /// Token at `idx`, if any
    pub fn token(&self, idx: usize) -> Option<&str> {
        self.idx_to_token.get(idx).map(String::as_str)
    }

    /// Counts of every corpus token, most frequent first
    pub fn token_freqs(&self) -> &[(String, usize)] {
        &self.token_freqs
    }

    /// Map a token stream to indices
    pub fn encode<I, S>(&self, tokens: I) -> Vec<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .map(|token| self.index(token.as_ref()))
            .collect()
    }

    /// Concatenate the tokens for `indices`; out-of-range indices decode as [`UNK`]
    pub fn decode(&self, indices: &[usize]) -> String {
        indices
            .iter()
            .map(|&idx| self.token(idx).unwrap_or(UNK))
            .collect()
    }
}
