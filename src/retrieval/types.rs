use serde::{Deserialize, Deserializer, Serialize};

/// A corpus chunk with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    #[serde(default, skip_serializing)]
    pub chunk_id: Option<String>,
    pub source_book: String,
    #[serde(deserialize_with = "authors_from_json")]
    pub authors: String,
    pub domain: String,
    pub text: String,
}

impl Passage {
    pub fn new(
        source_book: impl Into<String>,
        authors: impl Into<String>,
        domain: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            chunk_id: None,
            source_book: source_book.into(),
            authors: authors.into(),
            domain: domain.into(),
            text: text.into(),
        }
    }
}

/// Corpus metadata lists authors either as one string or as an array.
fn authors_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Authors {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Authors::deserialize(deserializer)? {
        Authors::One(name) => name,
        Authors::Many(names) => names.join(", "),
    })
}
