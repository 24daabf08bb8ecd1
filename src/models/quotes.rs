use time::OffsetDateTime;

use super::author::{Author, AuthorName};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quote {
    pub id: i64,
    pub content: String,
    pub author: Author,
    pub posted_at: OffsetDateTime,
}

/// Flat row shape of a quote joined with its author.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct QuoteRow {
    pub id: i64,
    pub content: String,
    pub posted_at: OffsetDateTime,
    pub author_id: i64,
    pub author_first: String,
    pub author_last: String,
}

impl From<QuoteRow> for Quote {
    fn from(row: QuoteRow) -> Self {
        Quote {
            id: row.id,
            content: row.content,
            posted_at: row.posted_at,
            author: Author {
                id: row.author_id,
                first: row.author_first,
                last: row.author_last,
            },
        }
    }
}

/// A validated quote submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewQuote {
    pub content: String,
    pub author: AuthorName,
}
