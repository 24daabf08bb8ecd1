#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Author {
    pub id: i64,
    pub first: String,
    pub last: String,
}

/// An author name as accepted on input, before it is matched to a row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorName {
    pub first: String,
    pub last: String,
}

impl Author {
    pub fn formatted_name(&self) -> String {
        format!("{}, {}", self.last, self.first)
    }
}
