/// Decoded tabular input: a header row plus string cells per record.
///
/// Produced by a `TabularDecoder`; cell text is kept verbatim so that the
/// observation loader decides how values are coerced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        Self { headers, records }
    }

    /// Position of a column, matching on the trimmed header name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
