/// Errors from parsing a code table name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeError {
    #[error("unknown {table} name: {name:?}")]
    UnknownName { table: &'static str, name: String },
}

impl CodeError {
    pub(crate) fn unknown(table: &'static str, name: &str) -> Self {
        Self::UnknownName { table, name: name.to_string() }
    }
}
