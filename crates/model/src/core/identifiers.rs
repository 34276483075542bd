use std::fmt;

/// A table that can be exported, together with the columns to project.
///
/// Table and column names are interpolated verbatim into SQL text, so specs
/// are only ever built from `'static` constants compiled into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableSpec {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

impl TableSpec {
    pub const fn new(name: &'static str, columns: &'static [&'static str]) -> Self {
        Self { name, columns }
    }
}

impl fmt::Display for TableSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The `users` table of the auth service.
pub const USERS: TableSpec = TableSpec::new(
    "users",
    &[
        "id",
        "nombre",
        "email",
        "password",
        "role",
        "token",
        "created_at",
    ],
);

/// Returns true when `ident` is a bare SQL identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_plain_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
