//! Turns the verbatim `table` and `columns` parameters into SQL.
//!
//! Names are not checked against an allow-list. Each one is emitted as a
//! backtick-quoted identifier, so a name can only ever refer to a table or
//! column and never splice SQL into the statement.

/// Quote `name` as a SQLite identifier, doubling embedded backticks.
pub(crate) fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Render a comma-separated column list as a select list. A lone `*` entry
/// selects every column.
pub fn select_list(columns: &str) -> String {
    columns
        .split(',')
        .map(str::trim)
        .map(|c| {
            if c == "*" {
                c.to_string()
            } else {
                quote_identifier(c)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the single read issued per request. Offset and limit are bound as
/// parameters `?1` and `?2`.
pub fn select_sql(table: &str, columns: &str) -> String {
    format!(
        "SELECT {} FROM {} LIMIT ?2 OFFSET ?1",
        select_list(columns),
        quote_identifier(table)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_plain_names() {
        assert_eq!(quote_identifier("users"), "`users`");
    }

    #[test]
    fn escapes_embedded_backticks() {
        assert_eq!(quote_identifier("a`b"), "`a``b`");
        assert_eq!(
            select_sql("t`; DROP TABLE t; --", "a"),
            "SELECT `a` FROM `t``; DROP TABLE t; --` LIMIT ?2 OFFSET ?1"
        );
    }

    #[test]
    fn splits_and_trims_columns() {
        assert_eq!(select_list("a, b ,c"), "`a`, `b`, `c`");
    }

    #[test]
    fn star_selects_everything() {
        assert_eq!(select_list("*"), "*");
        assert_eq!(select_sql("t", "*"), "SELECT * FROM `t` LIMIT ?2 OFFSET ?1");
    }

    #[test]
    fn empty_names_are_forwarded() {
        assert_eq!(select_list(""), "``");
    }
}
