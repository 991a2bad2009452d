//! Operator dashboard over the counter store.
//!
//! Views only ever read a `StoreSnapshot`; actions go through the store's
//! `reset_seeded` / `remove_many` operations.

pub mod actions;
pub mod views;

/// Split operator-submitted free text into unit names.
///
/// Each line is trimmed; blank lines are dropped rather than stored as an
/// empty unit name.
pub fn parse_unit_list(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_drops_blank_lines() {
        assert_eq!(parse_unit_list("A\n  B \r\n\n\t\nC\\D\n"), vec!["A", "B", "C\\D"]);
        assert!(parse_unit_list("").is_empty());
        assert!(parse_unit_list("  \n").is_empty());
    }
}
