//! Small helpers shared by the Walnut script generators.

use crate::error::CodegenError;

/// The numeration-system prefix `?msd_<ns>` used inside Walnut predicates.
#[must_use]
pub fn msd(ns: &str) -> String {
    format!("?msd_{ns}")
}

/// Checks that `name` can be spliced into Walnut identifiers and file names.
///
/// # Errors
///
/// Returns [`CodegenError::InvalidName`] unless `name` is non-empty ASCII
/// alphanumerics and underscores.
pub fn check_name(name: &str) -> Result<(), CodegenError> {
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(CodegenError::InvalidName(name.to_string()))
    }
}

/// Upper-cases the first letter of every run of letters and lower-cases the
/// rest, so `tri` becomes `Tri` and `trib2x` becomes `Trib2X`. Walnut names
/// word automata this way.
#[must_use]
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// A Python string literal for `s`.
///
/// Single quotes unless the text contains a single quote and no double quote.
#[must_use]
pub fn py_str(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Python spelling of a boolean.
#[must_use]
pub fn py_bool(b: bool) -> &'static str {
    if b {
        "True"
    } else {
        "False"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_breaks_on_non_letters() {
        assert_eq!(title_case("tri"), "Tri");
        assert_eq!(title_case("trib2"), "Trib2");
        assert_eq!(title_case("ab2c"), "Ab2C");
        assert_eq!(title_case("TRI_fib"), "Tri_Fib");
    }

    #[test]
    fn python_literals() {
        assert_eq!(py_str("01/02/0"), "'01/02/0'");
        assert_eq!(py_str("it's"), "\"it's\"");
        assert_eq!(py_str("a'b\"c"), "'a\\'b\"c'");
        assert_eq!(py_str("x\\y\n"), "'x\\\\y\\n'");
        assert_eq!(py_bool(true), "True");
    }

    #[test]
    fn names() {
        assert!(check_name("tri").is_ok());
        assert!(check_name("tri_2").is_ok());
        assert!(check_name("").is_err());
        assert!(check_name("a b").is_err());
        assert!(check_name("a\"b").is_err());
        assert_eq!(msd("tri"), "?msd_tri");
    }
}
