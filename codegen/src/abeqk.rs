//! k-abelian complexity from the `Diffabeq` predicate.
//!
//! `Diffabeq<ns>[k][n]` holds the number of new k-abelian classes minus one
//! contributed at block size `k + 1`. Summing the differences gives
//! `abeq<k><ns>(n, w)`: the k-abelian complexity of length `n` is `w`.

use crate::emit::ScriptFile;
use crate::error::CodegenError;
use crate::walnut::{check_name, msd};

/// Inputs of [`generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbeqkParams {
    /// Numeration system name.
    pub ns: String,
    /// `k` ranges over `1..=max_k`.
    pub max_k: u32,
    /// Number of values `Diffabeq` may take (`0..max_value`).
    pub max_value: u32,
}

/// Generates the `diffabeq` and `abeq1 … abeq<max_k>` definitions.
///
/// # Errors
///
/// Returns [`CodegenError::InvalidName`] for a bad numeration system.
///
/// `diffabeq` and `abeq1` are always emitted: with `max_value == 0` the case
/// list is empty, and `max_k == 0` adds no level past the first.
pub fn generate(params: &AbeqkParams) -> Result<String, CodegenError> {
    check_name(&params.ns)?;
    let ns = params.ns.as_str();
    let wns = msd(ns);

    let mut out = ScriptFile::new();
    let cases: Vec<String> = (0..params.max_value)
        .map(|v| format!("(Diffabeq{ns}[k][n]=@{v} & v={v})"))
        .collect();
    out.line(&format!("def diffabeq{ns} \"{wns} {}\":", cases.join(" | ")));
    out.line(&format!(
        "def abeq1{ns} \"{wns} Ev $diffabeq{ns}(0,n,v) & w=v+1\":"
    ));
    for k in 2..=params.max_k {
        out.line(&format!(
            "def abeq{k}{ns} \"{wns} Eu,v $abeq{prev}{ns}(n,u) & $diffabeq{ns}({prev},n,v) & w=u+v\":",
            prev = k - 1
        ));
    }
    Ok(out.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(ns: &str, max_k: u32, max_value: u32) -> AbeqkParams {
        AbeqkParams {
            ns: ns.to_string(),
            max_k,
            max_value,
        }
    }

    #[test]
    fn tribonacci_three_levels() {
        assert_eq!(
            generate(&params("tri", 3, 2)).unwrap(),
            "def diffabeqtri \"?msd_tri (Diffabeqtri[k][n]=@0 & v=0) | (Diffabeqtri[k][n]=@1 & v=1)\":\n\
             def abeq1tri \"?msd_tri Ev $diffabeqtri(0,n,v) & w=v+1\":\n\
             def abeq2tri \"?msd_tri Eu,v $abeq1tri(n,u) & $diffabeqtri(1,n,v) & w=u+v\":\n\
             def abeq3tri \"?msd_tri Eu,v $abeq2tri(n,u) & $diffabeqtri(2,n,v) & w=u+v\":\n"
        );
    }

    #[test]
    fn other_systems_are_not_tribonacci() {
        let script = generate(&params("fib", 2, 3)).unwrap();
        assert!(!script.contains("tri"));
        assert!(script.contains("def abeq2fib \"?msd_fib Eu,v $abeq1fib(n,u) & $diffabeqfib(1,n,v) & w=u+v\":"));
        assert!(script.contains("(Diffabeqfib[k][n]=@2 & v=2)"));
    }

    #[test]
    fn single_level() {
        let script = generate(&params("tri", 1, 1)).unwrap();
        assert_eq!(script.lines().count(), 2);
    }

    #[test]
    fn zero_parameters_still_emit_the_base_definitions() {
        assert_eq!(
            generate(&params("tri", 0, 2)).unwrap(),
            "def diffabeqtri \"?msd_tri (Diffabeqtri[k][n]=@0 & v=0) | (Diffabeqtri[k][n]=@1 & v=1)\":\n\
             def abeq1tri \"?msd_tri Ev $diffabeqtri(0,n,v) & w=v+1\":\n"
        );
        let script = generate(&params("tri", 2, 0)).unwrap();
        assert!(script.starts_with("def diffabeqtri \"?msd_tri \":\n"));
        assert!(script.contains("def abeq2tri "));
    }

    #[test]
    fn bad_system_name_is_rejected() {
        assert!(matches!(
            generate(&params("tri bad", 1, 1)),
            Err(CodegenError::InvalidName(_))
        ));
    }
}
