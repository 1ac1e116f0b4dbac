//! Check script for the `Dequi` predicate.
//!
//! `Dequi<ns>[i][j1][j2][k][n]` tracks the difference between the factor
//! equality of `(i, j1+n, k)` and `(i, j2+n, k)` as `n` grows. The script
//! checks that the value starts in `{-1, 0, 1}` with the right sign, and that
//! each step moves by at most one in the direction dictated by the next
//! comparison.

use crate::emit::ScriptFile;
use crate::error::CodegenError;
use crate::walnut::{check_name, msd};

/// Predicate prefix used by the equivalence-matrix pipeline.
pub const DEFAULT_PREFIX: &str = "Dequi";

/// Inputs of [`generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquiParams {
    /// Numeration system name, e.g. `tri`.
    pub ns: String,
    /// Largest absolute value the predicate may take.
    pub max_value: u32,
    /// Predicate prefix; the predicate is `<prefix><ns>`.
    pub prefix: String,
}

impl EquiParams {
    /// Parameters with the default prefix.
    #[must_use]
    pub fn new(ns: impl Into<String>, max_value: u32) -> Self {
        Self {
            ns: ns.into(),
            max_value,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

struct Pred<'a> {
    name: String,
    ns: &'a str,
}

impl Pred<'_> {
    fn eq(&self, v: i64, n: &str) -> String {
        format!("{}[i][j1][j2][k][{n}]=@{v}", self.name)
    }

    fn step(&self, from: i64, to: i64) -> String {
        format!("({} & {})", self.eq(from, "n"), self.eq(to, "n+1"))
    }

    fn feq(&self, j: &str) -> String {
        format!("$feq_{}(i,{j},k)", self.ns)
    }
}

/// Generates the check script.
///
/// # Errors
///
/// Returns [`CodegenError::InvalidName`] if the numeration system or prefix
/// is not a Walnut identifier.
pub fn generate(params: &EquiParams) -> Result<String, CodegenError> {
    check_name(&params.ns)?;
    check_name(&params.prefix)?;
    let ns = params.ns.as_str();
    let wns = msd(ns);
    let p = Pred {
        name: format!("{}{ns}", params.prefix),
        ns,
    };
    let v = i64::from(params.max_value);

    let mut out = ScriptFile::new();
    let init = [-1, 0, 1].map(|x| p.eq(x, "0")).join(" | ");
    out.line(&format!("eval init \"{wns} Ai,j1,j2,k {init}\":"));
    out.blank();
    out.line(&format!(
        "eval initXX \"{wns} Ai,j1,j2,k ({} <=> {}) <=> {}\":",
        p.feq("j1"),
        p.feq("j2"),
        p.eq(0, "0")
    ));
    out.line(&format!(
        "eval initTF \"{wns} Ai,j1,j2,k ({} & ~{}) <=> {}\":",
        p.feq("j1"),
        p.feq("j2"),
        p.eq(1, "0")
    ));
    out.line(&format!(
        "eval initFT \"{wns} Ai,j1,j2,k (~{} & {}) <=> {}\":",
        p.feq("j1"),
        p.feq("j2"),
        p.eq(-1, "0")
    ));
    out.blank();

    let increase: Vec<String> = (-v..v).map(|x| p.step(x, x + 1)).collect();
    out.line(&format!("def increase \"{wns} {}\":", increase.join(" | ")));
    let decrease: Vec<String> = (-v..v).map(|x| p.step(x + 1, x)).collect();
    out.line(&format!("def decrease \"{wns} {}\":", decrease.join(" | ")));
    let constant: Vec<String> = (-v..=v).map(|x| p.step(x, x)).collect();
    out.line(&format!("def constant \"{wns} {}\":", constant.join(" | ")));
    out.blank();

    let args = "(i,j1,j2,k,n)";
    out.line(&format!(
        "eval nxt \"{wns} Ai,j1,j2,k,n $constant{args} | $increase{args} | $decrease{args}\":"
    ));
    out.line(&format!(
        "eval nxtXX \"{wns} Ai,j1,j2,k,n ({} <=> {})  <=> $constant{args}\":",
        p.feq("j1+n+1"),
        p.feq("j2+n+1")
    ));
    out.line(&format!(
        "eval nxtTF \"{wns} Ai,j1,j2,k,n ({} & ~{}) <=> $increase{args}\":",
        p.feq("j1+n+1"),
        p.feq("j2+n+1")
    ));
    out.line(&format!(
        "eval nxtFT \"{wns} Ai,j1,j2,k,n (~{} & {}) <=> $decrease{args}\":",
        p.feq("j1+n+1"),
        p.feq("j2+n+1")
    ));
    out.blank();
    Ok(out.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_prefix_is_used_everywhere() {
        let mut params = EquiParams::new("fib", 1);
        params.prefix = "Dcheck".to_string();
        let script = generate(&params).unwrap();
        assert!(script.contains("Dcheckfib[i][j1][j2][k][0]=@0"));
        assert!(!script.contains("Dequi"));
        assert!(script.contains("?msd_fib"));
        assert!(script.contains("$feq_fib(i,j1,k)"));
    }

    #[test]
    fn zero_bound_has_empty_steps() {
        let script = generate(&EquiParams::new("tri", 0)).unwrap();
        assert!(script.contains("def increase \"?msd_tri \":\n"));
        assert!(script.contains("def decrease \"?msd_tri \":\n"));
        assert!(script.contains(
            "def constant \"?msd_tri (Dequitri[i][j1][j2][k][n]=@0 & Dequitri[i][j1][j2][k][n+1]=@0)\":\n"
        ));
    }

    #[test]
    fn bad_names_are_rejected() {
        assert!(generate(&EquiParams::new("a b", 1)).is_err());
        let mut params = EquiParams::new("tri", 1);
        params.prefix = String::new();
        assert!(generate(&params).is_err());
    }
}
