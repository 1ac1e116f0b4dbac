//! The k-abelian complexity pipeline.
//!
//! For a substitution and its fixpoint, the pipeline builds the numeration
//! system and word automaton, a factor-equality predicate `feq_<name>`, and
//! for every `k` in range:
//!
//! - the `k`-block substitution with its own numeration system and the
//!   conversion predicate back to the base system (for `k > 1`),
//! - the Parikh vectors of the block word's prefixes,
//! - the `fac`, `min`, `diff`, `abeq` and `comp` predicates ending in
//!   `comp_<name><k>`, whose linear representation counts k-abelian classes.
//!
//! [`generate`] emits the pipeline into any [`ScriptSink`]. [`write_notebook`]
//! and [`write_bundle`] wrap it for the two supported outputs.

use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info};

use crate::bundle::{Bundle, BundleFile};
use crate::emit::{self, ScriptFile};
use crate::error::CodegenError;
use crate::sink::{BundleSink, NotebookSink, ScriptSink};
use crate::walnut::{check_name, py_bool, py_str, title_case};
use crate::GenerationReport;

/// Heap size exported as `WALNUT_MEM` by the bundle's `go` script.
pub const DEFAULT_WALNUT_MEM: &str = "64g";

/// Walnut directory skeleton of a bundle.
pub const WALNUT_DIRS: [&str; 5] = [
    "Result",
    "Command Files",
    "Custom Bases",
    "Automata Library",
    "Word Automata Library",
];

/// Name of the command file a bundle's `go` script loads.
pub const COMMAND_FILE: &str = "gen_abcomp.txt";

const FRONT_MATTER: [&str; 15] = [
    "format:",
    "  html:",
    "    code-fold: false",
    "    embed-resources: true",
    "    toc: true",
    "    toc-location: left",
    "    number-sections: true",
    "    syntax-definitions: ",
    "        - walnut.xml",
    "  ipynb: default ",
    "execute:",
    "  cache: true",
    "  keep-ipynb: true",
    "  allow_errors: true",
    "jupyter: walnut",
];

/// Inputs of [`generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbcompParams {
    /// Numeration system and fixpoint name, e.g. `tri`.
    pub name: String,
    /// Substitution in `licofage` notation, e.g. `01/02/0`.
    pub subst: String,
    /// Sequence name for the title; defaults to the title-cased `name`.
    pub fullname: Option<String>,
    /// First `k`.
    pub from: u32,
    /// Last `k`, inclusive.
    pub to: u32,
    /// Passed to `setparams` as the verbosity flag.
    pub verbose: bool,
    /// Passed to `setparams` as the statistics flag.
    pub stats: bool,
    /// `WALNUT_MEM` for the bundle's `go` script.
    pub walnut_mem: String,
    /// Date in the notebook front matter and on archive entries.
    pub date: NaiveDate,
}

impl AbcompParams {
    /// Parameters for `k` from 1 to 4.
    #[must_use]
    pub fn new(name: impl Into<String>, subst: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            subst: subst.into(),
            fullname: None,
            from: 1,
            to: 4,
            verbose: false,
            stats: false,
            walnut_mem: DEFAULT_WALNUT_MEM.to_string(),
            date,
        }
    }

    fn validate(&self) -> Result<(), CodegenError> {
        check_name(&self.name)?;
        if self.from == 0 {
            return Err(CodegenError::NotPositive("first k"));
        }
        if self.from > self.to {
            return Err(CodegenError::EmptyRange {
                from: self.from,
                to: self.to,
            });
        }
        Ok(())
    }

    fn fullname(&self) -> String {
        self.fullname
            .clone()
            .unwrap_or_else(|| title_case(&self.name))
    }
}

/// Names used at one block size.
struct Level {
    k: u32,
    /// Block numeration system name.
    cname: String,
    /// Walnut numeration system of the block word.
    cbase: String,
    /// Word automaton of the block word.
    cword: String,
    /// Border condition predicate in the block system.
    cborder: String,
}

impl Level {
    fn new(name: &str, k: u32) -> Self {
        let cname = format!("{name}b{k}");
        if k == 1 {
            Self {
                k,
                cname,
                cbase: format!("msd_{name}"),
                cword: title_case(name),
                cborder: "bordercond".to_string(),
            }
        } else {
            Self {
                k,
                cbase: format!("msd_{cname}"),
                cword: title_case(&cname),
                cborder: format!("bordercond{k}"),
                cname,
            }
        }
    }
}

/// Emits the whole pipeline into `sink`.
///
/// # Errors
///
/// Returns [`CodegenError::InvalidName`] for a bad name,
/// [`CodegenError::NotPositive`] when `from` is 0, and
/// [`CodegenError::EmptyRange`] when `from > to`.
pub fn generate(params: &AbcompParams, sink: &mut dyn ScriptSink) -> Result<(), CodegenError> {
    params.validate()?;
    let name = params.name.as_str();
    let base = format!("msd_{name}");
    let word = title_case(name);

    sink.prose(&front_matter(params));
    sink.prose(
        "\n## Initial Numeration System Setup\n\n\
         First we define the substitution, its numeration system and its fixpoint sequence.\n",
    );
    sink.python(&format!(
        r#"from licofage.kit import *
import os
setparams({verbose}, {stats}, os.environ["WALNUT_HOME"])

s = subst({subst})
ns = address(s, "{name}")
ns.gen_ns()
ns.gen_word_automaton()"#,
        verbose = py_bool(params.verbose),
        stats = py_bool(params.stats),
        subst = py_str(&params.subst),
    ));
    sink.prose(
        "\nThen we setup a factor comparison predicate in Walnut and a first factor occurrence predicate.\n",
    );
    sink.walnut(&format!(
        r#"def cut "?{base} i<=u & j<=v & u+j=v+i & u<n+i & v<n+j":
def feq_{name} "?{base} ~(Eu,v $cut(i,j,n,u,v) & {word}[u]!={word}[v])":
eval comp_{name} n "?{base} Aj $feq_{name}(i,j,n) => i<=j":"#
    ));
    sink.prose(
        "\n\nFrom there we can define the boundary condition `bordercond`, \
         as explained in Fici-Puzynina-2023 section 8.1.\n",
    );
    sink.walnut(&format!(
        r#"def bordercond "?{base} (k<=n => $feq_{name}(i,j,k-1)) & (n<k => $feq_{name}(i,j,n))":"#
    ));

    for k in params.from..=params.to {
        level(sink, name, &base, &Level::new(name, k));
    }

    sink.prose(&check_table(params));
    sink.prose(&wrap_up(params));
    debug!(name, from = params.from, to = params.to, "pipeline emitted");
    Ok(())
}

fn front_matter(params: &AbcompParams) -> String {
    let mut f = ScriptFile::new();
    f.line("---");
    f.line(&format!(
        "title: k-Abelian Complexity of {} from {} to {}",
        params.fullname(),
        params.from,
        params.to
    ));
    f.line(&format!("date: '{}'", params.date.format("%Y-%m-%d")));
    for line in FRONT_MATTER {
        f.line(line);
    }
    f.line("---");
    f.finish()
}

fn level(sink: &mut dyn ScriptSink, name: &str, base: &str, lv: &Level) {
    let Level {
        k,
        cname,
        cbase,
        cword,
        cborder,
    } = lv;
    let k = *k;
    let conv = format!("$conv_{name}_{cname}");

    sink.prose(&format!(
        "\n## {k}-abelian complexity\n\nDefine the {k}-block map of {name} and construct \
         the conversion predicate between both numeration systems.\n"
    ));
    if k == 1 {
        sink.python("s1 = s\nns1 = ns");
    } else {
        sink.python(&format!(
            "s{k} = block(s, {k})\nns{k} = address(s{k}, \"{cname}\")\n\
             ns{k}.gen_ns()\n(ns-ns{k}).gen_dfa(\"conv_{name}_{cname}\")"
        ));
        sink.prose("\nTranslate the border condition predicate into the current numeration system.\n");
        let tracks: Vec<String> = ["i", "j", "k", "n"]
            .iter()
            .map(|v| format!("{conv}(?{base} {v}{v}, ?{cbase} {v}) & "))
            .collect();
        sink.walnut(&format!(
            "def {cborder} \"?{cbase} (?{base} Eii,jj,kk,nn \n({}\n$bordercond(ii,jj,kk,nn)))\":",
            tracks.join("\n")
        ));
    }

    sink.prose(&format!(
        "\n### Compute Parikh vectors\n\nFirst we compute the Parikh vectors for the prefixes of {cword}.\n"
    ));
    sink.python(&format!(
        r#"for (i,a) in enumerate(ns{k}.alpha):
    w = {{'_': 0}}
    w[a] = 1
    parikh = address(s{k}, ns{k}.ns, **w)
    (parikh - ns{k}).gen_dfa(f"{cname}p{{i}}")"#
    ));

    sink.prose(&format!(
        "\n### Compute the complexity function\n\nUse Walnut to generate a linear \
         representation for the {k}-abelian complexity.\n"
    ));
    sink.script(
        &format!("do_fac{k}"),
        &per_letter(
            k,
            &format!(r#"def fac{{i}} "?{cbase} Ex,y ${cname}p{{i}}(i,x) & ${cname}p{{i}}(i+n,y) & z+x=y":"#),
        ),
    );
    sink.script(
        &format!("do_min{k}"),
        &per_letter(
            k,
            &format!(r#"def min{{i}} "?{cbase} Ei $fac{{i}}(i,n,x) & Aj,y $fac{{i}}(j,n,y) => y>=x":"#),
        ),
    );
    sink.script(
        &format!("do_diff{k}"),
        &per_letter(
            k,
            &format!(r#"def diff{{i}} "?{cbase} Ex,y $min{{i}}(n,x) & $fac{{i}}(i,n,y) & z+x=y":"#),
        ),
    );

    let classes = format!(
        r#"ss = " & ".join([ f"(Ez $diff{{i}}(i,n,z) &  $diff{{i}}(j,n,z))" for (i,a) in enumerate(ns{k}.alpha) ])"#
    );
    let abeq = if k == 1 {
        format!(r#"script.append(f'''def abeq_{name}{k} "?{cbase} {{ss}}":''')"#)
    } else {
        let lag = k - 1;
        format!(
            r#"script.append(f'''def abeq_{cname} "?{cbase} ${cborder}(i,j,{k},n+{lag}) & {{ss}}":
def abeq_{name}{k} "?{base} (n<{lag} & $feq_{name}(i,j,n)) | (n>={lag} & (?{cbase} Eii,jj,nn ({conv}(?{base} i, ?{cbase} ii) & {conv}(?{base} j, ?{cbase} jj) & {conv}(?{base} n, ?{cbase} nn) & $abeq_{cname}(ii,jj,nn-{lag}))))":''')"#
        )
    };
    sink.script(&format!("do_abeq{k}"), &format!("{classes}\n{abeq}"));
    sink.script(
        &format!("do_comp{k}"),
        &format!(
            r#"script.append(f'''eval comp_{name}{k} n "?{base} Aj $abeq_{name}{k}(i,j,n) => i<=j":''')"#
        ),
    );

    sink.prose(&format!(
        "\n\n### Apply the semigroup trick\n\n```{{walnut}}\n%SGT comp_{name}{k} {base} Comp_{name}{k}\n```\n"
    ));
}

/// A Python loop appending one Walnut statement per letter of the block
/// alphabet; `{i}` in `statement` is the letter index.
fn per_letter(k: u32, statement: &str) -> String {
    format!("for (i,a) in enumerate(ns{k}.alpha):\n    script.append(f'''{statement}''')")
}

fn check_table(params: &AbcompParams) -> String {
    let name = &params.name;
    let (from, end) = (params.from, params.to.saturating_add(1));
    format!(
        r#"## Check it out!


```{{walnut}}
%%python
from itertools import product
from pathlib import Path as P
from ratser.walimp import from_walnut

def valid(a, h, u):
    cur=a
    for c in u:
        v = h[cur]
        if c >= len(v):
            return False
        cur = v[c]
    return True

def enumrepr(a, h, k):
    alpha=list(range(max(map(len,h.values()))))
    for u in product(alpha, repeat=k):
        if valid(a, h, u):
            yield ''.join(map(str,u))

l = []
lbl = []
for k in range({from},{end}):
    lbl.append(str(k))
    with open(P(os.environ["WALNUT_HOME"]) / P(f"Result/comp_{name}{{k}}.mpl")) as f:
            ser = from_walnut(f)
            l.append(ser)

(a,h)=s.subst()
print(f"{{'n':>4}}", *[f"{{x+'-ab({name})':>15}}" for x in lbl])
print('-'*(4+16*len(lbl)))
for (i, u) in enumerate(enumrepr(a, h, 8)):
    print(f"{{i:4}}", *[ f"{{int(s.value(u)):15}}" for s in l ])
```

"#
    )
}

/// Files the finished Walnut run leaves behind, relative to `WALNUT_HOME`.
#[must_use]
pub fn archive_entries(name: &str, from: u32, to: u32) -> Vec<String> {
    let base = format!("msd_{name}");
    let mut entries = vec![
        format!("Custom Bases/{base}.txt"),
        format!("Custom Bases/{base}_addition.txt"),
        format!("Word Automata Library/{}.txt", title_case(name)),
        format!("Automata Library/feq_{name}.txt"),
        format!("Result/comp_{name}.mpl"),
    ];
    for k in from..=to {
        entries.push(format!("Word Automata Library/Comp_{name}{k}.txt"));
        entries.push(format!("Result/comp_{name}{k}.mpl"));
        entries.push(format!("Automata Library/abeq_{name}{k}.txt"));
    }
    entries
}

/// Shell line feeding a NUL-separated here-document list to `tar`.
fn tar_heredoc(archive: &str, entries: &[String]) -> String {
    let mut f = ScriptFile::new();
    f.line(&format!(
        "cat << EOF | tr '\\n' '\\0' | tar cvzf {archive} --null -T -"
    ));
    for entry in entries {
        f.line(entry);
    }
    f.line("EOF");
    f.finish()
}

fn wrap_up(params: &AbcompParams) -> String {
    let entries = archive_entries(&params.name, params.from, params.to);
    format!(
        "## Let's wrap it up!\n\n```{{walnut}}\n%%shell\ncd $WALNUT_HOME\n{}```\n\n\n \
         {{{{< downloadthis /tmp/abelian.tar.gz dname=\"abelian.tar\" >}}}}\n\n",
        tar_heredoc("/tmp/abelian.tar.gz", &entries)
    )
}

/// The bundle's `go` script: run the Python prelude, the Walnut command
/// file, the semigroup trick for every `k`, then archive the results.
#[must_use]
pub fn go_script(params: &AbcompParams) -> String {
    let name = params.name.as_str();
    let mut f = ScriptFile::new();
    f.line("#!/bin/sh");
    f.line(&format!("export WALNUT_MEM={}", params.walnut_mem));
    f.line("export WALNUT_HOME=$(pwd)/Walnut");
    f.line("uv run --python 3.12 --with licofage prelim.py");
    f.line("cd $WALNUT_HOME");
    f.line(&format!(
        "echo \"load {COMMAND_FILE};\" | java -Xmx$WALNUT_MEM -jar $WALNUT_JAR "
    ));
    for k in params.from..=params.to {
        f.line(&format!(
            "semitrick Result/comp_{name}{k}.mpl msd_{name} Word\\ Automata\\ Library/Comp_{name}{k}.txt"
        ));
    }
    f.raw(&tar_heredoc(
        "../abelian.tar.gz",
        &archive_entries(name, params.from, params.to),
    ));
    f.finish()
}

/// Generates the notebook text.
///
/// # Errors
///
/// See [`generate`].
pub fn notebook(params: &AbcompParams) -> Result<String, CodegenError> {
    let mut sink = NotebookSink::new();
    generate(params, &mut sink)?;
    Ok(sink.finish())
}

/// Generates the standalone Walnut instance rooted at `<name>/`.
///
/// # Errors
///
/// See [`generate`].
pub fn bundle(params: &AbcompParams) -> Result<Bundle, CodegenError> {
    let mut sink = BundleSink::new();
    generate(params, &mut sink)?;
    let (prelim, commands) = sink.finish();
    Ok(Bundle {
        root: params.name.clone(),
        dirs: WALNUT_DIRS.iter().map(|d| format!("Walnut/{d}")).collect(),
        files: vec![
            BundleFile::new(format!("Walnut/Command Files/{COMMAND_FILE}"), commands),
            BundleFile::new("prelim.py", prelim),
            BundleFile::executable("go", go_script(params)),
        ],
        modified: params.date.and_time(NaiveTime::MIN),
    })
}

/// Writes the notebook to `path`.
///
/// # Errors
///
/// See [`generate`]; also returns [`CodegenError::Io`] if `path` cannot be
/// written.
pub fn write_notebook(params: &AbcompParams, path: &Path) -> Result<GenerationReport, CodegenError> {
    let text = notebook(params)?;
    emit::write_file(path, &text)?;
    info!(path = %path.display(), "notebook written");
    Ok(GenerationReport {
        levels: params.to - params.from + 1,
        files: vec![path.display().to_string()],
    })
}

/// Writes the bundle as a zip archive at `path`.
///
/// # Errors
///
/// See [`generate`]; also returns [`CodegenError::Io`] if the archive
/// cannot be created or [`CodegenError::Archive`] if an entry cannot be
/// written.
pub fn write_bundle(params: &AbcompParams, path: &Path) -> Result<GenerationReport, CodegenError> {
    let files = bundle(params)?.write_archive(path)?;
    info!(path = %path.display(), entries = files.len(), "bundle written");
    Ok(GenerationReport {
        levels: params.to - params.from + 1,
        files,
    })
}
