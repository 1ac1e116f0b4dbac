//! Destinations for the k-abelian complexity pipeline.
//!
//! The pipeline is a sequence of prose paragraphs, Python cells and Walnut
//! cells. A notebook keeps all three in order; a bundle drops the prose and
//! splits the cells into a Python prelude and a Walnut command file.

use crate::emit::ScriptFile;

/// Receives the pieces of a generated pipeline.
pub trait ScriptSink {
    /// Markdown text between cells.
    fn prose(&mut self, text: &str);

    /// A Python cell run by the `licofage` helper.
    fn python(&mut self, code: &str);

    /// A Walnut cell.
    fn walnut(&mut self, code: &str);

    /// A Python cell that writes Walnut commands to `<name>.txt`, followed by
    /// the Walnut cell loading them. `body` appends to a `script` list.
    fn script(&mut self, name: &str, body: &str) {
        self.python(&format!(
            "script = []\n{body}\nwritefile(f\"{name}\", \"\\n\".join(script))"
        ));
        self.walnut(&format!("load {name}.txt;"));
    }
}

/// Quarto notebook output.
#[derive(Debug, Default)]
pub struct NotebookSink {
    out: ScriptFile,
}

impl NotebookSink {
    /// An empty notebook.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The notebook text.
    #[must_use]
    pub fn finish(self) -> String {
        self.out.finish()
    }
}

impl ScriptSink for NotebookSink {
    fn prose(&mut self, text: &str) {
        self.out.raw(text);
    }

    fn python(&mut self, code: &str) {
        self.out.raw(&format!("\n```{{walnut}}\n%%python\n{code}\n```\n"));
    }

    fn walnut(&mut self, code: &str) {
        self.out.raw(&format!("\n```{{walnut}}\n{code}\n```\n"));
    }
}

/// Standalone Walnut instance output: a Python prelude and a command file.
#[derive(Debug, Default)]
pub struct BundleSink {
    python: ScriptFile,
    walnut: ScriptFile,
}

impl BundleSink {
    /// An empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `(prelim.py, gen_abcomp.txt)` contents.
    #[must_use]
    pub fn finish(self) -> (String, String) {
        (self.python.finish(), self.walnut.finish())
    }
}

impl ScriptSink for BundleSink {
    fn prose(&mut self, _text: &str) {}

    fn python(&mut self, code: &str) {
        self.python.line(code);
    }

    fn walnut(&mut self, code: &str) {
        self.walnut.line(code);
    }
}
