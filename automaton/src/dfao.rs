//! Deterministic finite automata with output, in Walnut's text format.
//!
//! A Walnut DFAO file looks like this:
//!
//! ```text
//! msd_tri msd_tri
//!
//! 0 5
//! 0 0 -> 1
//! 0 1 -> 0
//! 1 9
//! 0 0 -> 1
//! ```
//!
//! The first line names the numeration system of each input track and is kept
//! verbatim. Every other non-blank line either declares a state
//! (`<state> <output>`) or adds a transition to the most recently declared
//! state (`<symbol...> -> <target>`). State 0 is initial.
//!
//! Transitions are sparse: Walnut leaves out the moves on inputs that are not
//! valid representations, so a loaded automaton is not required to be total.
//! A missing transition only matters when an input actually takes it, and is
//! then reported by [`Dfao::evaluate`].

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Write as FmtWrite;
use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::{DfaoError, EvalError};

/// State identifier as written in the file.
pub type StateId = u32;

/// The initial state of every DFAO.
pub const INITIAL_STATE: StateId = 0;

/// A state: its output and its outgoing transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    /// Value produced when a run ends here.
    pub output: i64,
    /// Successor per input symbol.
    pub transitions: HashMap<Vec<i32>, StateId>,
}

impl State {
    /// A state with no transitions yet.
    #[must_use]
    pub fn new(output: i64) -> Self {
        Self {
            output,
            transitions: HashMap::new(),
        }
    }

    /// Adds a transition, returning `self` for chaining.
    #[must_use]
    pub fn on(mut self, symbol: impl Into<Vec<i32>>, target: StateId) -> Self {
        self.transitions.insert(symbol.into(), target);
        self
    }
}

/// A loaded DFAO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfao {
    header: String,
    states: BTreeMap<StateId, State>,
}

impl Dfao {
    /// Builds a DFAO from already-constructed states.
    #[must_use]
    pub fn from_states(
        header: impl Into<String>,
        states: impl IntoIterator<Item = (StateId, State)>,
    ) -> Self {
        Self {
            header: header.into(),
            states: states.into_iter().collect(),
        }
    }

    /// Parses the Walnut text format.
    ///
    /// # Errors
    ///
    /// Returns a [`DfaoError`] naming the offending line when the header is
    /// missing, an integer fails to parse, a state line does not have exactly
    /// two fields, or a transition precedes every state declaration.
    pub fn parse(text: &str) -> Result<Self, DfaoError> {
        let mut lines = text.lines();
        let header = lines.next().ok_or(DfaoError::MissingHeader)?;
        let mut parser = Parser::new(header);
        for (idx, line) in lines.enumerate() {
            parser.feed(idx + 2, line)?;
        }
        Ok(parser.finish())
    }

    /// Parses the Walnut text format from a buffered reader.
    ///
    /// # Errors
    ///
    /// As [`Dfao::parse`], plus [`DfaoError::Read`] if the reader fails.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, DfaoError> {
        let mut lines = reader.lines();
        let header = match lines.next() {
            Some(line) => line.map_err(|source| DfaoError::Read { line: 1, source })?,
            None => return Err(DfaoError::MissingHeader),
        };
        let mut parser = Parser::new(&header);
        for (idx, line) in lines.enumerate() {
            let line = line.map_err(|source| DfaoError::Read {
                line: idx + 2,
                source,
            })?;
            parser.feed(idx + 2, &line)?;
        }
        Ok(parser.finish())
    }

    /// Reads and parses a Walnut DFAO file.
    ///
    /// # Errors
    ///
    /// Returns [`DfaoError::Io`] if the file cannot be opened, otherwise as
    /// [`Dfao::from_reader`].
    pub fn load(path: &Path) -> Result<Self, DfaoError> {
        let file = std::fs::File::open(path).map_err(|source| DfaoError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dfao = Self::from_reader(std::io::BufReader::new(file))?;
        debug!(
            path = %path.display(),
            states = dfao.len(),
            transitions = dfao.transition_count(),
            "loaded DFAO"
        );
        Ok(dfao)
    }

    /// The header line, verbatim.
    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Number of declared states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True when no state is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Total number of transitions.
    #[must_use]
    pub fn transition_count(&self) -> usize {
        self.states.values().map(|s| s.transitions.len()).sum()
    }

    /// Looks up a state.
    #[must_use]
    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(&id)
    }

    /// States in ascending id order.
    pub fn states(&self) -> impl Iterator<Item = (StateId, &State)> {
        self.states.iter().map(|(&id, s)| (id, s))
    }

    /// Every symbol used on some transition, sorted.
    #[must_use]
    pub fn alphabet(&self) -> BTreeSet<Vec<i32>> {
        self.states
            .values()
            .flat_map(|s| s.transitions.keys().cloned())
            .collect()
    }

    /// `(state, symbol)` pairs of `alphabet` that have no transition.
    #[must_use]
    pub fn missing_transitions(&self, alphabet: &[Vec<i32>]) -> Vec<(StateId, Vec<i32>)> {
        self.states
            .iter()
            .flat_map(|(&id, state)| {
                alphabet
                    .iter()
                    .filter(|symbol| !state.transitions.contains_key(*symbol))
                    .map(move |symbol| (id, symbol.clone()))
            })
            .collect()
    }

    /// Output of a state.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::UnknownState`] if the state is not declared.
    pub fn output(&self, id: StateId) -> Result<i64, EvalError> {
        self.states
            .get(&id)
            .map(|s| s.output)
            .ok_or(EvalError::UnknownState(id))
    }

    /// Runs the automaton from state 0 and returns the state reached.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::MissingTransition`] when the input takes an
    /// undefined move and [`EvalError::UnknownState`] when a visited state
    /// was never declared.
    pub fn run<I, S>(&self, input: I) -> Result<StateId, EvalError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[i32]>,
    {
        let mut current = INITIAL_STATE;
        for (position, symbol) in input.into_iter().enumerate() {
            let symbol = symbol.as_ref();
            let state = self
                .states
                .get(&current)
                .ok_or(EvalError::UnknownState(current))?;
            current = *state
                .transitions
                .get(symbol)
                .ok_or_else(|| EvalError::MissingTransition {
                    state: current,
                    symbol: symbol.to_vec(),
                    position,
                })?;
        }
        Ok(current)
    }

    /// Runs the automaton from state 0 and returns the output of the state
    /// reached. The empty input yields the output of state 0.
    ///
    /// # Errors
    ///
    /// As [`Dfao::run`].
    pub fn evaluate<I, S>(&self, input: I) -> Result<i64, EvalError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[i32]>,
    {
        let last = self.run(input)?;
        self.output(last)
    }

    /// Writes the automaton back in Walnut's text format.
    ///
    /// Transitions of each state are listed in ascending symbol order.
    #[must_use]
    pub fn to_walnut(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.header);
        for (id, state) in &self.states {
            let _ = write!(out, "\n{id} {}\n", state.output);
            let sorted: BTreeMap<&Vec<i32>, &StateId> = state.transitions.iter().collect();
            for (symbol, target) in sorted {
                let _ = writeln!(out, "{} -> {target}", join_symbol(symbol));
            }
        }
        out
    }
}

impl FromStr for Dfao {
    type Err = DfaoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn join_symbol(symbol: &[i32]) -> String {
    symbol
        .iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Line-at-a-time builder shared by [`Dfao::parse`] and [`Dfao::from_reader`].
struct Parser {
    header: String,
    states: BTreeMap<StateId, State>,
    current: Option<(StateId, State)>,
}

impl Parser {
    fn new(header: &str) -> Self {
        Self {
            header: header.trim_end().to_string(),
            states: BTreeMap::new(),
            current: None,
        }
    }

    fn feed(&mut self, line_no: usize, line: &str) -> Result<(), DfaoError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }
        match line.split_once("->") {
            Some((lhs, rhs)) => {
                let symbol = lhs
                    .split_whitespace()
                    .map(|tok| parse_int::<i32>(line_no, tok))
                    .collect::<Result<Vec<_>, _>>()?;
                if symbol.is_empty() {
                    return Err(DfaoError::EmptySymbol { line: line_no });
                }
                let target = parse_int::<StateId>(line_no, rhs.trim())?;
                let (_, state) = self
                    .current
                    .as_mut()
                    .ok_or(DfaoError::OrphanTransition { line: line_no })?;
                state.transitions.insert(symbol, target);
            }
            None => {
                let fields: Vec<&str> = line.split_whitespace().collect();
                let [id, output] = fields.as_slice() else {
                    return Err(DfaoError::MalformedState {
                        line: line_no,
                        content: line.to_string(),
                    });
                };
                let id = parse_int::<StateId>(line_no, id)?;
                let output = parse_int::<i64>(line_no, output)?;
                self.close();
                self.current = Some((id, State::new(output)));
            }
        }
        Ok(())
    }

    fn close(&mut self) {
        if let Some((id, state)) = self.current.take() {
            if self.states.insert(id, state).is_some() {
                warn!(state = id, "state declared twice; keeping the later block");
            }
        }
    }

    fn finish(mut self) -> Dfao {
        self.close();
        Dfao {
            header: self.header,
            states: self.states,
        }
    }
}

fn parse_int<T: FromStr>(line: usize, token: &str) -> Result<T, DfaoError> {
    token.parse().map_err(|_| DfaoError::InvalidInteger {
        line,
        token: token.to_string(),
    })
}
