//! Contract with the external solver/generator and the flows built on it.
//!
//! The engine itself lives outside this crate. [`PuzzleEngine`] describes the
//! request/response exchange; the [`PuzzleSession`] methods here validate
//! every reply before touching session state.

use loopgrid_core::{PuzzleCodeError, SolutionCodeError};
use serde::{Deserialize, Serialize};

use crate::{PuzzleLoadError, PuzzleSession};

/// Generator difficulty level.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    derive_more::IsVariant,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Easy puzzles.
    #[default]
    #[display("easy")]
    Easy,
    /// Medium puzzles.
    #[display("medium")]
    Medium,
    /// Hard puzzles.
    #[display("hard")]
    Hard,
}

impl Difficulty {
    /// All difficulty levels, easiest first.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// The level number passed to the engine (`0` for easy).
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Easy => 0,
            Self::Medium => 1,
            Self::Hard => 2,
        }
    }
}

/// An external solver and generator.
///
/// Implementations wrap whatever backend actually does the work. Status codes
/// and payloads are passed through unchanged; interpretation happens on this
/// side of the boundary.
pub trait PuzzleEngine {
    /// Counts solutions of a puzzle code.
    ///
    /// `-1` means the code was rejected, `-2` means the engine failed, and
    /// any non-negative value is the number of solutions found (the engine
    /// may stop counting at 2).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Unavailable`] if the backend cannot be reached.
    fn count_solutions(&self, puzzle_code: &str) -> Result<i32, EngineError>;

    /// Solves a puzzle code, returning a solution code.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Unavailable`] if the backend cannot be reached.
    fn solve(&self, puzzle_code: &str) -> Result<String, EngineError>;

    /// Generates a puzzle, returning `"{puzzle_code},{solution_code}"`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Unavailable`] if the backend cannot be reached.
    fn generate(
        &self,
        rows: usize,
        cols: usize,
        difficulty: Difficulty,
        seed: u64,
    ) -> Result<String, EngineError>;
}

/// Interpreted result of [`PuzzleEngine::count_solutions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SolutionCount {
    /// No solution exists.
    None,
    /// Exactly one solution exists.
    Unique,
    /// More than one solution exists.
    Multiple {
        /// Number reported by the engine.
        count: u32,
    },
}

impl SolutionCount {
    /// Maps a raw engine status to a count.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPuzzleCode`] for `-1`,
    /// [`EngineError::SolverFailure`] for `-2`, and
    /// [`EngineError::UnrecognizedStatus`] for any other negative value.
    pub fn from_status(status: i32) -> Result<Self, EngineError> {
        match status {
            -1 => Err(EngineError::InvalidPuzzleCode),
            -2 => Err(EngineError::SolverFailure),
            0 => Ok(Self::None),
            1 => Ok(Self::Unique),
            _ => match u32::try_from(status) {
                Ok(count) => Ok(Self::Multiple { count }),
                Err(_) => Err(EngineError::UnrecognizedStatus { status }),
            },
        }
    }
}

/// Errors surfaced by engine-backed flows.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EngineError {
    /// The backend is not ready.
    #[display("puzzle engine is not available")]
    Unavailable,
    /// The engine rejected the puzzle code.
    #[display("engine rejected the puzzle code")]
    InvalidPuzzleCode,
    /// The engine failed while checking solutions.
    #[display("engine failed while checking solutions")]
    SolverFailure,
    /// The puzzle has no solution.
    #[display("puzzle has no solution")]
    NoSolution,
    /// The engine returned a status outside its contract.
    #[display("engine returned unrecognized status {status}")]
    UnrecognizedStatus {
        /// The raw status.
        status: i32,
    },
    /// The puzzle code could not be loaded locally.
    #[display("invalid puzzle code: {_0}")]
    Puzzle(PuzzleCodeError),
    /// A returned solution code does not fit the puzzle.
    #[display("engine returned a malformed solution: {_0}")]
    MalformedSolution(SolutionCodeError),
    /// A generated payload is not of the form `puzzle,solution`.
    #[display("engine returned a malformed generator payload")]
    MalformedGeneratedPayload,
    /// A generated puzzle or its solution could not be loaded.
    #[display("engine generated an unusable puzzle: {_0}")]
    MalformedGeneratedPuzzle(PuzzleLoadError),
}

impl PuzzleSession {
    /// Loads a puzzle code, checks it with the engine, and stores the engine's
    /// solution as the target.
    ///
    /// The puzzle stays loaded when the engine reports a problem, so it can
    /// still be inspected or edited. Ambiguous puzzles are accepted: their
    /// solution is stored and the count is returned for the caller to report.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Puzzle`] if the code is malformed; the session is
    ///   untouched.
    /// - [`EngineError::InvalidPuzzleCode`], [`EngineError::SolverFailure`],
    ///   [`EngineError::NoSolution`], or [`EngineError::UnrecognizedStatus`]
    ///   from the solution count.
    /// - [`EngineError::MalformedSolution`] if the solved code does not fit
    ///   the puzzle.
    /// - Any error reported by the engine itself.
    pub fn load_and_verify<E>(
        &mut self,
        engine: &E,
        code: &str,
    ) -> Result<SolutionCount, EngineError>
    where
        E: PuzzleEngine + ?Sized,
    {
        self.load_puzzle_code(code).map_err(EngineError::Puzzle)?;
        let puzzle_code = self.puzzle_code();

        let status = engine.count_solutions(&puzzle_code)?;
        let count = SolutionCount::from_status(status).inspect_err(|err| {
            log::warn!("solution count for {puzzle_code:?} failed: {err}");
        })?;
        match count {
            SolutionCount::None => {
                log::warn!("puzzle {puzzle_code:?} has no solution");
                return Err(EngineError::NoSolution);
            }
            SolutionCount::Multiple { count } => {
                log::warn!("puzzle {puzzle_code:?} has {count} solutions");
            }
            SolutionCount::Unique => {}
        }

        let solution = engine.solve(&puzzle_code)?;
        self.set_solution(&solution).map_err(|err| {
            log::warn!("engine solution for {puzzle_code:?} rejected: {err}");
            EngineError::MalformedSolution(err)
        })?;
        Ok(count)
    }

    /// Asks the engine to solve the current puzzle and draws the result.
    ///
    /// The drawn edges are replaced but history is kept.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MalformedSolution`] if the returned code does not
    /// fit the grid, or any error reported by the engine. Edges are unchanged
    /// on failure.
    pub fn solve_into<E>(&mut self, engine: &E) -> Result<(), EngineError>
    where
        E: PuzzleEngine + ?Sized,
    {
        let puzzle_code = self.puzzle_code();
        let solution = engine.solve(&puzzle_code)?;
        self.apply_solution_code(&solution).map_err(|err| {
            log::warn!("engine solution for {puzzle_code:?} rejected: {err}");
            EngineError::MalformedSolution(err)
        })
    }

    /// Asks the engine for a new puzzle and loads it with its solution.
    ///
    /// `rows` and `cols` are clamped to the configured range first.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MalformedGeneratedPayload`] or
    /// [`EngineError::MalformedGeneratedPuzzle`] if the reply cannot be used,
    /// or any error reported by the engine. The session is untouched on
    /// failure.
    pub fn generate_into<E>(
        &mut self,
        engine: &E,
        rows: usize,
        cols: usize,
        difficulty: Difficulty,
        seed: u64,
    ) -> Result<(), EngineError>
    where
        E: PuzzleEngine + ?Sized,
    {
        let dimensions = self.dimensions();
        let rows = dimensions.clamp(rows);
        let cols = dimensions.clamp(cols);
        log::debug!("generating {rows}x{cols} {difficulty} puzzle with seed {seed}");

        let payload = engine.generate(rows, cols, difficulty, seed)?;
        let Some((puzzle, solution)) = payload.split_once(',') else {
            log::warn!("generator payload {payload:?} has no separator");
            return Err(EngineError::MalformedGeneratedPayload);
        };
        if solution.contains(',') {
            log::warn!("generator payload {payload:?} has extra fields");
            return Err(EngineError::MalformedGeneratedPayload);
        }

        self.load_puzzle(puzzle, solution).map_err(|err| {
            log::warn!("generated puzzle {payload:?} rejected: {err}");
            EngineError::MalformedGeneratedPuzzle(err)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use loopgrid_core::GridState;

    use super::*;
    use crate::{EdgeAction, Point};

    /// Engine returning canned replies and recording what it was asked.
    #[derive(Default)]
    struct FakeEngine {
        status: i32,
        solution: String,
        generated: String,
        requests: RefCell<Vec<String>>,
    }

    impl PuzzleEngine for FakeEngine {
        fn count_solutions(&self, puzzle_code: &str) -> Result<i32, EngineError> {
            self.requests
                .borrow_mut()
                .push(format!("count {puzzle_code}"));
            Ok(self.status)
        }

        fn solve(&self, puzzle_code: &str) -> Result<String, EngineError> {
            self.requests
                .borrow_mut()
                .push(format!("solve {puzzle_code}"));
            Ok(self.solution.clone())
        }

        fn generate(
            &self,
            rows: usize,
            cols: usize,
            difficulty: Difficulty,
            seed: u64,
        ) -> Result<String, EngineError> {
            self.requests.borrow_mut().push(format!(
                "generate {rows} {cols} {} {seed}",
                difficulty.index()
            ));
            Ok(self.generated.clone())
        }
    }

    struct OfflineEngine;

    impl PuzzleEngine for OfflineEngine {
        fn count_solutions(&self, _: &str) -> Result<i32, EngineError> {
            Err(EngineError::Unavailable)
        }

        fn solve(&self, _: &str) -> Result<String, EngineError> {
            Err(EngineError::Unavailable)
        }

        fn generate(&self, _: usize, _: usize, _: Difficulty, _: u64) -> Result<String, EngineError> {
            Err(EngineError::Unavailable)
        }
    }

    fn ring_solution() -> String {
        let mut grid = GridState::new(5, 5);
        for edge in grid.cell_edges(0, 0) {
            grid.toggle_edge(edge);
        }
        grid.solution_code()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            SolutionCount::from_status(-1),
            Err(EngineError::InvalidPuzzleCode)
        );
        assert_eq!(SolutionCount::from_status(-2), Err(EngineError::SolverFailure));
        assert_eq!(
            SolutionCount::from_status(-3),
            Err(EngineError::UnrecognizedStatus { status: -3 })
        );
        assert_eq!(SolutionCount::from_status(0), Ok(SolutionCount::None));
        assert_eq!(SolutionCount::from_status(1), Ok(SolutionCount::Unique));
        assert_eq!(
            SolutionCount::from_status(2),
            Ok(SolutionCount::Multiple { count: 2 })
        );
    }

    #[test]
    fn test_load_and_verify_unique() {
        let engine = FakeEngine {
            status: 1,
            solution: ring_solution(),
            ..FakeEngine::default()
        };
        let mut session = PuzzleSession::default();
        let count = session.load_and_verify(&engine, "5x5:4x").unwrap();

        assert_eq!(count, SolutionCount::Unique);
        assert_eq!(session.solution(), Some(ring_solution().as_str()));
        assert_eq!(
            *engine.requests.borrow(),
            ["count 5x5:4x", "solve 5x5:4x"]
        );
    }

    #[test]
    fn test_load_and_verify_sends_canonical_code() {
        let engine = FakeEngine {
            status: 1,
            solution: "a".repeat(25),
            ..FakeEngine::default()
        };
        let mut session = PuzzleSession::default();
        session.load_and_verify(&engine, "5x5:5a4v").unwrap();
        assert_eq!(engine.requests.borrow()[0], "count 5x5:b4v");
    }

    #[test]
    fn test_load_and_verify_ambiguous_still_solves() {
        let engine = FakeEngine {
            status: 2,
            solution: "a".repeat(25),
            ..FakeEngine::default()
        };
        let mut session = PuzzleSession::default();
        let count = session.load_and_verify(&engine, "5x5:").unwrap();
        assert_eq!(count, SolutionCount::Multiple { count: 2 });
        assert!(session.is_solved());
    }

    #[test]
    fn test_load_and_verify_rejections_keep_puzzle() {
        for (status, expected) in [
            (-1, EngineError::InvalidPuzzleCode),
            (-2, EngineError::SolverFailure),
            (0, EngineError::NoSolution),
            (-7, EngineError::UnrecognizedStatus { status: -7 }),
        ] {
            let engine = FakeEngine {
                status,
                ..FakeEngine::default()
            };
            let mut session = PuzzleSession::default();
            assert_eq!(session.load_and_verify(&engine, "6x5:0"), Err(expected));
            assert_eq!(session.puzzle_code(), "6x5:0zc");
            assert_eq!(session.solution(), None);
            assert_eq!(engine.requests.borrow().len(), 1);
        }
    }

    #[test]
    fn test_load_and_verify_bad_code_skips_engine() {
        let engine = FakeEngine::default();
        let mut session = PuzzleSession::default();
        let result = session.load_and_verify(&engine, "5x5:!");
        assert!(matches!(result, Err(EngineError::Puzzle(_))));
        assert!(engine.requests.borrow().is_empty());
        assert_eq!(session.puzzle_code(), "5x5:y");
    }

    #[test]
    fn test_load_and_verify_rejects_short_solution() {
        let engine = FakeEngine {
            status: 1,
            solution: "aaa".to_owned(),
            ..FakeEngine::default()
        };
        let mut session = PuzzleSession::default();
        let result = session.load_and_verify(&engine, "5x5:");
        assert!(matches!(result, Err(EngineError::MalformedSolution(_))));
        assert_eq!(session.solution(), None);
    }

    #[test]
    fn test_solve_into_draws_edges_and_keeps_history() {
        let engine = FakeEngine {
            solution: ring_solution(),
            ..FakeEngine::default()
        };
        let mut session = PuzzleSession::default();
        session.click(Point::new(200.0, 300.0), EdgeAction::Toggle);

        session.solve_into(&engine).unwrap();
        assert_eq!(session.state_code(), ring_solution());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_solve_into_failure_leaves_edges() {
        let engine = FakeEngine {
            solution: "zz".to_owned(),
            ..FakeEngine::default()
        };
        let mut session = PuzzleSession::default();
        session.click(Point::new(38.0, 38.0), EdgeAction::Toggle);
        let before = session.state_code();

        assert!(matches!(
            session.solve_into(&engine),
            Err(EngineError::MalformedSolution(_))
        ));
        assert_eq!(session.state_code(), before);
        assert_eq!(session.solve_into(&OfflineEngine), Err(EngineError::Unavailable));
    }

    #[test]
    fn test_generate_into_clamps_and_loads() {
        let engine = FakeEngine {
            generated: format!("5x5:3x,{}", ring_solution()),
            ..FakeEngine::default()
        };
        let mut session = PuzzleSession::default();
        session
            .generate_into(&engine, 2, 5, Difficulty::Hard, 42)
            .unwrap();

        assert_eq!(engine.requests.borrow()[0], "generate 5 5 2 42");
        assert_eq!(session.puzzle_code(), "5x5:3x");
        assert_eq!(session.solution(), Some(ring_solution().as_str()));
        assert!(!session.is_solved());
    }

    #[test]
    fn test_generate_into_rejects_bad_payloads() {
        let mut session = PuzzleSession::default();
        session.load_puzzle_code("6x6:1").unwrap();

        for payload in ["5x5:3x", "5x5:3x,aaa", "5x5:3x,a,b", "5x5?,aaaa"] {
            let engine = FakeEngine {
                generated: payload.to_owned(),
                ..FakeEngine::default()
            };
            let result = session.generate_into(&engine, 5, 5, Difficulty::Easy, 0);
            assert!(
                matches!(
                    result,
                    Err(EngineError::MalformedGeneratedPayload
                        | EngineError::MalformedGeneratedPuzzle(_))
                ),
                "{payload}: {result:?}"
            );
            assert_eq!(session.puzzle_code(), "6x6:1zi");
        }
    }

    #[test]
    fn test_difficulty_serde() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        let parsed: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(parsed, Difficulty::Hard);
        assert_eq!(Difficulty::ALL.map(Difficulty::index), [0, 1, 2]);
    }
}
