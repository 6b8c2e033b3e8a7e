use cubesim_core::CubieSet;

/// Optional external producer of solutions.
///
/// The engine does not depend on any solving algorithm. A solver is treated
/// as an opaque source of algorithm text, which is validated like any other
/// input before being enqueued.
pub trait ExternalSolver {
    /// Returns a whitespace-separated move sequence that solves `cubies`.
    fn solution(&mut self, cubies: &CubieSet) -> eyre::Result<String>;
}

impl<F: FnMut(&CubieSet) -> eyre::Result<String>> ExternalSolver for F {
    fn solution(&mut self, cubies: &CubieSet) -> eyre::Result<String> {
        self(cubies)
    }
}
