//! The fixed candidate set.

use crate::config::units::Degrees;

/// Number of candidates: the 3×3 grid minus the four flat (x = 0, z ≠ 0) points.
pub const CANDIDATE_COUNT: usize = 7;

/// One orientation the search may visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// X-axis angle.
    pub x: Degrees,
    /// Z-axis angle.
    pub z: Degrees,
    /// Visited during the current run.
    pub visited: bool,
}

impl Candidate {
    fn at(x: i32, z: i32) -> Self {
        Self {
            x: Degrees(x),
            z: Degrees(z),
            visited: false,
        }
    }

    /// `(x, z)` pair.
    #[inline]
    pub fn position(&self) -> (Degrees, Degrees) {
        (self.x, self.z)
    }
}

/// The candidate set, built once per rack.
///
/// Order matters: it is the scan order that breaks cost ties. Rows run x
/// from `+max_x` to `-max_x` and z snakes across them, starting at `+max_z`:
/// `(+x,+z) (+x,0) (+x,-z) (0,0) (-x,-z) (-x,0) (-x,+z)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constellation {
    candidates: heapless::Vec<Candidate, CANDIDATE_COUNT>,
}

impl Constellation {
    /// Build the candidates for an `±max_x` by `±max_z` rack.
    pub fn new(max_x: u16, max_z: u16) -> Self {
        let x = max_x as i32;
        let z = max_z as i32;
        let order = [(x, z), (x, 0), (x, -z), (0, 0), (-x, -z), (-x, 0), (-x, z)];

        let mut candidates = heapless::Vec::new();
        for (cx, cz) in order {
            // capacity matches the table
            let _ = candidates.push(Candidate::at(cx, cz));
        }
        Self { candidates }
    }

    /// All candidates in scan order.
    #[inline]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Mark the candidate at `index` visited.
    pub fn mark_visited(&mut self, index: usize) {
        if let Some(candidate) = self.candidates.get_mut(index) {
            candidate.visited = true;
        }
    }

    /// Clear every visited flag.
    pub fn reset(&mut self) {
        for candidate in self.candidates.iter_mut() {
            candidate.visited = false;
        }
    }

    /// Whether any candidate is still unvisited.
    pub fn has_unvisited(&self) -> bool {
        self.candidates.iter().any(|c| !c.visited)
    }
}
