// rules.rs - The B3/S23 transition rule

/// Decide whether a cell is alive in the next generation.
///
/// A live cell survives with 2 or 3 live neighbors, a dead cell is born with
/// exactly 3. Every other count leaves the cell dead.
pub fn should_live(is_already_alive: bool, live_neighbors: u8) -> bool {
    match (is_already_alive, live_neighbors) {
        (true, 2) | (true, 3) => true,   // Survival
        (false, 3)            => true,   // Birth
        _                     => false,  // Death or stays dead
    }
}
