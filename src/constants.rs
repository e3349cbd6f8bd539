//! Constants for board geometry, diagram characters, and front-end defaults.
//!
//! The board is a plain 8x8 grid addressed by `(row, col)`. Row 0 is the
//! top of the diagram (rank 8 in external notation) and is Dark's home side.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). English draughts is always played on 8x8.
pub const N: usize = 8;

/// Number of rows each side fills at the start of a game.
pub const HOME_ROWS: usize = 3;

/// Pieces per side in the initial layout.
pub const PIECES_PER_SIDE: usize = HOME_ROWS * N / 2;

/// The four diagonal directions as `(row delta, col delta)`.
/// Order: up-left, up-right, down-left, down-right.
pub const DIAGONALS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

// =============================================================================
// Diagram Characters
// =============================================================================

/// Empty square.
pub const EMPTY: char = '.';

/// Light man.
pub const LIGHT_MAN: char = 'l';

/// Light king.
pub const LIGHT_KING: char = 'L';

/// Dark man.
pub const DARK_MAN: char = 'd';

/// Dark king.
pub const DARK_KING: char = 'D';

// =============================================================================
// Front-end Defaults
// =============================================================================

/// Plies after which a game with no human seat is abandoned.
/// There is no draw rule, so two random players can shuffle kings forever.
pub const MAX_PLIES: usize = 400;

/// Default display name for the Light seat.
pub const LIGHT_NAME: &str = "Light";

/// Default display name for the Dark seat.
pub const DARK_NAME: &str = "Dark";
