/// Value written into a new cross cell before rows are renormalized.
/// Any positive value works; renormalization turns each row into a uniform
/// distribution over its positive cells.
pub const FULLY_ELIGIBLE: f64 = 1.0;

/// Value of a cell for a pair that has already met (and of the diagonal).
pub const MET: f64 = 0.0;
