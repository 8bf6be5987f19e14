/// Longest base name, in bytes, a record will carry. Matches `NAME_MAX` on
/// Linux and the BSDs.
pub const NAME_MAX: usize = 255;

/// Records reserved up front before the first entry is read.
/// Most directories are small; the vector grows amortized beyond this.
pub const INITIAL_CAPACITY: usize = 32;

pub const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;
