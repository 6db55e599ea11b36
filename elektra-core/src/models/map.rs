/// An insertion-ordered map, defaulting to values of f64.
///
/// Output tables list their columns in the order the caller asked for them,
/// so tables are keyed with indexmap rather than the std HashMap.
pub type Map<K, V = f64> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;
