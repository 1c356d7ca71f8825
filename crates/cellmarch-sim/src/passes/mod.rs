//! CPU passes run once per generation, in order: count, then update.
//!
//! Each pass takes an optional rayon pool. With a pool the grid is split into
//! z-slabs processed in parallel, and the pass returns only after every slab
//! has finished.

pub mod count;
pub mod generation;
