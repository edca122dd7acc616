//! # A linear and integer program solver
//!
//! Linear programs are solved using the two-phase Simplex Method on a dense tableau, as described
//! in the book Combinatorial Optimization by Christos H. Papadimitriou and Kenneth Steiglitz.
//! Integer programs are solved by branch-and-bound or Gomory cuts on top of it, and 0/1 knapsack
//! problems by a dedicated branch-and-bound.
//!
//! Every algorithm reports its steps to a `trace::Trace` sink.
#![warn(missing_docs)]

pub mod algorithm;
pub mod data;
pub mod error;
pub mod io;
pub mod settings;
pub mod trace;
