//! # Representing linear programs
//!
//! This module contains different representations of linear programs. A `Model` may contain any
//! type of constraint, while its canonical form contains equality constraints only.
pub mod canonical_form;
pub mod elements;
pub mod model;
