//! Property tests for the shape algebras.
//!
//! These pin the boundary policies of each shape against random inputs.
