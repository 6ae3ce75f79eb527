//! Integration tests for the BoxKit layout solver.

mod invariants;
mod viewport;
