//! Entry point for the `tests/unit/` tree.

#![cfg(feature = "std")]

mod unit;
