//! End-to-end scenario tests for the `shuriken-dav` engine (§8). This crate
//! carries no library code of its own; see `tests/` for the scenario suite.
