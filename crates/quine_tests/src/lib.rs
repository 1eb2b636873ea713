//! Integration test host for the quine workspace.
//!
//! Everything of interest lives under `tests/`; this empty library target
//! exists so the crate builds as a workspace member.
