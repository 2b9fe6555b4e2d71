//! Pinecone: a reversible Margolus block automaton seeded from golden-angle
//! spiral geometry, and a quad-redundant Game of Life that repairs injected
//! faults by majority vote.
//!
//! The engines live in `pinecone_core` and the plain data types in
//! `pinecone_data`. This crate gathers both under [`model`].

pub mod model;
