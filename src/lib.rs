//! Sentaurus Visual Tcl script generator.
//!
//! Turns a structured request (nodes, TDR codes, cutplane/cutline sets,
//! physical parameters) into the ordered console commands that load the
//! datasets, cut them down to 1D and export the resulting curves.

pub mod error;
pub mod generator;
pub mod ir;
pub mod naming;
pub mod output;
pub mod parser;
pub mod request;
pub mod script;
pub mod sequencer;
pub mod stats;
