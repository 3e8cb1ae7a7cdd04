//! HTTP API: read access to the live inventory snapshot and control of the
//! refresh cadence.

pub mod app;
