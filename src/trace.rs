//! Trace recording shared by the paging and segmentation simulators.
//!
//! After every processed request a simulator hands the recorder a fully owned
//! snapshot of its table and counters. Records are numbered from 1 in the
//! order they are captured and are never modified afterwards.

use crate::error::SimulationResult;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Ordered, append-only list of step records.
#[derive(Debug, Clone)]
pub struct TraceRecorder<S> {
    steps: Vec<S>,
}

impl<S> TraceRecorder<S> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            steps: Vec::with_capacity(capacity),
        }
    }

    /// Sequence number the next recorded step will carry (1-based).
    pub fn next_sequence_number(&self) -> usize {
        self.steps.len() + 1
    }

    /// Build a record for the next sequence number and append it.
    pub fn record<F>(&mut self, build: F)
    where
        F: FnOnce(usize) -> S,
    {
        let step = build(self.next_sequence_number());
        self.steps.push(step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last(&self) -> Option<&S> {
        self.steps.last()
    }

    /// Hand the recorded steps to the caller.
    pub fn finish(self) -> Vec<S> {
        self.steps
    }
}

impl<S> Default for TraceRecorder<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a trace (or any outcome) into its compact binary form.
///
/// Identical runs produce identical bytes, which makes this the reference
/// for determinism checks.
pub fn encode<T: Serialize>(value: &T) -> SimulationResult<Vec<u8>> {
    Ok(bincode::serialize(value)?)
}

/// Write a pretty-printed JSON document for an external viewer.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> SimulationResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
