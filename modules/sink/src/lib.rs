// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Sink Modul for fixfeed
//!
//! Writes every decoded fix together with the configured status into the
//! position document of one target.

use common::{position::Fix, status::Status};
use serde::Serialize;
use std::io;

pub mod file_sink;
pub mod log_sink;
pub mod sink_module;

pub use file_sink::DocumentFileSink;
pub use log_sink::LogSink;
pub use sink_module::SinkModule;

/// Identifier of the document that receives the position updates.
///
/// The id is fixed for the lifetime of the process and must be usable as a
/// single path segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SinkTarget(String);

impl SinkTarget {
    pub fn new(id: &str) -> Result<Self, SinkError> {
        if id.is_empty() || id == "." || id == ".." || id.contains(['/', '\\']) {
            return Err(SinkError::InvalidTarget(id.to_owned()));
        }
        Ok(SinkTarget(id.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SinkTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fields of the target document replaced on every fix.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PositionUpdate {
    pub position: Fix,
    pub status: Status,
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("invalid target id {0:?}")]
    InvalidTarget(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Destination of the normalized position updates.
///
/// A failing update is reported to the caller but never retried, the next fix
/// overwrites the document anyway.
#[async_trait::async_trait]
pub trait PositionSink: Send + Sync {
    async fn update(&self, target: &SinkTarget, update: &PositionUpdate) -> Result<(), SinkError>;
}
