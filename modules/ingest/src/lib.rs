// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Ingest Modul for fixfeed
//!
//! Provides the framers that cut complete messages out of a byte stream and the
//! decoders that turn those messages into a normalized [`common::position::Fix`].
//! Nothing in here does I/O, the source moduls drive it.

pub mod decoder;
pub mod format;
pub mod framing;

pub use decoder::{DecodeError, FixDecoder};
pub use format::Format;
pub use framing::{FrameBuffer, FrameCodec, FramingError, RawFrame};
