// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Position source moduls
//!
//! Reads positions from a rosbridge or NMEA TCP server, or from a local byte
//! stream like stdin, and publishes every decoded fix on the event bus.

pub mod network_source;
pub mod pipeline;
pub mod stream_source;
