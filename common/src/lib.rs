// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Common Modul for fixfeed
//!
//! Provides the data types that are shared between the source, decoder and sink moduls.

pub mod backoff;
pub mod position;
pub mod session_state;
pub mod status;
pub mod test_helper;
