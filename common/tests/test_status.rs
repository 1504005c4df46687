// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::status::Status;

#[test]
pub fn status_labels() {
    assert_eq!(Status::default(), Status::InMotion);
    assert_eq!(Status::InMotion.to_string(), "in motion");
    assert_eq!(Status::Idle.label(), "idle");
    assert_eq!(Status::InUse.label(), "in use");
    assert_eq!(Status::Dispatching.label(), "dispatching");
}

#[test]
pub fn serialize_status_as_label() {
    assert_eq!(
        serde_json::to_string(&Status::InMotion).unwrap(),
        "\"in motion\""
    );
}
