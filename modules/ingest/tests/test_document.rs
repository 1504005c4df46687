// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use ingest::decoder::{DecodeError, document};

#[test]
fn decode_navsatfix_echo() {
    let block = "header:\n  seq: 42\n  frame_id: \"gps\"\nstatus:\n  status: 0\n  service: 1\nlatitude: 36.5598\nlongitude: 139.9088\naltitude: 120.5";
    let fix = document::decode(block).unwrap();
    assert_eq!(fix.latitude(), 36.5598);
    assert_eq!(fix.longitude(), 139.9088);
}

#[test]
fn accept_integer_values() {
    let fix = document::decode("latitude: 36\nlongitude: 140").unwrap();
    assert_eq!(fix.latitude(), 36.0);
    assert_eq!(fix.longitude(), 140.0);
}

#[test]
fn reject_malformed_document() {
    assert!(matches!(
        document::decode("latitude: [1.0\nlongitude: 2.0"),
        Err(DecodeError::MalformedDocument(_))
    ));
}

#[test]
fn reject_missing_keys() {
    assert_eq!(
        document::decode("latitude: 1.0"),
        Err(DecodeError::MissingField("longitude"))
    );
    assert_eq!(
        document::decode("position:\n  latitude: 1.0\n  longitude: 2.0"),
        Err(DecodeError::MissingField("latitude"))
    );
    assert_eq!(document::decode(""), Err(DecodeError::MissingField("latitude")));
}

#[test]
fn reject_non_numeric_values() {
    assert_eq!(
        document::decode("latitude: north\nlongitude: 2.0"),
        Err(DecodeError::NotNumeric("latitude"))
    );
}

#[test]
fn reject_nan_position() {
    assert!(matches!(
        document::decode("latitude: .nan\nlongitude: 2.0"),
        Err(DecodeError::OutOfRange(_))
    ));
}
