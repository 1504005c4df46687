// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use ingest::{DecodeError, FixDecoder, Format, FrameBuffer, RawFrame};

fn decode_all(format: &Format, input: &[u8]) -> Vec<(f64, f64)> {
    let mut framer = FrameBuffer::new(format.codec(1024));
    let decoder = format.decoder();
    let mut frames = framer.feed(input).unwrap();
    frames.extend(framer.finish().unwrap());
    frames
        .into_iter()
        .filter_map(|frame| frame.ok())
        .filter_map(|frame| decoder.decode(&frame).ok().flatten())
        .map(|fix| (fix.latitude(), fix.longitude()))
        .collect()
}

#[test]
fn bridge_format_decodes_in_arrival_order() {
    let format = Format::BridgeJson {
        topic: "/fix".to_owned(),
    };
    let input = concat!(
        r#"{"op":"publish","topic":"/fix","msg":{"latitude":35.6,"longitude":139.7}}"#,
        r#"{"op":"publish","topic":"/fix","msg":{"latitude":35.7,"longitude":139.7}}"#,
    );
    assert_eq!(
        decode_all(&format, input.as_bytes()),
        vec![(35.6, 139.7), (35.7, 139.7)]
    );
}

#[test]
fn nmea_format_skips_broken_sentences() {
    let input = b"$GPGSV,3,1,11\r\n$GPGGA,1,4807.038\r\n$GPGGA,1,4800.000,N,01100.000,E,1\r\n";
    assert_eq!(decode_all(&Format::Nmea, input), vec![(48.0, 11.0)]);
}

#[test]
fn block_format_skips_malformed_documents() {
    let input = b"latitude: [\n---\nlatitude: 1.5\nlongitude: 2.5\n---\nlatitude: 9.0\n";
    assert_eq!(decode_all(&Format::StructuredBlock, input), vec![(1.5, 2.5)]);
}

#[test]
fn only_bridge_format_has_a_handshake() {
    let bridge = Format::BridgeJson {
        topic: "/fix".to_owned(),
    };
    assert_eq!(
        bridge.handshake().unwrap(),
        Some(b"{\"op\":\"subscribe\",\"topic\":\"/fix\"}\n".to_vec())
    );
    assert_eq!(Format::Nmea.handshake().unwrap(), None);
    assert_eq!(Format::StructuredBlock.handshake().unwrap(), None);
}

#[test]
fn decoder_rejects_foreign_frames() {
    assert_eq!(
        FixDecoder::Nmea.decode(&RawFrame::Block("latitude: 1".to_owned())),
        Err(DecodeError::UnexpectedFrame {
            decoder: "nmea",
            frame: "block"
        })
    );
}
