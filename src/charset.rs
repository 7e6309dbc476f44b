//! UTF-8 <-> Latin-1 bridge for protocol text
//!
//! skiffd runs on a machine whose filesystem and shell speak ISO-8859-1, so
//! every string that crosses the wire is encoded as Latin-1 with a byte-count
//! length prefix. Inbound conversion is lossless (each byte is one code
//! point); outbound conversion drops code points above U+00FF, and reports
//! how many were dropped so callers can warn instead of silently mangling
//! names.

/// Result of an outbound UTF-8 -> Latin-1 conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Latin1Encoded {
    /// The wire bytes. The protocol length prefix counts these, not the
    /// source UTF-8 bytes.
    pub bytes: Vec<u8>,
    /// Number of code points that had no Latin-1 representation and were
    /// dropped from the output.
    pub lost: usize,
}

/// Encodes `text` as Latin-1, dropping (and counting) anything above U+00FF.
pub fn utf8_to_latin1(text: &str) -> Latin1Encoded {
    let mut bytes = Vec::with_capacity(text.len());
    let mut lost = 0;
    for ch in text.chars() {
        let cp = ch as u32;
        if cp <= 0xFF {
            bytes.push(cp as u8);
        } else {
            lost += 1;
        }
    }
    Latin1Encoded { bytes, lost }
}

/// Decodes Latin-1 wire bytes to an owned UTF-8 string. Total: every byte
/// maps to exactly one code point, so this cannot fail.
pub fn latin1_to_utf8(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_through() {
        let enc = utf8_to_latin1("Work:Demos/intro.exe");
        assert_eq!(enc.bytes, b"Work:Demos/intro.exe");
        assert_eq!(enc.lost, 0);
    }

    #[test]
    fn high_latin1_maps_to_single_bytes() {
        // "Ringö" is 6 UTF-8 bytes but 5 Latin-1 bytes
        let enc = utf8_to_latin1("Ring\u{f6}");
        assert_eq!(enc.bytes, [b'R', b'i', b'n', b'g', 0xF6]);
        assert_eq!(enc.lost, 0);
    }

    #[test]
    fn untranslatable_code_points_are_dropped_and_counted() {
        let enc = utf8_to_latin1("a\u{2713}b\u{1F600}c");
        assert_eq!(enc.bytes, b"abc");
        assert_eq!(enc.lost, 2);
    }

    #[test]
    fn inbound_is_total_and_lossless() {
        let all: Vec<u8> = (0..=255).collect();
        let s = latin1_to_utf8(&all);
        assert_eq!(s.chars().count(), 256);
        assert_eq!(utf8_to_latin1(&s).bytes, all);
    }

    #[test]
    fn round_trip_for_latin1_representable_text() {
        for s in ["", "plain", "Ring\u{f6}", "\u{e5}\u{e4}\u{f6} caf\u{e9}"] {
            let enc = utf8_to_latin1(s);
            assert_eq!(enc.lost, 0);
            assert_eq!(latin1_to_utf8(&enc.bytes), s);
        }
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(utf8_to_latin1("").bytes, Vec::<u8>::new());
        assert_eq!(latin1_to_utf8(&[]), "");
    }
}
