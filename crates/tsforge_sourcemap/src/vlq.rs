//! Base64 VLQ encoding as used by the `mappings` field.

const BASE64_CHARS: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const VLQ_BASE_SHIFT: u32 = 5;
const VLQ_BASE: i64 = 1 << VLQ_BASE_SHIFT;
const VLQ_BASE_MASK: i64 = VLQ_BASE - 1;
const VLQ_CONTINUATION_BIT: i64 = VLQ_BASE;

/// Append the VLQ encoding of `value` to `out`.
pub fn encode(value: i64, out: &mut String) {
    // Sign goes into the least significant bit.
    let mut vlq = if value < 0 { ((-value) << 1) | 1 } else { value << 1 };
    loop {
        let mut digit = vlq & VLQ_BASE_MASK;
        vlq >>= VLQ_BASE_SHIFT;
        if vlq > 0 {
            digit |= VLQ_CONTINUATION_BIT;
        }
        out.push(BASE64_CHARS[digit as usize] as char);
        if vlq == 0 {
            break;
        }
    }
}

/// Decode one VLQ value from the front of `input`, returning the value and
/// the number of bytes consumed.
pub fn decode(input: &str) -> Option<(i64, usize)> {
    let mut result: i64 = 0;
    let mut shift = 0;
    for (consumed, byte) in input.bytes().enumerate() {
        let digit = base64_value(byte)? as i64;
        result += (digit & VLQ_BASE_MASK) << shift;
        if digit & VLQ_CONTINUATION_BIT == 0 {
            let negative = result & 1 == 1;
            let magnitude = result >> 1;
            return Some((if negative { -magnitude } else { magnitude }, consumed + 1));
        }
        shift += VLQ_BASE_SHIFT;
        if shift > 60 {
            return None;
        }
    }
    None
}

fn base64_value(byte: u8) -> Option<u8> {
    match byte {
        b'A'..=b'Z' => Some(byte - b'A'),
        b'a'..=b'z' => Some(byte - b'a' + 26),
        b'0'..=b'9' => Some(byte - b'0' + 52),
        b'+' => Some(62),
        b'/' => Some(63),
        _ => None,
    }
}

/// Standard padded base64, used for inline `data:` URLs.
pub fn base64_encode(input: &[u8]) -> String {
    let mut out = String::with_capacity(input.len().div_ceil(3) * 4);
    for chunk in input.chunks(3) {
        let b0 = chunk[0] as u32;
        let b1 = chunk.get(1).copied().unwrap_or(0) as u32;
        let b2 = chunk.get(2).copied().unwrap_or(0) as u32;
        let triple = (b0 << 16) | (b1 << 8) | b2;
        out.push(BASE64_CHARS[((triple >> 18) & 0x3f) as usize] as char);
        out.push(BASE64_CHARS[((triple >> 12) & 0x3f) as usize] as char);
        if chunk.len() > 1 {
            out.push(BASE64_CHARS[((triple >> 6) & 0x3f) as usize] as char);
        } else {
            out.push('=');
        }
        if chunk.len() > 2 {
            out.push(BASE64_CHARS[(triple & 0x3f) as usize] as char);
        } else {
            out.push('=');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(value: i64) -> String {
        let mut s = String::new();
        encode(value, &mut s);
        s
    }

    #[test]
    fn test_encode_small_values() {
        assert_eq!(enc(0), "A");
        assert_eq!(enc(1), "C");
        assert_eq!(enc(-1), "D");
        assert_eq!(enc(15), "e");
        assert_eq!(enc(16), "gB");
    }

    #[test]
    fn test_decode_reads_continuations() {
        assert_eq!(decode("gB"), Some((16, 2)));
        assert_eq!(decode("DAAA"), Some((-1, 1)));
        assert_eq!(decode("g"), None);
        assert_eq!(decode("!"), None);
    }

    #[test]
    fn test_base64_padding() {
        assert_eq!(base64_encode(b""), "");
        assert_eq!(base64_encode(b"f"), "Zg==");
        assert_eq!(base64_encode(b"fo"), "Zm8=");
        assert_eq!(base64_encode(b"foo"), "Zm9v");
        assert_eq!(base64_encode(b"{\"version\":3}"), "eyJ2ZXJzaW9uIjozfQ==");
    }
}
