//! Encoded polyline codec.
//!
//! Routing providers return route geometry as an "encoded polyline": each
//! coordinate is stored as a signed delta from the previous one, scaled by
//! 1e5, zig-zag mapped to an unsigned integer and written as little-endian
//! 5-bit groups offset into printable ASCII (`'?'..='~'`). A group with bit
//! `0x20` set is followed by another group of the same value.

use crate::domain::Coordinate;

/// Scale between degrees and the integer units carried on the wire.
const PRECISION: f64 = 1e5;

/// Offset added to every 5-bit group to make it printable.
const ASCII_OFFSET: u8 = 63;

/// Continuation flag within a group.
const CONTINUATION: u64 = 0x20;

/// Payload bits within a group.
const PAYLOAD: u64 = 0x1F;

/// Shift of the last group that fits in a `u64`. Only its low 4 payload
/// bits fit (bits 60..=63).
const MAX_SHIFT: u32 = 60;

/// Payload bits that still fit at `MAX_SHIFT`.
const LAST_GROUP_PAYLOAD: u64 = 0x0F;

/// Why an encoded polyline could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolylineError {
    /// Input ended inside a value (open continuation bit, or a latitude
    /// with no longitude after it).
    #[error("malformed polyline: unexpected end of input at byte {offset}")]
    UnexpectedEnd { offset: usize },

    /// A byte outside the encodable range `'?'..='~'`.
    #[error("malformed polyline: invalid byte 0x{byte:02x} at offset {offset}")]
    InvalidByte { offset: usize, byte: u8 },

    /// A value with more continuation groups than fit in 64 bits.
    #[error("malformed polyline: overlong value at byte {offset}")]
    Overlong { offset: usize },

    /// The accumulated coordinate left the valid latitude/longitude range.
    #[error("malformed polyline: point {index} is out of range")]
    OutOfRange { index: usize },
}

/// Decode an encoded polyline into a coordinate path.
///
/// An empty string decodes to an empty path.
///
/// # Examples
///
/// ```
/// use ev_route_server::geometry::decode;
///
/// let path = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
/// assert_eq!(path.len(), 3);
/// assert!((path[0].lat() - 38.5).abs() < 1e-9);
/// assert!((path[2].lng() - -126.453).abs() < 1e-9);
///
/// // Truncated input is rejected rather than read past the end
/// assert!(decode("_p~iF~ps|U_").is_err());
/// ```
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut pos = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut path = Vec::new();

    while pos < bytes.len() {
        let out_of_range = PolylineError::OutOfRange { index: path.len() };
        let dlat = decode_value(bytes, &mut pos)?;
        let dlng = decode_value(bytes, &mut pos)?;
        lat = lat.checked_add(dlat).ok_or_else(|| out_of_range.clone())?;
        lng = lng.checked_add(dlng).ok_or_else(|| out_of_range.clone())?;

        let coord = Coordinate::new(lat as f64 / PRECISION, lng as f64 / PRECISION)
            .map_err(|_| out_of_range)?;
        path.push(coord);
    }

    Ok(path)
}

/// Decode one zig-zag value starting at `pos`, advancing `pos` past it.
fn decode_value(bytes: &[u8], pos: &mut usize) -> Result<i64, PolylineError> {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    loop {
        let byte = *bytes
            .get(*pos)
            .ok_or(PolylineError::UnexpectedEnd { offset: *pos })?;

        if !(ASCII_OFFSET..=b'~').contains(&byte) {
            return Err(PolylineError::InvalidByte { offset: *pos, byte });
        }

        let chunk = u64::from(byte - ASCII_OFFSET);
        if shift > MAX_SHIFT || (shift == MAX_SHIFT && (chunk & PAYLOAD) > LAST_GROUP_PAYLOAD) {
            return Err(PolylineError::Overlong { offset: *pos });
        }

        *pos += 1;
        result |= (chunk & PAYLOAD) << shift;
        shift += 5;

        if chunk < CONTINUATION {
            break;
        }
    }

    let magnitude = (result >> 1) as i64;
    Ok(if result & 1 == 1 { !magnitude } else { magnitude })
}

/// Encode a coordinate path as a polyline.
///
/// Coordinates are rounded to 1e-5 degrees, so `decode(encode(p)) == p`
/// holds for any path already quantised to that precision.
pub fn encode(path: &[Coordinate]) -> String {
    let mut out = String::with_capacity(path.len() * 8);
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for coord in path {
        let lat = (coord.lat() * PRECISION).round() as i64;
        let lng = (coord.lng() * PRECISION).round() as i64;
        encode_value(lat - prev_lat, &mut out);
        encode_value(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

fn encode_value(delta: i64, out: &mut String) {
    let mut value = if delta < 0 {
        !((delta as u64) << 1)
    } else {
        (delta as u64) << 1
    };

    while value >= CONTINUATION {
        out.push(char::from(((CONTINUATION | (value & PAYLOAD)) as u8) + ASCII_OFFSET));
        value >>= 5;
    }
    out.push(char::from((value as u8) + ASCII_OFFSET));
}
