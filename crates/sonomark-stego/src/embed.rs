//! Writing and reading bit streams inside a carrier's data region.
//!
//! The header always occupies the fixed schedule (one bit in every byte from
//! the start of the region); the coded payload follows at the configured
//! width and spacing. A write at eligible byte `p` fills the low `lsb` bits
//! of the little-endian integer starting at `p`: for `lsb <= 8` that is the
//! byte itself, for wider fields it spills into the low bits of `p + 1`,
//! which is per-sample embedding on 16-bit PCM. Config validation guarantees
//! such writes never overlap (`stride >= 2` whenever `lsb > 8`).

use crate::bits::{lsb_mask, BitReader, BitWriter};
use crate::error::StegoError;
use crate::header::{HeaderFields, StegoHeader, HEADER_FIXED_LEN, HEADER_MAGIC};

/// The fixed, variant-independent schedule the header is embedded with.
const HEADER_LSB: u32 = 1;
const HEADER_STRIDE: usize = 1;

/// Number of carrier positions eligible for writes of `lsb` bits starting at
/// `start` with the given spacing.
fn eligible_positions(data_len: usize, start: usize, stride: usize, lsb: u32) -> usize {
    // Wide fields borrow the following byte, so the last byte is not a
    // valid starting position for them.
    let end = if lsb > 8 {
        data_len.saturating_sub(1)
    } else {
        data_len
    };
    if start >= end {
        return 0;
    }
    (end - start).div_ceil(stride)
}

/// Bytes of coded payload that fit after a header of `header_len` bytes.
pub(crate) fn capacity_bytes(
    data_len: usize,
    header_len: usize,
    lsb: u32,
    stride: usize,
) -> usize {
    let payload_start = header_len * 8;
    eligible_positions(data_len, payload_start, stride, lsb) * lsb as usize / 8
}

fn write_stream(
    data: &mut [u8],
    start: usize,
    stride: usize,
    lsb: u32,
    message: &[u8],
) -> Result<(), StegoError> {
    let mask = lsb_mask(lsb);
    let mut reader = BitReader::new(message);
    let mut pos = start;

    while reader.remaining() > 0 {
        let take = (reader.remaining() as u32).min(lsb);
        let mut value = match reader.read_bits(take) {
            Some(v) => v,
            None => break,
        };
        // A final partial group sits in the high bits of the field.
        value <<= lsb - take;

        if lsb <= 8 {
            let slot = data.get_mut(pos).ok_or(StegoError::Truncated {
                context: "carrier exhausted mid-write",
            })?;
            *slot = (*slot & !(mask as u8)) | value as u8;
        } else {
            if pos + 1 >= data.len() {
                return Err(StegoError::Truncated {
                    context: "carrier exhausted mid-write",
                });
            }
            let high_mask = (mask >> 8) as u8;
            data[pos] = value as u8;
            data[pos + 1] = (data[pos + 1] & !high_mask) | (value >> 8) as u8;
        }
        pos += stride;
    }
    Ok(())
}

fn read_stream(
    data: &[u8],
    start: usize,
    stride: usize,
    lsb: u32,
    byte_count: usize,
    context: &'static str,
) -> Result<Vec<u8>, StegoError> {
    let mask = lsb_mask(lsb);
    let needed_bits = byte_count * 8;
    let mut writer = BitWriter::new();
    let mut pos = start;

    while writer.bit_len() < needed_bits {
        let value = if lsb <= 8 {
            let byte = data.get(pos).ok_or(StegoError::Truncated { context })?;
            *byte as u32 & mask
        } else {
            if pos + 1 >= data.len() {
                return Err(StegoError::Truncated { context });
            }
            (data[pos] as u32 | (data[pos + 1] as u32) << 8) & mask
        };
        writer.write_bits(value, lsb);
        pos += stride;
    }

    let mut bytes = writer.into_bytes();
    bytes.truncate(byte_count);
    Ok(bytes)
}

/// Embed header and coded payload into a data region.
///
/// The capacity check happens before the first byte is touched, so a failed
/// embed leaves the carrier exactly as it was.
pub(crate) fn write_into(
    data: &mut [u8],
    header: &StegoHeader,
    coded: &[u8],
    repeat: bool,
) -> Result<(), StegoError> {
    let header_bytes = header.to_bytes();
    let header_region = header_bytes.len() * 8;
    let lsb = header.lsb as u32;
    let stride = header.stride as usize;

    let capacity = capacity_bytes(data.len(), header_bytes.len(), lsb, stride);
    if header_region > data.len() || coded.len() > capacity {
        return Err(StegoError::PayloadTooLarge {
            coded: coded.len(),
            capacity,
        });
    }

    write_stream(data, 0, HEADER_STRIDE, HEADER_LSB, &header_bytes)?;

    if repeat && !coded.is_empty() {
        let mut filled = Vec::with_capacity(capacity);
        while filled.len() < capacity {
            let take = coded.len().min(capacity - filled.len());
            filled.extend_from_slice(&coded[..take]);
        }
        write_stream(data, header_region, stride, lsb, &filled)
    } else {
        write_stream(data, header_region, stride, lsb, coded)
    }
}

/// Read the embedded header and exactly the coded bytes it declares.
pub(crate) fn read_from(data: &[u8]) -> Result<(StegoHeader, Vec<u8>), StegoError> {
    if data.len() < HEADER_FIXED_LEN * 8 {
        return Err(StegoError::NotSteganographic);
    }
    let fixed = read_stream(
        data,
        0,
        HEADER_STRIDE,
        HEADER_LSB,
        HEADER_FIXED_LEN,
        "fixed header",
    )?;
    let fields = HeaderFields::parse(&fixed)?;

    let header_len = HEADER_FIXED_LEN + fields.prelude_len;
    let prelude = read_stream(
        data,
        HEADER_FIXED_LEN * 8,
        HEADER_STRIDE,
        HEADER_LSB,
        fields.prelude_len,
        "header prelude",
    )?;
    let header = fields.into_header(prelude);
    header.config().validate()?;

    let coded = read_stream(
        data,
        header_len * 8,
        header.stride as usize,
        header.lsb as u32,
        fields.coded_len,
        "coded payload",
    )?;
    Ok((header, coded))
}

/// Whether the fixed schedule carries the header magic.
pub(crate) fn probe(data: &[u8]) -> bool {
    if data.len() < HEADER_MAGIC.len() * 8 {
        return false;
    }
    match read_stream(data, 0, HEADER_STRIDE, HEADER_LSB, HEADER_MAGIC.len(), "magic") {
        Ok(bytes) => bytes == HEADER_MAGIC,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_round_trip_at_various_widths() {
        let message = b"stride and width";
        for (lsb, stride) in [(1u32, 1usize), (2, 4), (4, 3), (8, 2), (12, 2), (16, 2)] {
            let mut carrier = vec![0xFFu8; 4096];
            write_stream(&mut carrier, 10, stride, lsb, message).expect("write");
            let back =
                read_stream(&carrier, 10, stride, lsb, message.len(), "test").expect("read");
            assert_eq!(back, message, "lsb={lsb} stride={stride}");
        }
    }

    #[test]
    fn only_eligible_low_bits_change() {
        let mut carrier = vec![0xFFu8; 256];
        write_stream(&mut carrier, 0, 4, 2, &[0x00, 0x00]).expect("write");
        for (i, &byte) in carrier.iter().enumerate() {
            if i % 4 == 0 && i < 32 {
                assert_eq!(byte, 0xFC, "byte {i} should have two cleared LSBs");
            } else {
                assert_eq!(byte, 0xFF, "byte {i} should be untouched");
            }
        }
    }

    #[test]
    fn wide_fields_span_into_the_next_byte() {
        let mut carrier = vec![0xFFu8; 8];
        // One 10-bit group: 0b10_0000_0001 → low byte 0x01, two high bits 0b10.
        write_stream(&mut carrier, 0, 2, 10, &[0b1000_0000, 0b0100_0000]).expect("write");
        assert_eq!(carrier[0], 0x01);
        assert_eq!(carrier[1], 0b1111_1110);
        let back = read_stream(&carrier, 0, 2, 10, 2, "test").expect("read");
        assert_eq!(back[0], 0b1000_0000);
    }

    #[test]
    fn capacity_accounts_for_header_and_spacing() {
        // 1000-byte region, 20-byte header → payload starts at byte 160.
        assert_eq!(capacity_bytes(1000, 20, 1, 1), (1000 - 160) / 8);
        assert_eq!(capacity_bytes(1000, 20, 2, 1), (1000 - 160) * 2 / 8);
        assert_eq!(capacity_bytes(1000, 20, 2, 4), 210 * 2 / 8);
        // Header larger than the region: nothing fits.
        assert_eq!(capacity_bytes(100, 20, 1, 1), 0);
    }

    #[test]
    fn capacity_is_monotonic() {
        for lsb in 1..8u32 {
            assert!(capacity_bytes(10_000, 17, lsb, 1) <= capacity_bytes(10_000, 17, lsb + 1, 1));
        }
        for stride in 1..10usize {
            assert!(
                capacity_bytes(10_000, 17, 2, stride) >= capacity_bytes(10_000, 17, 2, stride + 1)
            );
        }
    }

    #[test]
    fn exhausted_carrier_is_reported() {
        let mut carrier = vec![0u8; 16];
        assert!(matches!(
            write_stream(&mut carrier, 0, 1, 1, &[0xAA; 8]),
            Err(StegoError::Truncated { .. })
        ));
        assert!(matches!(
            read_stream(&carrier, 0, 1, 1, 8, "test"),
            Err(StegoError::Truncated { .. })
        ));
    }
}
