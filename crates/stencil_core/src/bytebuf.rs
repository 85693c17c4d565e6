use crate::fieldkind::Endianness;

// NOTE: every primitive travels through these as its raw bit pattern widened to u64 (floats via
// to_bits). the slice length picks the width, so one pair of functions covers all ten kinds.

/// writes the low `dst.len()` bytes of `bits` into `dst`.
#[inline]
pub(crate) fn put_uint(dst: &mut [u8], bits: u64, endianness: Endianness) {
    let width = dst.len();
    debug_assert!(width <= 8);
    match endianness {
        Endianness::Little => dst.copy_from_slice(&bits.to_le_bytes()[..width]),
        Endianness::Big => dst.copy_from_slice(&bits.to_be_bytes()[8 - width..]),
    }
}

/// reads `src.len()` bytes into the low bytes of an u64.
#[inline]
pub(crate) fn get_uint(src: &[u8], endianness: Endianness) -> u64 {
    let width = src.len();
    debug_assert!(width <= 8);
    let mut buf = [0u8; 8];
    match endianness {
        Endianness::Little => {
            buf[..width].copy_from_slice(src);
            u64::from_le_bytes(buf)
        }
        Endianness::Big => {
            buf[8 - width..].copy_from_slice(src);
            u64::from_be_bytes(buf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_and_orders() {
        let mut buf = [0u8; 2];
        put_uint(&mut buf, 42, Endianness::Big);
        assert_eq!(buf, [0x00, 0x2a]);
        put_uint(&mut buf, 42, Endianness::Little);
        assert_eq!(buf, [0x2a, 0x00]);

        let mut buf = [0u8; 4];
        put_uint(&mut buf, u64::from(1.5f32.to_bits()), Endianness::Big);
        assert_eq!(buf, [0x3f, 0xc0, 0x00, 0x00]);
        assert_eq!(get_uint(&buf, Endianness::Big), 0x3fc0_0000);
        assert_eq!(get_uint(&buf, Endianness::Little), 0x0000_c03f);
    }

    #[test]
    fn truncates_to_width() {
        let mut buf = [0u8; 1];
        put_uint(&mut buf, 0x1234, Endianness::Big);
        assert_eq!(buf, [0x34]);
    }
}
