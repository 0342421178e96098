//! Colors.

use image::Rgba;

use crate::error::StyleError;

/// Parse `RGB`, `RGBA`, `RRGGBB` or `RRGGBBAA` hex digits with an optional
/// leading `#`. Short forms repeat each digit (`#f80` is `#ff8800`); a
/// missing alpha is opaque.
pub fn parse_hex_color(hex: &str) -> Result<Rgba<u8>, StyleError> {
    let invalid = || StyleError::InvalidColorFormat(hex.to_string());

    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).map_err(|_| invalid());
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());

    let [r, g, b, a] = match digits.len() {
        3 => [nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17, 255],
        4 => [nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17, nibble(3)? * 17],
        6 => [byte(0)?, byte(2)?, byte(4)?, 255],
        8 => [byte(0)?, byte(2)?, byte(4)?, byte(6)?],
        _ => return Err(invalid()),
    };
    Ok(Rgba([r, g, b, a]))
}

/// Composite `src` over `dst` (Porter-Duff over on straight alpha), with
/// `coverage` scaling the source alpha.
pub fn blend_over(dst: &mut Rgba<u8>, src: Rgba<u8>, coverage: u8) {
    let src_a = src[3] as u32 * coverage as u32 / 255;
    if src_a == 0 {
        return;
    }
    if src_a == 255 {
        *dst = src;
        return;
    }

    // Weights are in 255 * 255 units.
    let src_w = src_a * 255;
    let dst_w = dst[3] as u32 * (255 - src_a);
    let out_w = src_w + dst_w;
    if out_w == 0 {
        *dst = Rgba([0, 0, 0, 0]);
        return;
    }

    for c in 0..3 {
        let mixed = src[c] as u32 * src_w + dst[c] as u32 * dst_w;
        dst[c] = ((mixed + out_w / 2) / out_w) as u8;
    }
    dst[3] = ((out_w + 127) / 255) as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_six_digits() {
        assert_eq!(parse_hex_color("#60BCE0").unwrap(), Rgba([0x60, 0xbc, 0xe0, 255]));
        assert_eq!(parse_hex_color("8d8d8d").unwrap(), Rgba([0x8d, 0x8d, 0x8d, 255]));
    }

    #[test]
    fn test_parse_short_forms() {
        assert_eq!(parse_hex_color("#fff").unwrap(), Rgba([255, 255, 255, 255]));
        assert_eq!(parse_hex_color("#f808").unwrap(), Rgba([255, 0x88, 0, 0x88]));
    }

    #[test]
    fn test_parse_with_alpha() {
        assert_eq!(parse_hex_color(" #00000080 ").unwrap(), Rgba([0, 0, 0, 0x80]));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for bad in ["", "#", "#12", "#12345", "#1234567", "#gggggg", "#+12345", "#ｆｆｆ"] {
            assert!(
                matches!(parse_hex_color(bad), Err(StyleError::InvalidColorFormat(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn test_blend_full_coverage_replaces() {
        let mut dst = Rgba([10, 20, 30, 255]);
        blend_over(&mut dst, Rgba([200, 100, 0, 255]), 255);
        assert_eq!(dst, Rgba([200, 100, 0, 255]));
    }

    #[test]
    fn test_blend_zero_coverage_keeps() {
        let mut dst = Rgba([10, 20, 30, 255]);
        blend_over(&mut dst, Rgba([200, 100, 0, 255]), 0);
        assert_eq!(dst, Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_blend_half_coverage() {
        let mut dst = Rgba([0, 0, 0, 255]);
        blend_over(&mut dst, Rgba([255, 255, 255, 255]), 128);
        assert_eq!(dst, Rgba([128, 128, 128, 255]));
    }

    #[test]
    fn test_blend_onto_transparent_keeps_source_color() {
        let mut dst = Rgba([0, 0, 0, 0]);
        blend_over(&mut dst, Rgba([255, 255, 255, 255]), 128);
        assert_eq!(dst, Rgba([255, 255, 255, 128]));
    }

    #[test]
    fn test_blend_onto_translucent() {
        // 50% white over 50% black: alpha 0.75, color 2/3 white.
        let mut dst = Rgba([0, 0, 0, 128]);
        blend_over(&mut dst, Rgba([255, 255, 255, 255]), 128);
        assert_eq!(dst[3], 192);
        assert!((169..=171).contains(&dst[0]), "{dst:?}");
        assert_eq!(dst[0], dst[1]);
        assert_eq!(dst[1], dst[2]);
    }
}
