//! Scene colors as 0xRRGGBB

/// Campus blue (tower, suit, HUD)
pub const TECH_BLUE: u32 = 0x002f8b;
/// Alert red (hit debris, tie, hearts)
pub const TECH_RED: u32 = crate::consts::DEBRIS_COLOR;
pub const WHITE: u32 = 0xffffff;
pub const GREY: u32 = 0xa0a0a0;
/// Sky at ground level
pub const SKY: u32 = 0x87ceeb;
/// Sky near the top of the tower
pub const NIGHT_SKY: u32 = 0x0a0a2a;

pub const TOWER_EDGE: u32 = 0xcccccc;
pub const GRASS: u32 = 0x1a472a;
pub const SKIN: u32 = 0xfce0d1;
pub const HAIR: u32 = 0xdddddd;
pub const SMILE: u32 = 0xa67c52;
pub const PANTS: u32 = 0x001f5b;
pub const WREATH: u32 = 0x0f5f0f;
pub const WREATH_EDGE: u32 = 0x2f8f2f;
pub const BERRY: u32 = 0xff0000;
pub const STAR: u32 = 0xffff00;
pub const GOLD: u32 = 0xffd700;
pub const LEATHER: u32 = 0x8b4513;
pub const PAGES: u32 = 0xf5f5dc;
pub const LIQUID: u32 = 0x00ff00;
pub const BLACK: u32 = 0x000000;

/// CSS hex string for a packed color
pub fn to_css(color: u32) -> String {
    format!("#{:06x}", color & 0xff_ff_ff)
}

/// CSS `rgba()` string with alpha in [0, 1]
pub fn to_css_alpha(color: u32, alpha: f32) -> String {
    let r = (color >> 16) & 0xff;
    let g = (color >> 8) & 0xff;
    let b = color & 0xff;
    format!("rgba({r}, {g}, {b}, {:.3})", alpha.clamp(0.0, 1.0))
}

/// Linear blend between two packed colors
pub fn mix(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let channel = |shift: u32| {
        let ca = ((a >> shift) & 0xff) as f32;
        let cb = ((b >> shift) & 0xff) as f32;
        ((ca + (cb - ca) * t).round() as u32) << shift
    };
    channel(16) | channel(8) | channel(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_hex() {
        assert_eq!(to_css(TECH_BLUE), "#002f8b");
        assert_eq!(to_css(TECH_RED), "#e31b23");
        assert_eq!(to_css(WHITE), "#ffffff");
    }

    #[test]
    fn test_css_alpha() {
        assert_eq!(to_css_alpha(TECH_RED, 0.5), "rgba(227, 27, 35, 0.500)");
        assert_eq!(to_css_alpha(WHITE, 3.0), "rgba(255, 255, 255, 1.000)");
    }

    #[test]
    fn test_mix_endpoints() {
        assert_eq!(mix(SKY, NIGHT_SKY, 0.0), SKY);
        assert_eq!(mix(SKY, NIGHT_SKY, 1.0), NIGHT_SKY);
        assert_eq!(mix(0x000000, 0xffffff, 0.5), 0x808080);
    }
}
