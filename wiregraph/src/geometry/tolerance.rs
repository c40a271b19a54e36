// Numeric guards shared by the geometry and view modules.

pub const EPS_DENOM: f32 = 1e-8; // denominator guard for ratios

#[inline]
pub fn clamp(x: f32, lo: f32, hi: f32) -> f32 {
    x.max(lo).min(hi)
}

#[inline]
pub fn safe_div(num: f32, den: f32, fallback: f32) -> f32 {
    if den.abs() <= EPS_DENOM {
        fallback
    } else {
        num / den
    }
}
