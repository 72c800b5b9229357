//! Mapping of radiance values to displayable values.

/// A tone mapper, applied to each pixel after conversion from RGBE.
pub trait ToneMapper: core::fmt::Debug {
    /// Map the RGB values of a single pixel in place.
    fn map(&self, rgb: &mut [f32; 3]);
}

/// Clamps each component to `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClampToneMapper;

impl ToneMapper for ClampToneMapper {
    fn map(&self, rgb: &mut [f32; 3]) {
        for v in rgb {
            *v = v.clamp(0.0, 1.0);
        }
    }
}

/// Exponential tone mapping, computing `1 - e^(-v * exposure)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultToneMapper {
    /// The exposure.
    pub exposure: f32,
}

impl Default for DefaultToneMapper {
    fn default() -> Self {
        Self { exposure: 1.0 }
    }
}

impl ToneMapper for DefaultToneMapper {
    fn map(&self, rgb: &mut [f32; 3]) {
        for v in rgb {
            *v = 1.0 - (-*v * self.exposure).exp();
        }
    }
}

/// Gamma correction, computing `constant * v^gamma`, clamped to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GammaToneMapper {
    /// The factor applied after the exponentiation.
    pub constant: f32,
    /// The exponent.
    pub gamma: f32,
}

impl ToneMapper for GammaToneMapper {
    fn map(&self, rgb: &mut [f32; 3]) {
        for v in rgb {
            *v = (self.constant * v.powf(self.gamma)).clamp(0.0, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(mapper: &dyn ToneMapper, mut rgb: [f32; 3]) -> [f32; 3] {
        mapper.map(&mut rgb);
        rgb
    }

    #[test]
    fn clamp() {
        assert_eq!(map(&ClampToneMapper, [-1.0, 0.5, 7.0]), [0.0, 0.5, 1.0]);
    }

    #[test]
    fn exponential() {
        let mapped = map(&DefaultToneMapper::default(), [0.0, 1.0, 100.0]);

        assert_eq!(mapped[0], 0.0);
        assert!((mapped[1] - (1.0 - (-1.0_f32).exp())).abs() < 1e-6);
        assert_eq!(mapped[2], 1.0);

        let darker = map(&DefaultToneMapper { exposure: 0.5 }, [1.0; 3]);
        assert!(darker[0] < mapped[1]);
    }

    #[test]
    fn gamma() {
        let mapper = GammaToneMapper {
            constant: 2.0,
            gamma: 2.0,
        };

        assert_eq!(map(&mapper, [0.0, 0.5, 4.0]), [0.0, 0.5, 1.0]);
    }
}
