//! Component write masks.

use core::fmt;

const LANE_NAMES: [char; 4] = ['x', 'y', 'z', 'w'];

/// Bitset selecting up to four lanes of a destination vector.
///
/// Bit `i` set means lane `i` is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ComponentMask(u8);

impl ComponentMask {
    pub const X: Self = Self(0b0001);
    pub const Y: Self = Self(0b0010);
    pub const Z: Self = Self(0b0100);
    pub const W: Self = Self(0b1000);
    pub const XYZW: Self = Self(0b1111);

    /// Create a mask from its low four bits; higher bits are dropped.
    pub fn new(bits: u8) -> Self {
        Self(bits & 0xf)
    }

    pub fn from_lanes(x: bool, y: bool, z: bool, w: bool) -> Self {
        Self((x as u8) | (y as u8) << 1 | (z as u8) << 2 | (w as u8) << 3)
    }

    /// Mask selecting the first `count` lanes.
    pub fn first_n(count: u32) -> Self {
        Self::new(((1u32 << count.min(4)) - 1) as u8)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Whether lane `index` is selected.
    pub fn test(self, index: u32) -> bool {
        index < 4 && self.0 & (1 << index) != 0
    }

    /// Index of the lowest selected lane, `None` for an empty mask.
    pub fn first_component(self) -> Option<u32> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros())
        }
    }

    /// Number of selected lanes.
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl core::ops::BitOr for ComponentMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for ComponentMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in LANE_NAMES.iter().enumerate() {
            if self.test(i as u32) {
                write!(f, "{}", name)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_test() {
        let mask = ComponentMask::new(0b0101);
        assert!(mask.test(0));
        assert!(!mask.test(1));
        assert!(mask.test(2));
        assert!(!mask.test(3));
        assert!(!mask.test(7));
    }

    #[test]
    fn test_first_component() {
        assert_eq!(ComponentMask::new(0b1000).first_component(), Some(3));
        assert_eq!(ComponentMask::new(0b0110).first_component(), Some(1));
        assert_eq!(ComponentMask::XYZW.first_component(), Some(0));
        assert_eq!(ComponentMask::default().first_component(), None);
    }

    #[test]
    fn test_constructors() {
        assert_eq!(ComponentMask::new(0xff), ComponentMask::XYZW);
        assert_eq!(ComponentMask::from_lanes(true, false, true, false).bits(), 0b0101);
        assert_eq!(ComponentMask::first_n(1), ComponentMask::X);
        assert_eq!(ComponentMask::first_n(3).bits(), 0b0111);
        assert_eq!(ComponentMask::first_n(4), ComponentMask::XYZW);
        assert!(ComponentMask::first_n(0).is_empty());
    }

    #[test]
    fn test_bitor() {
        assert_eq!(ComponentMask::X | ComponentMask::Z, ComponentMask::new(0b0101));
        assert_eq!(
            ComponentMask::X | ComponentMask::Y | ComponentMask::Z | ComponentMask::W,
            ComponentMask::XYZW
        );
    }

    #[test]
    fn test_count() {
        assert_eq!(ComponentMask::XYZW.count(), 4);
        assert_eq!(ComponentMask::Z.count(), 1);
        assert_eq!(ComponentMask::default().count(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ComponentMask::XYZW), "xyzw");
        assert_eq!(format!("{}", ComponentMask::new(0b1010)), "yw");
        assert_eq!(format!("{}", ComponentMask::default()), "");
    }
}
