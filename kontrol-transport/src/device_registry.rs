//! Device registry - keyboard size detection by PID
//!
//! All MK2 keyboards share one vendor ID; the product ID only tells the
//! keyboard size apart. The protocol is identical across sizes.

/// Native Instruments vendor ID
pub const VENDOR_ID: u16 = 0x17CC;

/// Candidate product IDs, in probe order
pub const PRODUCT_IDS: &[u16] = &[
    0x1610, // S49 MK2
    0x1620, // S61 MK2
    0x1630, // S88 MK2
];

/// Keyboard size variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyboardSize {
    S49,
    S61,
    S88,
}

impl KeyboardSize {
    /// Look up the size for a product ID
    pub fn from_pid(pid: u16) -> Option<Self> {
        match pid {
            0x1610 => Some(Self::S49),
            0x1620 => Some(Self::S61),
            0x1630 => Some(Self::S88),
            _ => None,
        }
    }

    /// Product ID for this size
    pub fn pid(&self) -> u16 {
        match self {
            Self::S49 => 0x1610,
            Self::S61 => 0x1620,
            Self::S88 => 0x1630,
        }
    }

    /// Number of physical keys
    pub fn key_count(&self) -> u8 {
        match self {
            Self::S49 => 49,
            Self::S61 => 61,
            Self::S88 => 88,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::S49 => "Komplete Kontrol S49 MK2",
            Self::S61 => "Komplete Kontrol S61 MK2",
            Self::S88 => "Komplete Kontrol S88 MK2",
        }
    }
}

/// Check if a VID/PID pair is one of the supported keyboards
#[inline]
pub fn is_supported(vid: u16, pid: u16) -> bool {
    vid == VENDOR_ID && PRODUCT_IDS.contains(&pid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_pids() {
        assert_eq!(KeyboardSize::from_pid(0x1610), Some(KeyboardSize::S49));
        assert_eq!(KeyboardSize::from_pid(0x1620), Some(KeyboardSize::S61));
        assert_eq!(KeyboardSize::from_pid(0x1630), Some(KeyboardSize::S88));
        assert_eq!(KeyboardSize::from_pid(0x1600), None);
    }

    #[test]
    fn test_pid_roundtrip() {
        for &pid in PRODUCT_IDS {
            assert_eq!(KeyboardSize::from_pid(pid).map(|s| s.pid()), Some(pid));
        }
    }

    #[test]
    fn test_is_supported() {
        assert!(is_supported(0x17CC, 0x1620));
        assert!(!is_supported(0x17CD, 0x1620));
        assert!(!is_supported(0x17CC, 0x1500));
    }
}
