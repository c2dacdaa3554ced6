//! Audio priority lattice

/// Priority class of the audio owner
///
/// Ordering is strict: a request preempts the current owner only if its
/// priority is greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum AudioPriority {
    /// No owner
    #[default]
    None = 0,
    /// Item closest to the viewport center
    Center = 1,
    /// Item the user explicitly started
    Manual = 2,
    /// Item under the pointer
    Hover = 3,
}

impl AudioPriority {
    /// Numeric rank
    pub fn rank(self) -> u8 {
        self as u8
    }
}

impl From<AudioPriority> for u8 {
    fn from(priority: AudioPriority) -> u8 {
        priority.rank()
    }
}
