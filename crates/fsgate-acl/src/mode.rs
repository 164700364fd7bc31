//! Numeric permission encoding.
//!
//! A mode packs three [`AclPermission`] classes into nine bits, owner in the
//! high three, and carries the sticky bit above them:
//!
//! ```text
//!   sticky  user    group   other
//!   [9]     [8..6]  [5..3]  [2..0]
//! ```
//!
//! The free functions here work on raw numbers; [`Mode`] is the validated
//! type the rest of the crate passes around.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::permission::AclPermission;

const USER_SHIFT: u16 = 6;
const GROUP_SHIFT: u16 = 3;
const CLASS_MASK: u16 = 0o7;

/// Sticky bit.
pub const STICKY_BIT: u16 = 0o1000;

/// The nine owner/group/other bits.
pub const PERMISSION_MASK: u16 = 0o777;

/// Every bit a [`Mode`] may carry.
pub const MODE_MASK: u16 = STICKY_BIT | PERMISSION_MASK;

/// Owner class of a combined value: `(n >> 6) & 7`.
pub fn user_part(n: u16) -> AclPermission {
    AclPermission::from_masked(((n >> USER_SHIFT) & CLASS_MASK) as u8)
}

/// Group class of a combined value: `(n >> 3) & 7`.
pub fn group_part(n: u16) -> AclPermission {
    AclPermission::from_masked(((n >> GROUP_SHIFT) & CLASS_MASK) as u8)
}

/// Other class of a combined value: `n & 7`.
pub fn other_part(n: u16) -> AclPermission {
    AclPermission::from_masked((n & CLASS_MASK) as u8)
}

/// Symbolic form of the nine permission bits, e.g. `0o644` → `"rw-r--r--"`.
pub fn format_mode(n: u16) -> String {
    format!(
        "{}{}{}",
        user_part(n).symbol(),
        group_part(n).symbol(),
        other_part(n).symbol()
    )
}

/// The permission whose symbol is exactly `s`.
pub fn lookup_by_symbol(s: &str) -> Option<AclPermission> {
    AclPermission::ALL_VALUES
        .iter()
        .copied()
        .find(|p| p.symbol() == s)
}

/// Owner/group/other permissions plus the sticky bit.
///
/// # Example
///
/// ```rust
/// use fsgate_acl::{AclPermission, Mode};
///
/// let rx = AclPermission::ReadExecute;
/// let mode = Mode::from_parts(AclPermission::All, rx, rx);
/// assert_eq!(mode.bits(), 0o755);
/// assert_eq!(mode.to_string(), "rwxr-xr-x");
/// assert_eq!(mode.apply_umask(Mode::from_bits_truncate(0o027)).bits(), 0o750);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Mode(u16);

impl Mode {
    /// Validates a combined value of at most `0o1777`.
    pub fn new(bits: u16) -> Result<Self> {
        if bits & !MODE_MASK != 0 {
            return Err(Error::InvalidMode(format!(
                "{bits:#o} is out of range (max {MODE_MASK:#o})"
            )));
        }
        Ok(Self(bits))
    }

    /// Keeps only the bits a mode may carry.
    pub const fn from_bits_truncate(bits: u16) -> Self {
        Self(bits & MODE_MASK)
    }

    /// Packs the three classes, without the sticky bit.
    pub const fn from_parts(
        user: AclPermission,
        group: AclPermission,
        other: AclPermission,
    ) -> Self {
        Self(
            ((user.bits() as u16) << USER_SHIFT)
                | ((group.bits() as u16) << GROUP_SHIFT)
                | other.bits() as u16,
        )
    }

    /// Every bit, sticky included.
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// The nine owner/group/other bits.
    pub const fn permission_bits(self) -> u16 {
        self.0 & PERMISSION_MASK
    }

    /// Owner class.
    pub fn user(self) -> AclPermission {
        user_part(self.0)
    }

    /// Group class.
    pub fn group(self) -> AclPermission {
        group_part(self.0)
    }

    /// Other class.
    pub fn other(self) -> AclPermission {
        other_part(self.0)
    }

    /// Whether the sticky bit is set.
    pub const fn sticky(self) -> bool {
        self.0 & STICKY_BIT != 0
    }

    /// Same permissions with the sticky bit set or cleared.
    pub const fn with_sticky(self, sticky: bool) -> Self {
        if sticky {
            Self(self.0 | STICKY_BIT)
        } else {
            Self(self.0 & !STICKY_BIT)
        }
    }

    /// Clears every permission bit that is set in `umask`.
    ///
    /// Only the nine permission bits of the umask count; the sticky bit of
    /// `self` is kept.
    pub const fn apply_umask(self, umask: Mode) -> Self {
        Self(self.0 & !(umask.0 & PERMISSION_MASK))
    }
}

impl fmt::Display for Mode {
    /// `rwxr-xr-x`; a set sticky bit shows as `t` (or `T` without other
    /// execute) in the last position.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = format_mode(self.0);
        if self.sticky() {
            let last = if self.other().can_execute() { 't' } else { 'T' };
            s.pop();
            s.push(last);
        }
        f.write_str(&s)
    }
}

impl fmt::Debug for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mode({:#o})", self.0)
    }
}

impl fmt::Octal for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Octal::fmt(&self.0, f)
    }
}

impl TryFrom<u16> for Mode {
    type Error = Error;

    fn try_from(bits: u16) -> Result<Self> {
        Self::new(bits)
    }
}

impl From<Mode> for u16 {
    fn from(mode: Mode) -> Self {
        mode.0
    }
}

impl FromStr for Mode {
    type Err = Error;

    /// Parses an octal string such as `644`, `0755` or `1777`.
    fn from_str(s: &str) -> Result<Self> {
        let digits = s.trim();
        let digits = digits.strip_prefix("0o").unwrap_or(digits);
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(8)) {
            return Err(Error::InvalidMode(format!("'{s}' is not an octal mode")));
        }
        let bits = u16::from_str_radix(digits, 8)
            .map_err(|_| Error::InvalidMode(format!("'{s}' is out of range")))?;
        Self::new(bits)
    }
}
