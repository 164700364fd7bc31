//! Read/write/execute permission values.

use std::fmt;
use std::ops::{BitAnd, BitOr};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const READ_BIT: u8 = 0b100;
const WRITE_BIT: u8 = 0b010;
const EXECUTE_BIT: u8 = 0b001;

/// One of the eight combinations of read, write and execute.
///
/// The discriminant is the 3-bit code used in numeric modes, so the
/// derived ordering matches the codes `0..=7`. Implication is a partial order
/// on top of that: `READ_WRITE` implies `READ` but not `EXECUTE`.
///
/// # Example
///
/// ```rust
/// use fsgate_acl::AclPermission;
///
/// assert!(AclPermission::ReadWrite.implies(AclPermission::Write));
/// assert!(!AclPermission::Read.implies(AclPermission::Write));
/// assert_eq!(AclPermission::ReadExecute.symbol(), "r-x");
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum AclPermission {
    /// `---`
    #[default]
    None = 0,
    /// `--x`
    Execute = 1,
    /// `-w-`
    Write = 2,
    /// `-wx`
    WriteExecute = 3,
    /// `r--`
    Read = 4,
    /// `r-x`
    ReadExecute = 5,
    /// `rw-`
    ReadWrite = 6,
    /// `rwx`
    All = 7,
}

impl AclPermission {
    /// Every value, indexed by its code.
    pub const ALL_VALUES: [AclPermission; 8] = [
        AclPermission::None,
        AclPermission::Execute,
        AclPermission::Write,
        AclPermission::WriteExecute,
        AclPermission::Read,
        AclPermission::ReadExecute,
        AclPermission::ReadWrite,
        AclPermission::All,
    ];

    /// The 3-bit code of this value.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Looks up the value for a code in `0..=7`.
    pub fn from_code(code: u16) -> Result<Self> {
        if code > 7 {
            return Err(Error::InvalidPermissionCode(code));
        }
        Ok(Self::from_masked(code as u8))
    }

    /// Value for the low three bits of `bits`; higher bits are ignored.
    pub const fn from_masked(bits: u8) -> Self {
        Self::ALL_VALUES[(bits & 0b111) as usize]
    }

    /// Whether every bit set in `required` is also set in `self`.
    pub const fn implies(self, required: AclPermission) -> bool {
        self.bits() & required.bits() == required.bits()
    }

    /// Bits set in either value.
    pub const fn union(self, other: AclPermission) -> Self {
        Self::from_masked(self.bits() | other.bits())
    }

    /// Bits set in both values.
    pub const fn intersect(self, other: AclPermission) -> Self {
        Self::from_masked(self.bits() & other.bits())
    }

    /// Bits of `self` that are not set in `mask`.
    pub const fn and_not(self, mask: AclPermission) -> Self {
        Self::from_masked(self.bits() & !mask.bits())
    }

    /// Whether the read bit is set.
    pub const fn can_read(self) -> bool {
        self.bits() & READ_BIT != 0
    }

    /// Whether the write bit is set.
    pub const fn can_write(self) -> bool {
        self.bits() & WRITE_BIT != 0
    }

    /// Whether the execute bit is set.
    pub const fn can_execute(self) -> bool {
        self.bits() & EXECUTE_BIT != 0
    }

    /// Fixed three-character `rwx` form, `-` for absent bits.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::None => "---",
            Self::Execute => "--x",
            Self::Write => "-w-",
            Self::WriteExecute => "-wx",
            Self::Read => "r--",
            Self::ReadExecute => "r-x",
            Self::ReadWrite => "rw-",
            Self::All => "rwx",
        }
    }

    /// Upper-case name, as used in access-denied messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Execute => "EXECUTE",
            Self::Write => "WRITE",
            Self::WriteExecute => "WRITE_EXECUTE",
            Self::Read => "READ",
            Self::ReadExecute => "READ_EXECUTE",
            Self::ReadWrite => "READ_WRITE",
            Self::All => "ALL",
        }
    }
}

impl fmt::Display for AclPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AclPermission {
    type Err = Error;

    /// Accepts a name (`READ_WRITE`, case-insensitive) or a symbol (`rw-`).
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL_VALUES
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s) || p.symbol() == s)
            .ok_or_else(|| Error::InvalidMode(format!("unknown permission '{s}'")))
    }
}

impl BitOr for AclPermission {
    type Output = AclPermission;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl BitAnd for AclPermission {
    type Output = AclPermission;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersect(rhs)
    }
}
