//! Tri-state entity flags.
//!
//! Every flag on an entity is in exactly one of three states. Queries go
//! through [`Flags::get`], which is total: asking for a flag that was never
//! written yields [`FlagState::Unset`], not `false`.

/// The flags an entity can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Flag {
    /// Node is eligible to take part in the contact boundary
    Interface,
    /// Slave side of the contact pair
    Slave,
    /// Master side of the contact pair
    Master,
    /// Slave node currently enforcing a contact constraint
    Active,
}

impl Flag {
    /// Number of flag slots per entity.
    pub const COUNT: usize = 4;

    /// All flags in slot order.
    pub const ALL: [Flag; Flag::COUNT] = [Flag::Interface, Flag::Slave, Flag::Master, Flag::Active];

    #[inline]
    const fn slot(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Flag::Interface => "INTERFACE",
            Flag::Slave => "SLAVE",
            Flag::Master => "MASTER",
            Flag::Active => "ACTIVE",
        };
        f.write_str(name)
    }
}

/// Three-valued state of a single flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlagState {
    /// Never written
    #[default]
    Unset,
    /// Explicitly set to true
    True,
    /// Explicitly set to false
    False,
}

impl FlagState {
    /// The boolean value, or `None` when unset.
    #[inline]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            FlagState::Unset => None,
            FlagState::True => Some(true),
            FlagState::False => Some(false),
        }
    }

    /// Whether the flag has been written at all.
    #[inline]
    pub const fn is_defined(self) -> bool {
        !matches!(self, FlagState::Unset)
    }

    /// Defined and true.
    #[inline]
    pub const fn is_true(self) -> bool {
        matches!(self, FlagState::True)
    }

    /// Defined and false.
    #[inline]
    pub const fn is_false(self) -> bool {
        matches!(self, FlagState::False)
    }
}

impl From<bool> for FlagState {
    fn from(value: bool) -> Self {
        if value {
            FlagState::True
        } else {
            FlagState::False
        }
    }
}

/// Fixed-slot flag storage for one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flags {
    states: [FlagState; Flag::COUNT],
}

impl Flags {
    /// All flags unset.
    pub const fn new() -> Self {
        Self {
            states: [FlagState::Unset; Flag::COUNT],
        }
    }

    /// State of `flag`.
    #[inline]
    pub fn get(&self, flag: Flag) -> FlagState {
        self.states[flag.slot()]
    }

    /// Write `flag`, making it defined.
    #[inline]
    pub fn set(&mut self, flag: Flag, value: bool) {
        self.states[flag.slot()] = FlagState::from(value);
    }

    #[inline]
    pub fn is_defined(&self, flag: Flag) -> bool {
        self.get(flag).is_defined()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_flags_are_unset() {
        let flags = Flags::new();
        for flag in Flag::ALL {
            assert_eq!(flags.get(flag), FlagState::Unset);
            assert!(!flags.is_defined(flag));
        }
    }

    #[test]
    fn unset_is_neither_true_nor_false() {
        let state = FlagState::Unset;
        assert!(!state.is_true());
        assert!(!state.is_false());
        assert_eq!(state.as_bool(), None);
    }

    #[test]
    fn set_false_is_defined() {
        let mut flags = Flags::new();
        flags.set(Flag::Slave, false);
        assert!(flags.is_defined(Flag::Slave));
        assert!(flags.get(Flag::Slave).is_false());
        // Other slots untouched
        assert_eq!(flags.get(Flag::Master), FlagState::Unset);
    }

    #[test]
    fn overwrite_flips_value() {
        let mut flags = Flags::new();
        flags.set(Flag::Active, true);
        flags.set(Flag::Active, false);
        assert_eq!(flags.get(Flag::Active), FlagState::False);
    }

    #[test]
    fn slots_are_distinct() {
        for (i, flag) in Flag::ALL.iter().enumerate() {
            assert_eq!(flag.slot(), i);
        }
    }
}
