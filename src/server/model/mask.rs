//! Capability masks for EVE API keys.
//!
//! A key's access mask is a bitfield whose meaning depends on the key type: character and
//! account keys share one set of bits, corporation keys use another. The same bit value can
//! mean different things in each universe, so a mask always carries the universe it belongs to.

/// Bit universe a mask or capability belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskUniverse {
    /// Bits of `Account` and `Character` keys.
    Character,
    /// Bits of `Corporation` keys.
    Corporation,
}

/// Named EVE API calls a key may be allowed to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// `char/CharacterSheet`
    CharacterSheet,
    /// `eve/CharacterInfo` without private fields
    CharacterInfoPublic,
    /// `eve/CharacterInfo` with private fields
    CharacterInfoPrivate,
    /// `account/AccountStatus`
    AccountStatus,
    /// `corp/CorporationSheet`
    CorporationSheet,
    /// `corp/MemberTracking` without extended fields
    MemberTrackingLimited,
    /// `corp/MemberTracking` with extended fields
    MemberTrackingExtended,
}

impl Capability {
    /// Bit(s) a mask must contain to grant this capability.
    pub fn bits(self) -> i64 {
        match self {
            Self::CharacterSheet => 8,
            Self::CharacterInfoPublic => 8_388_608,
            Self::CharacterInfoPrivate => 16_777_216,
            Self::AccountStatus => 33_554_432,
            Self::CorporationSheet => 8,
            Self::MemberTrackingLimited => 2_048,
            Self::MemberTrackingExtended => 33_554_432,
        }
    }

    /// Universe whose bits grant this capability.
    pub fn universe(self) -> MaskUniverse {
        match self {
            Self::CharacterSheet
            | Self::CharacterInfoPublic
            | Self::CharacterInfoPrivate
            | Self::AccountStatus => MaskUniverse::Character,
            Self::CorporationSheet | Self::MemberTrackingLimited | Self::MemberTrackingExtended => {
                MaskUniverse::Corporation
            }
        }
    }
}

/// Access mask of a key, tagged with the universe its bits are interpreted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMask {
    /// Mask of an `Account` or `Character` key.
    Character(i64),
    /// Mask of a `Corporation` key.
    Corporation(i64),
}

impl KeyMask {
    /// Interprets raw mask bits according to the key type reported by the API.
    ///
    /// # Returns
    /// - `Some(KeyMask)` - Key type is `Account`, `Character` or `Corporation`
    /// - `None` - Key type is unknown or missing; logged, since every caller expects a known type
    pub fn for_kind(kind: Option<&str>, bits: i64) -> Option<Self> {
        match kind {
            Some("Account") | Some("Character") => Some(Self::Character(bits)),
            Some("Corporation") => Some(Self::Corporation(bits)),
            other => {
                tracing::warn!(kind = ?other, "Incorrect key type, unable to interpret access mask");

                None
            }
        }
    }

    /// Raw mask bits.
    pub fn bits(&self) -> i64 {
        match self {
            Self::Character(bits) | Self::Corporation(bits) => *bits,
        }
    }

    /// Universe the bits are interpreted in.
    pub fn universe(&self) -> MaskUniverse {
        match self {
            Self::Character(_) => MaskUniverse::Character,
            Self::Corporation(_) => MaskUniverse::Corporation,
        }
    }

    /// Whether every bit of `required` is present in this mask.
    pub fn has_access(&self, required: i64) -> bool {
        self.bits() & required == required
    }

    /// Whether this mask grants a named capability.
    ///
    /// Returns `None` and logs an error when the capability belongs to the other universe.
    pub fn grants(&self, capability: Capability) -> Option<bool> {
        if capability.universe() != self.universe() {
            tracing::error!(
                ?capability,
                mask = self.bits(),
                "Asked a {:?} key mask about a {:?} capability",
                self.universe(),
                capability.universe()
            );

            return None;
        }

        Some(self.has_access(capability.bits()))
    }
}
