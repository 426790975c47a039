//! Key policy: which key type and access mask a credential must have to be compliant.

use entity::eve_credential::CredentialViolation;

use crate::server::model::mask::KeyMask;

/// Key type as reported by the EVE API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    /// Account-wide key covering every character on the account.
    Account,
    /// Key limited to one character.
    Character,
    /// Corporation key, never pulled.
    Corporation,
}

impl CredentialKind {
    /// Parses the API spelling; `None` for unknown types.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Account" => Some(Self::Account),
            "Character" => Some(Self::Character),
            "Corporation" => Some(Self::Corporation),
            _ => None,
        }
    }

    /// The API spelling of this key type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Account => "Account",
            Self::Character => "Character",
            Self::Corporation => "Corporation",
        }
    }
}

/// Outcome of evaluating a credential's violation against the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationVerdict {
    /// Leave the stored violation as it is.
    Keep,
    /// Replace the stored violation.
    Set(Option<CredentialViolation>),
}

impl ViolationVerdict {
    /// Violation the credential ends up with given its current one.
    pub fn apply(self, current: Option<CredentialViolation>) -> Option<CredentialViolation> {
        match self {
            Self::Keep => current,
            Self::Set(violation) => violation,
        }
    }
}

/// Recommended key type and access mask every credential is measured against.
///
/// Built once at startup and handed to the credential service.
#[derive(Debug, Clone)]
pub struct KeyPolicy {
    recommended_mask: Option<i64>,
    recommended_kind: CredentialKind,
}

impl KeyPolicy {
    /// Creates a policy; `recommended_mask` is `None` when the configured value is not an integer.
    pub fn new(recommended_mask: Option<i64>, recommended_kind: CredentialKind) -> Self {
        Self {
            recommended_mask,
            recommended_kind,
        }
    }

    /// Creates a policy from the raw configured mask string.
    pub fn from_raw_mask(raw_mask: &str, recommended_kind: CredentialKind) -> Self {
        Self::new(raw_mask.trim().parse::<i64>().ok(), recommended_kind)
    }

    /// `None` when the configured mask was not an integer.
    pub fn recommended_mask(&self) -> Option<i64> {
        self.recommended_mask
    }

    /// Key type credentials are expected to have.
    pub fn recommended_kind(&self) -> CredentialKind {
        self.recommended_kind
    }

    /// Whether a key of this type meets the policy.
    ///
    /// Account keys are accepted wherever character keys are recommended.
    pub fn kind_acceptable(&self, kind: Option<&str>) -> bool {
        match kind.and_then(CredentialKind::parse) {
            Some(kind) if kind == self.recommended_kind => true,
            Some(CredentialKind::Account) => self.recommended_kind == CredentialKind::Character,
            _ => false,
        }
    }

    /// Whether a key with this type and mask is verified.
    ///
    /// Fails closed when the recommended mask is misconfigured.
    pub fn is_verified(&self, kind: Option<&str>, mask: i64) -> bool {
        let Some(recommended_mask) = self.recommended_mask else {
            tracing::error!("RECOMMENDED_KEY_MASK MUST be an integer; treating key as unverified");

            return false;
        };

        let mask_ok = KeyMask::for_kind(kind, mask)
            .map(|mask| mask.has_access(recommended_mask))
            .unwrap_or(false);

        mask_ok && self.kind_acceptable(kind)
    }

    /// Decides the violation of a credential with the given type and mask.
    ///
    /// A `Character` violation is never touched here; the pull owns it. Otherwise the type is
    /// checked before the mask. With a misconfigured mask nothing is changed.
    pub fn evaluate_violation(
        &self,
        current: Option<CredentialViolation>,
        kind: Option<&str>,
        mask: i64,
    ) -> ViolationVerdict {
        let Some(recommended_mask) = self.recommended_mask else {
            tracing::warn!("RECOMMENDED_KEY_MASK MUST be an integer; leaving violation unchanged");

            return ViolationVerdict::Keep;
        };

        if current == Some(CredentialViolation::Character) {
            return ViolationVerdict::Keep;
        }

        if !self.kind_acceptable(kind) {
            return ViolationVerdict::Set(Some(CredentialViolation::Kind));
        }

        let mask_ok = KeyMask::for_kind(kind, mask)
            .map(|mask| mask.has_access(recommended_mask))
            .unwrap_or(false);

        if !mask_ok {
            return ViolationVerdict::Set(Some(CredentialViolation::Mask));
        }

        ViolationVerdict::Set(None)
    }
}
