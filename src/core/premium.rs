use tracing::warn;

/// Nitro subscription tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PremiumType {
    None,
    NitroClassic,
    Nitro,
    NitroBasic,
    Unknown(i64),
}

impl PremiumType {
    pub fn value(self) -> i64 {
        match self {
            PremiumType::None => 0,
            PremiumType::NitroClassic => 1,
            PremiumType::Nitro => 2,
            PremiumType::NitroBasic => 3,
            PremiumType::Unknown(raw) => raw,
        }
    }

    /// Profiles report `0` the same as an absent tier.
    pub(crate) fn from_profile(raw: Option<i64>) -> Option<Self> {
        match raw {
            None | Some(0) => None,
            Some(raw) => Some(PremiumType::from(raw)),
        }
    }
}

impl From<i64> for PremiumType {
    fn from(raw: i64) -> Self {
        match raw {
            0 => PremiumType::None,
            1 => PremiumType::NitroClassic,
            2 => PremiumType::Nitro,
            3 => PremiumType::NitroBasic,
            other => {
                warn!(premium_type = other, "unrecognised premium type");
                PremiumType::Unknown(other)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_means_absent_on_profiles() {
        assert_eq!(PremiumType::from_profile(Some(0)), None);
        assert_eq!(PremiumType::from_profile(None), None);
        assert_eq!(PremiumType::from_profile(Some(2)), Some(PremiumType::Nitro));
    }

    #[test]
    fn unknown_keeps_raw_value() {
        let tier = PremiumType::from(9);
        assert_eq!(tier, PremiumType::Unknown(9));
        assert_eq!(tier.value(), 9);
        assert_eq!(PremiumType::from_profile(Some(300)), Some(PremiumType::Unknown(300)));
        assert_eq!(PremiumType::from(-1), PremiumType::Unknown(-1));
    }
}
