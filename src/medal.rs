use crate::difficulty::DifficultyProfile;

/// Qualitative outcome of a round. Ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum_macros::Display)]
pub enum Tier {
    None,
    Bronze,
    Silver,
    Gold,
}

impl Tier {
    /// Number of confetti pixels thrown when a round ends with this tier.
    pub fn burst_intensity(&self) -> usize {
        match self {
            Tier::Gold => 42,
            Tier::Silver => 32,
            Tier::Bronze => 24,
            Tier::None => 14,
        }
    }

    pub fn is_medal(&self) -> bool {
        !matches!(self, Tier::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MedalResult {
    pub tier: Tier,
    /// Threshold of the next tier up, or `None` once gold is reached.
    pub next_target: Option<u32>,
}

/// Award a medal for `score` under `profile`.
///
/// Thresholds are checked highest first and meeting one exactly counts as achieving it.
pub fn judge(score: u32, profile: &DifficultyProfile) -> MedalResult {
    if score >= profile.gold {
        MedalResult {
            tier: Tier::Gold,
            next_target: None,
        }
    } else if score >= profile.silver {
        MedalResult {
            tier: Tier::Silver,
            next_target: Some(profile.gold),
        }
    } else if score >= profile.bronze {
        MedalResult {
            tier: Tier::Bronze,
            next_target: Some(profile.silver),
        }
    } else {
        MedalResult {
            tier: Tier::None,
            next_target: Some(profile.bronze),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::DifficultyCatalog;
    use proptest::prelude::*;

    fn profile(duration: u32) -> DifficultyProfile {
        DifficultyCatalog::standard().lookup(duration).unwrap()
    }

    #[test]
    fn five_second_round_scoring_25_is_bronze() {
        let r = judge(25, &profile(5));
        assert_eq!(r.tier, Tier::Bronze);
        assert_eq!(r.next_target, Some(30));
    }

    #[test]
    fn ten_second_round_scoring_80_is_gold() {
        let r = judge(80, &profile(10));
        assert_eq!(r.tier, Tier::Gold);
        assert_eq!(r.next_target, None);
    }

    #[test]
    fn thresholds_are_inclusive() {
        let p = profile(10);
        assert_eq!(judge(p.gold, &p).tier, Tier::Gold);
        assert_ne!(judge(p.gold - 1, &p).tier, Tier::Gold);
        assert_eq!(judge(p.silver, &p).tier, Tier::Silver);
        assert_eq!(judge(p.silver - 1, &p).tier, Tier::Bronze);
        assert_eq!(judge(p.bronze, &p).tier, Tier::Bronze);
        assert_eq!(judge(p.bronze - 1, &p).tier, Tier::None);
    }

    #[test]
    fn zero_score_points_at_bronze() {
        let p = profile(30);
        assert_eq!(
            judge(0, &p),
            MedalResult {
                tier: Tier::None,
                next_target: Some(120)
            }
        );
    }

    #[test]
    fn tier_display_and_intensity() {
        assert_eq!(Tier::Silver.to_string(), "Silver");
        assert!(Tier::Gold.burst_intensity() > Tier::Silver.burst_intensity());
        assert!(Tier::Bronze.burst_intensity() > Tier::None.burst_intensity());
        assert!(!Tier::None.is_medal());
    }

    proptest! {
        #[test]
        fn judge_is_monotonic(duration in prop::sample::select(vec![5u32, 10, 30]), a in 0u32..400, b in 0u32..400) {
            let p = profile(duration);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(judge(lo, &p).tier <= judge(hi, &p).tier);
        }

        #[test]
        fn next_target_is_above_score(duration in prop::sample::select(vec![5u32, 10, 30]), score in 0u32..400) {
            let p = profile(duration);
            if let Some(next) = judge(score, &p).next_target {
                prop_assert!(next > score);
            }
        }
    }
}
