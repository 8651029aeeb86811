use crate::error::ConfigError;

/// Duration selected when nothing else was asked for.
pub const DEFAULT_DURATION_SECS: u32 = 10;

/// Score thresholds for one round length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyProfile {
    pub duration_secs: u32,
    pub bronze: u32,
    pub silver: u32,
    pub gold: u32,
}

impl DifficultyProfile {
    pub fn new(duration_secs: u32, bronze: u32, silver: u32, gold: u32) -> Result<Self, ConfigError> {
        if duration_secs == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if !(0 < bronze && bronze < silver && silver < gold) {
            return Err(ConfigError::InvalidThresholds {
                duration: duration_secs,
                bronze,
                silver,
                gold,
            });
        }
        Ok(Self {
            duration_secs,
            bronze,
            silver,
            gold,
        })
    }
}

/// Immutable set of difficulty profiles keyed by round duration.
///
/// Balance changes are made by editing [`DifficultyCatalog::standard`], never at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultyCatalog {
    profiles: Vec<DifficultyProfile>,
    default_duration: u32,
}

impl DifficultyCatalog {
    /// Build a catalog, validating every profile. Profiles are kept sorted by duration.
    pub fn new(
        profiles: Vec<DifficultyProfile>,
        default_duration: u32,
    ) -> Result<Self, ConfigError> {
        if profiles.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        let mut checked = Vec::with_capacity(profiles.len());
        for p in profiles {
            let p = DifficultyProfile::new(p.duration_secs, p.bronze, p.silver, p.gold)?;
            if checked
                .iter()
                .any(|c: &DifficultyProfile| c.duration_secs == p.duration_secs)
            {
                return Err(ConfigError::DuplicateDuration(p.duration_secs));
            }
            checked.push(p);
        }
        checked.sort_by_key(|p| p.duration_secs);

        let catalog = Self {
            profiles: checked,
            default_duration,
        };
        catalog.lookup(default_duration)?;
        Ok(catalog)
    }

    /// The 5/10/30 second catalog the game ships with.
    pub fn standard() -> Self {
        let profiles = vec![
            DifficultyProfile {
                duration_secs: 5,
                bronze: 20,
                silver: 30,
                gold: 40,
            },
            DifficultyProfile {
                duration_secs: 10,
                bronze: 40,
                silver: 60,
                gold: 80,
            },
            DifficultyProfile {
                duration_secs: 30,
                bronze: 120,
                silver: 170,
                gold: 220,
            },
        ];
        Self {
            profiles,
            default_duration: DEFAULT_DURATION_SECS,
        }
    }

    pub fn lookup(&self, duration_secs: u32) -> Result<DifficultyProfile, ConfigError> {
        self.profiles
            .iter()
            .find(|p| p.duration_secs == duration_secs)
            .copied()
            .ok_or(ConfigError::UnknownDuration(duration_secs))
    }

    pub fn default_duration(&self) -> u32 {
        self.default_duration
    }

    pub fn profiles(&self) -> &[DifficultyProfile] {
        &self.profiles
    }

    pub fn durations(&self) -> impl Iterator<Item = u32> + '_ {
        self.profiles.iter().map(|p| p.duration_secs)
    }

    pub fn contains(&self, duration_secs: u32) -> bool {
        self.lookup(duration_secs).is_ok()
    }

    /// Duration adjacent to `current`, wrapping around. `step` is +1 or -1.
    pub fn cycle(&self, current: u32, step: isize) -> u32 {
        let len = self.profiles.len() as isize;
        let idx = self
            .profiles
            .iter()
            .position(|p| p.duration_secs == current)
            .unwrap_or(0) as isize;
        let next = (idx + step).rem_euclid(len) as usize;
        self.profiles[next].duration_secs
    }
}

impl Default for DifficultyCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn standard_catalog_thresholds_are_strictly_increasing() {
        let catalog = DifficultyCatalog::standard();
        for p in catalog.profiles() {
            assert!(0 < p.bronze, "{p:?}");
            assert!(p.bronze < p.silver, "{p:?}");
            assert!(p.silver < p.gold, "{p:?}");
        }
    }

    #[test]
    fn standard_catalog_passes_validation() {
        let standard = DifficultyCatalog::standard();
        let rebuilt =
            DifficultyCatalog::new(standard.profiles().to_vec(), DEFAULT_DURATION_SECS).unwrap();
        assert_eq!(standard, rebuilt);
    }

    #[test]
    fn lookup_known_durations() {
        let catalog = DifficultyCatalog::standard();
        let p = catalog.lookup(5).unwrap();
        assert_eq!((p.bronze, p.silver, p.gold), (20, 30, 40));
        let p = catalog.lookup(30).unwrap();
        assert_eq!((p.bronze, p.silver, p.gold), (120, 170, 220));
        assert_eq!(catalog.default_duration(), 10);
    }

    #[test]
    fn lookup_unknown_duration_fails() {
        let catalog = DifficultyCatalog::standard();
        assert_eq!(catalog.lookup(7), Err(ConfigError::UnknownDuration(7)));
        assert!(!catalog.contains(0));
    }

    #[test]
    fn rejects_bad_thresholds() {
        assert_matches!(
            DifficultyProfile::new(5, 30, 30, 40),
            Err(ConfigError::InvalidThresholds { duration: 5, .. })
        );
        assert_matches!(
            DifficultyProfile::new(5, 0, 10, 40),
            Err(ConfigError::InvalidThresholds { .. })
        );
        assert_eq!(DifficultyProfile::new(0, 1, 2, 3), Err(ConfigError::ZeroDuration));
    }

    #[test]
    fn rejects_duplicate_and_empty_catalogs() {
        let p = DifficultyProfile::new(5, 1, 2, 3).unwrap();
        assert_eq!(
            DifficultyCatalog::new(vec![p, p], 5),
            Err(ConfigError::DuplicateDuration(5))
        );
        assert_eq!(
            DifficultyCatalog::new(vec![], 5),
            Err(ConfigError::EmptyCatalog)
        );
    }

    #[test]
    fn default_duration_must_be_configured() {
        let p = DifficultyProfile::new(5, 1, 2, 3).unwrap();
        assert_eq!(
            DifficultyCatalog::new(vec![p], 10),
            Err(ConfigError::UnknownDuration(10))
        );
    }

    #[test]
    fn new_sorts_profiles_by_duration() {
        let a = DifficultyProfile::new(30, 1, 2, 3).unwrap();
        let b = DifficultyProfile::new(5, 1, 2, 3).unwrap();
        let catalog = DifficultyCatalog::new(vec![a, b], 5).unwrap();
        assert_eq!(catalog.durations().collect::<Vec<_>>(), vec![5, 30]);
    }

    #[test]
    fn cycle_wraps_both_ways() {
        let catalog = DifficultyCatalog::standard();
        assert_eq!(catalog.cycle(10, 1), 30);
        assert_eq!(catalog.cycle(30, 1), 5);
        assert_eq!(catalog.cycle(5, -1), 30);
        assert_eq!(catalog.cycle(10, -1), 5);
    }
}
