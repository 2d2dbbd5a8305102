//! Progression tables: the academic tier ladder and the career ladder.

/// One rung of a progression ladder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rung {
    pub name: &'static str,
    pub multiplier: f64,
}

/// Academic tiers, ordered by rank. Multiplier applies to reputation gains.
pub const TIERS: [Rung; 6] = [
    Rung { name: "Carper Community College", multiplier: 1.0 },
    Rung { name: "Sally State University", multiplier: 2.0 },
    Rung { name: "Idyllic Institute", multiplier: 4.0 },
    Rung { name: "HYPSM", multiplier: 8.0 },
    Rung { name: "Grad School", multiplier: 16.0 },
    Rung { name: "PhD Program", multiplier: 32.0 },
];

/// Careers, ordered by rank. Scales far more steeply than tiers.
pub const CAREERS: [Rung; 7] = [
    Rung { name: "Unemployed", multiplier: 1.0 },
    Rung { name: "McDonald's Crew", multiplier: 10.0 },
    Rung { name: "Walmart Associate", multiplier: 100.0 },
    Rung { name: "Accountant", multiplier: 1_000.0 },
    Rung { name: "Software Engineer", multiplier: 10_000.0 },
    Rung { name: "Quant Researcher", multiplier: 1e6 },
    Rung { name: "Tech CEO", multiplier: 1e9 },
];

/// Index of the last named tier; reaching it unlocks career prestige.
pub const LAST_TIER: u32 = TIERS.len() as u32 - 1;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LadderError {
    #[error("{ladder} ladder is empty")]
    Empty { ladder: &'static str },

    #[error("{ladder} rung {index} ({name}) has non-positive multiplier {multiplier}")]
    NonPositive {
        ladder: &'static str,
        index: usize,
        name: &'static str,
        multiplier: f64,
    },

    #[error("{ladder} rung {index} ({name}) does not exceed the rung below it")]
    NotIncreasing {
        ladder: &'static str,
        index: usize,
        name: &'static str,
    },
}

/// Look up a rung, clamping indices past the end to the last entry.
///
/// Stored tier/career indices are allowed to run past the table, so every
/// lookup goes through here.
pub fn rung_at(table: &[Rung], index: u32) -> &Rung {
    let last = table.len().saturating_sub(1);
    &table[(index as usize).min(last)]
}

pub fn tier(index: u32) -> &'static Rung {
    rung_at(&TIERS, index)
}

pub fn career(index: u32) -> &'static Rung {
    rung_at(&CAREERS, index)
}

/// Check that a ladder is non-empty with positive, strictly increasing multipliers.
pub fn validate_ladder(ladder: &'static str, table: &[Rung]) -> Result<(), LadderError> {
    if table.is_empty() {
        return Err(LadderError::Empty { ladder });
    }
    for (index, rung) in table.iter().enumerate() {
        if !(rung.multiplier > 0.0) {
            return Err(LadderError::NonPositive {
                ladder,
                index,
                name: rung.name,
                multiplier: rung.multiplier,
            });
        }
        if index > 0 && rung.multiplier <= table[index - 1].multiplier {
            return Err(LadderError::NotIncreasing {
                ladder,
                index,
                name: rung.name,
            });
        }
    }
    Ok(())
}

/// Validate both built-in ladders. Called once at startup.
pub fn validate_tables() -> Result<(), LadderError> {
    validate_ladder("tier", &TIERS)?;
    validate_ladder("career", &CAREERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_are_valid() {
        assert_eq!(validate_tables(), Ok(()));
    }

    #[test]
    fn lookup_clamps_to_last_rung() {
        assert_eq!(tier(0).name, "Carper Community College");
        assert_eq!(tier(LAST_TIER).name, "PhD Program");
        assert_eq!(tier(LAST_TIER + 1).name, "PhD Program");
        assert_eq!(tier(u32::MAX).multiplier, 32.0);
        assert_eq!(career(6).name, "Tech CEO");
        assert_eq!(career(40).multiplier, 1e9);
    }

    #[test]
    fn careers_outscale_tiers() {
        assert!(CAREERS[CAREERS.len() - 1].multiplier > TIERS[TIERS.len() - 1].multiplier);
    }

    #[test]
    fn rejects_flat_ladder() {
        let table = [
            Rung { name: "a", multiplier: 1.0 },
            Rung { name: "b", multiplier: 1.0 },
        ];
        assert_eq!(
            validate_ladder("test", &table),
            Err(LadderError::NotIncreasing { ladder: "test", index: 1, name: "b" })
        );
    }

    #[test]
    fn rejects_zero_multiplier() {
        let table = [Rung { name: "a", multiplier: 0.0 }];
        assert!(matches!(
            validate_ladder("test", &table),
            Err(LadderError::NonPositive { index: 0, .. })
        ));
    }

    #[test]
    fn rejects_empty_ladder() {
        assert_eq!(
            validate_ladder("test", &[]),
            Err(LadderError::Empty { ladder: "test" })
        );
    }
}
