//! Teams whose ratings follow from a base strength and a [`TeamStyle`].

use rinkside_engine::team::{RatingProvider, Ratings};

use crate::{clamp_rating, TeamStyle};

/// Points a style moves a rating away from the base strength.
const STYLE_SHIFT: i16 = 6;

/// Team rated from one base strength, weighted by style.
///
/// A flat team reports the base strength for every rating. The other
/// styles raise two ratings and lower two, so the total stays roughly
/// level before clamping.
///
/// # Example
///
/// ```rust
/// use rinkside_engine::team::RatingProvider;
/// use rinkside_teams::{StyledTeam, TeamStyle};
///
/// let team = StyledTeam::new(TeamStyle::Goaltending, 70);
/// assert!(team.blocking() > team.shooting());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledTeam {
    style: TeamStyle,
    strength: u8,
    ratings: Ratings,
}

impl StyledTeam {
    pub fn new(style: TeamStyle, strength: u8) -> Self {
        Self {
            style,
            strength,
            ratings: derive_ratings(style, strength),
        }
    }

    pub fn style(&self) -> TeamStyle {
        self.style
    }

    pub fn strength(&self) -> u8 {
        self.strength
    }
}

fn derive_ratings(style: TeamStyle, strength: u8) -> Ratings {
    let base = i16::from(strength);
    // face_off, offense, defense, shooting, blocking
    let shifts: [i16; 5] = match style {
        TeamStyle::Flat => [0, 0, 0, 0, 0],
        TeamStyle::Offensive => [0, STYLE_SHIFT, -STYLE_SHIFT, STYLE_SHIFT, -STYLE_SHIFT],
        TeamStyle::Defensive => [0, -STYLE_SHIFT, STYLE_SHIFT, -STYLE_SHIFT, STYLE_SHIFT],
        TeamStyle::Goaltending => [-STYLE_SHIFT, 0, 0, -STYLE_SHIFT, 2 * STYLE_SHIFT],
    };
    Ratings {
        face_off: clamp_rating(base + shifts[0]),
        offense: clamp_rating(base + shifts[1]),
        defense: clamp_rating(base + shifts[2]),
        shooting: clamp_rating(base + shifts[3]),
        blocking: clamp_rating(base + shifts[4]),
    }
}

impl RatingProvider for StyledTeam {
    fn face_off(&self) -> u8 {
        self.ratings.face_off
    }

    fn overall_offensive(&self) -> u8 {
        self.ratings.offense
    }

    fn overall_defensive(&self) -> u8 {
        self.ratings.defense
    }

    fn shooting(&self) -> u8 {
        self.ratings.shooting
    }

    fn blocking(&self) -> u8 {
        self.ratings.blocking
    }

    fn ratings(&self) -> Ratings {
        self.ratings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_team_reports_its_strength_everywhere() {
        let team = StyledTeam::new(TeamStyle::Flat, 77);
        assert_eq!(team.ratings(), Ratings::uniform(77));
        assert_eq!(team.strength(), 77);
        assert_eq!(team.style(), TeamStyle::Flat);
    }

    #[test]
    fn styles_shift_the_expected_ratings() {
        let off = StyledTeam::new(TeamStyle::Offensive, 70);
        assert_eq!(off.overall_offensive(), 76);
        assert_eq!(off.shooting(), 76);
        assert_eq!(off.overall_defensive(), 64);
        assert_eq!(off.blocking(), 64);
        assert_eq!(off.face_off(), 70);

        let def = StyledTeam::new(TeamStyle::Defensive, 70);
        assert_eq!(def.overall_defensive(), 76);
        assert_eq!(def.blocking(), 76);
        assert_eq!(def.overall_offensive(), 64);

        let goalie = StyledTeam::new(TeamStyle::Goaltending, 70);
        assert_eq!(goalie.blocking(), 82);
        assert_eq!(goalie.face_off(), 64);
    }

    #[test]
    fn extreme_strengths_are_clamped() {
        for style in TeamStyle::ALL {
            for strength in [0u8, 1, 3, 97, 99, 100, 255] {
                let r = StyledTeam::new(style, strength).ratings();
                for v in [r.face_off, r.offense, r.defense, r.shooting, r.blocking] {
                    assert!((1..=99).contains(&v), "{style} {strength} -> {v}");
                }
            }
        }
    }
}
