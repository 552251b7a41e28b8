use serde::{Deserialize, Serialize};

/// One of the two teams in a match.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

/// Read-only skill ratings a team exposes to the match engine.
///
/// Ratings are percentile values: a check succeeds when the d100 roll comes
/// in under the rating. Implementors may compute them however they like; the
/// engine reads them once per phase.
pub trait RatingProvider {
    fn face_off(&self) -> u8;
    fn overall_offensive(&self) -> u8;
    fn overall_defensive(&self) -> u8;
    fn shooting(&self) -> u8;
    fn blocking(&self) -> u8;

    /// Snapshot of all five ratings.
    fn ratings(&self) -> Ratings {
        Ratings {
            face_off: self.face_off(),
            offense: self.overall_offensive(),
            defense: self.overall_defensive(),
            shooting: self.shooting(),
            blocking: self.blocking(),
        }
    }
}

/// Plain set of ratings, also used when a game record is replayed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Ratings {
    pub face_off: u8,
    pub offense: u8,
    pub defense: u8,
    pub shooting: u8,
    pub blocking: u8,
}

impl Ratings {
    /// Every rating set to the same value.
    pub fn uniform(value: u8) -> Self {
        Self {
            face_off: value,
            offense: value,
            defense: value,
            shooting: value,
            blocking: value,
        }
    }
}

impl RatingProvider for Ratings {
    fn face_off(&self) -> u8 {
        self.face_off
    }
    fn overall_offensive(&self) -> u8 {
        self.offense
    }
    fn overall_defensive(&self) -> u8 {
        self.defense
    }
    fn shooting(&self) -> u8 {
        self.shooting
    }
    fn blocking(&self) -> u8 {
        self.blocking
    }
    fn ratings(&self) -> Ratings {
        *self
    }
}

impl<T: RatingProvider + ?Sized> RatingProvider for Box<T> {
    fn face_off(&self) -> u8 {
        (**self).face_off()
    }
    fn overall_offensive(&self) -> u8 {
        (**self).overall_offensive()
    }
    fn overall_defensive(&self) -> u8 {
        (**self).overall_defensive()
    }
    fn shooting(&self) -> u8 {
        (**self).shooting()
    }
    fn blocking(&self) -> u8 {
        (**self).blocking()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_toggles() {
        assert_eq!(Side::Home.opponent(), Side::Away);
        assert_eq!(Side::Away.opponent(), Side::Home);
    }

    #[test]
    fn boxed_provider_reports_same_snapshot() {
        let r = Ratings {
            face_off: 60,
            offense: 70,
            defense: 65,
            shooting: 55,
            blocking: 80,
        };
        let boxed: Box<dyn RatingProvider> = Box::new(r);
        assert_eq!(boxed.ratings(), r);
    }
}
