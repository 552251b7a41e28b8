use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::MatchError;
use crate::team::Side;

/// One of the four stretches of ice the puck can occupy.
///
/// Zone 4 is where Home attacks, zone 1 is where Away attacks; zones 2 and 3
/// are neutral ice.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Zone(u8);

impl Zone {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    pub fn new(value: u8) -> Option<Zone> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Zone(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Zone {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Zone::new(value).ok_or_else(|| format!("zone {} outside 1..=4", value))
    }
}

impl From<Zone> for u8 {
    fn from(z: Zone) -> u8 {
        z.0
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who controls the puck.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Possession {
    /// Loose puck, nobody controls it
    Loose,
    Home,
    Away,
}

impl Possession {
    pub fn side(self) -> Option<Side> {
        match self {
            Possession::Loose => None,
            Possession::Home => Some(Side::Home),
            Possession::Away => Some(Side::Away),
        }
    }

    /// Hands the puck to the other team. Only legal while a team holds it.
    pub fn flip(self) -> Result<Possession, MatchError> {
        match self {
            Possession::Home => Ok(Possession::Away),
            Possession::Away => Ok(Possession::Home),
            Possession::Loose => Err(MatchError::NoPossession {
                operation: "flip possession",
            }),
        }
    }

    pub fn attacking_zone(self) -> Option<Zone> {
        self.pick(4, 1)
    }

    pub fn defensive_zone(self) -> Option<Zone> {
        self.pick(1, 4)
    }

    /// Neutral zone on the possessor's own half.
    pub fn defense_side_neutral(self) -> Option<Zone> {
        self.pick(2, 3)
    }

    /// Neutral zone on the opponent's half.
    pub fn attack_side_neutral(self) -> Option<Zone> {
        self.pick(3, 2)
    }

    fn pick(self, home: u8, away: u8) -> Option<Zone> {
        match self {
            Possession::Home => Some(Zone(home)),
            Possession::Away => Some(Zone(away)),
            Possession::Loose => None,
        }
    }
}

impl From<Side> for Possession {
    fn from(side: Side) -> Self {
        match side {
            Side::Home => Possession::Home,
            Side::Away => Possession::Away,
        }
    }
}

impl fmt::Display for Possession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Possession::Loose => "No one",
            Possession::Home => "Home",
            Possession::Away => "Away",
        };
        f.write_str(s)
    }
}

/// Running counters for one team.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub score: u32,
    pub shots_on_goal: u32,
    /// Saves made by this team's goalie
    pub saves: u32,
}

/// Final per-team line of a finished game.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BoxScore {
    pub home: TeamStats,
    pub away: TeamStats,
}

impl BoxScore {
    /// Winning side, or `None` for a tie.
    pub fn winner(&self) -> Option<Side> {
        match self.home.score.cmp(&self.away.score) {
            std::cmp::Ordering::Greater => Some(Side::Home),
            std::cmp::Ordering::Less => Some(Side::Away),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl fmt::Display for BoxScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<10}{:<10}{:<10}", "", "Home", "Away")?;
        writeln!(f, "{:<10}{:<10}{:<10}", "Score", self.home.score, self.away.score)?;
        writeln!(
            f,
            "{:<10}{:<10}{:<10}",
            "SOG", self.home.shots_on_goal, self.away.shots_on_goal
        )?;
        write!(f, "{:<10}{:<10}{:<10}", "Saves", self.home.saves, self.away.saves)
    }
}

/// Mutable record of one game in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    /// Seconds left on the game clock
    clock: i32,
    in_play: bool,
    possession: Possession,
    zone: Option<Zone>,
    shooting: bool,
    /// Pending bonus for the next securing-a-shot contest
    secure_bonus: bool,
    /// Pending shot-quality multiplier for the next shot
    shot_quality: u8,
    home: TeamStats,
    away: TeamStats,
}

impl MatchState {
    /// Fresh game: puck not in play, nobody in possession, no zone.
    pub fn new(game_length: u32) -> Self {
        Self {
            clock: i32::try_from(game_length).unwrap_or(i32::MAX),
            in_play: false,
            possession: Possession::Loose,
            zone: None,
            shooting: false,
            secure_bonus: false,
            shot_quality: 0,
            home: TeamStats::default(),
            away: TeamStats::default(),
        }
    }

    /// A state already in play, for setting up a specific situation.
    ///
    /// No invariants are enforced here; the phase handlers reject entries that
    /// do not fit them.
    pub fn in_play(clock: i32, possession: Possession, zone: Option<Zone>, shooting: bool) -> Self {
        Self {
            clock,
            in_play: true,
            possession,
            zone,
            shooting,
            ..Self::new(0)
        }
    }

    pub fn clock(&self) -> i32 {
        self.clock
    }
    pub fn is_in_play(&self) -> bool {
        self.in_play
    }
    pub fn possession(&self) -> Possession {
        self.possession
    }
    pub fn zone(&self) -> Option<Zone> {
        self.zone
    }
    pub fn is_shooting(&self) -> bool {
        self.shooting
    }
    pub fn has_secure_bonus(&self) -> bool {
        self.secure_bonus
    }
    pub fn shot_quality(&self) -> u8 {
        self.shot_quality
    }
    pub fn stats(&self, side: Side) -> &TeamStats {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.clock <= 0
    }

    pub fn attacking_zone(&self) -> Option<Zone> {
        self.possession.attacking_zone()
    }
    pub fn defensive_zone(&self) -> Option<Zone> {
        self.possession.defensive_zone()
    }
    pub fn defense_side_neutral(&self) -> Option<Zone> {
        self.possession.defense_side_neutral()
    }
    pub fn attack_side_neutral(&self) -> Option<Zone> {
        self.possession.attack_side_neutral()
    }

    /// True when the puck sits in the possessor's attacking zone.
    pub fn in_attacking_zone(&self) -> bool {
        self.zone.is_some() && self.zone == self.attacking_zone()
    }

    /// Final counters. Never mutates the state.
    pub fn box_score(&self) -> BoxScore {
        BoxScore {
            home: self.home,
            away: self.away,
        }
    }

    pub fn with_secure_bonus(mut self) -> Self {
        self.secure_bonus = true;
        self
    }

    pub fn with_shot_quality(mut self, quality: u8) -> Self {
        self.shot_quality = quality;
        self
    }

    pub(crate) fn stats_mut(&mut self, side: Side) -> &mut TeamStats {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    pub(crate) fn charge(&mut self, seconds: u32) {
        self.clock = self
            .clock
            .saturating_sub(i32::try_from(seconds).unwrap_or(i32::MAX));
    }

    pub(crate) fn set_in_play(&mut self, in_play: bool) {
        self.in_play = in_play;
    }

    pub(crate) fn set_shooting(&mut self, shooting: bool) {
        self.shooting = shooting;
    }

    pub(crate) fn set_shot_quality(&mut self, quality: u8) {
        self.shot_quality = quality;
    }

    pub(crate) fn take_shot_quality(&mut self) -> u8 {
        std::mem::take(&mut self.shot_quality)
    }

    pub(crate) fn grant_secure_bonus(&mut self) {
        self.secure_bonus = true;
    }

    pub(crate) fn take_secure_bonus(&mut self) -> bool {
        std::mem::take(&mut self.secure_bonus)
    }

    /// Changing hands forfeits any bonus the previous possessor had built up.
    pub(crate) fn set_possession(&mut self, possession: Possession) {
        if possession != self.possession {
            self.secure_bonus = false;
        }
        self.possession = possession;
    }

    pub(crate) fn flip_possession(&mut self) -> Result<(), MatchError> {
        let next = self.possession.flip()?;
        self.set_possession(next);
        Ok(())
    }

    /// Drops the puck on the possessor's own neutral zone if no zone is set.
    pub(crate) fn anchor_zone(&mut self) {
        if self.zone.is_none() {
            self.zone = self.defense_side_neutral();
        }
    }

    pub(crate) fn clear_zone(&mut self) {
        self.zone = None;
    }

    /// Moves the puck one zone toward the possessor's attacking zone.
    ///
    /// At the attacking zone the puck cannot go further, so the possessor
    /// earns the securing-a-shot bonus instead.
    pub(crate) fn advance_zone(&mut self) -> Result<(), MatchError> {
        let side = self.possession.side().ok_or(MatchError::NoPossession {
            operation: "advance the puck",
        })?;
        let zone = self.zone.ok_or(MatchError::NoZone {
            operation: "advance the puck",
        })?;
        let attacking = self.possession.attacking_zone().ok_or(MatchError::NoPossession {
            operation: "advance the puck",
        })?;

        if zone == attacking {
            self.secure_bonus = true;
            return Ok(());
        }
        let next = match side {
            Side::Home => zone.get().checked_add(1),
            Side::Away => zone.get().checked_sub(1),
        };
        self.zone = Some(next.and_then(Zone::new).ok_or(MatchError::ZoneOutOfBounds {
            zone: zone.get(),
            attacking: attacking.get(),
        })?);
        Ok(())
    }

    /// Puts the possessor alone in their attacking zone with a shot pending.
    pub(crate) fn breakaway(&mut self) -> Result<(), MatchError> {
        let attacking = self.possession.attacking_zone().ok_or(MatchError::NoPossession {
            operation: "start a breakaway",
        })?;
        self.zone = Some(attacking);
        self.shooting = true;
        Ok(())
    }
}

impl fmt::Display for MatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Time Remaining: {}; {}. ",
            self.clock,
            if self.in_play { "In play" } else { "Not in play" }
        )?;
        if self.in_play {
            write!(f, "{} in possession. ", self.possession)?;
        }
        match self.zone {
            Some(z) => write!(f, "Zone: {}", z),
            None => write!(f, "Zone: -"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(v: u8) -> Option<Zone> {
        Zone::new(v)
    }

    #[test]
    fn zone_rejects_out_of_range() {
        assert!(Zone::new(0).is_none());
        assert!(Zone::new(5).is_none());
        assert_eq!(Zone::new(3).map(Zone::get), Some(3));
    }

    #[test]
    fn flip_toggles_and_rejects_loose() {
        assert_eq!(Possession::Home.flip(), Ok(Possession::Away));
        assert_eq!(Possession::Away.flip(), Ok(Possession::Home));
        assert!(Possession::Loose.flip().is_err());
    }

    #[test]
    fn derived_zones_mirror_by_side() {
        assert_eq!(Possession::Home.attacking_zone(), zone(4));
        assert_eq!(Possession::Home.defensive_zone(), zone(1));
        assert_eq!(Possession::Home.defense_side_neutral(), zone(2));
        assert_eq!(Possession::Home.attack_side_neutral(), zone(3));
        assert_eq!(Possession::Away.attacking_zone(), zone(1));
        assert_eq!(Possession::Away.defensive_zone(), zone(4));
        assert_eq!(Possession::Away.defense_side_neutral(), zone(3));
        assert_eq!(Possession::Away.attack_side_neutral(), zone(2));
        assert_eq!(Possession::Loose.attacking_zone(), None);
    }

    #[test]
    fn advance_moves_toward_attacking_zone() {
        let mut s = MatchState::in_play(100, Possession::Home, zone(2), false);
        s.advance_zone().unwrap();
        assert_eq!(s.zone(), zone(3));

        let mut s = MatchState::in_play(100, Possession::Away, zone(3), false);
        s.advance_zone().unwrap();
        assert_eq!(s.zone(), zone(2));
    }

    #[test]
    fn advance_at_boundary_grants_bonus() {
        let mut s = MatchState::in_play(100, Possession::Away, zone(1), false);
        s.advance_zone().unwrap();
        assert_eq!(s.zone(), zone(1));
        assert!(s.has_secure_bonus());
    }

    #[test]
    fn advance_without_possession_is_fatal() {
        let mut s = MatchState::in_play(100, Possession::Loose, zone(2), false);
        assert_eq!(
            s.advance_zone(),
            Err(MatchError::NoPossession {
                operation: "advance the puck"
            })
        );
    }

    #[test]
    fn advance_without_zone_is_fatal() {
        let mut s = MatchState::in_play(100, Possession::Home, None, false);
        assert!(matches!(s.advance_zone(), Err(MatchError::NoZone { .. })));
    }

    #[test]
    fn flip_clears_pending_bonus() {
        let mut s = MatchState::in_play(100, Possession::Home, zone(4), false).with_secure_bonus();
        s.flip_possession().unwrap();
        assert_eq!(s.possession(), Possession::Away);
        assert!(!s.has_secure_bonus());
    }

    #[test]
    fn box_score_is_read_only() {
        let s = MatchState::new(120);
        let a = s.box_score();
        let b = s.box_score();
        assert_eq!(a, b);
        assert_eq!(s, MatchState::new(120));
    }

    #[test]
    fn box_score_table_layout() {
        let mut b = BoxScore::default();
        b.home.score = 2;
        b.away.shots_on_goal = 7;
        let text = b.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Home") && lines[0].contains("Away"));
        assert!(lines[1].starts_with("Score"));
        assert_eq!(b.winner(), Some(Side::Home));
    }

    #[test]
    fn display_shows_possession_only_in_play() {
        let s = MatchState::new(120);
        assert_eq!(s.to_string(), "Time Remaining: 120; Not in play. Zone: -");
        let s = MatchState::in_play(90, Possession::Away, zone(3), false);
        assert_eq!(
            s.to_string(),
            "Time Remaining: 90; In play. Away in possession. Zone: 3"
        );
    }
}
