//! Static game parameters. Every layout length is derived from `GameConfig`.

use crate::error::ConfigError;
use crate::model::card::Card;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

pub const MIN_PLAYERS: u8 = 2;
pub const MAX_PLAYERS: u8 = 5;
pub const MAX_COLORS: u8 = 5;
pub const MAX_RANKS: u8 = 5;
/// Reveal outcomes are stored in a `u8` bitmask, one bit per slot.
pub const MAX_HAND_SIZE: u8 = 8;

/// How much of the table state the observation exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationType {
    /// Hands, board, discards and last action only.
    Minimal,
    /// Adds the common card knowledge section.
    #[default]
    CardKnowledge,
    /// Same layout as `CardKnowledge`; the caller may show its own cards.
    Seer,
}

impl ObservationType {
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(ObservationType::Minimal),
            1 => Some(ObservationType::CardKnowledge),
            2 => Some(ObservationType::Seer),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ObservationType::Minimal => "minimal",
            ObservationType::CardKnowledge => "card_knowledge",
            ObservationType::Seer => "seer",
        }
    }
}

impl fmt::Display for ObservationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObservationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(index) = trimmed.parse::<usize>() {
            return ObservationType::from_index(index)
                .ok_or_else(|| format!("unknown observation type index {index}"));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "minimal" => Ok(ObservationType::Minimal),
            "card_knowledge" | "cardknowledge" => Ok(ObservationType::CardKnowledge),
            "seer" => Ok(ObservationType::Seer),
            other => Err(format!("unknown observation type '{other}'")),
        }
    }
}

/// Unvalidated game parameters, as read from a file or a parameter map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameParams {
    pub players: u8,
    pub colors: u8,
    pub ranks: u8,
    /// Defaults to 5 cards for two or three players, 4 otherwise.
    pub hand_size: Option<u8>,
    pub max_information_tokens: u8,
    pub max_life_tokens: u8,
    pub observation_type: ObservationType,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            players: 2,
            colors: MAX_COLORS,
            ranks: MAX_RANKS,
            hand_size: None,
            max_information_tokens: 8,
            max_life_tokens: 3,
            observation_type: ObservationType::CardKnowledge,
        }
    }
}

impl GameParams {
    pub fn for_players(players: u8) -> Self {
        Self {
            players,
            ..Self::default()
        }
    }

    /// Reads the string parameter map used by game hosts. Unknown keys are
    /// ignored so host-only settings (seeds, start player) can share the map.
    pub fn from_map(params: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut out = Self::default();
        parse_entry(params, "players", &mut out.players)?;
        parse_entry(params, "colors", &mut out.colors)?;
        parse_entry(params, "ranks", &mut out.ranks)?;
        parse_entry(params, "max_information_tokens", &mut out.max_information_tokens)?;
        parse_entry(params, "max_life_tokens", &mut out.max_life_tokens)?;
        parse_entry(params, "observation_type", &mut out.observation_type)?;
        if params.contains_key("hand_size") {
            let mut hand_size = 0u8;
            parse_entry(params, "hand_size", &mut hand_size)?;
            out.hand_size = Some(hand_size);
        }
        Ok(out)
    }

    pub fn build(self) -> Result<GameConfig, ConfigError> {
        check_range("players", self.players, MIN_PLAYERS, MAX_PLAYERS)?;
        check_range("colors", self.colors, 1, MAX_COLORS)?;
        check_range("ranks", self.ranks, 1, MAX_RANKS)?;
        let hand_size = self
            .hand_size
            .unwrap_or_else(|| default_hand_size(self.players));
        check_range("hand_size", hand_size, 1, MAX_HAND_SIZE)?;
        check_range(
            "max_information_tokens",
            self.max_information_tokens,
            1,
            u8::MAX,
        )?;
        check_range("max_life_tokens", self.max_life_tokens, 1, u8::MAX)?;

        let max_deck_size = (0..self.ranks as usize)
            .map(card_instances)
            .sum::<usize>()
            * self.colors as usize;
        let dealt = self.players as usize * hand_size as usize;
        if max_deck_size < dealt {
            return Err(ConfigError::invalid(
                "hand_size",
                format!(
                    "{} hands of {hand_size} cards exceed the {max_deck_size}-card deck",
                    self.players
                ),
            ));
        }

        Ok(GameConfig {
            players: self.players,
            colors: self.colors,
            ranks: self.ranks,
            hand_size,
            max_information_tokens: self.max_information_tokens,
            max_life_tokens: self.max_life_tokens,
            observation_type: self.observation_type,
            max_deck_size,
        })
    }
}

fn parse_entry<T>(
    params: &HashMap<String, String>,
    key: &str,
    slot: &mut T,
) -> Result<(), ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    if let Some(raw) = params.get(key) {
        *slot = raw
            .trim()
            .parse::<T>()
            .map_err(|err| ConfigError::invalid(key, format!("cannot parse '{raw}': {err}")))?;
    }
    Ok(())
}

fn check_range(field: &str, value: u8, min: u8, max: u8) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::invalid(
            field,
            format!("{value} is outside {min}..={max}"),
        ));
    }
    Ok(())
}

const fn default_hand_size(players: u8) -> u8 {
    if players < 4 { 5 } else { 4 }
}

/// Copies of a card of `rank` in a full deck: three of the lowest rank, one of
/// the fifth rank, two of everything else.
const fn card_instances(rank: usize) -> usize {
    if rank == 0 {
        3
    } else if rank == MAX_RANKS as usize - 1 {
        1
    } else {
        2
    }
}

/// Validated, immutable game parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameParams", into = "GameParams")]
pub struct GameConfig {
    players: u8,
    colors: u8,
    ranks: u8,
    hand_size: u8,
    max_information_tokens: u8,
    max_life_tokens: u8,
    observation_type: ObservationType,
    max_deck_size: usize,
}

impl GameConfig {
    /// Standard game (5 colors, 5 ranks, 8 hints, 3 lives) for `players`.
    pub fn new(players: u8) -> Result<Self, ConfigError> {
        GameParams::for_players(players).build()
    }

    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, ConfigError> {
        GameParams::from_map(params)?.build()
    }

    pub fn with_observation_type(mut self, observation_type: ObservationType) -> Self {
        self.observation_type = observation_type;
        self
    }

    pub const fn num_players(&self) -> usize {
        self.players as usize
    }

    pub const fn num_colors(&self) -> usize {
        self.colors as usize
    }

    pub const fn num_ranks(&self) -> usize {
        self.ranks as usize
    }

    pub const fn hand_size(&self) -> usize {
        self.hand_size as usize
    }

    pub const fn max_information_tokens(&self) -> usize {
        self.max_information_tokens as usize
    }

    pub const fn max_life_tokens(&self) -> usize {
        self.max_life_tokens as usize
    }

    pub const fn max_deck_size(&self) -> usize {
        self.max_deck_size
    }

    pub const fn observation_type(&self) -> ObservationType {
        self.observation_type
    }

    /// Width of a one-hot card field.
    pub const fn bits_per_card(&self) -> usize {
        self.colors as usize * self.ranks as usize
    }

    /// Copies of `(color, rank)` in a full deck; zero outside the deck.
    pub const fn instances_of(&self, color: usize, rank: usize) -> usize {
        if color >= self.colors as usize || rank >= self.ranks as usize {
            return 0;
        }
        card_instances(rank)
    }

    pub const fn card_index(&self, card: Card) -> usize {
        card.index(self.ranks as usize)
    }
}

impl TryFrom<GameParams> for GameConfig {
    type Error = ConfigError;

    fn try_from(params: GameParams) -> Result<Self, Self::Error> {
        params.build()
    }
}

impl From<GameConfig> for GameParams {
    fn from(config: GameConfig) -> Self {
        GameParams {
            players: config.players,
            colors: config.colors,
            ranks: config.ranks,
            hand_size: Some(config.hand_size),
            max_information_tokens: config.max_information_tokens,
            max_life_tokens: config.max_life_tokens,
            observation_type: config.observation_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_two_player_game() {
        let config = GameConfig::new(2).expect("valid");
        assert_eq!(config.hand_size(), 5);
        assert_eq!(config.max_deck_size(), 50);
        assert_eq!(config.bits_per_card(), 25);
        let counts: Vec<_> = (0..5).map(|rank| config.instances_of(0, rank)).collect();
        assert_eq!(counts, vec![3, 2, 2, 2, 1]);
    }

    #[test]
    fn larger_tables_hold_four_cards() {
        assert_eq!(GameConfig::new(4).expect("valid").hand_size(), 4);
        assert_eq!(GameConfig::new(5).expect("valid").hand_size(), 4);
    }

    #[test]
    fn instances_outside_deck_are_zero() {
        let config = GameConfig::new(2).expect("valid");
        assert_eq!(config.instances_of(5, 0), 0);
        assert_eq!(config.instances_of(0, 5), 0);
    }

    #[test]
    fn rejects_out_of_range_players() {
        let err = GameConfig::new(6).expect_err("six players");
        assert_eq!(err.field(), "players");
        let err = GameConfig::new(1).expect_err("one player");
        assert_eq!(err.field(), "players");
    }

    #[test]
    fn rejects_hands_larger_than_deck() {
        let params = GameParams {
            colors: 1,
            ranks: 1,
            ..GameParams::for_players(2)
        };
        let err = params.build().expect_err("3-card deck cannot deal two hands");
        assert_eq!(err.field(), "hand_size");
    }

    #[test]
    fn parameter_map_overrides_defaults() {
        let params: HashMap<String, String> = [
            ("players", "3"),
            ("colors", "4"),
            ("hand_size", "4"),
            ("observation_type", "0"),
            ("seed", "17"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let config = GameConfig::from_params(&params).expect("valid");
        assert_eq!(config.num_players(), 3);
        assert_eq!(config.num_colors(), 4);
        assert_eq!(config.hand_size(), 4);
        assert_eq!(config.observation_type(), ObservationType::Minimal);
        assert_eq!(config.max_deck_size(), 40);
    }

    #[test]
    fn parameter_map_reports_bad_values() {
        let params: HashMap<String, String> =
            [("ranks".to_string(), "five".to_string())].into_iter().collect();
        let err = GameConfig::from_params(&params).expect_err("unparseable");
        assert_eq!(err.field(), "ranks");
    }

    #[test]
    fn deserialization_validates() {
        let config: GameConfig =
            serde_json::from_str(r#"{"players": 3, "observation_type": "seer"}"#).expect("valid");
        assert_eq!(config.num_players(), 3);
        assert_eq!(config.observation_type(), ObservationType::Seer);

        let err = serde_json::from_str::<GameConfig>(r#"{"players": 9}"#);
        assert!(err.is_err());
    }

    #[test]
    fn serialization_round_trips() {
        let config = GameConfig::new(4).expect("valid");
        let json = serde_json::to_string(&config).expect("serialize");
        let back: GameConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, config);
    }
}
