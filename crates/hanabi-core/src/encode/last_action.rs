//! The most recent non-deal move.
//!
//! Field order: acting player, move type, hint target, hinted color, hinted
//! rank, hinted slots, played/discarded slot, played/discarded card, play
//! outcome. Fields that do not apply to the move stay zero but keep their
//! width. With no move yet the whole section is zero.

use crate::encode::card_index;
use crate::encode::layout::{MOVE_TYPE_BITS, PLAY_OUTCOME_BITS, last_action_len};
use crate::encode::writer::SectionWriter;
use crate::error::EncodeError;
use crate::model::{GameConfig, HistoryItem, Move, Observation};

pub fn encode_last_action(
    config: &GameConfig,
    obs: &Observation,
    mut out: SectionWriter<'_>,
) -> Result<usize, EncodeError> {
    match obs.last_non_deal_move() {
        Some(item) => encode_item(config, item, &mut out)?,
        None => out.skip(last_action_len(config))?,
    }
    out.finish()
}

fn encode_item(
    config: &GameConfig,
    item: &HistoryItem,
    out: &mut SectionWriter<'_>,
) -> Result<(), EncodeError> {
    let players = config.num_players();
    let kind = item.action.kind();
    let move_type = kind
        .encoded_index()
        .ok_or(EncodeError::UnexpectedMove { kind })?;

    out.one_hot(players, item.player as usize)?;
    out.one_hot(MOVE_TYPE_BITS, move_type)?;

    let target = item
        .action
        .target_offset()
        .map(|offset| (item.player as usize + offset as usize) % players);
    out.optional_one_hot(players, target)?;

    let color = match item.action {
        Move::RevealColor { color, .. } => Some(color as usize),
        _ => None,
    };
    out.optional_one_hot(config.num_colors(), color)?;

    let rank = match item.action {
        Move::RevealRank { rank, .. } => Some(rank as usize),
        _ => None,
    };
    out.optional_one_hot(config.num_ranks(), rank)?;

    let revealed = if item.action.is_hint() {
        item.reveal_bitmask as u32
    } else {
        0
    };
    out.bitmask(config.hand_size(), revealed)?;

    let slot = item.action.card_index().map(usize::from);
    out.optional_one_hot(config.hand_size(), slot)?;

    let card = match slot {
        Some(_) => {
            let card = item.card.ok_or(EncodeError::UnknownMovedCard { kind })?;
            Some(card_index(config, card)?)
        }
        None => None,
    };
    out.optional_one_hot(config.bits_per_card(), card)?;

    let is_play = matches!(item.action, Move::Play { .. });
    let outcome = if is_play {
        u32::from(item.scored) | (u32::from(item.information_token) << 1)
    } else {
        0
    };
    out.bitmask(PLAY_OUTCOME_BITS, outcome)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::layout::Section;
    use crate::model::{Card, Deck, MoveKind};

    fn encode(config: &GameConfig, obs: &Observation) -> Result<Vec<f32>, EncodeError> {
        let mut buf = vec![0.0; last_action_len(config)];
        encode_last_action(config, obs, SectionWriter::new(Section::LastAction, &mut buf))?;
        Ok(buf)
    }

    fn fresh() -> (GameConfig, Observation) {
        let config = GameConfig::new(2).expect("valid");
        let obs = Observation::deal(&config, &Deck::full(&config), 0, false);
        (config, obs)
    }

    #[test]
    fn no_move_yet_is_all_zero() {
        let (config, mut obs) = fresh();
        obs.last_moves = vec![HistoryItem::new(1, Move::Deal { color: 0, rank: 0 })];
        let buf = encode(&config, &obs).expect("encode");
        assert_eq!(buf.len(), 55);
        assert!(buf.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn play_fills_slot_card_and_outcome() {
        let (config, mut obs) = fresh();
        obs.last_moves = vec![
            HistoryItem::new(0, Move::Deal { color: 3, rank: 1 }),
            HistoryItem::new(1, Move::Play { card_index: 4 })
                .with_card(Card::new(2, 0))
                .with_outcome(true, false),
        ];
        let buf = encode(&config, &obs).expect("encode");

        assert_eq!(&buf[0..2], &[0.0, 1.0]);
        assert_eq!(&buf[2..6], &[1.0, 0.0, 0.0, 0.0]);
        // Target, color, rank, reveal: 2 + 5 + 5 + 5 entries all zero.
        assert!(buf[6..23].iter().all(|&v| v == 0.0));
        assert_eq!(&buf[23..28], &[0.0, 0.0, 0.0, 0.0, 1.0]);
        let card = &buf[28..53];
        assert_eq!(card.iter().position(|&v| v == 1.0), Some(10));
        assert_eq!(card.iter().sum::<f32>(), 1.0);
        assert_eq!(&buf[53..55], &[1.0, 0.0]);
    }

    #[test]
    fn rank_hint_wraps_target() {
        let (config, mut obs) = fresh();
        obs.last_moves = vec![
            HistoryItem::new(
                1,
                Move::RevealRank {
                    target_offset: 1,
                    rank: 4,
                },
            )
            .with_reveal_bitmask(0b00110),
        ];
        let buf = encode(&config, &obs).expect("encode");
        assert_eq!(&buf[2..6], &[0.0, 0.0, 0.0, 1.0]);
        assert_eq!(&buf[6..8], &[1.0, 0.0]);
        assert!(buf[8..13].iter().all(|&v| v == 0.0));
        assert_eq!(&buf[13..18], &[0.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(&buf[18..23], &[0.0, 1.0, 1.0, 0.0, 0.0]);
        assert!(buf[23..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn discard_ignores_outcome_flags() {
        let (config, mut obs) = fresh();
        obs.last_moves = vec![
            HistoryItem::new(0, Move::Discard { card_index: 0 })
                .with_card(Card::new(0, 0))
                .with_outcome(true, true),
        ];
        let buf = encode(&config, &obs).expect("encode");
        assert_eq!(&buf[2..6], &[0.0, 1.0, 0.0, 0.0]);
        assert_eq!(&buf[53..55], &[0.0, 0.0]);
    }

    #[test]
    fn invalid_move_is_fatal() {
        let (config, mut obs) = fresh();
        obs.last_moves = vec![HistoryItem::new(0, Move::Invalid)];
        assert_eq!(
            encode(&config, &obs).expect_err("invalid"),
            EncodeError::UnexpectedMove {
                kind: MoveKind::Invalid
            }
        );
    }

    #[test]
    fn play_without_card_is_fatal() {
        let (config, mut obs) = fresh();
        obs.last_moves = vec![HistoryItem::new(0, Move::Play { card_index: 1 })];
        assert_eq!(
            encode(&config, &obs).expect_err("unknown card"),
            EncodeError::UnknownMovedCard {
                kind: MoveKind::Play
            }
        );
    }
}
