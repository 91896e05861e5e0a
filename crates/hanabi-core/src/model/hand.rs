use crate::model::card::Card;
use crate::model::knowledge::CardKnowledge;
use serde::{Deserialize, Serialize};

/// A hand as seen by the observer.
///
/// `cards` holds the current slots in table order; `None` is a card the
/// observer cannot see (only possible in the observer's own hand).
/// `knowledge` runs parallel to the slots and may extend past them when the
/// table keeps knowledge for slots that were not refilled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Option<Card>>,
    knowledge: Vec<CardKnowledge>,
}

impl Hand {
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            knowledge: Vec::new(),
        }
    }

    pub fn with_parts(cards: Vec<Option<Card>>, knowledge: Vec<CardKnowledge>) -> Self {
        Self { cards, knowledge }
    }

    pub fn add_card(&mut self, card: Option<Card>, knowledge: CardKnowledge) {
        self.cards.push(card);
        self.knowledge.push(knowledge);
    }

    /// Removes a slot and its knowledge; later slots shift down.
    pub fn remove_card(&mut self, index: usize) -> Option<(Option<Card>, CardKnowledge)> {
        if index >= self.cards.len() || index >= self.knowledge.len() {
            return None;
        }
        let card = self.cards.remove(index);
        let knowledge = self.knowledge.remove(index);
        Some((card, knowledge))
    }

    pub fn cards(&self) -> &[Option<Card>] {
        &self.cards
    }

    pub fn knowledge(&self) -> &[CardKnowledge] {
        &self.knowledge
    }

    pub fn knowledge_mut(&mut self) -> &mut [CardKnowledge] {
        &mut self.knowledge
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Same slots and knowledge with every card identity removed.
    pub fn hidden(&self) -> Self {
        Self {
            cards: vec![None; self.cards.len()],
            knowledge: self.knowledge.clone(),
        }
    }
}
