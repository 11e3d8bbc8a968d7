//! Deck definitions and their validation.
//!
//! Validation runs before any game state is built and rejects:
//! missing/zero ids, missing names, unknown equipment tags, cards with both
//! or neither property kind, missing monster stats, zero quantities,
//! unknown definition references and bad effect references.

mod definition;
mod error;

pub use definition::{CardInstanceDefinition, DeckDefinition};
pub use error::DeckError;
