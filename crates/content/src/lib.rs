//! Premade content for the combat engine: the default adventuring party
//! and a small monster manual.
//!
//! `skirmish-content` layers static content on top of the rules in
//! `skirmish-core`; nothing here adds mechanics.

pub mod monsters;
pub mod party;

pub use monsters::{goblin, hydra, ogre, skeleton, vampire, weak_goblin, wight, zombie};
pub use party::default_party;
