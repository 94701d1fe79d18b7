//! Postcard unlock rule.
//!
//! A pet travels the planet route in order. On its current planet, every card
//! whose requirement the streak has reached is delivered at once. Once a planet
//! with at least one card has delivered all of them, the pet moves on and the
//! rule keeps going on the next planet. The route stops at Saturn, and at any
//! planet the catalog has no cards for.

use serde::Serialize;

use crate::models::ids::PostcardId;
use crate::models::pet::{Pet, Planet};
use crate::models::postcard::PostcardCatalog;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnlockOutcome {
    pub pet: Pet,
    pub newly_unlocked: Vec<PostcardId>,
    pub arrived_at: Option<Planet>,
}

impl UnlockOutcome {
    pub fn changed(&self) -> bool {
        !self.newly_unlocked.is_empty() || self.arrived_at.is_some()
    }
}

pub fn apply_unlocks(pet: &Pet, streak_count: u32, catalog: &PostcardCatalog) -> UnlockOutcome {
    let mut pet = pet.clone();
    let mut newly_unlocked = Vec::new();
    let mut arrived_at = None;

    loop {
        let planet = pet.current_planet;

        let eligible: Vec<_> = catalog
            .for_planet(planet)
            .filter(|p| streak_count >= p.unlock_requirement && !pet.has_postcard(p.id))
            .cloned()
            .collect();
        for postcard in eligible {
            newly_unlocked.push(postcard.id);
            pet.unlocked_postcards.push(postcard);
        }

        let mut cards = catalog.for_planet(planet).peekable();
        let completed = cards.peek().is_some() && cards.all(|p| pet.has_postcard(p.id));

        match planet.next() {
            Some(next) if completed => {
                pet.current_planet = next;
                arrived_at = Some(next);
            }
            _ => break,
        }
    }

    UnlockOutcome {
        pet,
        newly_unlocked,
        arrived_at,
    }
}

/// Lowest requirement still locked on the pet's current planet.
pub fn next_requirement(pet: &Pet, catalog: &PostcardCatalog) -> Option<u32> {
    catalog
        .for_planet(pet.current_planet)
        .filter(|p| !pet.has_postcard(p.id))
        .map(|p| p.unlock_requirement)
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ids::UserId;
    use crate::models::pet::PetSpecies;
    use crate::models::postcard::Postcard;

    fn pet() -> Pet {
        Pet::new(UserId::new(), "Frodo", PetSpecies::Frog)
    }

    fn earth_only() -> PostcardCatalog {
        PostcardCatalog::new(vec![
            Postcard::new(Planet::Earth, "first", "earth_1", 3),
            Postcard::new(Planet::Earth, "second", "earth_2", 5),
        ])
        .unwrap()
    }

    #[test]
    fn test_both_earth_cards_unlock_together_and_pet_moves_to_moon() {
        let outcome = apply_unlocks(&pet(), 5, &earth_only());
        assert_eq!(outcome.newly_unlocked.len(), 2);
        assert_eq!(outcome.pet.unlocked_postcards.len(), 2);
        assert_eq!(outcome.pet.current_planet, Planet::Moon);
        assert_eq!(outcome.arrived_at, Some(Planet::Moon));
    }

    #[test]
    fn test_card_at_planet_boundary_arrives_with_the_pet() {
        let catalog = PostcardCatalog::new(vec![
            Postcard::new(Planet::Earth, "launch", "earth_5", 5),
            Postcard::new(Planet::Moon, "landing", "moon_5", 5),
        ])
        .unwrap();
        let outcome = apply_unlocks(&pet(), 5, &catalog);
        assert_eq!(outcome.newly_unlocked.len(), 2);
        assert_eq!(outcome.pet.current_planet, Planet::Mars);
    }

    #[test]
    fn test_partial_planet_stays_put() {
        let outcome = apply_unlocks(&pet(), 4, &earth_only());
        assert_eq!(outcome.pet.unlocked_postcards.len(), 1);
        assert_eq!(outcome.pet.unlocked_postcards[0].unlock_requirement, 3);
        assert_eq!(outcome.pet.current_planet, Planet::Earth);
        assert!(outcome.arrived_at.is_none());
    }

    #[test]
    fn test_below_every_requirement_is_noop() {
        let start = pet();
        let outcome = apply_unlocks(&start, 2, &earth_only());
        assert_eq!(outcome.pet, start);
        assert!(!outcome.changed());
    }

    #[test]
    fn test_second_application_is_noop() {
        let catalog = PostcardCatalog::standard();
        let first = apply_unlocks(&pet(), 12, &catalog);
        let second = apply_unlocks(&first.pet, 12, &catalog);
        assert_eq!(second.pet, first.pet);
        assert!(!second.changed());
    }

    #[test]
    fn test_already_unlocked_cards_kept_after_streak_reset() {
        let catalog = PostcardCatalog::standard();
        let first = apply_unlocks(&pet(), 4, &catalog);
        assert_eq!(first.pet.unlocked_postcards.len(), 1);
        let after_reset = apply_unlocks(&first.pet, 1, &catalog);
        assert_eq!(after_reset.pet, first.pet);
    }

    #[test]
    fn test_cascades_across_planets() {
        let catalog = PostcardCatalog::standard();
        let outcome = apply_unlocks(&pet(), 14, &catalog);
        // earth 3,5 + moon 7,10 + mars 14
        assert_eq!(outcome.newly_unlocked.len(), 5);
        assert_eq!(outcome.pet.current_planet, Planet::Mars);
        assert_eq!(next_requirement(&outcome.pet, &catalog), Some(21));
    }

    #[test]
    fn test_route_halts_at_saturn() {
        let catalog = PostcardCatalog::standard();
        let outcome = apply_unlocks(&pet(), 500, &catalog);
        assert_eq!(outcome.pet.unlocked_postcards.len(), catalog.len());
        assert_eq!(outcome.pet.current_planet, Planet::Saturn);
        assert_eq!(next_requirement(&outcome.pet, &catalog), None);
        let again = apply_unlocks(&outcome.pet, 500, &catalog);
        assert!(!again.changed());
    }

    #[test]
    fn test_unlocked_iff_requirement_reached() {
        let catalog = PostcardCatalog::standard();
        let mut current = pet();
        for streak in 1..=100u32 {
            current = apply_unlocks(&current, streak, &catalog).pet;
            for planet in Planet::ALL {
                for card in catalog.for_planet(planet) {
                    assert_eq!(
                        current.has_postcard(card.id),
                        card.unlock_requirement <= streak,
                        "streak {} card {}",
                        streak,
                        card.unlock_requirement
                    );
                }
            }
        }
    }

    #[test]
    fn test_no_duplicate_cards_in_inbox() {
        let catalog = PostcardCatalog::standard();
        let mut current = pet();
        for streak in [3, 3, 5, 1, 5, 7] {
            current = apply_unlocks(&current, streak, &catalog).pet;
        }
        let mut ids: Vec<_> = current.unlocked_postcards.iter().map(|p| p.id).collect();
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }
}
