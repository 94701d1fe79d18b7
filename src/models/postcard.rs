use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::ids::PostcardId;
use crate::models::pet::Planet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Postcard {
    pub id: PostcardId,
    pub planet: Planet,
    pub message: String,
    pub image_name: String,
    /// Consecutive check-in days needed to receive this card.
    pub unlock_requirement: u32,
}

impl Postcard {
    pub fn new(
        planet: Planet,
        message: impl Into<String>,
        image_name: impl Into<String>,
        unlock_requirement: u32,
    ) -> Self {
        Self {
            id: PostcardId::new(),
            planet,
            message: message.into(),
            image_name: image_name.into(),
            unlock_requirement,
        }
    }
}

/// Shared, read-only set of every postcard a pet can send.
#[derive(Debug, Clone)]
pub struct PostcardCatalog {
    postcards: Vec<Postcard>,
}

const STANDARD_POSTCARDS: [(Planet, u32, &str, &str); 10] = [
    (
        Planet::Earth,
        3,
        "Packed my bags today! Three days in a row, you're officially my travel buddy.",
        "earth_departure",
    ),
    (
        Planet::Earth,
        5,
        "Waving from the launch pad. Next stop is the Moon, see you up there!",
        "earth_launch",
    ),
    (
        Planet::Moon,
        7,
        "Having a wonderful time exploring the moon! The Earth looks beautiful from up here. Miss you!",
        "moon_postcard",
    ),
    (
        Planet::Moon,
        10,
        "I made friends with a star tonight. We talked about dreams for hours.",
        "moon_star",
    ),
    (
        Planet::Mars,
        14,
        "Two whole weeks! The red dust gets everywhere but the sunsets are blue here.",
        "mars_sunset",
    ),
    (
        Planet::Mars,
        21,
        "Climbed Olympus Mons one step at a time, just like your habits.",
        "mars_olympus",
    ),
    (
        Planet::Jupiter,
        30,
        "A month of progress! I watched the Great Red Spot spin and thought of you.",
        "jupiter_storm",
    ),
    (
        Planet::Jupiter,
        45,
        "Counted Jupiter's moons. I lost track, but I never lost track of you.",
        "jupiter_moons",
    ),
    (
        Planet::Saturn,
        60,
        "Those rings are spectacular! Two months of streaks brought me here.",
        "saturn_rings",
    ),
    (
        Planet::Saturn,
        90,
        "End of the route. Every small step got us across the solar system. Wish you were here!",
        "saturn_finale",
    ),
];

impl PostcardCatalog {
    /// Builds a catalog from arbitrary content, rejecting zero requirements and
    /// repeated ids.
    ///
    /// The pet only reaches a planet once every earlier card is delivered, so
    /// no card may require less than any card on an earlier planet, and a
    /// planet without cards ends the route.
    pub fn new(postcards: Vec<Postcard>) -> AppResult<Self> {
        let mut seen = HashSet::new();
        for postcard in &postcards {
            if postcard.unlock_requirement == 0 {
                return Err(AppError::Validation(format!(
                    "Postcard {} must require at least one day",
                    postcard.id
                )));
            }
            if !seen.insert(postcard.id) {
                return Err(AppError::Validation(format!(
                    "Duplicate postcard id {}",
                    postcard.id
                )));
            }
        }

        let catalog = Self { postcards };
        catalog.check_route_order()?;
        Ok(catalog)
    }

    fn check_route_order(&self) -> AppResult<()> {
        let mut previous: Option<(Planet, u32)> = None;
        let mut route_ended_at: Option<Planet> = None;

        for planet in Planet::ALL {
            let requirements: Vec<u32> = self.for_planet(planet).map(|p| p.unlock_requirement).collect();
            let (Some(&min), Some(&max)) = (requirements.iter().min(), requirements.iter().max()) else {
                route_ended_at.get_or_insert(planet);
                continue;
            };

            if let Some(empty) = route_ended_at {
                return Err(AppError::Validation(format!(
                    "Postcards on {} are unreachable: {} has none",
                    planet.name(),
                    empty.name()
                )));
            }
            if let Some((earlier, earlier_max)) = previous {
                if min < earlier_max {
                    return Err(AppError::Validation(format!(
                        "A postcard on {} requires {} days, fewer than one on {} ({})",
                        planet.name(),
                        min,
                        earlier.name(),
                        earlier_max
                    )));
                }
            }
            previous = Some((planet, max));
        }
        Ok(())
    }

    /// Two cards per planet, requirements rising along the route.
    pub fn standard() -> Self {
        let postcards = STANDARD_POSTCARDS
            .iter()
            .map(|(planet, requirement, message, image)| {
                Postcard::new(*planet, *message, *image, *requirement)
            })
            .collect();
        Self { postcards }
    }

    pub fn for_planet(&self, planet: Planet) -> impl Iterator<Item = &Postcard> {
        self.postcards.iter().filter(move |p| p.planet == planet)
    }

    pub fn len(&self) -> usize {
        self.postcards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postcards.is_empty()
    }
}
