use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::ids::{PetId, PostcardId, UserId};
use crate::models::postcard::Postcard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetSpecies {
    Cat,
    Dog,
    Rabbit,
    Fox,
    Panda,
    Frog,
}

impl PetSpecies {
    pub const ALL: [PetSpecies; 6] = [
        PetSpecies::Cat,
        PetSpecies::Dog,
        PetSpecies::Rabbit,
        PetSpecies::Fox,
        PetSpecies::Panda,
        PetSpecies::Frog,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PetSpecies::Cat => "cat",
            PetSpecies::Dog => "dog",
            PetSpecies::Rabbit => "rabbit",
            PetSpecies::Fox => "fox",
            PetSpecies::Panda => "panda",
            PetSpecies::Frog => "frog",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            PetSpecies::Cat => "🐱",
            PetSpecies::Dog => "🐶",
            PetSpecies::Rabbit => "🐰",
            PetSpecies::Fox => "🦊",
            PetSpecies::Panda => "🐼",
            PetSpecies::Frog => "🐸",
        }
    }
}

impl FromStr for PetSpecies {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        PetSpecies::ALL
            .into_iter()
            .find(|species| species.name() == wanted)
            .ok_or_else(|| format!("unknown pet species: {}", s))
    }
}

/// Planets in travel order. The derived ordering follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Planet {
    Earth,
    Moon,
    Mars,
    Jupiter,
    Saturn,
}

impl Planet {
    pub const ALL: [Planet; 5] = [
        Planet::Earth,
        Planet::Moon,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
    ];

    /// The next stop, or `None` at the end of the route.
    pub fn next(self) -> Option<Planet> {
        let index = Planet::ALL.iter().position(|p| *p == self)?;
        Planet::ALL.get(index + 1).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Planet::Earth => "Earth",
            Planet::Moon => "the Moon",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Planet::Earth => "🌍",
            Planet::Moon => "🌕",
            Planet::Mars => "♂️",
            Planet::Jupiter => "♃",
            Planet::Saturn => "♄",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub owner: UserId,
    pub name: String,
    pub species: PetSpecies,
    pub current_planet: Planet,
    /// Append-only, unique by postcard id.
    pub unlocked_postcards: Vec<Postcard>,
}

impl Pet {
    pub fn new(owner: UserId, name: impl Into<String>, species: PetSpecies) -> Self {
        Self {
            id: PetId::new(),
            owner,
            name: name.into(),
            species,
            current_planet: Planet::Earth,
            unlocked_postcards: Vec::new(),
        }
    }

    pub fn has_postcard(&self, id: PostcardId) -> bool {
        self.unlocked_postcards.iter().any(|p| p.id == id)
    }

    pub fn postcard(&self, id: PostcardId) -> Option<&Postcard> {
        self.unlocked_postcards.iter().find(|p| p.id == id)
    }
}

/// GET /api/pet
#[derive(Debug, Serialize)]
pub struct PetResponse {
    #[serde(flatten)]
    pub pet: Pet,
    pub species_glyph: &'static str,
    pub planet_glyph: &'static str,
    pub next_planet: Option<Planet>,
    /// Lowest requirement still locked on the current planet.
    pub next_unlock_at: Option<u32>,
}
