//! The plant catalog
//!
//! The standard catalog holds six plants in a fixed order. The order matters:
//! the first entry is the default match, and ties are broken by position.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::quiz::{CareLevel, LightNeeds};

/// Shop landing page, used when a plant has no product page of its own
pub const SHOP_URL: &str = "https://ekondolife.com/";

/// Identifiers of the plants in the standard catalog
pub mod ids {
    pub const AGLAONEMA: &str = "aglaonema";
    pub const SYNGONIUM: &str = "syngonium";
    pub const SPIDER_PLANT: &str = "spider-plant";
    pub const BABY_RUBBER_PLANT: &str = "baby-rubber-plant";
    pub const SANSEVIERIA: &str = "sansevieria";
    pub const SNAKE_PLANT: &str = "snake-plant";
}

/// A plant that can be matched to a visitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: String,
    pub name: String,
    pub emoji: String,
    /// Site-relative path of the plant photo
    pub image: String,
    /// What this plant says about the person it matches
    pub personality: String,
    pub description: String,
    pub care_level: CareLevel,
    pub light_needs: LightNeeds,
    /// Product page for the "adopt" link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
}

impl Plant {
    /// Create a plant with only the attributes the matcher looks at
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        care_level: CareLevel,
        light_needs: LightNeeds,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            emoji: String::new(),
            image: String::new(),
            personality: String::new(),
            description: String::new(),
            care_level,
            light_needs,
            product_url: None,
        }
    }

    /// Where the visitor goes to adopt this plant
    pub fn adopt_url(&self) -> &str {
        self.product_url.as_deref().unwrap_or(SHOP_URL)
    }
}

struct Entry {
    id: &'static str,
    name: &'static str,
    emoji: &'static str,
    image: &'static str,
    personality: &'static str,
    description: &'static str,
    care_level: CareLevel,
    light_needs: LightNeeds,
    product_url: &'static str,
}

const STANDARD: [Entry; 6] = [
    Entry {
        id: ids::AGLAONEMA,
        name: "Aglaonema",
        emoji: "🌿✨",
        image: "/beautiful-aglaonema-chinese-evergreen-plant-with-c.jpg",
        personality: "Your Soilmate is the perfect companion for busy lifestyles. With stunning variegated leaves, it teaches you that beauty comes in many forms. It thrives in low light and forgives forgotten waterings, reminding you that resilience is a quiet strength.",
        description: "Colorful foliage that brightens any low-light space",
        care_level: CareLevel::Minimal,
        light_needs: LightNeeds::Shady,
        product_url: "https://ekondolife.com/product/aglaonema/",
    },
    Entry {
        id: ids::SYNGONIUM,
        name: "Syngonium",
        emoji: "🌱💚",
        image: "/syngonium-arrowhead-plant-with-heart-shaped-green-.jpg",
        personality: "Your Soilmate grows and changes with you, starting with simple heart-shaped leaves that transform into intricate patterns. It teaches you that growth is a journey, not a destination, and that adapting to change brings new beauty.",
        description: "An evolving beauty that changes as it grows",
        care_level: CareLevel::Little,
        light_needs: LightNeeds::Mixed,
        product_url: "https://ekondolife.com/product/syngonium/",
    },
    Entry {
        id: ids::SPIDER_PLANT,
        name: "Spider Plant",
        emoji: "🕷️🌿",
        image: "/spider-plant-with-long-green-striped-leaves-and-ba.jpg",
        personality: "Your Soilmate is generous and giving, producing baby plants that you can share with others. It teaches you that abundance comes from nurturing relationships and that the best gifts are the ones that keep growing.",
        description: "A generous grower that loves to share its offspring",
        care_level: CareLevel::Little,
        light_needs: LightNeeds::Mixed,
        product_url: "https://ekondolife.com/product/spider-plant/",
    },
    Entry {
        id: ids::BABY_RUBBER_PLANT,
        name: "Baby Rubber Plant",
        emoji: "🌿🍃",
        image: "/baby-rubber-plant-with-thick-glossy-green-oval-lea.jpg",
        personality: "Your Soilmate has thick, glossy leaves that store water and wisdom. It teaches you patience and the value of steady growth. Like you, it's adaptable and resilient, thriving in various conditions while maintaining its elegant composure.",
        description: "Glossy leaves and easy-going nature for any space",
        care_level: CareLevel::Minimal,
        light_needs: LightNeeds::Mixed,
        product_url: "https://ekondolife.com/product/baby-rubber-plant/",
    },
    Entry {
        id: ids::SANSEVIERIA,
        name: "Sansevieria",
        emoji: "🗡️🌱",
        image: "/sansevieria-snake-plant-with-tall-upright-sword-li.jpg",
        personality: "Your Soilmate stands tall and proud with sword-like leaves that purify the air around you. It teaches you about boundaries and self-care, showing that sometimes the strongest thing you can do is simply stand your ground and breathe clean.",
        description: "A strong, upright guardian that purifies your air",
        care_level: CareLevel::Minimal,
        light_needs: LightNeeds::Mixed,
        product_url: "https://ekondolife.com/product/sansevieria/",
    },
    Entry {
        id: ids::SNAKE_PLANT,
        name: "Snake Plant",
        emoji: "🐍🌿",
        image: "/snake-plant-with-tall-thick-green-leaves-with-yell.jpg",
        personality: "Your Soilmate is the ultimate survivor, thriving on neglect and low maintenance. It teaches you that consistency doesn't require perfection, and that sometimes the most beautiful growth happens when you learn to trust the process and let go.",
        description: "The ultimate low-maintenance companion for busy lives",
        care_level: CareLevel::Minimal,
        light_needs: LightNeeds::Mixed,
        product_url: "https://ekondolife.com/product/snake/",
    },
];

impl From<&Entry> for Plant {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id.to_string(),
            name: entry.name.to_string(),
            emoji: entry.emoji.to_string(),
            image: entry.image.to_string(),
            personality: entry.personality.to_string(),
            description: entry.description.to_string(),
            care_level: entry.care_level,
            light_needs: entry.light_needs,
            product_url: Some(entry.product_url.to_string()),
        }
    }
}

/// An ordered, non-empty, read-only list of plants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    plants: Vec<Plant>,
}

impl Catalog {
    /// Build a catalog from plants in priority order
    pub fn new(plants: Vec<Plant>) -> Result<Self> {
        if plants.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        Ok(Self { plants })
    }

    /// The six-plant catalog served by the quiz
    pub fn standard() -> Self {
        Self {
            plants: STANDARD.iter().map(Plant::from).collect(),
        }
    }

    /// The first entry, returned when nothing else fits
    pub fn default_plant(&self) -> &Plant {
        &self.plants[0]
    }

    pub fn get(&self, id: &str) -> Option<&Plant> {
        self.plants.iter().find(|plant| plant.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Plant> {
        self.plants.iter()
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    /// Always false; a catalog holds at least one plant
    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Plant;
    type IntoIter = std::slice::Iter<'a, Plant>;

    fn into_iter(self) -> Self::IntoIter {
        self.plants.iter()
    }
}
