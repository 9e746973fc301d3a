//! Demo catalog seed.
//!
//! Writes the sample categories and items straight through the session,
//! the same way an operator import would; the form pipeline is for user
//! submissions.

use crate::{
    category::Category,
    domain::CatalogDomain,
    image::ImageName,
    item::Item,
};
use partsdb::{Error, prelude::*};

const CATEGORIES: &[(&str, &str)] = &[
    (
        "CPU",
        "The CPU (Central Processing Unit) is the part of a computer system \
         that is commonly referred to as the \"brains\" of a computer. The CPU \
         is also known as the processor or microprocessor. The CPU is \
         responsible for executing a sequence of stored instructions called \
         a program.",
    ),
    (
        "CPU cooler",
        "A CPU cooler is device designed to draw heat away from the system \
         CPU and other components in the enclosure. Using a CPU cooler to \
         lower CPU temperatures improves efficiency and stability of the \
         system. Adding a cooling device, however, can increase the overall \
         noise level of the system.",
    ),
    (
        "Motherboard",
        "The motherboard is the main circuit board of your computer and is \
         also known as the mainboard or logic board. Basically, the \
         motherboard is what makes everything in your computer work together.",
    ),
    (
        "Memory",
        "Computer memory is any physical device capable of storing \
         information temporarily, like RAM (random access memory), or \
         permanently, like ROM (read-only memory). Memory devices utilize \
         integrated circuits and are used by operating systems, software, \
         and hardware.",
    ),
    (
        "Storage",
        "Whereas memory refers to the location of short-term data, storage \
         is the component of your computer that allows you to store and \
         access data on a long-term basis. Usually, storage comes in the \
         form of a solid-state drive or a hard drive.",
    ),
    (
        "Video Card",
        "A video card connects to the motherboard of a computer system and \
         generates output images to display. Video cards are also referred \
         to as graphics cards. Video cards include a processing unit, \
         memory, a cooling mechanism and connections to a display device.",
    ),
    (
        "Power Supply",
        "Abbreviated as PS or P/S, a power supply or PSU (power supply \
         unit) is a hardware component of a computer that supplies all \
         other components with power.",
    ),
    (
        "Case",
        "A computer case, also known as a computer chassis, tower, system \
         unit, or cabinet, is the enclosure that contains most of the \
         components of a personal computer (usually excluding the display, \
         keyboard, and mouse).",
    ),
];

struct ItemSeed {
    name: &'static str,
    description: &'static str,
    category_index: usize,
    price: (i64, u32),
    stock: u32,
    image: &'static str,
}

const ITEMS: &[ItemSeed] = &[
    ItemSeed {
        name: "AMD Ryzen 5 3600",
        description: "# of CPU Cores: 6, # of Threads: 12, Base Clock: \
                      3.6GHz, Max Boost Clock: 4.2GHz",
        category_index: 0,
        price: (19999, 2),
        stock: 1902,
        image: "AMD Ryzen 5 3600.webp",
    },
    ItemSeed {
        name: "Intel Core i7-9700K",
        description: "# of CPU Cores: 8, # of Threads: 8, Base Clock: \
                      4.60Hz, Max Boost Clock: 4.90 GHz",
        category_index: 0,
        price: (26900, 2),
        stock: 2389,
        image: "Intel Core i7-9700K.jpeg",
    },
];

///
/// SeedSummary
///

#[derive(Debug)]
pub struct SeedSummary {
    pub categories: Vec<Id<Category>>,
    pub items: Vec<Id<Item>>,
}

/// Seed the demo catalog. Each call inserts a fresh data set.
pub fn seed_demo_catalog(session: &DbSession<CatalogDomain>) -> Result<SeedSummary, Error> {
    let mut categories = Vec::with_capacity(CATEGORIES.len());

    for (name, description) in CATEGORIES {
        let category = session.insert(Category {
            id: Ulid::generate(),
            name: (*name).to_string(),
            description: (*description).to_string(),
        })?;

        categories.push(category);
    }

    let mut items = Vec::with_capacity(ITEMS.len());

    for seed in ITEMS {
        let item = session.insert(Item {
            id: Ulid::generate(),
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            category: categories[seed.category_index].id,
            price: Decimal::new(seed.price.0, seed.price.1),
            stock: seed.stock,
            image: Some(ImageName::new(seed.image)),
        })?;

        items.push(item);
    }

    Ok(SeedSummary {
        categories: categories.iter().map(EntityValue::id).collect(),
        items: items.iter().map(EntityValue::id).collect(),
    })
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session;

    #[test]
    fn seed_populates_both_collections() {
        let s = session();
        let summary = seed_demo_catalog(&s).unwrap();

        assert_eq!(summary.categories.len(), 8);
        assert_eq!(summary.items.len(), 2);

        let categories = s.load::<Category>().all().unwrap();
        assert_eq!(categories.len(), 8);

        let items = s.load::<Item>().all().unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn seeded_items_reference_the_cpu_category() {
        let s = session();
        let summary = seed_demo_catalog(&s).unwrap();

        let cpu = summary.categories[0];
        let items = s
            .load::<Item>()
            .filter(|item| item.category == cpu.key())
            .unwrap();

        assert_eq!(items.len(), 2);
    }

    #[test]
    fn seeded_rows_survive_entity_validation() {
        // insert() sanitizes and validates; a second pass over loaded
        // rows must stay clean.
        let s = session();
        seed_demo_catalog(&s).unwrap();

        for category in s.load::<Category>().all().unwrap().entities() {
            partsdb::core::validate::validate(category).unwrap();
        }
        for item in s.load::<Item>().all().unwrap().entities() {
            partsdb::core::validate::validate(item).unwrap();
        }
    }
}
