//! Demo catalogue loaded into an empty store when `store.seed_demo_data` is set.

use time::macros::date;
use time::Date;
use uuid::{uuid, Uuid};

use crate::entities::{Author, Course};
use crate::store::{LibraryStore, StoreResult};

struct SeedAuthor {
    id: Uuid,
    first_name: &'static str,
    last_name: &'static str,
    born: Date,
    category: &'static str,
    courses: &'static [(Uuid, &'static str, &'static str)],
}

const CATALOGUE: &[SeedAuthor] = &[
    SeedAuthor {
        id: uuid!("d28888e9-2ba9-473a-a40f-e38cb54f9b35"),
        first_name: "Berry",
        last_name: "Griffin Beak Eldritch",
        born: date!(1650 - 07 - 23),
        category: "Ships",
        courses: &[
            (
                uuid!("5b1c2b4d-48c7-402a-80c3-cc796ad49c6b"),
                "Commandeering a Ship Without Getting Caught",
                "Commandeering a ship in rough waters isn't easy. Commandeering it without getting caught is even harder.",
            ),
            (
                uuid!("d8663e5e-7494-4f81-8739-6e0de1bea7ee"),
                "Overthrowing Mutiny",
                "In this course, the author provides tips to avoid, or, if needed, overthrow pirate mutiny.",
            ),
        ],
    },
    SeedAuthor {
        id: uuid!("da2fd609-d754-4feb-8acd-c4f9ff13ba96"),
        first_name: "Nancy",
        last_name: "Swashbuckler Rye",
        born: date!(1668 - 05 - 21),
        category: "Rum",
        courses: &[(
            uuid!("d173e20d-159e-4127-9ce9-b0ac2564ad97"),
            "Avoiding Brawls While Drinking as Much Rum as You Desire",
            "Every good pirate loves rum, but it also has a tendency to get you into trouble.",
        )],
    },
    SeedAuthor {
        id: uuid!("2902b665-1190-4c70-9915-b9c2d7680450"),
        first_name: "Eli",
        last_name: "Ivory Bones Sweet",
        born: date!(1701 - 12 - 16),
        category: "Singing",
        courses: &[(
            uuid!("40ff5488-fdab-45b5-bc3a-14302d59869a"),
            "Singalong Pirate Hits",
            "In this course you'll learn how to sing all-time favourite pirate songs without sounding like you actually know the words or how to hold a note.",
        )],
    },
    SeedAuthor {
        id: uuid!("102b566b-ba1f-404c-b2df-e2cde39ade09"),
        first_name: "Arnold",
        last_name: "The Unseen Stafford",
        born: date!(1702 - 03 - 06),
        category: "Singing",
        courses: &[],
    },
    SeedAuthor {
        id: uuid!("5b3621c0-7b12-4e80-9c8b-3398cba7ee05"),
        first_name: "Seabury",
        last_name: "Toxic Reyson",
        born: date!(1690 - 11 - 23),
        category: "Maps",
        courses: &[],
    },
    SeedAuthor {
        id: uuid!("2aadd2df-7caf-45ab-9355-7f6332985a87"),
        first_name: "Rutherford",
        last_name: "Fearless Venus",
        born: date!(1723 - 04 - 05),
        category: "General debauchery",
        courses: &[],
    },
];

/// Load the demo catalogue in one unit of work. Returns the number of committed mutations.
pub fn seed_demo_data(store: &LibraryStore) -> StoreResult<usize> {
    let mut uow = store.begin();
    for entry in CATALOGUE {
        if uow.author_exists(entry.id) {
            continue;
        }
        uow.add_author(Author {
            id: entry.id,
            first_name: entry.first_name.to_string(),
            last_name: entry.last_name.to_string(),
            date_of_birth: entry.born,
            date_of_death: None,
            main_category: entry.category.to_string(),
        })?;
        for &(id, title, description) in entry.courses {
            uow.add_course(
                entry.id,
                Course {
                    id,
                    title: title.to_string(),
                    description: Some(description.to_string()),
                    author_id: entry.id,
                },
            )?;
        }
    }
    Ok(uow.save())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeding_is_idempotent() {
        let store = LibraryStore::new();
        seed_demo_data(&store).unwrap();
        let after_first = store.read().clone();
        seed_demo_data(&store).unwrap();
        assert_eq!(*store.read(), after_first);
        assert_eq!(after_first.author_count(), CATALOGUE.len());
        assert_eq!(after_first.course_count(), 4);
    }
}
