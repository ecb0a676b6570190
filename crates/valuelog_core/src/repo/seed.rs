//! Sample data returned to first-run profiles.

use crate::model::child::{avatar_url_for, Child};
use crate::model::entry::{ExperienceEntry, Starr};

/// Two sample children shown before the user adds their own.
pub fn sample_children() -> Vec<Child> {
    vec![
        Child {
            id: "1".to_string(),
            name: "Ji-won".to_string(),
            avatar_url: avatar_url_for("child1"),
        },
        Child {
            id: "2".to_string(),
            name: "Min-soo".to_string(),
            avatar_url: avatar_url_for("child2"),
        },
    ]
}

/// Two sample entries for the first sample child, stamped with `user_id`.
pub fn sample_entries(user_id: &str) -> Vec<ExperienceEntry> {
    vec![
        ExperienceEntry {
            id: "e1".to_string(),
            child_id: "1".to_string(),
            user_id: user_id.to_string(),
            title: "School Science Fair".to_string(),
            date: "2025-11-15".to_string(),
            starr: Starr {
                situation: "Annual science competition at school.".to_string(),
                task: "Build a working model demonstrating renewable energy.".to_string(),
                action: "Designed and assembled a small-scale wind turbine using recycled materials."
                    .to_string(),
                result: "Won 2nd place and successfully explained the mechanics to judges."
                    .to_string(),
                reflection:
                    "I learned that persistence is key when things do not work on the first try."
                        .to_string(),
            },
            activity_tags: vec!["Science".to_string(), "Leadership".to_string()],
            competency_tags: vec!["Problem Solving".to_string(), "Grit".to_string()],
            satisfaction: 5,
            image: None,
        },
        ExperienceEntry {
            id: "e2".to_string(),
            child_id: "1".to_string(),
            user_id: user_id.to_string(),
            title: "Local Art Exhibition".to_string(),
            date: "2025-12-05".to_string(),
            starr: Starr {
                situation: "Community art show for youth.".to_string(),
                task: "Create a painting reflecting environmental awareness.".to_string(),
                action: "Painted a landscape using eco-friendly watercolors.".to_string(),
                result: "Received positive feedback from local artists.".to_string(),
                reflection: "I realized how art can be a powerful tool for advocacy.".to_string(),
            },
            activity_tags: vec!["Art".to_string()],
            competency_tags: vec!["Creativity".to_string(), "Communication".to_string()],
            satisfaction: 4,
            image: None,
        },
    ]
}
