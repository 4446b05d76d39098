use serde::{Deserialize, Serialize};

/// Number of fixed groups a publisher can be assigned to.
pub const GROUP_COUNT: u32 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: u32,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// Group ids offered by the admin selectors.
pub fn group_ids() -> impl Iterator<Item = u32> {
    1..=GROUP_COUNT
}
