//! Audience buckets for table identifiers.

use serde::{Deserialize, Serialize};

use crate::api::{Category, TableId};

/// Table ids split by audience.
///
/// Ids with no recognized prefix land in `other`, which is never part of a
/// category view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedTables {
    pub student: Vec<TableId>,
    pub instructor: Vec<TableId>,
    pub lab: Vec<TableId>,
    #[serde(default)]
    pub other: Vec<TableId>,
}

impl CategorizedTables {
    /// Ids of one category, in input order.
    pub fn get(&self, category: Category) -> &[TableId] {
        match category {
            Category::Student => &self.student,
            Category::Instructor => &self.instructor,
            Category::Lab => &self.lab,
        }
    }

    /// Ids dropped from every category.
    pub fn unrecognized(&self) -> &[TableId] {
        &self.other
    }

    /// Number of ids in each category, in tab order.
    pub fn counts(&self) -> [(Category, usize); 3] {
        Category::ALL.map(|category| (category, self.get(category).len()))
    }

    /// Number of categorized ids.
    pub fn recognized_len(&self) -> usize {
        self.student.len() + self.instructor.len() + self.lab.len()
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<TableId> {
        match category {
            Category::Student => &mut self.student,
            Category::Instructor => &mut self.instructor,
            Category::Lab => &mut self.lab,
        }
    }
}

/// Partition ids into categories in a single pass.
pub fn categorize<'a, I>(table_ids: I) -> CategorizedTables
where
    I: IntoIterator<Item = &'a TableId>,
{
    let mut buckets = CategorizedTables::default();
    for table_id in table_ids {
        match table_id.category() {
            Some(category) => buckets.bucket_mut(category).push(table_id.clone()),
            None => buckets.other.push(table_id.clone()),
        }
    }
    buckets
}
