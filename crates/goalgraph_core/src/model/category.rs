//! Goal category domain model.
//!
//! # Responsibility
//! - Define the `Category` record and its `Output`/`Input` kind.
//! - Own the ordered `CategoryList` and its boundary-insertion policy.
//! - Encode and decode the persisted snapshot layout.
//!
//! # Invariants
//! - `id` is stable and unique across the whole list.
//! - Output categories form one contiguous run that precedes the Input run.
//! - `kind` is fixed at creation.
//!
//! # See also
//! - `service::category_store` for the only mutation entry point.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Title given to a freshly appended output category.
pub const DEFAULT_OUTPUT_TITLE: &str = "New Output Category";
/// Title given to a freshly appended input category.
pub const DEFAULT_INPUT_TITLE: &str = "New Input Category";

const SEED: &[(&str, &str, u32, CategoryKind)] = &[
    ("1", "CSE201 Project 4", 13, CategoryKind::Output),
    ("2", "Complete database overhaul", 10, CategoryKind::Output),
    ("3", "$5K in MRR", 4, CategoryKind::Output),
    ("4", "Rest and Sleep", 5, CategoryKind::Input),
    ("5", "Hydration and Nutrition", 4, CategoryKind::Input),
    ("6", "Recreation", 3, CategoryKind::Input),
];

/// Opaque, stable category identifier.
///
/// Persisted ids are accepted verbatim; fresh ids are UUID v4 strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a new globally unique id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for CategoryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Which side of the hub a category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// Something produced; stacked above the hub.
    Output,
    /// Something consumed or maintained; stacked below the hub.
    Input,
}

impl CategoryKind {
    /// Stable wire label (`output|input`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Output => "output",
            Self::Input => "input",
        }
    }

    pub fn default_title(self) -> &'static str {
        match self {
            Self::Output => DEFAULT_OUTPUT_TITLE,
            Self::Input => DEFAULT_INPUT_TITLE,
        }
    }
}

/// Parses a kind label, ignoring surrounding whitespace and ASCII case.
pub fn parse_category_kind(value: &str) -> Option<CategoryKind> {
    match value.trim().to_ascii_lowercase().as_str() {
        "output" => Some(CategoryKind::Output),
        "input" => Some(CategoryKind::Input),
        _ => None,
    }
}

/// A named bucket of goals.
///
/// Serializes to the persisted record shape
/// `{id, title, goalCount, type}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Display string, no uniqueness constraint.
    pub title: String,
    /// Number of sub-goals in this category. Informational only.
    #[serde(rename = "goalCount")]
    pub weight: u32,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
}

impl Category {
    /// Creates a category with a generated id, default title and zero weight.
    pub fn new(kind: CategoryKind) -> Self {
        Self::with_id(CategoryId::generate(), kind, kind.default_title(), 0)
    }

    /// Creates a category with a caller-provided id.
    ///
    /// Used by seed and snapshot paths where identity already exists.
    pub fn with_id(
        id: CategoryId,
        kind: CategoryKind,
        title: impl Into<String>,
        weight: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            weight,
            kind,
        }
    }
}

/// Snapshot decoding failures.
#[derive(Debug)]
pub enum SnapshotError {
    /// Payload is not a JSON array of category records.
    Json(serde_json::Error),
    /// Record at `index` has a blank id.
    EmptyId { index: usize },
    /// Two records share the same id.
    DuplicateId(CategoryId),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "category snapshot is not valid: {err}"),
            Self::EmptyId { index } => write!(f, "category at index {index} has an empty id"),
            Self::DuplicateId(id) => write!(f, "category id is duplicated: {id}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::EmptyId { .. } => None,
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Ordered sequence of categories.
///
/// Order drives stacking position in the derived graph. Outputs always
/// precede inputs; relative order within each kind is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryList {
    items: Vec<Category>,
}

impl CategoryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the fixed six-entry seed used when nothing is persisted.
    pub fn default_seed() -> Self {
        let items = SEED
            .iter()
            .map(|(id, title, weight, kind)| {
                Category::with_id(CategoryId::new(*id), *kind, *title, *weight)
            })
            .collect();
        Self { items }
    }

    /// Builds a list from arbitrary records.
    ///
    /// Ids must be non-blank and unique. Records are stably partitioned so
    /// outputs precede inputs without disturbing within-kind order.
    pub fn from_categories(categories: Vec<Category>) -> Result<Self, SnapshotError> {
        ensure_unique_ids(&categories)?;

        let (mut items, inputs): (Vec<_>, Vec<_>) = categories
            .into_iter()
            .partition(|category| category.kind == CategoryKind::Output);
        items.extend(inputs);
        Ok(Self { items })
    }

    /// Decodes the persisted JSON array layout.
    pub fn from_snapshot(raw: &str) -> Result<Self, SnapshotError> {
        let categories: Vec<Category> = serde_json::from_str(raw)?;
        Self::from_categories(categories)
    }

    /// Encodes the list into the persisted JSON array layout.
    pub fn to_snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.items)
    }

    pub fn as_slice(&self) -> &[Category] {
        self.items.as_slice()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &CategoryId) -> Option<&Category> {
        self.items.iter().find(|category| &category.id == id)
    }

    pub fn contains(&self, id: &CategoryId) -> bool {
        self.get(id).is_some()
    }

    /// Output categories in list order.
    pub fn outputs(&self) -> impl Iterator<Item = &Category> + '_ {
        self.of_kind(CategoryKind::Output)
    }

    /// Input categories in list order.
    pub fn inputs(&self) -> impl Iterator<Item = &Category> + '_ {
        self.of_kind(CategoryKind::Input)
    }

    pub fn of_kind(&self, kind: CategoryKind) -> impl Iterator<Item = &Category> + '_ {
        self.items
            .iter()
            .filter(move |category| category.kind == kind)
    }

    /// Index of the seam between the output run and the input run.
    pub fn boundary(&self) -> usize {
        self.outputs().count()
    }

    /// Inserts at the output/input seam and returns the new index.
    ///
    /// A new output lands at the bottom of the output run; a new input lands
    /// at the top of the input run.
    pub(crate) fn insert_at_boundary(&mut self, category: Category) -> usize {
        let index = self.boundary();
        self.items.insert(index, category);
        index
    }
}

fn ensure_unique_ids(categories: &[Category]) -> Result<(), SnapshotError> {
    let mut seen = HashSet::with_capacity(categories.len());
    for (index, category) in categories.iter().enumerate() {
        if category.id.as_str().trim().is_empty() {
            return Err(SnapshotError::EmptyId { index });
        }
        if !seen.insert(&category.id) {
            return Err(SnapshotError::DuplicateId(category.id.clone()));
        }
    }
    Ok(())
}

impl<'a> IntoIterator for &'a CategoryList {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
