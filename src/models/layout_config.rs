//! Hall dimensions and allocation policy.

use crate::constants::MAX_SEATS;
use crate::error::AllocationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the roster is ordered before it is distributed across sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum OrderingStrategy {
    /// Ascending by numeric roll number
    #[default]
    Sequential,
    /// Ascending, snaking back and forth across each row
    Serpentine,
    /// Ascending with an empty seat after every person
    Alternate,
    /// Even and odd roll numbers interleaved
    #[serde(alias = "evenodd")]
    EvenOdd,
    /// Male and female entries interleaved
    #[serde(alias = "gender")]
    GenderAlternating,
    /// Shuffled
    Random,
}

impl OrderingStrategy {
    /// All strategies in menu order.
    pub const ALL: [Self; 6] = [
        Self::Sequential,
        Self::Serpentine,
        Self::Alternate,
        Self::EvenOdd,
        Self::GenderAlternating,
        Self::Random,
    ];

    /// Stable identifier used on the command line and in JSON.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Serpentine => "serpentine",
            Self::Alternate => "alternate",
            Self::EvenOdd => "evenOdd",
            Self::GenderAlternating => "genderAlternating",
            Self::Random => "random",
        }
    }

    /// Human-readable name shown above rendered plans.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Sequential => "Sequential Order (Row-wise)",
            Self::Serpentine => "Serpentine Order (Snake-wise)",
            Self::Alternate => "Alternate Seating (Gap)",
            Self::EvenOdd => "Even-Odd Roll Number Mixing",
            Self::GenderAlternating => "Gender-Based Alternating",
            Self::Random => "Randomized Allocation",
        }
    }

    /// One-line description for strategy listings.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Sequential => "Sort by numeric roll number; non-numeric ids keep their place",
            Self::Serpentine => "Sort by roll number, then reverse every second row of each hall",
            Self::Alternate => "Sort by roll number and leave every other seat empty",
            Self::EvenOdd => "Interleave even and odd roll numbers, starting with even",
            Self::GenderAlternating => {
                "Interleave male and female entries; other values are left out"
            }
            Self::Random => "Shuffle the roster (use --seed for a repeatable plan)",
        }
    }

    /// Returns true if the strategy's output can contain empty seats.
    pub const fn leaves_gaps(self) -> bool {
        matches!(self, Self::Serpentine | Self::Alternate)
    }
}

impl fmt::Display for OrderingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for OrderingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "sequential" => Ok(Self::Sequential),
            "serpentine" | "snake" => Ok(Self::Serpentine),
            "alternate" | "gap" => Ok(Self::Alternate),
            "evenodd" => Ok(Self::EvenOdd),
            "genderalternating" | "gender" => Ok(Self::GenderAlternating),
            "random" => Ok(Self::Random),
            _ => Err(format!(
                "Unknown ordering strategy '{s}'. Expected one of: {}",
                Self::ALL.map(Self::key).join(", ")
            )),
        }
    }
}

/// How the ordered roster is split across sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum FillMode {
    /// Fill section 1 completely, then section 2, and so on
    #[default]
    #[serde(alias = "fill")]
    Contiguous,
    /// Split the roster evenly across all sections
    Spread,
}

impl FillMode {
    /// Stable identifier used on the command line and in JSON.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Contiguous => "contiguous",
            Self::Spread => "spread",
        }
    }
}

impl fmt::Display for FillMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FillMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contiguous" | "fill" => Ok(Self::Contiguous),
            "spread" => Ok(Self::Spread),
            _ => Err(format!(
                "Unknown fill mode '{s}'. Expected 'contiguous' or 'spread'"
            )),
        }
    }
}

/// Seating constraint toggles.
///
/// Accepted and stored, but the allocation engine does not consult them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SeatingConstraints {
    /// Avoid two people from the same department at one table
    pub department: bool,
    /// Avoid two people with the same subject at one table
    pub subject: bool,
    /// Avoid two people of the same gender at one table
    pub gender: bool,
}

impl SeatingConstraints {
    /// Returns true if any toggle is switched on.
    pub const fn any(self) -> bool {
        self.department || self.subject || self.gender
    }
}

/// Hall dimensions and allocation policy.
///
/// # Validation
///
/// - `rows`, `tables_per_row`, `seats_per_table` and `sections` must all be at least 1
/// - the product of all four is at most [`MAX_SEATS`]
///
/// Missing fields deserialize to their [`Default`] values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Rows of tables per hall
    pub rows: usize,
    /// Tables in each row
    pub tables_per_row: usize,
    /// Seats at each table
    #[serde(alias = "studentsPerTable")]
    pub seats_per_table: usize,
    /// Number of parallel halls
    #[serde(alias = "classes", alias = "sectionCount")]
    pub sections: usize,
    /// Ordering applied before distribution
    #[serde(alias = "seatingType")]
    pub strategy: OrderingStrategy,
    /// Distribution policy across halls
    #[serde(alias = "classFillMode")]
    pub fill_mode: FillMode,
    /// Inert constraint toggles
    pub constraints: SeatingConstraints,
    /// Seed for the random strategy; unseeded when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            tables_per_row: 5,
            seats_per_table: 2,
            sections: 1,
            strategy: OrderingStrategy::default(),
            fill_mode: FillMode::default(),
            constraints: SeatingConstraints::default(),
            seed: None,
        }
    }
}

impl LayoutConfig {
    /// Creates a validated configuration with default policy.
    pub fn new(
        rows: usize,
        tables_per_row: usize,
        seats_per_table: usize,
        sections: usize,
    ) -> Result<Self, AllocationError> {
        let config = Self {
            rows,
            tables_per_row,
            seats_per_table,
            sections,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the ordering strategy.
    pub fn with_strategy(mut self, strategy: OrderingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the fill mode.
    pub fn with_fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that every dimension is at least 1 and the total seat count is
    /// at most [`MAX_SEATS`].
    pub fn validate(&self) -> Result<(), AllocationError> {
        let fields = [
            ("rows", self.rows),
            ("tablesPerRow", self.tables_per_row),
            ("seatsPerTable", self.seats_per_table),
            ("sections", self.sections),
        ];
        for (field, value) in fields {
            if value == 0 {
                return Err(AllocationError::InvalidConfig {
                    field,
                    reason: format!("must be at least 1 (got {value})"),
                });
            }
        }

        let total = self
            .rows
            .checked_mul(self.tables_per_row)
            .and_then(|n| n.checked_mul(self.seats_per_table))
            .and_then(|n| n.checked_mul(self.sections));
        match total {
            Some(total) if total <= MAX_SEATS => {}
            _ => {
                return Err(AllocationError::InvalidConfig {
                    field: "rows",
                    reason: format!(
                        "× tablesPerRow × seatsPerTable × sections exceeds {MAX_SEATS} seats in total"
                    ),
                })
            }
        }

        Ok(())
    }

    /// Physical seat columns in one row (`tables_per_row × seats_per_table`).
    pub const fn seats_per_row(&self) -> usize {
        self.tables_per_row * self.seats_per_table
    }

    /// Seats in one section.
    pub const fn section_capacity(&self) -> usize {
        self.rows * self.seats_per_row()
    }

    /// Seats across all sections.
    pub const fn total_capacity(&self) -> usize {
        self.section_capacity() * self.sections
    }
}
