//! Seeker - field-type-aware search and filtering over fetched table records.
//!
//! Records come from a spreadsheet-like host: every cell holds a value whose
//! shape depends on the owning field's type. Seeker turns those values into
//! display strings and evaluates typed filter conditions against them. It
//! provides:
//!
//! - Normalization: any cell value → canonical display string
//! - Search: case-insensitive substring match across every field
//! - Filtering: per-type operators, combined with AND
//! - A pipeline that always filters first, then searches
//! - Highlighting and client-side pagination for display
//!
//! # Quick Start
//!
//! ```rust
//! use gridscope_seeker::{process, Field, FieldType, FilterCondition, Op, Record};
//!
//! let fields = vec![
//!     Field::new("title", "Title", FieldType::Text),
//!     Field::new("score", "Score", FieldType::Number),
//! ];
//!
//! let records = vec![
//!     Record::new("r1").with("title", "Write docs").with("score", 3i64),
//!     Record::new("r2").with("title", "Fix bug").with("score", 5i64),
//!     Record::new("r3").with("title", "Fix typo").with("score", 1i64),
//! ];
//!
//! let conditions = vec![FilterCondition::new("score", Op::Gte, 3i64)];
//! let result = process(&records, &conditions, "fix", &fields);
//!
//! assert_eq!(result.count, 1);
//! assert_eq!(result.records[0].id, "r2");
//! ```
//!
//! # Evaluation Semantics
//!
//! ```text
//! result = search(filter(records, conditions), query)
//! ```
//!
//! - **Conditions** combine with AND; no conditions keeps every record.
//! - **Fail-open**: an unknown field, an unknown operator or a missing
//!   operand never excludes a record.
//! - **Empty cells** never satisfy a real comparison.
//! - **Blank queries** keep every record.
//!
//! # Field Kinds and Operators
//!
//! | Kind | Types | Operators |
//! |------|-------|-----------|
//! | Text | Text, Url | `eq`, `neq`, `contains`, `not_contains` |
//! | Number | Number, Currency, Rating | `eq`, `neq`, `gte`, `lte`, `gt`, `lt` |
//! | DateTime | DateTime, CreatedTime, ModifiedTime | `eq`, `neq`, `after`, `before` |
//! | Checkbox | Checkbox | `eq` |
//! | Select | SingleSelect, MultiSelect | `eq`, `neq` |
//! | User | User, CreatedUser, ModifiedUser | `eq`, `neq` |
//!
//! Date `eq`/`neq` compare calendar days; `after`/`before` compare raw
//! epoch milliseconds. Multi-value `eq` requires **all** operand ids to be
//! present, and `neq` is its negation.

mod capability;
mod cell;
mod condition;
mod error;
mod field;
mod filter;
mod highlight;
mod locale;
mod normalize;
mod op;
mod pagination;
mod pipeline;
mod predicate;
mod record;
mod search;

// Re-export public API
pub use capability::{operators_for, Capability};
pub use cell::{CellValue, Choice, ReferenceIds, UserRef};
pub use condition::{FilterCondition, FilterValue, IdOperand};
pub use error::{Result, SeekerError};
pub use field::{by_id, by_name, ChoiceOption, Field, FieldKind, FieldType};
pub use filter::{filter, filter_with};
pub use highlight::{highlight, Segment};
pub use locale::{Locale, Zone};
pub use normalize::{normalize, normalize_with};
pub use op::Op;
pub use pagination::{Pagination, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
pub use pipeline::{process, ProcessResult, Seeker};
pub use record::Record;
pub use search::{search, search_with};
