//! The ranking sources and how each one is read.

use super::table::TableLayout;
use super::{SourceDescriptor, Strategy};
use crate::browser::Readiness;
use crate::models::SourceId;

pub const PYPL: SourceDescriptor = SourceDescriptor {
    id: SourceId::Pypl,
    url: "https://pypl.github.io/PYPL.html",
    readiness: Readiness::Selector("table"),
    strategy: Strategy::Table(TableLayout {
        rows: "table tbody tr",
        rank_col: 0,
        label_col: 2,
        min_cols: 3,
    }),
    top_n: true,
    reverse: false,
};

pub const TIOBE: SourceDescriptor = SourceDescriptor {
    id: SourceId::Tiobe,
    url: "https://www.tiobe.com/tiobe-index/",
    readiness: Readiness::Selector(".table-top20"),
    strategy: Strategy::Table(TableLayout {
        rows: ".table-top20 tbody tr",
        rank_col: 0,
        label_col: 4,
        min_cols: 6,
    }),
    top_n: true,
    reverse: false,
};

pub const GEEKS_FOR_GEEKS: SourceDescriptor = SourceDescriptor {
    id: SourceId::GeeksForGeeks,
    url: "https://www.geeksforgeeks.org/highest-paying-programming-languages-2024/",
    readiness: Readiness::Body,
    strategy: Strategy::NumberedList,
    top_n: true,
    reverse: false,
};

// The article counts down, so the best paid language comes last.
pub const WITH_CODE_EXAMPLE: SourceDescriptor = SourceDescriptor {
    id: SourceId::WithCodeExample,
    url: "https://golang.withcodeexample.com/blog/top-highest-paying-programming-languages-to-learn-in-2024/",
    readiness: Readiness::Body,
    strategy: Strategy::NumberedList,
    top_n: true,
    reverse: true,
};

pub const DIGITALOGY: SourceDescriptor = SourceDescriptor {
    id: SourceId::Digitalogy,
    url: "https://www.digitalogy.co/blog/programming-languages-from-easy-to-hard/",
    readiness: Readiness::Body,
    strategy: Strategy::NumberedList,
    top_n: false,
    reverse: false,
};

pub const LINKEDIN: SourceDescriptor = SourceDescriptor {
    id: SourceId::LinkedIn,
    url: "https://www.linkedin.com/pulse/navigating-learning-curve-definitive-ranking-languages-ibrahim-khalil/",
    readiness: Readiness::Body,
    strategy: Strategy::NumberedList,
    top_n: false,
    reverse: false,
};

/// Every source scraped on a run, in report order.
pub const ALL: [SourceDescriptor; 6] = [
    PYPL,
    TIOBE,
    GEEKS_FOR_GEEKS,
    WITH_CODE_EXAMPLE,
    DIGITALOGY,
    LINKEDIN,
];
