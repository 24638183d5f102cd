//! Core domain types for the portfolio engine.

pub mod domain;

pub use domain::{
    DateRange, Granularity, Moiety, Phase, Project, ProjectStage, Retention, RetentionStage,
    ShutdownPeriod, SiteLocation, TimelineWindow,
};
