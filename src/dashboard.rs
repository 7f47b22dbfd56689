use std::sync::Arc;

use log::debug;
use serde::Serialize;

use crate::data::aggregate::{self, CountEntry, MeanEntry, MonthCount};
use crate::data::filter::{self, FilterCriteria, FilteredView};
use crate::data::metrics::{self, DerivedMetrics};
use crate::data::model::{DateRange, JobDataset};

// ---------------------------------------------------------------------------
// Dashboard view – everything the presentation layer renders
// ---------------------------------------------------------------------------

/// Output of one compute pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub criteria: FilterCriteria,
    pub metrics: DerivedMetrics,
    pub top_roles: Vec<CountEntry>,
    pub top_skills: Vec<CountEntry>,
    pub top_industries: Vec<CountEntry>,
    pub monthly_trend: Vec<MonthCount>,
    pub top_locations_by_salary: Vec<MeanEntry>,
    pub listings: FilteredView,
}

// ---------------------------------------------------------------------------
// Dashboard – stateless pipeline over the base dataset
// ---------------------------------------------------------------------------

/// Holds the immutable base dataset; every call to [`compute`](Self::compute)
/// re-derives the whole view from it. Cheap to clone and safe to share
/// between sessions.
#[derive(Debug, Clone)]
pub struct Dashboard {
    base: Arc<JobDataset>,
}

impl Dashboard {
    pub fn new(base: JobDataset) -> Self {
        Dashboard {
            base: Arc::new(base),
        }
    }

    pub fn base(&self) -> &JobDataset {
        &self.base
    }

    /// Criteria with nothing selected.
    pub fn default_criteria(&self) -> FilterCriteria {
        FilterCriteria::for_dataset(&self.base)
    }

    /// Options for the job title picker.
    pub fn job_title_options(&self) -> &[String] {
        &self.base.job_titles
    }

    /// Options for the location picker.
    pub fn location_options(&self) -> &[String] {
        &self.base.locations
    }

    /// Default span of the date picker.
    pub fn date_bounds(&self) -> Option<DateRange> {
        self.base.date_bounds
    }

    /// Salary slider limits in thousands of USD.
    pub fn salary_slider_bounds(&self) -> Option<(i64, i64)> {
        self.base.salary_slider_bounds()
    }

    /// Filter, then aggregate and summarise the result.
    pub fn compute(&self, criteria: &FilterCriteria) -> DashboardView {
        let listings = filter::apply(&self.base, criteria);
        debug!(
            "criteria {:?} kept {} of {} postings",
            criteria,
            listings.len(),
            self.base.len()
        );

        let monthly_trend = aggregate::monthly_trend(&listings);
        let metrics = metrics::compute(&listings, &monthly_trend);

        DashboardView {
            criteria: criteria.clone(),
            metrics,
            top_roles: aggregate::role_demand(&listings),
            top_skills: aggregate::skill_demand(&listings),
            top_industries: aggregate::industry_demand(&listings),
            monthly_trend,
            top_locations_by_salary: aggregate::location_salary(&listings),
            listings,
        }
    }
}
