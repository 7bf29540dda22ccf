//! Progress-tracked improvement runner.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::area::ImprovementArea;
use crate::domain::bundle::ImprovementBundle;
use crate::domain::error::Result;
use crate::obs;
use crate::progress::{ProgressEntry, ProgressFormat, Severity, StepCounter};
use crate::sink::ProgressSink;

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    pub run_id: Uuid,

    /// Steps budgeted at construction.
    pub total_steps: usize,

    /// Progress lines actually emitted. May exceed `total_steps`.
    pub steps_logged: usize,

    /// Areas that ran, in processing order.
    pub areas_completed: Vec<ImprovementArea>,

    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl RunSummary {
    /// Whether the step prefix ran past the budgeted total.
    pub fn overflowed(&self) -> bool {
        self.steps_logged > self.total_steps
    }
}

/// Walks an [`ImprovementBundle`] through the fixed improvement sequence,
/// reporting each step to a [`ProgressSink`].
///
/// The step budget is `1 + selected areas`. Each selected area logs three lines
/// against one budgeted step, so the displayed step can pass the total.
///
/// A runner is good for one [`ImproveAgent::run`]; `run` consumes it.
pub struct ImproveAgent<S: ProgressSink> {
    run_id: Uuid,
    data: ImprovementBundle,
    sink: S,
    format: ProgressFormat,
    steps: StepCounter,
    completed: Vec<ImprovementArea>,
}

impl<S: ProgressSink> ImproveAgent<S> {
    pub fn new(data: ImprovementBundle, sink: S) -> Self {
        let total = 1 + data.areas().selected_count();
        Self {
            run_id: Uuid::new_v4(),
            data,
            sink,
            format: ProgressFormat::default(),
            steps: StepCounter::new(total),
            completed: Vec::new(),
        }
    }

    /// Replace the marker policy used to render lines.
    pub fn with_format(mut self, format: ProgressFormat) -> Self {
        self.format = format;
        self
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn data(&self) -> &ImprovementBundle {
        &self.data
    }

    pub fn current_step(&self) -> usize {
        self.steps.current()
    }

    pub fn total_steps(&self) -> usize {
        self.steps.total()
    }

    /// Consume a step and send `[current/total] {marker}{message}` to the sink.
    ///
    /// The step is consumed even if the sink rejects the entry.
    pub fn log_progress(&mut self, message: &str, severity: Severity) -> Result<()> {
        let step = self.steps.advance();
        let total = self.steps.total();
        let entry = ProgressEntry {
            step,
            total,
            severity,
            message: message.to_string(),
            line: self.format.render(step, total, severity, message),
            timestamp: Utc::now(),
        };
        self.sink.emit(&entry)
    }

    /// Log the repository, goals and selected areas.
    pub fn analyze_repository(&mut self) -> Result<()> {
        self.log_progress("Starting improvement process...", Severity::Info)?;

        let name = format!("Analyzing repository: {}", self.data.repository.name);
        self.log_progress(&name, Severity::Info)?;

        let goal = format!("Primary goal: {}", self.data.goals.primary_goal);
        self.log_progress(&goal, Severity::Info)?;

        let metrics = format!("Target metrics: {}", self.data.goals.target_metrics);
        self.log_progress(&metrics, Severity::Info)?;

        let focus = self
            .data
            .areas()
            .selected()
            .map(|area| area.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        self.log_progress(&format!("Focusing on: {}", focus), Severity::Info)
    }

    pub fn improve_navigation(&mut self) -> Result<()> {
        self.improve_area(ImprovementArea::Navigation)
    }

    pub fn improve_content(&mut self) -> Result<()> {
        self.improve_area(ImprovementArea::Content)
    }

    pub fn improve_forms(&mut self) -> Result<()> {
        self.improve_area(ImprovementArea::Forms)
    }

    pub fn improve_calls_to_action(&mut self) -> Result<()> {
        self.improve_area(ImprovementArea::CallsToAction)
    }

    pub fn improve_mobile(&mut self) -> Result<()> {
        self.improve_area(ImprovementArea::Mobile)
    }

    /// Run one area: nothing if unselected, otherwise analyzing, generating, completed.
    pub fn improve_area(&mut self, area: ImprovementArea) -> Result<()> {
        if !self.data.areas().is_selected(area) {
            obs::emit_area_skipped(area.as_str());
            return Ok(());
        }

        self.log_progress(area.analyzing_message(), Severity::Info)?;
        self.log_progress(area.generating_message(), Severity::Info)?;
        self.log_progress(area.completed_message(), Severity::Success)?;
        self.completed.push(area);
        Ok(())
    }

    /// Run the whole sequence.
    ///
    /// On the first fault the remaining steps are skipped, an error line carrying the
    /// fault text is logged, and the fault is returned unchanged.
    pub fn run(mut self) -> Result<RunSummary> {
        let run_id = self.run_id.to_string();
        let _span = obs::RunSpan::enter(&run_id, &self.data.repository.name);
        let started_at = Utc::now();
        let start = Instant::now();

        obs::emit_run_started(&run_id, &self.data.repository.name, self.steps.total());

        match self.run_steps() {
            Ok(()) => {
                let duration_ms = start.elapsed().as_millis() as u64;
                obs::emit_run_finished(&run_id, duration_ms, self.steps.current(), true);
                Ok(RunSummary {
                    run_id: self.run_id,
                    total_steps: self.steps.total(),
                    steps_logged: self.steps.current(),
                    areas_completed: self.completed,
                    started_at,
                    duration_ms,
                })
            }
            Err(fault) => {
                let message = format!("Error during improvement process: {}", fault);
                if let Err(e) = self.log_progress(&message, Severity::Error) {
                    obs::emit_error_line_dropped(&run_id, &e);
                }
                let duration_ms = start.elapsed().as_millis() as u64;
                obs::emit_run_finished(&run_id, duration_ms, self.steps.current(), false);
                Err(fault)
            }
        }
    }

    fn run_steps(&mut self) -> Result<()> {
        self.analyze_repository()?;
        self.improve_navigation()?;
        self.improve_content()?;
        self.improve_forms()?;
        self.improve_calls_to_action()?;
        self.improve_mobile()?;
        self.log_progress("Improvement process completed successfully", Severity::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::area::EngagementAreas;
    use crate::domain::bundle::{Engagement, Goals, RepositoryInfo};
    use crate::fakes::MemorySink;

    fn bundle(areas: EngagementAreas) -> ImprovementBundle {
        ImprovementBundle::new(
            RepositoryInfo::new("landing", "acme/landing", "", "https://github.com/acme/landing"),
            Goals {
                primary_goal: "More sign-ups".to_string(),
                call_to_actions: "Start trial".to_string(),
                target_metrics: "Conversion".to_string(),
            },
            Engagement {
                engagement_areas: areas,
                ..Engagement::default()
            },
        )
    }

    #[test]
    fn test_total_steps_counts_selected_areas() {
        let areas = EngagementAreas::new()
            .with(ImprovementArea::Navigation, true)
            .with(ImprovementArea::Forms, false)
            .with(ImprovementArea::Mobile, true);
        let agent = ImproveAgent::new(bundle(areas), MemorySink::new());
        assert_eq!(agent.total_steps(), 3);
        assert_eq!(agent.current_step(), 0);
    }

    #[test]
    fn test_log_progress_advances_and_renders() {
        let mut sink = MemorySink::new();
        let mut agent = ImproveAgent::new(bundle(EngagementAreas::new()), &mut sink);
        agent.log_progress("hello", Severity::Info).unwrap();
        agent.log_progress("done", Severity::Success).unwrap();
        assert_eq!(agent.current_step(), 2);
        drop(agent);

        assert_eq!(sink.lines(), vec!["[1/1] hello", "[2/1] ✓ done"]);
    }

    #[test]
    fn test_unselected_area_consumes_no_step() {
        let mut sink = MemorySink::new();
        let mut agent = ImproveAgent::new(bundle(EngagementAreas::new()), &mut sink);
        agent.improve_forms().unwrap();
        assert_eq!(agent.current_step(), 0);
        drop(agent);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_selected_area_logs_three_lines() {
        let mut sink = MemorySink::new();
        let areas = EngagementAreas::new().with(ImprovementArea::CallsToAction, true);
        let mut agent = ImproveAgent::new(bundle(areas), &mut sink);
        agent.improve_calls_to_action().unwrap();
        drop(agent);

        assert_eq!(
            sink.messages(),
            vec![
                "Analyzing call-to-action elements...",
                "Generating CTA improvements...",
                "CTA improvements completed",
            ]
        );
        assert_eq!(sink.entries()[2].severity, Severity::Success);
    }

    #[test]
    fn test_ascii_format_is_applied() {
        let mut sink = MemorySink::new();
        let agent = ImproveAgent::new(bundle(EngagementAreas::new()), &mut sink)
            .with_format(ProgressFormat::ascii());
        agent.run().unwrap();

        assert_eq!(
            sink.lines().last().unwrap(),
            "[6/1] [ok] Improvement process completed successfully"
        );
    }
}
