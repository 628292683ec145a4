//! Job watcher binding.

use crate::api::{
    Job, JobEvent, JobEventType, JobList, ListJobsOptions, WatchJobsOptions, JOB_STATE_COMPLETED,
    TERMINAL_JOB_STATES,
};
use crate::core::{Change, ChangeKind, Poller, Suppression, WatchedResource};
use crate::runtime::TokioSpawner;

use super::filter::{matches_optional, name_allowed, normalize_state, state_allowed};

/// Binds the poller to scheduler jobs, keyed by job id.
#[derive(Debug, Clone, Copy, Default)]
pub struct Jobs;

/// Poller producing [`JobEvent`]s.
pub type JobPoller<S = TokioSpawner> = Poller<Jobs, S>;

impl WatchedResource for Jobs {
    type Key = String;
    type Item = Job;
    type List = JobList;
    type ListOptions = ListJobsOptions;
    type Options = WatchJobsOptions;
    type Event = JobEvent;

    const KIND: &'static str = "job";

    fn list_options(options: &WatchJobsOptions) -> ListJobsOptions {
        ListJobsOptions {
            user_id: options.user_id.clone(),
            states: options.states.clone(),
            partition: options.partition.clone(),
            // Id allowlists are applied locally, so fetch every page.
            limit: 0,
            offset: 0,
        }
    }

    fn items(list: JobList) -> Vec<Job> {
        list.jobs
    }

    fn key(job: &Job) -> String {
        job.id.clone()
    }

    fn state(job: &Job) -> String {
        normalize_state(&job.state)
    }

    fn is_terminal(state: &str) -> bool {
        TERMINAL_JOB_STATES.iter().any(|s| *s == state)
    }

    fn removed_state(_previous: &str) -> Option<String> {
        Some(JOB_STATE_COMPLETED.to_string())
    }

    fn admits(options: &WatchJobsOptions, job: &Job) -> bool {
        name_allowed(&options.job_ids, &job.id)
            && matches_optional(options.user_id.as_deref(), &job.user_id)
            && matches_optional(options.partition.as_deref(), &job.partition)
            && state_allowed(&options.states, &job.state)
    }

    fn suppression(options: &WatchJobsOptions) -> Suppression {
        Suppression {
            exclude_new: options.exclude_new,
            exclude_completed: options.exclude_completed,
            event_types: options.event_types.iter().map(|t| t.as_str()).collect(),
            max_events: options.max_events.filter(|&max| max > 0),
        }
    }

    fn event_type(kind: ChangeKind) -> &'static str {
        job_event_type(kind).as_str()
    }

    fn event(change: Change<String, Job>, event_time_ms: u128) -> JobEvent {
        let event_type = job_event_type(change.kind);
        let previous_state = change.previous_state().map(str::to_owned);
        let new_state = change
            .new_state()
            .map_or_else(|| JOB_STATE_COMPLETED.to_string(), str::to_owned);
        let job = change
            .current
            .or(change.previous)
            .map(|entry| entry.item)
            .unwrap_or_else(|| Job::new(change.key.clone(), new_state.clone()));

        JobEvent {
            event_type,
            job_id: change.key,
            user_id: job.user_id.clone(),
            user_name: job.user_name.clone(),
            previous_state,
            new_state,
            event_time_ms,
            job,
        }
    }
}

const fn job_event_type(kind: ChangeKind) -> JobEventType {
    match kind {
        ChangeKind::New => JobEventType::New,
        ChangeKind::Changed => JobEventType::StateChange,
        ChangeKind::Removed => JobEventType::Completed,
    }
}
