//! Drives a [`Coordinator`]: runs the tasks it hands back and feeds their
//! completions in as they finish, in whatever order the backend answers.

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};

use stockroom_core::FormKind;

use crate::coordinator::{Action, Completion, Coordinator, Task, TaskKind};
use crate::presenter::Screen;

pub struct Session {
    coordinator: Coordinator,
    pending: FuturesUnordered<BoxFuture<'static, (TaskKind, Completion)>>,
    requests_in_flight: usize,
}

impl Session {
    #[must_use]
    pub fn new(coordinator: Coordinator) -> Self {
        Self {
            coordinator,
            pending: FuturesUnordered::new(),
            requests_in_flight: 0,
        }
    }

    #[must_use]
    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    #[must_use]
    pub fn screen(&self) -> &Screen {
        self.coordinator.screen()
    }

    /// No backend request is outstanding. Pending timers do not count.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.requests_in_flight == 0
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Dispatch an action and queue whatever it asks for. Does not wait.
    pub fn submit(&mut self, action: Action) {
        let tasks = self.coordinator.dispatch(action);
        self.enqueue(tasks);
    }

    /// Wait for the next task to finish and apply it. Returns `false` when
    /// nothing is pending.
    pub async fn next_completion(&mut self) -> bool {
        let Some((kind, completion)) = self.pending.next().await else {
            return false;
        };
        if kind == TaskKind::Request {
            self.requests_in_flight = self.requests_in_flight.saturating_sub(1);
        }
        let follow_ups = self.coordinator.apply(completion);
        self.enqueue(follow_ups);
        true
    }

    /// Apply completions until no request is in flight, including any
    /// follow-up requests they trigger. Popup timers keep running.
    pub async fn settle(&mut self) {
        while !self.is_idle() {
            if !self.next_completion().await {
                break;
            }
        }
    }

    /// Submit an action and settle.
    pub async fn run(&mut self, action: Action) {
        self.submit(action);
        self.settle().await;
    }

    /// Open a create form, fill it field by field, submit and settle.
    pub async fn fill_and_submit(&mut self, kind: FormKind, fields: &[(&str, &str)]) {
        self.submit(Action::OpenForm(kind));
        for (field, value) in fields {
            self.submit(Action::EditField {
                form: kind,
                field: (*field).to_string(),
                value: (*value).to_string(),
            });
        }
        self.run(Action::SubmitForm(kind)).await;
    }

    fn enqueue(&mut self, tasks: Vec<Task>) {
        for Task { kind, future } in tasks {
            if kind == TaskKind::Request {
                self.requests_in_flight += 1;
            }
            self.pending.push(async move { (kind, future.await) }.boxed());
        }
    }
}
